//! Hex color codec
//!
//! Normalizes palette hex tokens into unit-range RGBA. Accepts 3-digit
//! shorthand, 6-digit RGB, and 8-digit RGBA, with an optional leading `#`.

use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, Result};

/// Normalized color: unit-range channels, alpha defaults to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Build from 8-bit channels, fully opaque.
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: 1.0,
        }
    }

    /// Replace the alpha channel with an 8-bit value.
    pub fn with_alpha_byte(mut self, alpha: u8) -> Self {
        self.a = f64::from(alpha) / 255.0;
        self
    }
}

/// Decode a hex color token into a normalized [`Rgba`].
///
/// - `"abc"` / `"#abc"`: shorthand, each digit doubled (`"f"` to `"ff"`)
/// - `"aabbcc"` / `"#aabbcc"`: RGB, alpha 1
/// - `"aabbccdd"` / `"#aabbccdd"`: RGBA, last byte is alpha
///
/// Any other length, or any non-hex digit, is rejected with
/// [`PaletteError::InvalidColorFormat`].
pub fn decode_hex(token: &str) -> Result<Rgba> {
    let hex = token.trim().trim_start_matches('#');

    match hex.len() {
        3 => {
            let r = nibble_doubled(hex, 0, token)?;
            let g = nibble_doubled(hex, 1, token)?;
            let b = nibble_doubled(hex, 2, token)?;
            Ok(Rgba::from_bytes(r, g, b))
        }
        6 => {
            let r = channel_byte(hex, 0, token)?;
            let g = channel_byte(hex, 2, token)?;
            let b = channel_byte(hex, 4, token)?;
            Ok(Rgba::from_bytes(r, g, b))
        }
        8 => {
            let r = channel_byte(hex, 0, token)?;
            let g = channel_byte(hex, 2, token)?;
            let b = channel_byte(hex, 4, token)?;
            let a = channel_byte(hex, 6, token)?;
            Ok(Rgba::from_bytes(r, g, b).with_alpha_byte(a))
        }
        _ => Err(PaletteError::InvalidColorFormat(token.to_string())),
    }
}

/// Parse the 2-digit channel starting at `start`.
fn channel_byte(hex: &str, start: usize, token: &str) -> Result<u8> {
    hex.get(start..start + 2)
        .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        .ok_or_else(|| PaletteError::InvalidColorFormat(token.to_string()))
}

/// Parse the single shorthand digit at `pos` and double it to a byte.
fn nibble_doubled(hex: &str, pos: usize, token: &str) -> Result<u8> {
    let digit = hex
        .get(pos..pos + 1)
        .and_then(|d| u8::from_str_radix(d, 16).ok())
        .ok_or_else(|| PaletteError::InvalidColorFormat(token.to_string()))?;
    // 0xA doubled is 0xAA = 0xA * 17
    Ok(digit * 17)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn six_digit_channels_in_order() {
        let c = decode_hex("#001122").unwrap();
        assert_eq!(c.r, 0.0);
        assert_eq!(c.g, f64::from(0x11u8) / 255.0);
        assert_eq!(c.b, f64::from(0x22u8) / 255.0);
        assert_eq!(c.a, 1.0);
    }

    #[test_case("#FF0000", 1.0, 0.0, 0.0; "red upper")]
    #[test_case("00ff00", 0.0, 1.0, 0.0; "green no hash")]
    #[test_case("#0000fF", 0.0, 0.0, 1.0; "blue mixed case")]
    fn six_digit_primaries(token: &str, r: f64, g: f64, b: f64) {
        let c = decode_hex(token).unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (r, g, b, 1.0));
    }

    #[test]
    fn eight_digit_alpha_from_last_byte() {
        let c = decode_hex("#00112233").unwrap();
        assert_eq!(c.a, f64::from(0x33u8) / 255.0);
        assert_eq!(c.b, f64::from(0x22u8) / 255.0);
    }

    #[test]
    fn eight_digit_opaque_alpha() {
        let c = decode_hex("#000000ff").unwrap();
        assert_eq!(c.a, 1.0);
    }

    #[test_case("abc", "aabbcc")]
    #[test_case("#f80", "#ff8800")]
    #[test_case("000", "000000")]
    #[test_case("FFF", "FFFFFF")]
    fn shorthand_matches_doubled(short: &str, long: &str) {
        assert_eq!(decode_hex(short).unwrap(), decode_hex(long).unwrap());
    }

    #[test_case(""; "empty")]
    #[test_case("#"; "bare hash")]
    #[test_case("#ffff"; "four digits")]
    #[test_case("#fffff"; "five digits")]
    #[test_case("#fffffff"; "seven digits")]
    #[test_case("#fffffffff"; "nine digits")]
    fn bad_length_rejected(token: &str) {
        assert!(matches!(
            decode_hex(token),
            Err(PaletteError::InvalidColorFormat(_))
        ));
    }

    #[test_case("#gg0000"; "non hex pair")]
    #[test_case("#0000zz"; "non hex tail")]
    #[test_case("#xyz"; "non hex shorthand")]
    #[test_case("#ааbbcc"; "cyrillic lookalike")]
    fn bad_digits_rejected(token: &str) {
        assert!(matches!(
            decode_hex(token),
            Err(PaletteError::InvalidColorFormat(_))
        ));
    }

    #[test]
    fn leading_hash_optional() {
        assert_eq!(decode_hex("aabbcc").unwrap(), decode_hex("#aabbcc").unwrap());
    }

    #[test]
    fn surrounding_whitespace_tolerated() {
        assert_eq!(
            decode_hex(" #aabbcc ").unwrap(),
            decode_hex("#aabbcc").unwrap()
        );
    }
}
