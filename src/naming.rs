//! Slot naming scheme
//!
//! Maps palette slot indices to the two-tier display names `"1".."12"`
//! then `"a1".."a12"` (base shades, then accent shades), and qualifies
//! them with an optional folder prefix.

use crate::error::{PaletteError, Result};

/// Number of slots in a palette request.
pub const PALETTE_SIZE: usize = 24;

/// Slots per naming tier (base vs. accent).
const TIER_SIZE: usize = 12;

/// Display name of one palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotName {
    /// `""` for the base tier, `"a"` for the accent tier.
    pub prefix: &'static str,
    /// 1-based position within the tier.
    pub number: usize,
}

impl std::fmt::Display for SlotName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.prefix, self.number)
    }
}

/// Name the slot at `index`.
///
/// Indices 0..12 map to `"1".."12"`, indices 12..24 to `"a1".."a12"`.
/// Anything past the palette is a caller bug, reported as
/// [`PaletteError::SlotIndexOutOfRange`] rather than silently computed.
pub fn slot_name(index: usize) -> Result<SlotName> {
    if index >= PALETTE_SIZE {
        return Err(PaletteError::SlotIndexOutOfRange(index));
    }
    Ok(SlotName {
        prefix: if index >= TIER_SIZE { "a" } else { "" },
        number: (index % TIER_SIZE) + 1,
    })
}

/// Folder-qualified asset name for the slot at `index`.
///
/// `"Brand"` yields `"Brand/a3"`; an empty folder yields the bare slot
/// name with no separator.
pub fn asset_path(folder: &str, index: usize) -> Result<String> {
    let slot = slot_name(index)?;
    if folder.is_empty() {
        Ok(slot.to_string())
    } else {
        Ok(format!("{folder}/{slot}"))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn base_tier_is_unprefixed() {
        for index in 0..TIER_SIZE {
            let name = slot_name(index).unwrap();
            assert_eq!(name.prefix, "");
            assert_eq!(name.number, index + 1);
        }
    }

    #[test]
    fn accent_tier_is_a_prefixed() {
        for index in TIER_SIZE..PALETTE_SIZE {
            let name = slot_name(index).unwrap();
            assert_eq!(name.prefix, "a");
            assert_eq!(name.number, index - TIER_SIZE + 1);
        }
    }

    #[test_case(0, "1")]
    #[test_case(11, "12")]
    #[test_case(12, "a1")]
    #[test_case(23, "a12")]
    fn display_at_tier_boundaries(index: usize, expected: &str) {
        assert_eq!(slot_name(index).unwrap().to_string(), expected);
    }

    #[test_case(24)]
    #[test_case(100)]
    #[test_case(usize::MAX)]
    fn out_of_range_rejected(index: usize) {
        assert!(matches!(
            slot_name(index),
            Err(PaletteError::SlotIndexOutOfRange(i)) if i == index
        ));
    }

    #[test]
    fn path_without_folder_is_bare() {
        assert_eq!(asset_path("", 0).unwrap(), "1");
        assert_eq!(asset_path("", 23).unwrap(), "a12");
    }

    #[test]
    fn path_with_folder_is_slash_joined() {
        assert_eq!(asset_path("Brand", 0).unwrap(), "Brand/1");
        assert_eq!(asset_path("Brand", 14).unwrap(), "Brand/a3");
    }

    #[test]
    fn path_propagates_range_check() {
        assert!(asset_path("Brand", 24).is_err());
    }
}
