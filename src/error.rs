//! Structured error types for palettegen.
//!
//! Every failure the engine can hit is named here; the wasm boundary
//! flattens whichever one occurs into a single human-readable reply.

/// Opaque failure reported by the document service.
///
/// The host API surfaces failures as free-form text (rejected names,
/// revoked permissions, detached documents); that text is carried
/// through unchanged.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl From<String> for HostError {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for HostError {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// All errors that can occur while applying a palette request.
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    /// Hex token with a bad length or non-hex digit.
    #[error("Invalid hex color: {0:?}")]
    InvalidColorFormat(String),

    /// Palette slot index outside 0..24.
    #[error("Palette slot index out of range: {0}")]
    SlotIndexOutOfRange(usize),

    /// Palette did not contain exactly 24 colors.
    #[error("Palette must contain {expected} colors, got {actual}")]
    InvalidPaletteSize { expected: usize, actual: usize },

    /// Could not locate or create the variable collection.
    #[error("Collection resolution failed: {0}")]
    CollectionResolution(#[source] HostError),

    /// Could not locate or create the requested mode.
    #[error("Mode resolution failed: {0}")]
    ModeResolution(#[source] HostError),

    /// Creating a style, variable, or swatch failed for one slot.
    #[error("Slot {slot}: asset creation failed: {source}")]
    AssetCreation { slot: usize, source: HostError },

    /// Updating an existing asset's value failed for one slot.
    #[error("Slot {slot}: asset update failed: {source}")]
    AssetUpdate { slot: usize, source: HostError },

    /// Malformed request message from the UI.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Host failure outside the per-slot loop (e.g. swatch grouping).
    #[error("Document service: {0}")]
    Host(#[from] HostError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PaletteError>;

#[cfg(target_arch = "wasm32")]
impl From<PaletteError> for wasm_bindgen::JsValue {
    fn from(e: PaletteError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
