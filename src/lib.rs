//! palettegen - palette asset generator for design-tool plugins
//!
//! Takes a 24-color hex palette from the plugin UI and materializes it
//! inside the host design document as paint styles or color variables,
//! optionally with labeled swatch rectangles:
//! - hex normalization (3/6/8-digit, validated)
//! - idempotent collection/mode find-or-create
//! - idempotent per-slot variable reuse (re-runs update, never duplicate)
//! - first host failure aborts and is reported to the UI; no rollback
//!
//! # Usage (JavaScript shim)
//!
//! ```javascript
//! import init, { onUiMessage } from 'palettegen';
//! await init();
//! ui.onmessage = (msg) => onUiMessage(hostCapabilities, msg);
//! ```
//!
//! The engine writes through the [`document::DocumentService`] trait
//! only; native embedders implement it themselves or use
//! [`document::MemoryDocument`].

pub mod color;
pub mod document;
pub mod error;
pub mod message;
pub mod naming;
pub mod reconciler;
pub mod resolver;

#[cfg(target_arch = "wasm32")]
pub mod host;

use wasm_bindgen::prelude::*;

pub use color::{decode_hex, Rgba};
pub use error::{HostError, PaletteError, Result};
pub use message::{parse_request, GenerateRequest, Reply};
pub use reconciler::apply_request;
pub use resolver::resolve_context;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
