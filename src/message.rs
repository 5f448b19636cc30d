//! UI message model
//!
//! The plugin UI posts one request per session; the engine replies only
//! on failure. Field names are camelCase on the wire to match the UI
//! side, and the request kind is a tagged union so every consumer has to
//! match both shapes exhaustively.

use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, Result};

/// One palette-generation request from the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GenerateRequest {
    /// Materialize the palette as paint styles.
    #[serde(rename_all = "camelCase")]
    Style {
        colors: Vec<String>,
        folder_name: String,
        make_swatches: bool,
    },
    /// Materialize the palette as color variables in a collection/mode.
    #[serde(rename_all = "camelCase")]
    Variable {
        colors: Vec<String>,
        folder_name: String,
        make_swatches: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collection_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode_name: Option<String>,
    },
}

impl GenerateRequest {
    /// The 24 hex tokens, regardless of kind.
    pub fn colors(&self) -> &[String] {
        match self {
            Self::Style { colors, .. } | Self::Variable { colors, .. } => colors,
        }
    }

    /// The folder/namespace the assets are filed under.
    pub fn folder_name(&self) -> &str {
        match self {
            Self::Style { folder_name, .. } | Self::Variable { folder_name, .. } => folder_name,
        }
    }

    /// Whether swatch rectangles were requested.
    pub fn make_swatches(&self) -> bool {
        match self {
            Self::Style { make_swatches, .. } | Self::Variable { make_swatches, .. } => {
                *make_swatches
            }
        }
    }
}

/// Failure reply posted back to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Reply {
    Error { message: String },
}

impl Reply {
    /// Wrap an engine error as a UI reply.
    pub fn from_error(err: &PaletteError) -> Self {
        Self::Error {
            message: err.to_string(),
        }
    }
}

/// Parse a JSON request message.
///
/// # Errors
/// Returns [`PaletteError::BadRequest`] if the message does not match
/// either request shape.
pub fn parse_request(json: &str) -> Result<GenerateRequest> {
    serde_json::from_str(json).map_err(|e| PaletteError::BadRequest(e.to_string()))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn style_request_round_trip() {
        let json = r##"{
            "kind": "style",
            "colors": ["#ff0000", "#00ff00"],
            "folderName": "Brand",
            "makeSwatches": true
        }"##;
        let req = parse_request(json).unwrap();
        match &req {
            GenerateRequest::Style {
                colors,
                folder_name,
                make_swatches,
            } => {
                assert_eq!(colors.len(), 2);
                assert_eq!(folder_name, "Brand");
                assert!(make_swatches);
            }
            GenerateRequest::Variable { .. } => panic!("wrong kind"),
        }
    }

    #[test]
    fn variable_request_optional_fields_default() {
        let json = r#"{
            "kind": "variable",
            "colors": [],
            "folderName": "",
            "makeSwatches": false
        }"#;
        let req = parse_request(json).unwrap();
        match req {
            GenerateRequest::Variable {
                collection_name,
                mode_name,
                ..
            } => {
                assert!(collection_name.is_none());
                assert!(mode_name.is_none());
            }
            GenerateRequest::Style { .. } => panic!("wrong kind"),
        }
    }

    #[test]
    fn variable_request_with_collection_and_mode() {
        let json = r#"{
            "kind": "variable",
            "colors": [],
            "folderName": "Brand",
            "makeSwatches": true,
            "collectionName": "Tokens",
            "modeName": "Dark"
        }"#;
        let req = parse_request(json).unwrap();
        match req {
            GenerateRequest::Variable {
                collection_name,
                mode_name,
                ..
            } => {
                assert_eq!(collection_name.as_deref(), Some("Tokens"));
                assert_eq!(mode_name.as_deref(), Some("Dark"));
            }
            GenerateRequest::Style { .. } => panic!("wrong kind"),
        }
    }

    #[test]
    fn unknown_kind_rejected() {
        let json = r#"{"kind": "gradient", "colors": []}"#;
        assert!(matches!(
            parse_request(json),
            Err(PaletteError::BadRequest(_))
        ));
    }

    #[test]
    fn error_reply_wire_shape() {
        let reply = Reply::Error {
            message: "boom".into(),
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert_eq!(json, r#"{"kind":"error","message":"boom"}"#);
    }
}
