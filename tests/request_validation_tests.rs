//! Tests for request-level validation: palette size, hex format, and
//! the JSON message boundary.

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use pollster::block_on;

    use palettegen::document::MemoryDocument;
    use palettegen::naming::PALETTE_SIZE;
    use palettegen::{apply_request, parse_request, GenerateRequest, PaletteError};

    fn palette() -> Vec<String> {
        (0..PALETTE_SIZE).map(|i| format!("#{:02x}1122", i)).collect()
    }

    fn style_request(colors: Vec<String>) -> GenerateRequest {
        GenerateRequest::Style {
            colors,
            folder_name: "Brand".to_string(),
            make_swatches: true,
        }
    }

    #[test]
    fn short_palette_is_rejected_before_any_mutation() {
        let doc = MemoryDocument::new();
        let mut colors = palette();
        colors.pop();
        let err = block_on(apply_request(&doc, &style_request(colors))).unwrap_err();
        assert!(matches!(
            err,
            PaletteError::InvalidPaletteSize {
                expected: 24,
                actual: 23
            }
        ));
        assert!(doc.styles().is_empty());
        assert!(doc.rectangles().is_empty());
    }

    #[test]
    fn long_palette_is_rejected() {
        let doc = MemoryDocument::new();
        let mut colors = palette();
        colors.push("#ffffff".to_string());
        let err = block_on(apply_request(&doc, &style_request(colors))).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidPaletteSize { actual: 25, .. }));
    }

    #[test]
    fn malformed_hex_anywhere_mutates_nothing() {
        // Slot 23 is bad, but the whole palette is decoded before the
        // first host call, so slots 0..23 are never applied either.
        let doc = MemoryDocument::new();
        let mut colors = palette();
        colors[23] = "#not-hex".to_string();
        let err = block_on(apply_request(&doc, &style_request(colors))).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidColorFormat(_)));
        assert!(doc.styles().is_empty());
        assert!(doc.rectangles().is_empty());
    }

    #[test]
    fn malformed_hex_in_variable_kind_resolves_nothing() {
        let doc = MemoryDocument::new();
        let mut colors = palette();
        colors[0] = "#12345".to_string();
        let req = GenerateRequest::Variable {
            colors,
            folder_name: "Brand".to_string(),
            make_swatches: false,
            collection_name: Some("Tokens".to_string()),
            mode_name: None,
        };
        let err = block_on(apply_request(&doc, &req)).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidColorFormat(_)));
        assert!(doc.collections().is_empty(), "no collection created");
    }

    #[test]
    fn json_message_drives_the_engine_end_to_end() {
        let colors_json = palette()
            .iter()
            .map(|c| format!("{c:?}"))
            .collect::<Vec<_>>()
            .join(",");
        let json = format!(
            r#"{{"kind":"style","colors":[{colors_json}],"folderName":"Brand","makeSwatches":false}}"#
        );
        let request = parse_request(&json).unwrap();

        let doc = MemoryDocument::new();
        block_on(apply_request(&doc, &request)).unwrap();
        assert_eq!(doc.styles().len(), PALETTE_SIZE);
    }

    #[test]
    fn error_messages_are_human_readable() {
        let doc = MemoryDocument::new();
        let mut colors = palette();
        colors[0] = "oops".to_string();
        let err = block_on(apply_request(&doc, &style_request(colors))).unwrap_err();
        let reply = palettegen::Reply::from_error(&err);
        let palettegen::Reply::Error { message } = reply;
        assert!(message.contains("oops"), "got: {message}");
    }
}
