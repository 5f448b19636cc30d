//! Tests for variable-kind palette generation.

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use pollster::block_on;

    use palettegen::document::{FillBinding, HostOp, MemoryDocument, ModeId};
    use palettegen::naming::PALETTE_SIZE;
    use palettegen::resolver::DEFAULT_MODE_LABEL;
    use palettegen::{apply_request, GenerateRequest, PaletteError};

    // ================================================================
    // Test helpers
    // ================================================================

    /// 24 distinct opaque colors.
    fn palette() -> Vec<String> {
        (0..PALETTE_SIZE)
            .map(|i| format!("#{:02x}00{:02x}", i * 10, 255 - i * 10))
            .collect()
    }

    /// A second palette, distinct from the first in every slot.
    fn updated_palette() -> Vec<String> {
        (0..PALETTE_SIZE)
            .map(|i| format!("#00{:02x}{:02x}", i * 10, i * 10))
            .collect()
    }

    fn variable_request(
        colors: Vec<String>,
        folder: &str,
        collection: Option<&str>,
        mode: Option<&str>,
    ) -> GenerateRequest {
        GenerateRequest::Variable {
            colors,
            folder_name: folder.to_string(),
            make_swatches: false,
            collection_name: collection.map(str::to_string),
            mode_name: mode.map(str::to_string),
        }
    }

    /// The mode the request resolved to, assuming a single collection.
    fn sole_mode(doc: &MemoryDocument, name: &str) -> ModeId {
        let collections = doc.collections();
        assert_eq!(collections.len(), 1);
        collections[0]
            .modes
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.id.clone())
            .unwrap()
    }

    // ================================================================
    // Creation
    // ================================================================

    #[test]
    fn creates_24_variables_in_a_fresh_collection() {
        let doc = MemoryDocument::new();
        let req = variable_request(palette(), "Brand", Some("Tokens"), None);
        block_on(apply_request(&doc, &req)).unwrap();

        let collections = doc.collections();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].name, "Tokens");
        assert_eq!(collections[0].variable_ids.len(), PALETTE_SIZE);

        let variables = doc.variables();
        assert_eq!(variables.len(), PALETTE_SIZE);
        assert_eq!(variables[0].name, "Brand/1");
        assert_eq!(variables[12].name, "Brand/a1");
        assert_eq!(variables[23].name, "Brand/a12");
    }

    #[test]
    fn values_land_under_the_resolved_mode() {
        let doc = MemoryDocument::new();
        let req = variable_request(palette(), "Brand", Some("Tokens"), Some("Dark"));
        block_on(apply_request(&doc, &req)).unwrap();

        let mode = sole_mode(&doc, "Dark");
        for variable in doc.variables() {
            assert_eq!(variable.values.len(), 1);
            assert!(variable.values.contains_key(&mode));
        }
    }

    #[test]
    fn eight_digit_hex_carries_alpha_into_the_value() {
        let mut colors = palette();
        colors[0] = "#11223380".to_string();
        let doc = MemoryDocument::new();
        let req = variable_request(colors, "Brand", Some("Tokens"), None);
        block_on(apply_request(&doc, &req)).unwrap();

        let mode = sole_mode(&doc, DEFAULT_MODE_LABEL);
        let value = doc.variables()[0].values[&mode];
        assert_eq!(value.a, f64::from(0x80u8) / 255.0);
    }

    // ================================================================
    // Idempotent re-runs
    // ================================================================

    #[test]
    fn rerun_updates_in_place_instead_of_duplicating() {
        let doc = MemoryDocument::new();
        let first = variable_request(palette(), "Brand", Some("Tokens"), Some("Dark"));
        block_on(apply_request(&doc, &first)).unwrap();
        let ids_after_first: Vec<_> = doc.variables().iter().map(|v| v.id.clone()).collect();

        let second = variable_request(updated_palette(), "Brand", Some("Tokens"), Some("Dark"));
        block_on(apply_request(&doc, &second)).unwrap();

        let variables = doc.variables();
        assert_eq!(variables.len(), PALETTE_SIZE, "24 variables, not 48");
        let ids_after_second: Vec<_> = variables.iter().map(|v| v.id.clone()).collect();
        assert_eq!(ids_after_first, ids_after_second);

        // Values reflect the second call.
        let mode = sole_mode(&doc, "Dark");
        let value = variables[1].values[&mode];
        assert_eq!(value.r, 0.0);
        assert_eq!(value.g, f64::from(10u8) / 255.0);
    }

    #[test]
    fn same_names_in_another_collection_are_not_reused() {
        let doc = MemoryDocument::new();
        let elsewhere = doc.seed_collection("Elsewhere", &[]);
        block_on(doc_create_variable(&doc, "Brand/1", &elsewhere.id));

        let req = variable_request(palette(), "Brand", Some("Tokens"), None);
        block_on(apply_request(&doc, &req)).unwrap();

        // The "Brand/1" in Elsewhere is untouched; Tokens got its own.
        assert_eq!(doc.variables().len(), PALETTE_SIZE + 1);
        let tokens = doc
            .collections()
            .into_iter()
            .find(|c| c.name == "Tokens")
            .unwrap();
        assert_eq!(tokens.variable_ids.len(), PALETTE_SIZE);
    }

    async fn doc_create_variable(
        doc: &MemoryDocument,
        name: &str,
        collection: &palettegen::document::CollectionId,
    ) {
        use palettegen::document::DocumentService;
        doc.create_color_variable(name, collection).await.unwrap();
    }

    // ================================================================
    // Mode handling
    // ================================================================

    #[test]
    fn default_mode_label_reuses_the_implicit_mode() {
        let doc = MemoryDocument::new();
        doc.seed_collection("Tokens", &[]);
        let req = variable_request(palette(), "Brand", Some("Tokens"), Some(DEFAULT_MODE_LABEL));
        block_on(apply_request(&doc, &req)).unwrap();

        let collections = doc.collections();
        assert_eq!(collections[0].modes.len(), 1, "no mode added");
    }

    #[test]
    fn second_mode_gets_its_own_values() {
        let doc = MemoryDocument::new();
        let light = variable_request(palette(), "Brand", Some("Tokens"), Some("Light"));
        block_on(apply_request(&doc, &light)).unwrap();
        let dark = variable_request(updated_palette(), "Brand", Some("Tokens"), Some("Dark"));
        block_on(apply_request(&doc, &dark)).unwrap();

        assert_eq!(doc.variables().len(), PALETTE_SIZE);
        for variable in doc.variables() {
            assert_eq!(variable.values.len(), 2, "one value per mode");
        }
    }

    // ================================================================
    // Failure behavior
    // ================================================================

    #[test]
    fn collection_failure_creates_zero_variables() {
        let doc = MemoryDocument::new();
        doc.fail_next(HostOp::ListCollections);
        let req = variable_request(palette(), "Brand", Some("Tokens"), None);
        let err = block_on(apply_request(&doc, &req)).unwrap_err();
        assert!(matches!(err, PaletteError::CollectionResolution(_)));
        assert!(doc.variables().is_empty());
    }

    #[test]
    fn mode_failure_creates_zero_variables() {
        let doc = MemoryDocument::new();
        doc.seed_collection("Tokens", &["Light"]);
        doc.fail_next(HostOp::AddMode);
        let req = variable_request(palette(), "Brand", Some("Tokens"), Some("Dark"));
        let err = block_on(apply_request(&doc, &req)).unwrap_err();
        assert!(matches!(err, PaletteError::ModeResolution(_)));
        assert!(doc.variables().is_empty());
    }

    #[test]
    fn variable_create_failure_is_attributed_to_its_slot() {
        let doc = MemoryDocument::new();
        doc.fail_next(HostOp::CreateVariable);
        let req = variable_request(palette(), "Brand", Some("Tokens"), None);
        let err = block_on(apply_request(&doc, &req)).unwrap_err();
        assert!(matches!(err, PaletteError::AssetCreation { slot: 0, .. }));
        assert!(doc.variables().is_empty());
    }

    #[test]
    fn value_write_failure_keeps_earlier_slots() {
        let doc = MemoryDocument::new();
        doc.fail_next(HostOp::SetVariableValue);
        let req = variable_request(palette(), "Brand", Some("Tokens"), None);
        let err = block_on(apply_request(&doc, &req)).unwrap_err();
        assert!(matches!(err, PaletteError::AssetUpdate { slot: 0, .. }));
        // Slot 0's variable exists valueless; later slots never started.
        assert_eq!(doc.variables().len(), 1);
        assert!(doc.variables()[0].values.is_empty());
    }

    // ================================================================
    // Swatches
    // ================================================================

    #[test]
    fn swatches_carry_bound_variable_fills() {
        let doc = MemoryDocument::new();
        let req = GenerateRequest::Variable {
            colors: palette(),
            folder_name: "Brand".to_string(),
            make_swatches: true,
            collection_name: Some("Tokens".to_string()),
            mode_name: None,
        };
        block_on(apply_request(&doc, &req)).unwrap();

        let variables = doc.variables();
        let rects = doc.rectangles();
        assert_eq!(rects.len(), PALETTE_SIZE);
        for (rect, variable) in rects.iter().zip(&variables) {
            match &rect.fill {
                Some(FillBinding::Variable { variable: id, base }) => {
                    assert_eq!(id, &variable.id);
                    assert_eq!(base.a, 1.0);
                }
                other => panic!("expected variable fill, got {other:?}"),
            }
        }
        assert_eq!(doc.groups().len(), 1);
        assert_eq!(doc.groups()[0].name, "Brand");
    }
}
