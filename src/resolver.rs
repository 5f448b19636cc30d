//! Collection and mode resolution.
//!
//! Finds or creates the variable collection and mode a request targets,
//! in a fixed fallback order chosen so that repeated runs with the same
//! names converge on the same collection/mode instead of sprawling, while
//! a first run with no names still lands somewhere sensible.

use crate::document::{CollectionContext, CollectionInfo, DocumentService, ModeId};
use crate::error::{HostError, PaletteError, Result};

/// Collection name used when none was requested and none exists.
pub const DEFAULT_COLLECTION_NAME: &str = "Colors";

/// The host's label for the implicit default mode of a new collection.
pub const DEFAULT_MODE_LABEL: &str = "Mode 1";

/// Resolve the collection and mode for one request.
///
/// Collection, first match wins:
/// 1. exact name match among existing collections;
/// 2. no name requested and at least one collection exists, take the first
///    existing one;
/// 3. create, under the requested name or [`DEFAULT_COLLECTION_NAME`].
///
/// Mode, given the resolved collection:
/// 1. no mode requested, or the request names the default label while the
///    collection still has its single implicit mode, take the first mode,
///    whatever it is actually called;
/// 2. exact name match among existing modes;
/// 3. add a new mode with the requested name.
///
/// Host failures map to [`PaletteError::CollectionResolution`] or
/// [`PaletteError::ModeResolution`]. A collection created in step 3 is
/// not rolled back if mode resolution then fails.
pub async fn resolve_context<D: DocumentService>(
    doc: &D,
    collection_name: Option<&str>,
    mode_name: Option<&str>,
) -> Result<CollectionContext> {
    let existing = doc
        .list_collections()
        .await
        .map_err(PaletteError::CollectionResolution)?;

    let collection = match collection_name {
        Some(name) => match existing.into_iter().find(|c| c.name == name) {
            Some(c) => c,
            None => doc
                .create_collection(name)
                .await
                .map_err(PaletteError::CollectionResolution)?,
        },
        None => match existing.into_iter().next() {
            Some(first) => first,
            None => doc
                .create_collection(DEFAULT_COLLECTION_NAME)
                .await
                .map_err(PaletteError::CollectionResolution)?,
        },
    };

    let active_mode = resolve_mode(doc, &collection, mode_name).await?;

    Ok(CollectionContext {
        collection,
        active_mode,
    })
}

async fn resolve_mode<D: DocumentService>(
    doc: &D,
    collection: &CollectionInfo,
    mode_name: Option<&str>,
) -> Result<ModeId> {
    let name = match mode_name {
        None => return first_mode(collection),
        // Requesting the default label against a collection that still
        // has its single implicit mode means "use whatever is there",
        // even if the host renamed it.
        Some(name) if name == DEFAULT_MODE_LABEL && collection.modes.len() == 1 => {
            return first_mode(collection)
        }
        Some(name) => name,
    };

    if let Some(mode) = collection.modes.iter().find(|m| m.name == name) {
        return Ok(mode.id.clone());
    }

    doc.add_mode(&collection.id, name)
        .await
        .map_err(PaletteError::ModeResolution)
}

fn first_mode(collection: &CollectionInfo) -> Result<ModeId> {
    collection
        .modes
        .first()
        .map(|m| m.id.clone())
        .ok_or_else(|| {
            PaletteError::ModeResolution(HostError(format!(
                "collection {:?} has no modes",
                collection.name
            )))
        })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use pollster::block_on;

    use super::*;
    use crate::document::{HostOp, MemoryDocument};

    #[test]
    fn creates_collection_when_document_is_empty() {
        let doc = MemoryDocument::new();
        let ctx = block_on(resolve_context(&doc, None, None)).unwrap();
        assert_eq!(ctx.collection.name, DEFAULT_COLLECTION_NAME);
        assert_eq!(doc.collections().len(), 1);
    }

    #[test]
    fn reuses_collection_by_exact_name() {
        let doc = MemoryDocument::new();
        let seeded = doc.seed_collection("Tokens", &[]);
        doc.seed_collection("Other", &[]);

        let ctx = block_on(resolve_context(&doc, Some("Tokens"), None)).unwrap();
        assert_eq!(ctx.collection.id, seeded.id);
        assert_eq!(doc.collections().len(), 2);
    }

    #[test]
    fn unqualified_request_takes_first_existing_collection() {
        let doc = MemoryDocument::new();
        let first = doc.seed_collection("First", &[]);
        doc.seed_collection("Second", &[]);

        let ctx = block_on(resolve_context(&doc, None, None)).unwrap();
        assert_eq!(ctx.collection.id, first.id);
        assert_eq!(doc.collections().len(), 2);
    }

    #[test]
    fn named_request_creates_when_missing() {
        let doc = MemoryDocument::new();
        doc.seed_collection("Other", &[]);

        let ctx = block_on(resolve_context(&doc, Some("Tokens"), None)).unwrap();
        assert_eq!(ctx.collection.name, "Tokens");
        assert_eq!(doc.collections().len(), 2);
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let doc = MemoryDocument::new();
        let a = block_on(resolve_context(&doc, Some("Tokens"), Some("Dark"))).unwrap();
        let b = block_on(resolve_context(&doc, Some("Tokens"), Some("Dark"))).unwrap();
        assert_eq!(a.collection.id, b.collection.id);
        assert_eq!(a.active_mode, b.active_mode);
        assert_eq!(doc.collections().len(), 1);
        let modes = &doc.collections()[0].modes;
        assert_eq!(modes.len(), 2, "default mode plus Dark, no duplicates");
    }

    #[test]
    fn no_mode_requested_uses_first_mode() {
        let doc = MemoryDocument::new();
        let seeded = doc.seed_collection("Tokens", &["Light", "Dark"]);
        let ctx = block_on(resolve_context(&doc, Some("Tokens"), None)).unwrap();
        assert_eq!(ctx.active_mode, seeded.modes[0].id);
    }

    #[test]
    fn default_label_reuses_singleton_mode() {
        // The sole mode is not literally named "Mode 1"; requesting the
        // default label must still land on it rather than add a mode.
        let doc = MemoryDocument::new();
        let seeded = doc.seed_collection("Tokens", &["Values"]);
        let ctx = block_on(resolve_context(&doc, Some("Tokens"), Some(DEFAULT_MODE_LABEL))).unwrap();
        assert_eq!(ctx.active_mode, seeded.modes[0].id);
        assert_eq!(doc.collections()[0].modes.len(), 1);
    }

    #[test]
    fn default_label_matches_exactly_when_multiple_modes() {
        let doc = MemoryDocument::new();
        let seeded = doc.seed_collection("Tokens", &["Dark", DEFAULT_MODE_LABEL]);
        let ctx = block_on(resolve_context(&doc, Some("Tokens"), Some(DEFAULT_MODE_LABEL))).unwrap();
        assert_eq!(ctx.active_mode, seeded.modes[1].id);
    }

    #[test]
    fn missing_mode_is_added() {
        let doc = MemoryDocument::new();
        doc.seed_collection("Tokens", &["Light"]);
        let ctx = block_on(resolve_context(&doc, Some("Tokens"), Some("Dark"))).unwrap();
        let modes = &doc.collections()[0].modes;
        assert_eq!(modes.len(), 2);
        assert_eq!(modes[1].name, "Dark");
        assert_eq!(ctx.active_mode, modes[1].id);
    }

    #[test]
    fn list_failure_is_collection_resolution() {
        let doc = MemoryDocument::new();
        doc.fail_next(HostOp::ListCollections);
        let err = block_on(resolve_context(&doc, Some("Tokens"), None)).unwrap_err();
        assert!(matches!(err, PaletteError::CollectionResolution(_)));
        assert!(doc.collections().is_empty(), "nothing created on failure");
    }

    #[test]
    fn create_failure_is_collection_resolution() {
        let doc = MemoryDocument::new();
        doc.fail_next(HostOp::CreateCollection);
        let err = block_on(resolve_context(&doc, Some("Tokens"), None)).unwrap_err();
        assert!(matches!(err, PaletteError::CollectionResolution(_)));
    }

    #[test]
    fn add_mode_failure_is_mode_resolution() {
        let doc = MemoryDocument::new();
        doc.seed_collection("Tokens", &["Light"]);
        doc.fail_next(HostOp::AddMode);
        let err = block_on(resolve_context(&doc, Some("Tokens"), Some("Dark"))).unwrap_err();
        assert!(matches!(err, PaletteError::ModeResolution(_)));
    }

    #[test]
    fn new_collection_survives_mode_failure() {
        // Contract: a collection created during resolution is not rolled
        // back when the mode step then fails.
        let doc = MemoryDocument::new();
        doc.fail_next(HostOp::AddMode);
        let err = block_on(resolve_context(&doc, Some("Tokens"), Some("Dark"))).unwrap_err();
        assert!(matches!(err, PaletteError::ModeResolution(_)));
        assert_eq!(doc.collections().len(), 1);
    }
}
