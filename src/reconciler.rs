//! Palette reconciliation.
//!
//! Drives one request end to end: validates the palette, resolves the
//! collection/mode context once, then walks the 24 slots in order,
//! creating or updating one asset per slot and optionally one swatch
//! rectangle. The first host failure aborts the remaining slots; slots
//! already applied stay applied (the host's own undo history is the
//! recovery path, not a rollback here).

use std::collections::HashSet;

use crate::color::{decode_hex, Rgba};
use crate::document::{DocumentService, NodeId, VariableId};
use crate::error::{PaletteError, Result};
use crate::message::GenerateRequest;
use crate::naming::{asset_path, slot_name, PALETTE_SIZE};
use crate::resolver::resolve_context;

/// Swatch grid: 12 columns by 2 rows.
pub const GRID_COLS: usize = 12;
/// Swatch cell size.
pub const SWATCH_WIDTH: f64 = 96.0;
pub const SWATCH_HEIGHT: f64 = 48.0;
/// Distance between swatch origins along a row / down a column.
pub const COLUMN_PITCH: f64 = 100.0;
pub const ROW_PITCH: f64 = 52.0;

/// Apply one palette request against the document.
///
/// Input contract violations (wrong palette size, malformed hex) fail
/// before anything is mutated. Host failures mid-run abort with the
/// failing slot attributed in the error; see the module docs for the
/// no-rollback contract.
pub async fn apply_request<D: DocumentService>(doc: &D, request: &GenerateRequest) -> Result<()> {
    let tokens = request.colors();
    if tokens.len() != PALETTE_SIZE {
        return Err(PaletteError::InvalidPaletteSize {
            expected: PALETTE_SIZE,
            actual: tokens.len(),
        });
    }
    let palette = decode_palette(tokens)?;

    match request {
        GenerateRequest::Style {
            folder_name,
            make_swatches,
            ..
        } => apply_styles(doc, &palette, folder_name, *make_swatches).await,
        GenerateRequest::Variable {
            folder_name,
            make_swatches,
            collection_name,
            mode_name,
            ..
        } => {
            apply_variables(
                doc,
                &palette,
                folder_name,
                *make_swatches,
                collection_name.as_deref(),
                mode_name.as_deref(),
            )
            .await
        }
    }
}

/// Decode all 24 tokens up front so a malformed color never leaves the
/// document half-mutated.
fn decode_palette(tokens: &[String]) -> Result<Vec<Rgba>> {
    tokens.iter().map(|token| decode_hex(token)).collect()
}

/// Style kind: one fresh paint style per slot.
///
/// Styles are intentionally not deduplicated by name: every run creates
/// new ones, matching how the host treats paint styles as positional
/// assets. Variable kind is the idempotent path.
async fn apply_styles<D: DocumentService>(
    doc: &D,
    palette: &[Rgba],
    folder: &str,
    make_swatches: bool,
) -> Result<()> {
    let mut swatches = Vec::new();

    for (slot, color) in palette.iter().enumerate() {
        let path = asset_path(folder, slot)?;
        let style = doc
            .create_paint_style(&path)
            .await
            .map_err(|source| PaletteError::AssetCreation { slot, source })?;
        doc.set_style_paint(&style, *color)
            .await
            .map_err(|source| PaletteError::AssetUpdate { slot, source })?;

        if make_swatches {
            let node = create_swatch(doc, slot).await?;
            doc.set_fill_style(&node, &style)
                .await
                .map_err(|source| PaletteError::AssetUpdate { slot, source })?;
            swatches.push(node);
        }
    }

    finish_swatches(doc, &swatches, folder).await
}

/// Variable kind: find-or-create per slot within the resolved collection,
/// then write the value under the active mode.
async fn apply_variables<D: DocumentService>(
    doc: &D,
    palette: &[Rgba],
    folder: &str,
    make_swatches: bool,
    collection_name: Option<&str>,
    mode_name: Option<&str>,
) -> Result<()> {
    let ctx = resolve_context(doc, collection_name, mode_name).await?;

    // Dedup index, fetched once: slot names are distinct, so variables
    // created later in this run can never collide with this snapshot.
    let existing = doc.list_color_variables().await.map_err(PaletteError::Host)?;
    let in_collection: HashSet<&VariableId> = ctx.collection.variable_ids.iter().collect();

    let mut swatches = Vec::new();

    for (slot, color) in palette.iter().enumerate() {
        let path = asset_path(folder, slot)?;
        let variable = match existing
            .iter()
            .find(|v| v.name == path && in_collection.contains(&v.id))
        {
            Some(found) => found.clone(),
            None => doc
                .create_color_variable(&path, &ctx.collection.id)
                .await
                .map_err(|source| PaletteError::AssetCreation { slot, source })?,
        };
        doc.set_variable_value(&variable.id, &ctx.active_mode, *color)
            .await
            .map_err(|source| PaletteError::AssetUpdate { slot, source })?;

        if make_swatches {
            let node = create_swatch(doc, slot).await?;
            doc.set_fill_variable(&node, &variable.id, *color)
                .await
                .map_err(|source| PaletteError::AssetUpdate { slot, source })?;
            swatches.push(node);
        }
    }

    finish_swatches(doc, &swatches, folder).await
}

/// Rectangle for one slot at its grid cell, named with the bare slot name.
async fn create_swatch<D: DocumentService>(doc: &D, slot: usize) -> Result<NodeId> {
    let name = slot_name(slot)?.to_string();
    let col = slot % GRID_COLS;
    let row = slot / GRID_COLS;
    doc.create_rectangle(
        &name,
        col as f64 * COLUMN_PITCH,
        row as f64 * ROW_PITCH,
        SWATCH_WIDTH,
        SWATCH_HEIGHT,
    )
    .await
    .map_err(|source| PaletteError::AssetCreation { slot, source })
}

/// Group the created swatches under the folder name and select the group.
async fn finish_swatches<D: DocumentService>(
    doc: &D,
    swatches: &[NodeId],
    folder: &str,
) -> Result<()> {
    if swatches.is_empty() {
        return Ok(());
    }
    doc.group_nodes(swatches, folder)
        .await
        .map_err(PaletteError::Host)?;
    Ok(())
}
