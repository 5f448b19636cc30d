//! Document-service interface
//!
//! The engine never touches the host document directly; every mutation
//! goes through [`DocumentService`]. The wasm build adapts this trait to
//! the plugin host API ([`crate::host`]); native builds and tests use the
//! in-memory implementation in [`memory`].
//!
//! All methods are async: in the plugin runtime each one suspends on a
//! host round trip, and the reconciler awaits them strictly in slot
//! order (swatch placement and failure attribution depend on it).

mod memory;

pub use memory::{
    FillBinding, GroupRecord, HostOp, MemoryDocument, RectRecord, StyleRecord, VariableRecord,
};

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::HostError;

/// Host identity of a variable collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(pub String);

/// Host identity of a mode within a collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeId(pub String);

/// Host identity of a color variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(pub String);

/// Host identity of a paint style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleId(pub String);

/// Host identity of a scene element (rectangle or group).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

/// One mode of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeInfo {
    pub id: ModeId,
    pub name: String,
}

/// Snapshot of a variable collection as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfo {
    pub id: CollectionId,
    pub name: String,
    pub modes: Vec<ModeInfo>,
    /// Identities of the variables filed in this collection.
    pub variable_ids: Vec<VariableId>,
}

/// Snapshot of a color variable as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableInfo {
    pub id: VariableId,
    pub name: String,
}

/// Collection + active mode resolved once per request and shared by all
/// 24 slots. Passed by reference; never mutated after resolution.
#[derive(Debug, Clone)]
pub struct CollectionContext {
    pub collection: CollectionInfo,
    pub active_mode: ModeId,
}

/// The document mutation surface the engine consumes.
///
/// Implementations report failures as [`HostError`] text; the engine
/// maps them onto its own taxonomy at each call site. Session lifecycle
/// (ending the plugin run) deliberately stays outside this trait; it is
/// owned by whichever boundary invoked the engine.
#[allow(async_fn_in_trait)]
pub trait DocumentService {
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>, HostError>;

    /// Create a collection. The host seeds it with one default mode.
    async fn create_collection(&self, name: &str) -> Result<CollectionInfo, HostError>;

    async fn add_mode(&self, collection: &CollectionId, name: &str) -> Result<ModeId, HostError>;

    /// All color-kind variables in the document, across collections.
    async fn list_color_variables(&self) -> Result<Vec<VariableInfo>, HostError>;

    async fn create_color_variable(
        &self,
        name: &str,
        collection: &CollectionId,
    ) -> Result<VariableInfo, HostError>;

    async fn set_variable_value(
        &self,
        variable: &VariableId,
        mode: &ModeId,
        value: Rgba,
    ) -> Result<(), HostError>;

    async fn create_paint_style(&self, name: &str) -> Result<StyleId, HostError>;

    /// Replace the style's paints with a single solid fill.
    async fn set_style_paint(&self, style: &StyleId, color: Rgba) -> Result<(), HostError>;

    async fn create_rectangle(
        &self,
        name: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<NodeId, HostError>;

    /// Fill a node by paint-style reference.
    async fn set_fill_style(&self, node: &NodeId, style: &StyleId) -> Result<(), HostError>;

    /// Fill a node with a bound-variable paint; `base` is the concrete
    /// color carried by the paint itself.
    async fn set_fill_variable(
        &self,
        node: &NodeId,
        variable: &VariableId,
        base: Rgba,
    ) -> Result<(), HostError>;

    /// Group the nodes under a named container and make it the active
    /// selection.
    async fn group_nodes(&self, nodes: &[NodeId], name: &str) -> Result<NodeId, HostError>;
}
