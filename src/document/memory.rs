//! In-memory document service.
//!
//! Backs native embedding and the test suite. State lives behind a
//! `RefCell` (the engine is single-writer by contract, see the crate
//! docs), and any single host call can be made to fail via
//! [`MemoryDocument::fail_next`] to exercise the engine's error paths.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{
    CollectionId, CollectionInfo, DocumentService, ModeId, ModeInfo, NodeId, StyleId, VariableId,
    VariableInfo,
};
use crate::color::Rgba;
use crate::error::HostError;
use crate::resolver::DEFAULT_MODE_LABEL;

/// Host operations that can be targeted for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOp {
    ListCollections,
    CreateCollection,
    AddMode,
    ListVariables,
    CreateVariable,
    SetVariableValue,
    CreateStyle,
    SetStylePaint,
    CreateRectangle,
    SetFill,
    GroupNodes,
}

/// A paint style held by the in-memory document.
#[derive(Debug, Clone)]
pub struct StyleRecord {
    pub id: StyleId,
    pub name: String,
    pub paint: Option<Rgba>,
}

/// How a rectangle's fill is bound.
#[derive(Debug, Clone, PartialEq)]
pub enum FillBinding {
    Style(StyleId),
    Variable { variable: VariableId, base: Rgba },
}

/// A rectangle held by the in-memory document.
#[derive(Debug, Clone)]
pub struct RectRecord {
    pub id: NodeId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<FillBinding>,
}

/// A group container held by the in-memory document.
#[derive(Debug, Clone)]
pub struct GroupRecord {
    pub id: NodeId,
    pub name: String,
    pub children: Vec<NodeId>,
}

/// A color variable held by the in-memory document, one value per mode.
#[derive(Debug, Clone)]
pub struct VariableRecord {
    pub id: VariableId,
    pub name: String,
    pub collection: CollectionId,
    pub values: BTreeMap<ModeId, Rgba>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    collections: Vec<CollectionInfo>,
    variables: Vec<VariableRecord>,
    styles: Vec<StyleRecord>,
    rects: Vec<RectRecord>,
    groups: Vec<GroupRecord>,
    selection: Option<NodeId>,
    fail_next: Option<HostOp>,
}

impl Inner {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}:{}", self.next_id)
    }
}

/// In-memory [`DocumentService`] implementation.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    inner: RefCell<Inner>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with the given modes before the engine runs.
    ///
    /// An empty `mode_names` seeds the host's implicit default mode.
    pub fn seed_collection(&self, name: &str, mode_names: &[&str]) -> CollectionInfo {
        let mut inner = self.inner.borrow_mut();
        let id = CollectionId(inner.next_id("collection"));
        let names: Vec<&str> = if mode_names.is_empty() {
            vec![DEFAULT_MODE_LABEL]
        } else {
            mode_names.to_vec()
        };
        let modes = names
            .iter()
            .map(|mode_name| ModeInfo {
                id: ModeId(inner.next_id("mode")),
                name: (*mode_name).to_string(),
            })
            .collect();
        let info = CollectionInfo {
            id,
            name: name.to_string(),
            modes,
            variable_ids: Vec::new(),
        };
        inner.collections.push(info.clone());
        info
    }

    /// Make the next host call matching `op` fail.
    pub fn fail_next(&self, op: HostOp) {
        self.inner.borrow_mut().fail_next = Some(op);
    }

    fn check(&self, op: HostOp) -> Result<(), HostError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_next == Some(op) {
            inner.fail_next = None;
            return Err(HostError(format!("injected failure: {op:?}")));
        }
        Ok(())
    }

    // ---- read accessors for assertions ----

    pub fn collections(&self) -> Vec<CollectionInfo> {
        self.inner.borrow().collections.clone()
    }

    pub fn variables(&self) -> Vec<VariableRecord> {
        self.inner.borrow().variables.clone()
    }

    pub fn styles(&self) -> Vec<StyleRecord> {
        self.inner.borrow().styles.clone()
    }

    pub fn rectangles(&self) -> Vec<RectRecord> {
        self.inner.borrow().rects.clone()
    }

    pub fn groups(&self) -> Vec<GroupRecord> {
        self.inner.borrow().groups.clone()
    }

    pub fn selection(&self) -> Option<NodeId> {
        self.inner.borrow().selection.clone()
    }
}

impl DocumentService for MemoryDocument {
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>, HostError> {
        self.check(HostOp::ListCollections)?;
        Ok(self.inner.borrow().collections.clone())
    }

    async fn create_collection(&self, name: &str) -> Result<CollectionInfo, HostError> {
        self.check(HostOp::CreateCollection)?;
        Ok(self.seed_collection(name, &[]))
    }

    async fn add_mode(&self, collection: &CollectionId, name: &str) -> Result<ModeId, HostError> {
        self.check(HostOp::AddMode)?;
        let mut inner = self.inner.borrow_mut();
        let mode_id = ModeId(inner.next_id("mode"));
        let entry = inner
            .collections
            .iter_mut()
            .find(|c| &c.id == collection)
            .ok_or_else(|| HostError(format!("unknown collection {collection:?}")))?;
        entry.modes.push(ModeInfo {
            id: mode_id.clone(),
            name: name.to_string(),
        });
        Ok(mode_id)
    }

    async fn list_color_variables(&self) -> Result<Vec<VariableInfo>, HostError> {
        self.check(HostOp::ListVariables)?;
        Ok(self
            .inner
            .borrow()
            .variables
            .iter()
            .map(|v| VariableInfo {
                id: v.id.clone(),
                name: v.name.clone(),
            })
            .collect())
    }

    async fn create_color_variable(
        &self,
        name: &str,
        collection: &CollectionId,
    ) -> Result<VariableInfo, HostError> {
        self.check(HostOp::CreateVariable)?;
        let mut inner = self.inner.borrow_mut();
        let id = VariableId(inner.next_id("variable"));
        let entry = inner
            .collections
            .iter_mut()
            .find(|c| &c.id == collection)
            .ok_or_else(|| HostError(format!("unknown collection {collection:?}")))?;
        entry.variable_ids.push(id.clone());
        inner.variables.push(VariableRecord {
            id: id.clone(),
            name: name.to_string(),
            collection: collection.clone(),
            values: BTreeMap::new(),
        });
        Ok(VariableInfo {
            id,
            name: name.to_string(),
        })
    }

    async fn set_variable_value(
        &self,
        variable: &VariableId,
        mode: &ModeId,
        value: Rgba,
    ) -> Result<(), HostError> {
        self.check(HostOp::SetVariableValue)?;
        let mut inner = self.inner.borrow_mut();
        let record = inner
            .variables
            .iter_mut()
            .find(|v| &v.id == variable)
            .ok_or_else(|| HostError(format!("unknown variable {variable:?}")))?;
        record.values.insert(mode.clone(), value);
        Ok(())
    }

    async fn create_paint_style(&self, name: &str) -> Result<StyleId, HostError> {
        self.check(HostOp::CreateStyle)?;
        let mut inner = self.inner.borrow_mut();
        let id = StyleId(inner.next_id("style"));
        inner.styles.push(StyleRecord {
            id: id.clone(),
            name: name.to_string(),
            paint: None,
        });
        Ok(id)
    }

    async fn set_style_paint(&self, style: &StyleId, color: Rgba) -> Result<(), HostError> {
        self.check(HostOp::SetStylePaint)?;
        let mut inner = self.inner.borrow_mut();
        let record = inner
            .styles
            .iter_mut()
            .find(|s| &s.id == style)
            .ok_or_else(|| HostError(format!("unknown style {style:?}")))?;
        record.paint = Some(color);
        Ok(())
    }

    async fn create_rectangle(
        &self,
        name: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<NodeId, HostError> {
        self.check(HostOp::CreateRectangle)?;
        let mut inner = self.inner.borrow_mut();
        let id = NodeId(inner.next_id("node"));
        inner.rects.push(RectRecord {
            id: id.clone(),
            name: name.to_string(),
            x,
            y,
            width,
            height,
            fill: None,
        });
        Ok(id)
    }

    async fn set_fill_style(&self, node: &NodeId, style: &StyleId) -> Result<(), HostError> {
        self.check(HostOp::SetFill)?;
        let mut inner = self.inner.borrow_mut();
        let rect = inner
            .rects
            .iter_mut()
            .find(|r| &r.id == node)
            .ok_or_else(|| HostError(format!("unknown node {node:?}")))?;
        rect.fill = Some(FillBinding::Style(style.clone()));
        Ok(())
    }

    async fn set_fill_variable(
        &self,
        node: &NodeId,
        variable: &VariableId,
        base: Rgba,
    ) -> Result<(), HostError> {
        self.check(HostOp::SetFill)?;
        let mut inner = self.inner.borrow_mut();
        let rect = inner
            .rects
            .iter_mut()
            .find(|r| &r.id == node)
            .ok_or_else(|| HostError(format!("unknown node {node:?}")))?;
        rect.fill = Some(FillBinding::Variable {
            variable: variable.clone(),
            base,
        });
        Ok(())
    }

    async fn group_nodes(&self, nodes: &[NodeId], name: &str) -> Result<NodeId, HostError> {
        self.check(HostOp::GroupNodes)?;
        let mut inner = self.inner.borrow_mut();
        let id = NodeId(inner.next_id("node"));
        inner.groups.push(GroupRecord {
            id: id.clone(),
            name: name.to_string(),
            children: nodes.to_vec(),
        });
        inner.selection = Some(id.clone());
        Ok(id)
    }
}
