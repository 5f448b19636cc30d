//! Plugin-host adapter (wasm32 only).
//!
//! The JS shim hands [`on_ui_message`] two values: a capability object
//! whose methods implement the document-service surface (each returning
//! a `Promise`), and the raw UI message. Everything host-side is invoked
//! reflectively through js-sys, so this crate carries no extern imports
//! of its own.
//!
//! Capability object contract (camelCase, Promise-returning unless
//! noted): `listCollections`, `createCollection`, `addMode`,
//! `listColorVariables`, `createColorVariable`, `setVariableValue`,
//! `createPaintStyle`, `setStylePaint`, `createRectangle`,
//! `setFillStyle`, `setFillVariable`, `groupNodes`, plus the synchronous
//! `postReply` and `endSession`.

use js_sys::{Array, Function, Promise, Reflect};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::color::Rgba;
use crate::document::{
    CollectionId, CollectionInfo, DocumentService, ModeId, NodeId, StyleId, VariableId,
    VariableInfo,
};
use crate::error::{HostError, PaletteError, Result};
use crate::message::{GenerateRequest, Reply};
use crate::reconciler::apply_request;

/// Entry point called by the JS shim for each UI message.
///
/// Runs the whole request on the microtask queue, posts an error reply
/// if anything failed, and always ends the plugin session afterwards
/// (success needs no payload; the UI only ever hears about failures).
#[wasm_bindgen(js_name = onUiMessage)]
pub fn on_ui_message(api: JsValue, message: JsValue) {
    console_error_panic_hook::set_once();

    spawn_local(async move {
        let doc = HostDocument { api };
        if let Err(err) = handle(&doc, message).await {
            doc.post_reply(&Reply::from_error(&err));
        }
        doc.end_session();
    });
}

async fn handle(doc: &HostDocument, message: JsValue) -> Result<()> {
    let request: GenerateRequest = serde_wasm_bindgen::from_value(message)
        .map_err(|e| PaletteError::BadRequest(e.to_string()))?;
    apply_request(doc, &request).await
}

/// [`DocumentService`] over the JS capability object.
pub struct HostDocument {
    api: JsValue,
}

impl HostDocument {
    /// Look up and call `method` on the capability object, then await
    /// the returned value as a promise.
    async fn invoke(&self, method: &str, args: &Array) -> std::result::Result<JsValue, HostError> {
        let value = self.call(method, args)?;
        // Promise::resolve tolerates hosts that answer synchronously.
        JsFuture::from(Promise::resolve(&value))
            .await
            .map_err(js_error)
    }

    /// Synchronous call, for the fire-and-forget session methods.
    fn call(&self, method: &str, args: &Array) -> std::result::Result<JsValue, HostError> {
        let field = Reflect::get(&self.api, &JsValue::from_str(method)).map_err(js_error)?;
        let function: Function = field
            .dyn_into()
            .map_err(|_| HostError(format!("host capability {method:?} is missing")))?;
        function.apply(&self.api, args).map_err(js_error)
    }

    fn post_reply(&self, reply: &Reply) {
        if let Ok(value) = serde_wasm_bindgen::to_value(reply) {
            let _ = self.call("postReply", &Array::of1(&value));
        }
    }

    fn end_session(&self) {
        let _ = self.call("endSession", &Array::new());
    }
}

fn js_error(value: JsValue) -> HostError {
    HostError(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> std::result::Result<T, HostError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| HostError(e.to_string()))
}

fn color_to_js(color: Rgba) -> std::result::Result<JsValue, HostError> {
    serde_wasm_bindgen::to_value(&color).map_err(|e| HostError(e.to_string()))
}

impl DocumentService for HostDocument {
    async fn list_collections(&self) -> std::result::Result<Vec<CollectionInfo>, HostError> {
        from_js(self.invoke("listCollections", &Array::new()).await?)
    }

    async fn create_collection(&self, name: &str) -> std::result::Result<CollectionInfo, HostError> {
        let args = Array::of1(&JsValue::from_str(name));
        from_js(self.invoke("createCollection", &args).await?)
    }

    async fn add_mode(
        &self,
        collection: &CollectionId,
        name: &str,
    ) -> std::result::Result<ModeId, HostError> {
        let args = Array::of2(&JsValue::from_str(&collection.0), &JsValue::from_str(name));
        from_js(self.invoke("addMode", &args).await?)
    }

    async fn list_color_variables(&self) -> std::result::Result<Vec<VariableInfo>, HostError> {
        from_js(self.invoke("listColorVariables", &Array::new()).await?)
    }

    async fn create_color_variable(
        &self,
        name: &str,
        collection: &CollectionId,
    ) -> std::result::Result<VariableInfo, HostError> {
        let args = Array::of2(&JsValue::from_str(name), &JsValue::from_str(&collection.0));
        from_js(self.invoke("createColorVariable", &args).await?)
    }

    async fn set_variable_value(
        &self,
        variable: &VariableId,
        mode: &ModeId,
        value: Rgba,
    ) -> std::result::Result<(), HostError> {
        let args = Array::of3(
            &JsValue::from_str(&variable.0),
            &JsValue::from_str(&mode.0),
            &color_to_js(value)?,
        );
        self.invoke("setVariableValue", &args).await?;
        Ok(())
    }

    async fn create_paint_style(&self, name: &str) -> std::result::Result<StyleId, HostError> {
        let args = Array::of1(&JsValue::from_str(name));
        from_js(self.invoke("createPaintStyle", &args).await?)
    }

    async fn set_style_paint(
        &self,
        style: &StyleId,
        color: Rgba,
    ) -> std::result::Result<(), HostError> {
        let args = Array::of2(&JsValue::from_str(&style.0), &color_to_js(color)?);
        self.invoke("setStylePaint", &args).await?;
        Ok(())
    }

    async fn create_rectangle(
        &self,
        name: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> std::result::Result<NodeId, HostError> {
        let args = Array::of5(
            &JsValue::from_str(name),
            &JsValue::from_f64(x),
            &JsValue::from_f64(y),
            &JsValue::from_f64(width),
            &JsValue::from_f64(height),
        );
        from_js(self.invoke("createRectangle", &args).await?)
    }

    async fn set_fill_style(
        &self,
        node: &NodeId,
        style: &StyleId,
    ) -> std::result::Result<(), HostError> {
        let args = Array::of2(&JsValue::from_str(&node.0), &JsValue::from_str(&style.0));
        self.invoke("setFillStyle", &args).await?;
        Ok(())
    }

    async fn set_fill_variable(
        &self,
        node: &NodeId,
        variable: &VariableId,
        base: Rgba,
    ) -> std::result::Result<(), HostError> {
        let args = Array::of3(
            &JsValue::from_str(&node.0),
            &JsValue::from_str(&variable.0),
            &color_to_js(base)?,
        );
        self.invoke("setFillVariable", &args).await?;
        Ok(())
    }

    async fn group_nodes(
        &self,
        nodes: &[NodeId],
        name: &str,
    ) -> std::result::Result<NodeId, HostError> {
        let ids = Array::new();
        for node in nodes {
            ids.push(&JsValue::from_str(&node.0));
        }
        let args = Array::of2(&ids, &JsValue::from_str(name));
        from_js(self.invoke("groupNodes", &args).await?)
    }
}
