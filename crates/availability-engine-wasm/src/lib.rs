//! WASM bindings for availability-engine.
//!
//! Exposes availability queries to the browser calendar via `wasm-bindgen`.
//! Snapshots, queries and results cross the boundary as JSON strings: the
//! snapshot in the calendar export-blob shape, the query in its wire form,
//! and the result as serialized by [`QueryResult`].
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p availability-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/availability-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/availability_engine_wasm.wasm
//! ```

use availability_engine::{
    AvailabilityQueryEngine, CalendarSnapshot, EngineError, Query, QueryResult,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Error DTO crossing the boundary
// ---------------------------------------------------------------------------

/// Error payload handed to JavaScript, so the UI can tell a bad query
/// (show the message) from a corrupt snapshot (offer a re-import).
#[derive(Serialize)]
struct ErrorDto {
    kind: &'static str,
    message: String,
}

impl From<&EngineError> for ErrorDto {
    fn from(e: &EngineError) -> Self {
        let kind = if e.is_validation() {
            "validation"
        } else if matches!(e, EngineError::InvalidSnapshot(_)) {
            "snapshot"
        } else {
            "query"
        };
        Self {
            kind,
            message: e.to_string(),
        }
    }
}

fn to_js_error(e: EngineError) -> JsValue {
    let dto = ErrorDto::from(&e);
    match serde_json::to_string(&dto) {
        Ok(json) => JsValue::from_str(&json),
        Err(_) => JsValue::from_str(&dto.message),
    }
}

fn result_to_json(result: &QueryResult) -> Result<String, JsValue> {
    serde_json::to_string(result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Run one query against a snapshot without keeping an engine around.
///
/// `snapshot_json` is a calendar export blob and `query_json` a query in wire
/// form. Returns the serialized result, or a JSON `{kind, message}` error.
#[wasm_bindgen(js_name = "executeQuery")]
pub fn execute_query(snapshot_json: &str, query_json: &str) -> Result<String, JsValue> {
    let snapshot = CalendarSnapshot::from_json(snapshot_json).map_err(to_js_error)?;
    let query = Query::from_json(query_json).map_err(to_js_error)?;
    let result = AvailabilityQueryEngine::new(snapshot)
        .execute(&query)
        .map_err(to_js_error)?;
    result_to_json(&result)
}

/// A long-lived engine for the calendar page, refreshed after every edit.
#[wasm_bindgen]
pub struct AvailabilityEngine {
    inner: AvailabilityQueryEngine,
}

#[wasm_bindgen]
impl AvailabilityEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(snapshot_json: &str) -> Result<AvailabilityEngine, JsValue> {
        let snapshot = CalendarSnapshot::from_json(snapshot_json).map_err(to_js_error)?;
        Ok(AvailabilityEngine {
            inner: AvailabilityQueryEngine::new(snapshot),
        })
    }

    /// Swap in a new snapshot. The old one is kept if the JSON does not decode.
    #[wasm_bindgen(js_name = "updateData")]
    pub fn update_data(&mut self, snapshot_json: &str) -> Result<(), JsValue> {
        let snapshot = CalendarSnapshot::from_json(snapshot_json).map_err(to_js_error)?;
        self.inner.update_data(snapshot);
        Ok(())
    }

    pub fn execute(&self, query_json: &str) -> Result<String, JsValue> {
        let query = Query::from_json(query_json).map_err(to_js_error)?;
        let result = self.inner.execute(&query).map_err(to_js_error)?;
        result_to_json(&result)
    }

    #[wasm_bindgen(getter, js_name = "ownerId")]
    pub fn owner_id(&self) -> String {
        self.inner.snapshot().owner_id.clone()
    }
}
