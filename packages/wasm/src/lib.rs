//! Version history exposed to the browser editor.
//!
//! Content crosses the boundary as JSON strings in the editor's native
//! node format. The JS side owns the live buffer: it passes the buffer's
//! content in and writes whatever comes back.

use plume_common::Content;
use plume_editor::{VersionId, VersionRecord, VersionStore, SystemClock};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error("Serialization error", e))
}

fn parse_content(json: &str) -> Result<Content, JsValue> {
    Content::from_json(json).map_err(|e| js_error("Invalid content", e))
}

#[wasm_bindgen]
pub struct VersionHistory {
    store: VersionStore,
}

#[wasm_bindgen]
impl VersionHistory {
    /// Fresh history with the two startup versions
    #[wasm_bindgen(constructor)]
    pub fn new() -> VersionHistory {
        VersionHistory {
            store: VersionStore::bootstrap(),
        }
    }

    /// Restore from previously exported records
    #[wasm_bindgen(js_name = fromRecords)]
    pub fn from_records(records_json: &str) -> Result<VersionHistory, JsValue> {
        let records: Vec<VersionRecord> =
            serde_json::from_str(records_json).map_err(|e| js_error("Invalid records", e))?;
        Ok(VersionHistory {
            store: VersionStore::from_records(records, SystemClock),
        })
    }

    /// Snapshot the live buffer; returns the new version's id
    #[wasm_bindgen(js_name = saveNewVersion)]
    pub fn save_new_version(&mut self, live_json: &str) -> Result<String, JsValue> {
        let live = parse_content(live_json)?;
        Ok(self.store.create_version(&live).to_string())
    }

    /// Switch versions; returns the content to load into the editor
    #[wasm_bindgen(js_name = selectVersion)]
    pub fn select_version(&mut self, id: &str, live_json: &str) -> Result<String, JsValue> {
        let live = parse_content(live_json)?;
        let content = self
            .store
            .select_version(&VersionId::from(id), &live)
            .map_err(|e| js_error("Select failed", e))?;
        content.to_json().map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = deleteVersion)]
    pub fn delete_version(&mut self, id: &str) -> bool {
        self.store.delete_version(&VersionId::from(id))
    }

    #[wasm_bindgen(js_name = renameVersion)]
    pub fn rename_version(&mut self, id: &str, name: &str) -> bool {
        self.store.rename_version(&VersionId::from(id), name)
    }

    #[wasm_bindgen(js_name = currentId)]
    pub fn current_id(&self) -> Option<String> {
        self.store.current_id().map(|id| id.to_string())
    }

    /// Summaries for the version list, newest state of each entry
    pub fn versions(&self) -> Result<String, JsValue> {
        to_json(&self.store.summaries())
    }

    /// Full records, including content, for persistence
    pub fn records(&self) -> Result<String, JsValue> {
        to_json(&self.store.records())
    }
}

impl Default for VersionHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Word count of a content document
#[wasm_bindgen(js_name = wordCount)]
pub fn word_count(content_json: &str) -> Result<usize, JsValue> {
    Ok(parse_content(content_json)?.word_count())
}
