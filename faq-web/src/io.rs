//! Browser-based storage and file I/O using Web APIs

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FileReader, HtmlAnchorElement, HtmlInputElement, Url};

use faq_core::{PersistError, Storage};

fn local_storage() -> Result<web_sys::Storage, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let storage = window.local_storage()?.ok_or("No localStorage")?;
    Ok(storage)
}

fn storage_error(err: JsValue) -> PersistError {
    PersistError::Storage(format!("{:?}", err))
}

/// `window.localStorage` as a document store
#[derive(Debug, Default)]
pub struct BrowserStorage;

impl Storage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        local_storage()
            .and_then(|storage| storage.get_item(key))
            .map_err(storage_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        local_storage()
            .and_then(|storage| storage.set_item(key, value))
            .map_err(storage_error)
    }
}

/// Download JSON as a file
pub fn download_json(filename: &str, json: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    // Create a blob from the JSON content
    let blob_parts = js_sys::Array::new();
    blob_parts.push(&JsValue::from_str(json));

    let blob_options = web_sys::BlobPropertyBag::new();
    blob_options.set_type("application/json");

    let blob = Blob::new_with_str_sequence_and_options(&blob_parts, &blob_options)?;

    // Create an object URL for the blob
    let url = Url::create_object_url_with_blob(&blob)?;

    // Create a temporary anchor element and trigger download
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    // Clean up the object URL
    Url::revoke_object_url(&url)?;

    Ok(())
}

/// Let the user pick a `.json` file and hand its text to `on_text`.
///
/// The file is read asynchronously; `on_text` runs once the read completes.
/// Both event handlers are released after they fire.
pub fn pick_json_file(on_text: impl FnOnce(String) + 'static) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_type("file");
    input.set_accept(".json");

    let picker = input.clone();
    let on_change = Closure::once_into_js(move |_event: web_sys::Event| {
        let Some(file) = picker.files().and_then(|files| files.get(0)) else {
            return;
        };
        let reader = match FileReader::new() {
            Ok(reader) => reader,
            Err(e) => {
                tracing::error!(error = ?e, "error creating file reader");
                return;
            }
        };

        let result_reader = reader.clone();
        let on_load = Closure::once_into_js(move |_event: web_sys::Event| {
            match result_reader.result().map(|value| value.as_string()) {
                Ok(Some(text)) => on_text(text),
                Ok(None) => tracing::error!("error parsing file: not text"),
                Err(e) => tracing::error!(error = ?e, "error reading file"),
            }
        });
        reader.set_onload(Some(on_load.unchecked_ref()));

        if let Err(e) = reader.read_as_text(&file) {
            tracing::error!(error = ?e, "error reading file");
        }
    });
    input.set_onchange(Some(on_change.unchecked_ref()));

    input.click();
    Ok(())
}

/// Put text on the system clipboard, resolving once the browser accepts it
pub async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise).await?;
    Ok(())
}
