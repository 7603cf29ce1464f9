//! Browser tests for configuration embedded in the host page.
#![cfg(target_arch = "wasm32")]

use graph_query_canvas::config::{AppConfig, CONFIG_ELEMENT_ID};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn embed(json: &str) -> web_sys::Element {
	let document = web_sys::window().unwrap().document().unwrap();
	if let Some(old) = document.get_element_by_id(CONFIG_ELEMENT_ID) {
		old.remove();
	}
	let script = document.create_element("script").unwrap();
	script.set_id(CONFIG_ELEMENT_ID);
	script.set_attribute("type", "application/json").unwrap();
	script.set_text_content(Some(json));
	document.body().unwrap().append_child(&script).unwrap();
	script
}

#[wasm_bindgen_test]
fn defaults_without_config_element() {
	let config = AppConfig::from_document().unwrap();
	assert_eq!(config, AppConfig::default());
}

#[wasm_bindgen_test]
fn reads_embedded_config() {
	let script = embed(r#"{"canvas_height": 480, "api": {"base_url": "http://graph.local"}}"#);
	let config = AppConfig::from_document().unwrap();
	assert_eq!(config.canvas_height, 480.0);
	assert_eq!(config.api.query_url(), "http://graph.local/query");
	script.remove();
}

#[wasm_bindgen_test]
fn malformed_config_is_reported() {
	let script = embed("{oops");
	assert!(AppConfig::from_document().is_err());
	script.remove();
}
