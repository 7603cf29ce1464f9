use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Failure loading `GET /labels`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaLoadError {
	#[error("network error: {0}")]
	Network(String),
	#[error("HTTP error! Status: {0}")]
	Status(u16),
	#[error("malformed schema payload: {0}")]
	Malformed(String),
}

/// Failure running `POST /query`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum QueryError {
	/// Error message reported by the backend.
	#[error("{0}")]
	Execution(String),
	#[error("transport error: {0}")]
	Transport(String),
}

/// Best-effort message for a thrown JS value.
pub fn js_message(value: &JsValue) -> String {
	if let Some(err) = value.dyn_ref::<js_sys::Error>() {
		return err.message().into();
	}
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
