//! Runtime configuration read from the host page.

use log::Level;
use serde::Deserialize;
use thiserror::Error;

/// Id of the optional `<script type="application/json">` element holding the config.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

/// Errors raised while reading the embedded configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The config element exists but does not hold valid JSON for [`AppConfig`].
	#[error("malformed app config: {0}")]
	Malformed(#[from] serde_json::Error),
}

/// Backend endpoints.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
	/// Prefix for every request, empty for same-origin.
	pub base_url: String,
	/// Path of the schema metadata endpoint.
	pub labels_path: String,
	/// Path of the query execution endpoint.
	pub query_path: String,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			base_url: String::new(),
			labels_path: "/labels".into(),
			query_path: "/query".into(),
		}
	}
}

impl ApiConfig {
	/// Full URL of the schema endpoint.
	pub fn labels_url(&self) -> String {
		format!("{}{}", self.base_url.trim_end_matches('/'), self.labels_path)
	}

	/// Full URL of the query endpoint.
	pub fn query_url(&self) -> String {
		format!("{}{}", self.base_url.trim_end_matches('/'), self.query_path)
	}
}

/// Force simulation constants.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
	/// Rest length of every link.
	pub link_distance: f64,
	/// Many-body strength, negative for repulsion.
	pub charge_strength: f64,
	/// Alpha target held while a node is being dragged.
	pub drag_alpha_target: f64,
	/// Alpha below which the simulation is considered settled.
	pub alpha_min: f64,
	/// Fraction of velocity removed every tick.
	pub velocity_decay: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			link_distance: 100.0,
			charge_strength: -200.0,
			drag_alpha_target: 0.3,
			alpha_min: 0.001,
			velocity_decay: 0.4,
		}
	}
}

/// Top-level application configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
	/// Backend endpoints.
	pub api: ApiConfig,
	/// Fixed height of the drawing surface.
	pub canvas_height: f64,
	/// Force simulation constants.
	pub layout: LayoutConfig,
	/// Console log level name (`error`, `warn`, `info`, `debug`, `trace`).
	pub log_level: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api: ApiConfig::default(),
			canvas_height: 600.0,
			layout: LayoutConfig::default(),
			log_level: "debug".into(),
		}
	}
}

impl AppConfig {
	/// Parse a JSON document; missing fields keep their defaults.
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(text)?)
	}

	/// Read the config embedded in the current document, if any.
	pub fn from_document() -> Result<Self, ConfigError> {
		let text = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.text_content());
		match text {
			Some(text) if !text.trim().is_empty() => Self::from_json(&text),
			_ => Ok(Self::default()),
		}
	}

	/// Parsed log level, `Debug` when unrecognised.
	pub fn level(&self) -> Level {
		self.log_level.parse().unwrap_or(Level::Debug)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config = AppConfig::from_json(r#"{"api": {"base_url": "http://localhost:5001/"}}"#)
			.unwrap();
		assert_eq!(config.api.labels_url(), "http://localhost:5001/labels");
		assert_eq!(config.api.query_url(), "http://localhost:5001/query");
		assert_eq!(config.canvas_height, 600.0);
		assert_eq!(config.layout, LayoutConfig::default());
	}

	#[test]
	fn same_origin_urls() {
		let api = ApiConfig::default();
		assert_eq!(api.labels_url(), "/labels");
		assert_eq!(api.query_url(), "/query");
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(matches!(
			AppConfig::from_json("{not json"),
			Err(ConfigError::Malformed(_))
		));
	}

	#[test]
	fn log_level_parsing() {
		let mut config = AppConfig::default();
		assert_eq!(config.level(), Level::Debug);
		config.log_level = "warn".into();
		assert_eq!(config.level(), Level::Warn);
		config.log_level = "loud".into();
		assert_eq!(config.level(), Level::Debug);
	}
}
