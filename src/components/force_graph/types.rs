use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_NODE_COLOR: &str = "#d6dfea";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(from = "RawNode")]
pub struct GraphNode {
	pub id: String,
	pub labels: Vec<String>,
	/// Property name and display value, in payload order.
	pub properties: Vec<(String, String)>,
	pub color: Option<String>,
	/// The `name` property, when set to anything but an empty or falsy value.
	pub name: Option<String>,
}

#[derive(Deserialize)]
struct RawNode {
	id: String,
	#[serde(default)]
	labels: Vec<String>,
	#[serde(default)]
	properties: Map<String, Value>,
	#[serde(default)]
	color: Option<String>,
}

impl From<RawNode> for GraphNode {
	fn from(raw: RawNode) -> Self {
		let name = raw
			.properties
			.get("name")
			.filter(|v| is_truthy(v))
			.map(display_value);
		Self {
			id: raw.id,
			labels: raw.labels,
			properties: raw
				.properties
				.into_iter()
				.map(|(k, v)| (k, display_value(&v)))
				.collect(),
			color: raw.color,
			name,
		}
	}
}

/// Strings raw, lists comma-joined with null items left blank, anything else as JSON.
fn display_value(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Array(items) => items
			.iter()
			.map(|item| match item {
				Value::Null => String::new(),
				item => display_value(item),
			})
			.collect::<Vec<_>>()
			.join(","),
		other => other.to_string(),
	}
}

fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

impl GraphNode {
	pub fn property(&self, key: &str) -> Option<&str> {
		self.properties
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// `ID`, `Labels`, then every property, as shown in the tooltip and detail panel.
	pub fn detail_rows(&self) -> Vec<(String, String)> {
		let mut rows = Vec::with_capacity(self.properties.len() + 2);
		rows.push(("ID".to_owned(), self.id.clone()));
		rows.push(("Labels".to_owned(), self.labels.join(", ")));
		rows.extend(self.properties.iter().cloned());
		rows
	}

	/// Text drawn next to the node: `name`, else the id's last `:` segment.
	pub fn display_label(&self) -> String {
		match &self.name {
			Some(name) => name.clone(),
			None => self.id.rsplit(':').next().unwrap_or(&self.id).to_owned(),
		}
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Lower-case seven character hex, or the default for anything not starting with `#`.
pub fn normalize_color(color: Option<&str>) -> String {
	let Some(color) = color.filter(|c| c.starts_with('#')) else {
		return DEFAULT_NODE_COLOR.into();
	};
	if color.chars().count() == 4 {
		let mut expanded = String::with_capacity(7);
		expanded.push('#');
		for c in color.chars().skip(1) {
			expanded.push(c);
			expanded.push(c);
		}
		return expanded.to_lowercase();
	}
	color.to_lowercase()
}
