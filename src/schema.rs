use serde::Deserialize;

/// Body of `GET /labels`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SchemaResponse {
	pub labels: Vec<String>,
	pub input_properties: Vec<String>,
}

/// Labels and property names offered by the backend, in display order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
	pub labels: Vec<String>,
	pub properties: Vec<String>,
}

impl From<SchemaResponse> for Schema {
	fn from(response: SchemaResponse) -> Self {
		let (mut labels, mut properties) = (response.labels, response.input_properties);
		// Descending order is what the builder shows.
		labels.sort_unstable_by(|a, b| b.cmp(a));
		properties.sort_unstable_by(|a, b| b.cmp(a));
		Self { labels, properties }
	}
}
