//! Fetch-based client for the schema and query endpoints.

use log::debug;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::components::force_graph::GraphData;
use crate::config::ApiConfig;
use crate::error::{QueryError, SchemaLoadError, js_message};
use crate::schema::{Schema, SchemaResponse};

struct Reply {
	ok: bool,
	status: u16,
	body: String,
}

async fn send(request: Request) -> Result<Reply, JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await?
		.dyn_into()?;
	let body = JsFuture::from(response.text()?).await?;
	Ok(Reply {
		ok: response.ok(),
		status: response.status(),
		body: body.as_string().unwrap_or_default(),
	})
}

pub async fn fetch_schema(api: &ApiConfig) -> Result<Schema, SchemaLoadError> {
	let network = |e: JsValue| SchemaLoadError::Network(js_message(&e));
	let request = Request::new_with_str(&api.labels_url()).map_err(network)?;
	let reply = send(request).await.map_err(network)?;
	if !reply.ok {
		return Err(SchemaLoadError::Status(reply.status));
	}
	parse_schema(&reply.body)
}

pub fn parse_schema(body: &str) -> Result<Schema, SchemaLoadError> {
	serde_json::from_str::<SchemaResponse>(body)
		.map(Schema::from)
		.map_err(|e| SchemaLoadError::Malformed(e.to_string()))
}

#[derive(Serialize)]
struct QueryRequest<'a> {
	query: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QueryResponse {
	Failed { error: String },
	Graph(GraphData),
}

pub async fn run_query(api: &ApiConfig, query: &str) -> Result<GraphData, QueryError> {
	let transport = |e: JsValue| QueryError::Transport(js_message(&e));
	let body = serde_json::to_string(&QueryRequest { query })
		.map_err(|e| QueryError::Transport(e.to_string()))?;

	let init = RequestInit::new();
	init.set_method("POST");
	init.set_body(&JsValue::from_str(&body));
	let request = Request::new_with_str_and_init(&api.query_url(), &init).map_err(transport)?;
	request
		.headers()
		.set("Content-Type", "application/json")
		.map_err(transport)?;

	let reply = send(request).await.map_err(transport)?;
	debug!("query endpoint answered {}", reply.status);
	parse_query_response(&reply.body)
}

/// The backend reports failures in the body, so the status code is not consulted.
pub fn parse_query_response(body: &str) -> Result<GraphData, QueryError> {
	match serde_json::from_str::<QueryResponse>(body) {
		Ok(QueryResponse::Failed { error }) if !error.is_empty() => {
			Err(QueryError::Execution(error))
		}
		Ok(QueryResponse::Graph(data)) => Ok(data),
		Ok(QueryResponse::Failed { .. }) => {
			Err(QueryError::Transport("empty error payload".into()))
		}
		Err(e) => Err(QueryError::Transport(e.to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn schema_body_is_sorted() {
		let schema =
			parse_schema(r#"{"labels": ["a", "c", "b"], "input_properties": ["x", "y"]}"#)
				.unwrap();
		assert_eq!(schema.labels, ["c", "b", "a"]);
		assert_eq!(schema.properties, ["y", "x"]);
	}

	#[test]
	fn malformed_schema_body() {
		assert!(matches!(
			parse_schema(r#"{"labels": "nope"}"#),
			Err(SchemaLoadError::Malformed(_))
		));
		assert!(matches!(
			parse_schema("<html>"),
			Err(SchemaLoadError::Malformed(_))
		));
	}

	#[test]
	fn backend_error_is_surfaced_verbatim() {
		assert_eq!(
			parse_query_response(r#"{"error": "Invalid input 'MATC'"}"#),
			Err(QueryError::Execution("Invalid input 'MATC'".into()))
		);
	}

	#[test]
	fn graph_body_decodes() {
		let data = parse_query_response(
			r##"{"nodes": [{"id": "1", "labels": ["A"], "properties": {}, "color": "#fff"}], "links": []}"##,
		)
		.unwrap();
		assert_eq!(data.nodes.len(), 1);
		assert!(data.links.is_empty());
	}

	#[test]
	fn unexpected_bodies_are_transport_errors() {
		for body in ["", "[]", r#"{"error": ""}"#, r#"{"nodes": []}"#] {
			assert!(
				matches!(parse_query_response(body), Err(QueryError::Transport(_))),
				"{body}"
			);
		}
	}

	#[test]
	fn request_body_shape() {
		let body = serde_json::to_string(&QueryRequest {
			query: "MATCH r=(n)-->(m) RETURN r LIMIT 25",
		})
		.unwrap();
		assert_eq!(body, r#"{"query":"MATCH r=(n)-->(m) RETURN r LIMIT 25"}"#);
	}
}
