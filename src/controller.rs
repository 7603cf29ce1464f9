//! Application state and the single update function every UI event goes through.

use log::{debug, error, info};
use petgraph::graph::NodeIndex;

use crate::components::force_graph::{ForceGraphState, GraphData};
use crate::config::AppConfig;
use crate::error::{QueryError, SchemaLoadError};
use crate::query::{SelectionState, Side, synthesize};
use crate::schema::Schema;

const SCHEMA_ALERT: &str = "Failed to load labels and properties. Please check the server and try again.";
const QUERY_ALERT: &str = "Failed to execute query. Please check the server and try again.";
const TOOLTIP_OFFSET: (f64, f64) = (10.0, -10.0);

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
	LoadSchema,
	SchemaLoaded(Result<Schema, SchemaLoadError>),
	ToggleLabelRole { label: String, side: Side, checked: bool },
	TogglePropertyRole { property: String, side: Side, checked: bool },
	SetPropertyValue { property: String, value: String },
	SetLimit(String),
	BuildQuery,
	SetQueryText(String),
	RunQuery,
	QueryFinished(Result<GraphData, QueryError>),
	/// Canvas-relative position plus page position for the tooltip.
	PointerMove { x: f64, y: f64, page_x: f64, page_y: f64 },
	PointerDown { x: f64, y: f64 },
	PointerUp,
	PointerLeave,
	CloseDetailPanel,
	ToggleSchemaPanel,
	CloseSchemaPanel,
	Resize { width: f64 },
}

/// Work the host has to carry out after an update.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
	/// Panels or form fields changed.
	Refresh,
	FetchSchema,
	SubmitQuery(String),
	Alert(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub lines: Vec<String>,
	pub left: f64,
	pub top: f64,
}

pub struct Controller {
	pub config: AppConfig,
	pub selection: SelectionState,
	pub query_text: String,
	pub graph: Option<ForceGraphState>,
	pub width: f64,
	pub tooltip: Option<Tooltip>,
	pub details: Option<Vec<(String, String)>>,
	pub schema_panel_open: bool,
}

impl Controller {
	pub fn new(config: AppConfig, width: f64) -> Self {
		Self {
			config,
			selection: SelectionState::default(),
			query_text: String::new(),
			graph: None,
			width,
			tooltip: None,
			details: None,
			schema_panel_open: true,
		}
	}

	pub fn height(&self) -> f64 {
		self.config.canvas_height
	}

	pub fn update(&mut self, command: Command) -> Vec<Effect> {
		match command {
			Command::LoadSchema => vec![Effect::FetchSchema],
			Command::SchemaLoaded(Ok(schema)) => {
				info!(
					"schema loaded: {} labels, {} properties",
					schema.labels.len(),
					schema.properties.len()
				);
				self.selection = SelectionState::from_schema(&schema);
				vec![Effect::Refresh]
			}
			Command::SchemaLoaded(Err(e)) => {
				error!("Failed to load labels and properties: {e}");
				vec![Effect::Alert(SCHEMA_ALERT.into())]
			}
			Command::ToggleLabelRole {
				label,
				side,
				checked,
			} => {
				self.selection.set_label_role(&label, side, checked);
				vec![Effect::Refresh]
			}
			Command::TogglePropertyRole {
				property,
				side,
				checked,
			} => {
				self.selection.set_property_role(&property, side, checked);
				vec![Effect::Refresh]
			}
			// Inputs own their text; no refresh so the caret stays put.
			Command::SetPropertyValue { property, value } => {
				self.selection.set_property_value(&property, &value);
				vec![]
			}
			Command::SetLimit(limit) => {
				self.selection.set_limit(&limit);
				vec![]
			}
			Command::SetQueryText(text) => {
				self.query_text = text;
				vec![]
			}
			Command::BuildQuery => {
				self.query_text = synthesize(&self.selection, &self.selection.limit);
				debug!("built query: {}", self.query_text);
				vec![Effect::Refresh]
			}
			Command::RunQuery => {
				info!("submitting query");
				vec![Effect::SubmitQuery(self.query_text.clone())]
			}
			Command::QueryFinished(Ok(data)) => {
				info!(
					"query returned {} nodes, {} links",
					data.nodes.len(),
					data.links.len()
				);
				self.show_result(&data);
				vec![Effect::Refresh]
			}
			Command::QueryFinished(Err(QueryError::Execution(message))) => {
				error!("query rejected: {message}");
				vec![Effect::Alert(format!("Error: {message}"))]
			}
			Command::QueryFinished(Err(e)) => {
				error!("Query execution failed: {e}");
				vec![Effect::Alert(QUERY_ALERT.into())]
			}
			Command::PointerMove {
				x,
				y,
				page_x,
				page_y,
			} => self.pointer_move(x, y, page_x, page_y),
			Command::PointerDown { x, y } => {
				let Some(graph) = self.graph.as_mut() else {
					return vec![];
				};
				if let Some(idx) = graph.node_at_position(x, y) {
					graph.drag_start(idx);
				}
				vec![]
			}
			Command::PointerUp => match self.graph.as_mut().and_then(|g| g.drag_end()) {
				Some(idx) => {
					self.open_details(idx);
					vec![Effect::Refresh]
				}
				None => vec![],
			},
			Command::PointerLeave => {
				if let Some(graph) = self.graph.as_mut() {
					graph.drag_end();
					graph.set_hover(None);
				}
				self.hide_tooltip()
			}
			Command::CloseDetailPanel => {
				self.details = None;
				vec![Effect::Refresh]
			}
			Command::ToggleSchemaPanel => {
				self.schema_panel_open = !self.schema_panel_open;
				vec![Effect::Refresh]
			}
			Command::CloseSchemaPanel => {
				self.schema_panel_open = false;
				vec![Effect::Refresh]
			}
			Command::Resize { width } => {
				self.width = width;
				if let Some(graph) = self.graph.as_mut() {
					debug!(
						"viewport width {width}, reheating {:?} layout at alpha {:.3}",
						graph.sim.phase(),
						graph.sim.alpha()
					);
					graph.resize(width);
				}
				vec![]
			}
		}
	}

	fn show_result(&mut self, data: &GraphData) {
		let mut graph = ForceGraphState::new(
			data,
			self.config.layout.clone(),
			self.width,
			self.height(),
		);
		graph.resize(self.width);
		debug!(
			"laid out {} nodes around {:?}",
			graph.sim.node_count(),
			graph.sim.center()
		);
		self.graph = Some(graph);
		self.tooltip = None;
		self.details = None;
		self.schema_panel_open = false;
	}

	fn pointer_move(&mut self, x: f64, y: f64, page_x: f64, page_y: f64) -> Vec<Effect> {
		let Some(graph) = self.graph.as_mut() else {
			return vec![];
		};
		if graph.is_dragging() {
			graph.drag_move(x, y);
			return vec![];
		}
		let hovered = graph.node_at_position(x, y);
		if hovered == graph.hover {
			return vec![];
		}
		graph.set_hover(hovered);
		match hovered {
			Some(idx) => self.show_tooltip(idx, page_x, page_y),
			None => self.hide_tooltip(),
		}
	}

	fn show_tooltip(&mut self, idx: NodeIndex, page_x: f64, page_y: f64) -> Vec<Effect> {
		let Some(node) = self.graph.as_ref().and_then(|g| g.node(idx)) else {
			return vec![];
		};
		self.tooltip = Some(Tooltip {
			lines: node
				.detail_rows()
				.into_iter()
				.map(|(k, v)| format!("{k}: {v}"))
				.collect(),
			left: page_x + TOOLTIP_OFFSET.0,
			top: page_y + TOOLTIP_OFFSET.1,
		});
		vec![Effect::Refresh]
	}

	fn hide_tooltip(&mut self) -> Vec<Effect> {
		match self.tooltip.take() {
			Some(_) => vec![Effect::Refresh],
			None => vec![],
		}
	}

	fn open_details(&mut self, idx: NodeIndex) {
		self.details = self
			.graph
			.as_ref()
			.and_then(|g| g.node(idx))
			.map(|node| node.detail_rows());
	}
}
