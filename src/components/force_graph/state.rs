use std::collections::HashMap;

use log::{debug, warn};
use petgraph::graph::NodeIndex;

use super::simulation::Simulation;
use super::types::{GraphData, GraphNode, normalize_color};
use crate::config::LayoutConfig;

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 8.0;

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub node: GraphNode,
	pub label: String,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<NodeIndex>,
	pub moved: bool,
}

/// A laid-out query result plus the pointer state over it.
pub struct ForceGraphState {
	pub sim: Simulation<NodeInfo, Option<String>>,
	pub drag: DragState,
	pub hover: Option<NodeIndex>,
	pub width: f64,
	pub height: f64,
}

impl ForceGraphState {
	/// Links whose endpoints are not in `data.nodes` are skipped.
	pub fn new(data: &GraphData, params: LayoutConfig, width: f64, height: f64) -> Self {
		let mut sim = Simulation::new(params, (width / 2.0, height / 2.0));
		let mut id_to_idx = HashMap::new();

		for node in &data.nodes {
			let idx = sim.add_node(NodeInfo {
				label: node.display_label(),
				color: normalize_color(node.color.as_deref()),
				node: node.clone(),
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		let edges = data.links.iter().filter_map(|link| {
			match (id_to_idx.get(&link.source), id_to_idx.get(&link.target)) {
				(Some(&src), Some(&tgt)) => Some((src, tgt, link.kind.clone())),
				_ => {
					warn!(
						"skipping link {} -> {}: endpoint not in result",
						link.source, link.target
					);
					None
				}
			}
		});
		sim.set_edges(edges);
		sim.reheat();

		Self {
			sim,
			drag: DragState::default(),
			hover: None,
			width,
			height,
		}
	}

	pub fn node(&self, idx: NodeIndex) -> Option<&GraphNode> {
		self.sim.node(idx).map(|n| &n.data.node)
	}

	/// Topmost node under the pointer, i.e. the last one drawn.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<NodeIndex> {
		let mut found = None;
		self.sim.visit_nodes(|idx, node| {
			let (dx, dy) = (node.x - x, node.y - y);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(idx);
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<NodeIndex>) {
		self.hover = node;
	}

	pub fn is_hovered(&self, idx: NodeIndex) -> bool {
		self.hover == Some(idx)
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.node_idx.is_some()
	}

	pub fn drag_start(&mut self, idx: NodeIndex) {
		self.drag = DragState {
			node_idx: Some(idx),
			moved: false,
		};
		self.sim.drag_start(idx);
		debug!(
			"dragging node {}, alpha target {}",
			idx.index(),
			self.sim.alpha_target()
		);
	}

	pub fn drag_move(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.drag.node_idx {
			self.drag.moved = true;
			self.sim.drag_move(idx, x, y);
		}
	}

	/// Ends the drag; returns the node when the pointer never moved (a click).
	pub fn drag_end(&mut self) -> Option<NodeIndex> {
		let drag = std::mem::take(&mut self.drag);
		let idx = drag.node_idx?;
		self.sim.drag_end();
		(!drag.moved).then_some(idx)
	}

	pub fn tick(&mut self) -> bool {
		self.sim.tick()
	}

	pub fn resize(&mut self, width: f64) {
		self.width = width;
		self.sim.set_center(width / 2.0, self.height / 2.0);
		self.sim.reheat();
	}
}
