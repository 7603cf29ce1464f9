//! Velocity-Verlet style force simulation with link, many-body and centering forces.
//!
//! The model follows the usual alpha-cooled layout: every tick alpha moves
//! toward its target, forces add to velocities scaled by alpha, velocities
//! decay and positions integrate. Pinned nodes ignore physics.

use std::f64::consts::PI;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use crate::config::LayoutConfig;

const INITIAL_RADIUS: f64 = 10.0;
const DISTANCE_MIN_SQ: f64 = 1.0;
const DECAY_TICKS: f64 = 300.0;

pub struct SimNode<T> {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Fixed position set by dragging; overrides physics while present.
	pub pin: Option<(f64, f64)>,
	pub data: T,
}

pub struct SimLink<E> {
	strength: f64,
	bias: f64,
	pub data: E,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Nothing to lay out yet.
	Idle,
	Running,
	/// Alpha fell below the minimum; ticking stopped.
	Settled,
}

/// Same sequence as the classic `lcg` used by force layouts, so jiggle is reproducible.
struct Lcg(u64);

impl Lcg {
	const A: u64 = 1_664_525;
	const C: u64 = 1_013_904_223;
	const M: u64 = 1 << 32;

	fn next(&mut self) -> f64 {
		self.0 = (Self::A * self.0 + Self::C) % Self::M;
		self.0 as f64 / Self::M as f64
	}

	fn jiggle(&mut self) -> f64 {
		(self.next() - 0.5) * 1e-6
	}
}

pub struct Simulation<T, E = ()> {
	graph: DiGraph<SimNode<T>, SimLink<E>>,
	params: LayoutConfig,
	alpha: f64,
	alpha_target: f64,
	alpha_decay: f64,
	center: (f64, f64),
	phase: Phase,
	active_drags: usize,
	random: Lcg,
}

impl<T, E> Simulation<T, E> {
	pub fn new(params: LayoutConfig, center: (f64, f64)) -> Self {
		let alpha_decay = 1.0 - params.alpha_min.powf(1.0 / DECAY_TICKS);
		Self {
			graph: DiGraph::new(),
			params,
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_decay,
			center,
			phase: Phase::Idle,
			active_drags: 0,
			random: Lcg(1),
		}
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn center(&self) -> (f64, f64) {
		self.center
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn node_count(&self) -> usize {
		self.graph.node_count()
	}

	pub fn node(&self, idx: NodeIndex) -> Option<&SimNode<T>> {
		self.graph.node_weight(idx)
	}

	/// Place a node on a phyllotaxis spiral around the centre.
	pub fn add_node(&mut self, data: T) -> NodeIndex {
		let i = self.graph.node_count() as f64;
		let radius = INITIAL_RADIUS * (0.5 + i).sqrt();
		let angle = i * PI * (3.0 - 5f64.sqrt());
		self.graph.add_node(SimNode {
			x: self.center.0 + radius * angle.cos(),
			y: self.center.1 + radius * angle.sin(),
			vx: 0.0,
			vy: 0.0,
			pin: None,
			data,
		})
	}

	/// Replace all links. Strength and bias come from endpoint degrees.
	pub fn set_edges(&mut self, edges: impl IntoIterator<Item = (NodeIndex, NodeIndex, E)>) {
		self.graph.clear_edges();
		for (source, target, data) in edges {
			self.graph.add_edge(
				source,
				target,
				SimLink {
					strength: 0.0,
					bias: 0.0,
					data,
				},
			);
		}

		let mut degree = vec![0usize; self.graph.node_count()];
		for edge in self.graph.edge_indices() {
			if let Some((s, t)) = self.graph.edge_endpoints(edge) {
				degree[s.index()] += 1;
				degree[t.index()] += 1;
			}
		}
		let edges: Vec<EdgeIndex> = self.graph.edge_indices().collect();
		for edge in edges {
			let Some((s, t)) = self.graph.edge_endpoints(edge) else {
				continue;
			};
			let (ds, dt) = (degree[s.index()] as f64, degree[t.index()] as f64);
			let link = &mut self.graph[edge];
			link.strength = 1.0 / ds.min(dt);
			link.bias = ds / (ds + dt);
		}
	}

	pub fn set_center(&mut self, x: f64, y: f64) {
		self.center = (x, y);
	}

	/// Resume ticking without touching alpha.
	pub fn restart(&mut self) {
		if self.graph.node_count() > 0 {
			self.phase = Phase::Running;
		}
	}

	/// Alpha back to 1 and resume ticking.
	pub fn reheat(&mut self) {
		self.alpha = 1.0;
		self.restart();
	}

	/// Hold a node at `(x, y)` until pinned elsewhere.
	pub fn pin(&mut self, idx: NodeIndex, x: f64, y: f64) {
		if let Some(node) = self.graph.node_weight_mut(idx) {
			node.pin = Some((x, y));
			node.x = x;
			node.y = y;
			node.vx = 0.0;
			node.vy = 0.0;
		}
	}

	pub fn drag_start(&mut self, idx: NodeIndex) {
		if self.active_drags == 0 {
			self.alpha_target = self.params.drag_alpha_target;
			self.restart();
		}
		self.active_drags += 1;
		if let Some((x, y)) = self.node(idx).map(|n| (n.x, n.y)) {
			self.pin(idx, x, y);
		}
	}

	pub fn drag_move(&mut self, idx: NodeIndex, x: f64, y: f64) {
		self.pin(idx, x, y);
	}

	/// The pin stays where the node was dropped.
	pub fn drag_end(&mut self) {
		self.active_drags = self.active_drags.saturating_sub(1);
		if self.active_drags == 0 {
			self.alpha_target = 0.0;
		}
	}

	/// Advance one step. Returns `false` when not running.
	pub fn tick(&mut self) -> bool {
		if self.phase != Phase::Running {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		self.apply_links();
		self.apply_many_body();
		self.apply_center();

		let keep = 1.0 - self.params.velocity_decay;
		for node in self.graph.node_weights_mut() {
			match node.pin {
				Some((x, y)) => {
					node.x = x;
					node.y = y;
					node.vx = 0.0;
					node.vy = 0.0;
				}
				None => {
					node.vx *= keep;
					node.vy *= keep;
					node.x += node.vx;
					node.y += node.vy;
				}
			}
		}

		if self.alpha < self.params.alpha_min {
			self.phase = Phase::Settled;
		}
		true
	}

	fn apply_links(&mut self) {
		let distance = self.params.link_distance;
		let alpha = self.alpha;
		let edges: Vec<EdgeIndex> = self.graph.edge_indices().collect();
		for edge in edges {
			let Some((s, t)) = self.graph.edge_endpoints(edge) else {
				continue;
			};
			if s == t {
				continue;
			}
			let (strength, bias) = {
				let link = &self.graph[edge];
				(link.strength, link.bias)
			};
			let (jx, jy) = (self.random.jiggle(), self.random.jiggle());
			let (source, target) = self.graph.index_twice_mut(s, t);
			let mut x = target.x + target.vx - source.x - source.vx;
			let mut y = target.y + target.vy - source.y - source.vy;
			if x == 0.0 {
				x = jx;
			}
			if y == 0.0 {
				y = jy;
			}
			let l = (x * x + y * y).sqrt();
			let l = (l - distance) / l * alpha * strength;
			let (x, y) = (x * l, y * l);
			target.vx -= x * bias;
			target.vy -= y * bias;
			source.vx += x * (1.0 - bias);
			source.vy += y * (1.0 - bias);
		}
	}

	fn apply_many_body(&mut self) {
		let strength = self.params.charge_strength * self.alpha;
		let positions: Vec<(f64, f64)> = self.graph.node_weights().map(|n| (n.x, n.y)).collect();
		for (i, node) in self.graph.node_weights_mut().enumerate() {
			let (xi, yi) = positions[i];
			for (j, &(xj, yj)) in positions.iter().enumerate() {
				if i == j {
					continue;
				}
				let (mut x, mut y) = (xj - xi, yj - yi);
				let mut l = x * x + y * y;
				if x == 0.0 {
					x = self.random.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.random.jiggle();
					l += y * y;
				}
				if l < DISTANCE_MIN_SQ {
					l = (DISTANCE_MIN_SQ * l).sqrt();
				}
				node.vx += x * strength / l;
				node.vy += y * strength / l;
			}
		}
	}

	fn apply_center(&mut self) {
		let n = self.graph.node_count() as f64;
		if n == 0.0 {
			return;
		}
		let (sx, sy) = self
			.graph
			.node_weights()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let (dx, dy) = (sx / n - self.center.0, sy / n - self.center.1);
		for node in self.graph.node_weights_mut() {
			node.x -= dx;
			node.y -= dy;
		}
	}

	pub fn visit_nodes<F: FnMut(NodeIndex, &SimNode<T>)>(&self, mut cb: F) {
		for idx in self.graph.node_indices() {
			cb(idx, &self.graph[idx]);
		}
	}

	pub fn visit_edges<F: FnMut(&SimNode<T>, &SimNode<T>, &E)>(&self, mut cb: F) {
		for edge in self.graph.edge_indices() {
			if let Some((s, t)) = self.graph.edge_endpoints(edge) {
				cb(&self.graph[s], &self.graph[t], &self.graph[edge].data);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sim(n: usize) -> (Simulation<usize>, Vec<NodeIndex>) {
		let mut sim = Simulation::new(LayoutConfig::default(), (400.0, 300.0));
		let nodes: Vec<NodeIndex> = (0..n).map(|i| sim.add_node(i)).collect();
		(sim, nodes)
	}

	fn settle<T, E>(sim: &mut Simulation<T, E>) -> usize {
		let mut ticks = 0;
		while sim.tick() {
			ticks += 1;
			assert!(ticks < 10_000, "simulation never settled");
		}
		ticks
	}

	fn distance<T>(sim: &Simulation<T>, a: NodeIndex, b: NodeIndex) -> f64 {
		let (a, b) = (sim.node(a).unwrap(), sim.node(b).unwrap());
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	fn centroid<T>(sim: &Simulation<T>) -> (f64, f64) {
		let (mut sx, mut sy, mut n) = (0.0, 0.0, 0.0);
		sim.visit_nodes(|_, node| {
			sx += node.x;
			sy += node.y;
			n += 1.0;
		});
		(sx / n, sy / n)
	}

	#[test]
	fn idle_until_nodes_exist() {
		let mut sim: Simulation<()> = Simulation::new(LayoutConfig::default(), (0.0, 0.0));
		sim.reheat();
		assert_eq!(sim.phase(), Phase::Idle);
		assert!(!sim.tick());
	}

	#[test]
	fn settles_in_about_three_hundred_ticks() {
		let (mut sim, nodes) = sim(3);
		sim.set_edges([(nodes[0], nodes[1], ()), (nodes[1], nodes[2], ())]);
		sim.reheat();
		assert_eq!(sim.phase(), Phase::Running);
		let ticks = settle(&mut sim);
		assert!((295..=305).contains(&ticks), "ticks = {ticks}");
		assert_eq!(sim.phase(), Phase::Settled);
		assert!(!sim.tick());
	}

	#[test]
	fn linked_pair_rests_near_link_distance() {
		let (mut sim, nodes) = sim(2);
		sim.set_edges([(nodes[0], nodes[1], ())]);
		sim.reheat();
		settle(&mut sim);
		let d = distance(&sim, nodes[0], nodes[1]);
		assert!((95.0..115.0).contains(&d), "distance = {d}");
	}

	#[test]
	fn unlinked_nodes_repel() {
		let (mut sim, nodes) = sim(2);
		let before = distance(&sim, nodes[0], nodes[1]);
		sim.reheat();
		settle(&mut sim);
		assert!(distance(&sim, nodes[0], nodes[1]) > before);
	}

	#[test]
	fn centroid_tracks_center() {
		let (mut sim, nodes) = sim(2);
		sim.set_edges([(nodes[0], nodes[1], ())]);
		sim.reheat();
		for _ in 0..50 {
			sim.tick();
		}
		let (cx, cy) = centroid(&sim);
		assert!((cx - 400.0).abs() < 1e-6 && (cy - 300.0).abs() < 1e-6);

		sim.set_center(600.0, 300.0);
		sim.reheat();
		sim.tick();
		let (cx, cy) = centroid(&sim);
		assert!((cx - 600.0).abs() < 1e-6 && (cy - 300.0).abs() < 1e-6);
	}

	#[test]
	fn link_strength_uses_lower_degree() {
		let (mut sim, nodes) = sim(4);
		sim.set_edges([
			(nodes[0], nodes[1], ()),
			(nodes[0], nodes[2], ()),
			(nodes[0], nodes[3], ()),
		]);
		for edge in sim.graph.edge_indices() {
			let link = &sim.graph[edge];
			assert_eq!(link.strength, 1.0);
			assert_eq!(link.bias, 0.75);
		}
	}

	#[test]
	fn drag_holds_node_and_relaxes_alpha_target() {
		let (mut sim, nodes) = sim(3);
		sim.set_edges([(nodes[0], nodes[1], ()), (nodes[1], nodes[2], ())]);
		sim.reheat();
		settle(&mut sim);

		sim.drag_start(nodes[1]);
		assert_eq!(sim.alpha_target(), 0.3);
		assert_eq!(sim.phase(), Phase::Running);
		sim.drag_move(nodes[1], 50.0, 60.0);
		for _ in 0..20 {
			sim.tick();
		}
		sim.drag_move(nodes[1], 70.0, 80.0);
		sim.drag_end();
		assert_eq!(sim.alpha_target(), 0.0);

		let node = sim.node(nodes[1]).unwrap();
		assert_eq!((node.x, node.y), (70.0, 80.0));
		settle(&mut sim);
		let node = sim.node(nodes[1]).unwrap();
		assert_eq!((node.x, node.y), (70.0, 80.0));
		assert_eq!(node.pin, Some((70.0, 80.0)));
	}

	#[test]
	fn concurrent_drags_keep_sim_warm() {
		let (mut sim, nodes) = sim(2);
		sim.drag_start(nodes[0]);
		sim.drag_start(nodes[1]);
		sim.drag_end();
		assert_eq!(sim.alpha_target(), 0.3);
		sim.drag_end();
		assert_eq!(sim.alpha_target(), 0.0);
	}

	#[test]
	fn drag_on_settled_sim_resumes_ticking() {
		let (mut sim, nodes) = sim(2);
		sim.reheat();
		settle(&mut sim);
		let settled_alpha = sim.alpha();
		sim.drag_start(nodes[0]);
		assert!(sim.tick());
		assert!(sim.alpha() > settled_alpha);
	}

	#[test]
	fn positions_stay_finite() {
		let (mut sim, nodes) = sim(5);
		sim.set_edges([(nodes[0], nodes[0], ()), (nodes[1], nodes[2], ())]);
		sim.pin(nodes[3], 10.0, 10.0);
		sim.pin(nodes[4], 10.0, 10.0);
		sim.reheat();
		settle(&mut sim);
		sim.visit_nodes(|_, node| assert!(node.x.is_finite() && node.y.is_finite()));
	}
}
