use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::{debug, warn};

use super::style::{GraphOptions, NodeShape, NodeStyle, text_width};
use super::types::GraphData;

/// Fallback palette for nodes without a style.
const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Screen-space distance within which an edge counts as hovered.
pub const EDGE_HIT_PX: f64 = 6.0;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
const FIT_PADDING: f64 = 40.0;

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub tooltip: String,
	pub style: NodeStyle,
	/// Half width and height of the outline.
	pub extent: (f64, f64),
}

#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: String,
	pub tooltip: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTarget {
	Node(DefaultNodeIdx),
	/// Index into [`ForceGraphState::edges`].
	Edge(usize),
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub target: Option<HoverTarget>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub edges: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_target: Option<HoverTarget>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	pub prev_edges: HashSet<usize>,
	delay_t: f64,
	tooltip_t: f64,
}

/// Where a node is and what its outline looks like, captured once per frame.
#[derive(Clone, Copy, Debug)]
pub struct Placed {
	pub x: f64,
	pub y: f64,
	pub shape: NodeShape,
	pub extent: (f64, f64),
}

/// Drawn part of an edge, from the source outline to the arrow tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
	pub start: (f64, f64),
	pub tip: (f64, f64),
	/// Base of the arrowhead.
	pub back: (f64, f64),
	/// Unit direction from source to target.
	pub dir: (f64, f64),
	/// The outlines overlap, so the segment runs centre to centre and is
	/// drawn underneath the nodes.
	pub overlapping: bool,
}

impl EdgeSegment {
	pub fn midpoint(&self) -> (f64, f64) {
		(
			(self.start.0 + self.tip.0) / 2.0,
			(self.start.1 + self.tip.1) / 2.0,
		)
	}
}

/// Segment for an edge from `a` to `b` with an arrowhead `arrow` long, trimmed
/// to both outlines when they leave room for it. `None` only when the two
/// centres coincide and there is no direction to draw.
pub fn edge_segment(a: &Placed, b: &Placed, arrow: f64) -> Option<EdgeSegment> {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return None;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let start = a.shape.boundary_distance(a.extent, ux, uy);
	let end = b.shape.boundary_distance(b.extent, ux, uy);

	let overlapping = start + end + arrow >= dist;
	let (start, end, arrow) = if overlapping {
		(0.0, 0.0, arrow.min(dist))
	} else {
		(start, end, arrow)
	};
	let tip = (b.x - ux * end, b.y - uy * end);
	Some(EdgeSegment {
		start: (a.x + ux * start, a.y + uy * start),
		tip,
		back: (tip.0 - ux * arrow, tip.1 - uy * arrow),
		dir: (ux, uy),
		overlapping,
	})
}

/// Hover text and the screen position it is anchored to.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub text: String,
	pub x: f64,
	pub y: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeInfo>,
	pub options: GraphOptions,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub pointer: (f64, f64),
	pub width: f64,
	pub height: f64,
}

impl ForceGraphState {
	/// Builds the simulation with estimated label widths.
	pub fn new(data: &GraphData, options: GraphOptions, width: f64, height: f64) -> Self {
		let font_size = options.nodes.font.size;
		Self::measured(data, options, width, height, |label| text_width(label, font_size))
	}

	/// Builds the simulation, sizing label outlines with `measure`, which
	/// returns the rendered width of a label in the node font.
	pub fn measured(
		data: &GraphData,
		options: GraphOptions,
		width: f64,
		height: f64,
		measure: impl Fn(&str) -> f64,
	) -> Self {
		let mut graph = ForceGraph::new(options.physics.solver.parameters());
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();
		let n = data.nodes.len();
		let radius = (n as f64 * 18.0).max(120.0);

		for (i, node) in data.nodes.iter().enumerate() {
			let style = node.style.unwrap_or_else(|| NodeStyle {
				background: COLORS[i % COLORS.len()],
				border: COLORS[i % COLORS.len()],
				shape: options.nodes.shape,
			});
			let (x, y) = if options.layout.improved_layout {
				let angle = (i as f64) * 2.0 * PI / n as f64;
				(radius * angle.cos(), radius * angle.sin())
			} else {
				(
					(rand_simple(i) - 0.5) * 2.0 * radius,
					(rand_simple(i + n) - 0.5) * 2.0 * radius,
				)
			};
			let extent = style.shape.extent(
				measure(&node.label),
				options.nodes.font.size,
				options.nodes.size,
			);
			// Wide outlines need more charge to keep clear of their neighbours
			let mass = 10.0 * (extent.0.max(extent.1) / options.nodes.size).max(1.0);

			let idx = graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: mass as f32,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					tooltip: node.tooltip.clone(),
					style,
					extent,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push(EdgeInfo {
					source: src,
					target: tgt,
					label: link.label.clone(),
					tooltip: link.tooltip.clone(),
				});
			} else {
				warn!("dropping link {} -> {}: unknown endpoint", link.source, link.target);
			}
		}

		let mut state = Self {
			graph,
			edges,
			options,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			pointer: (0.0, 0.0),
			width,
			height,
		};
		if state.options.physics.stabilization {
			state.stabilize();
			state.fit();
		}
		state
	}

	/// Advances the simulation until the layout has settled.
	pub fn stabilize(&mut self) {
		let (iterations, dt) = (
			self.options.physics.stabilization_iterations,
			self.options.physics.time_step,
		);
		for _ in 0..iterations {
			self.graph.update(dt);
		}
		debug!("stabilized after {iterations} iterations");
	}

	/// Centres the graph and zooms out until every node is visible.
	pub fn fit(&mut self) {
		let (mut min_x, mut min_y, mut max_x, mut max_y) = (
			f64::INFINITY,
			f64::INFINITY,
			f64::NEG_INFINITY,
			f64::NEG_INFINITY,
		);
		self.graph.visit_nodes(|node| {
			let (hw, hh) = node.data.user_data.extent;
			let (x, y) = (node.x() as f64, node.y() as f64);
			min_x = min_x.min(x - hw);
			max_x = max_x.max(x + hw);
			min_y = min_y.min(y - hh);
			max_y = max_y.max(y + hh);
		});
		if !min_x.is_finite() || !max_x.is_finite() {
			return;
		}

		let (graph_w, graph_h) = ((max_x - min_x).max(1.0), (max_y - min_y).max(1.0));
		let k = ((self.width - 2.0 * FIT_PADDING) / graph_w)
			.min((self.height - 2.0 * FIT_PADDING) / graph_h)
			.clamp(MIN_ZOOM, 1.0);
		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn placed(&self) -> HashMap<DefaultNodeIdx, Placed> {
		let mut placed = HashMap::new();
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			placed.insert(
				node.index(),
				Placed {
					x: node.x() as f64,
					y: node.y() as f64,
					shape: info.style.shape,
					extent: info.extent,
				},
			);
		});
		placed
	}

	/// One entry per [`ForceGraphState::edges`], in the same order.
	pub fn edge_segments(
		&self,
		placed: &HashMap<DefaultNodeIdx, Placed>,
	) -> Vec<Option<EdgeSegment>> {
		let arrow = self.options.edges.arrow_length();
		self.edges
			.iter()
			.map(|edge| {
				let (a, b) = (placed.get(&edge.source)?, placed.get(&edge.target)?);
				edge_segment(a, b, arrow)
			})
			.collect()
	}

	pub fn with_node<R>(&self, idx: DefaultNodeIdx, f: impl FnOnce(&NodeInfo) -> R) -> Option<R> {
		let mut f = Some(f);
		let mut result = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				if let Some(f) = f.take() {
					result = Some(f(&node.data.user_data));
				}
			}
		});
		result
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// The node whose outline contains the point, nearest centre first.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found: Option<(DefaultNodeIdx, f64)> = None;
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			let (dx, dy) = (gx - node.x() as f64, gy - node.y() as f64);
			if info.style.shape.contains(info.extent, dx, dy) {
				let dist = dx * dx + dy * dy;
				if found.is_none_or(|(_, best)| dist < best) {
					found = Some((node.index(), dist));
				}
			}
		});
		found.map(|(idx, _)| idx)
	}

	/// The edge passing closest to the point, if within [`EDGE_HIT_PX`].
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let positions = self.positions();
		let limit = EDGE_HIT_PX / self.transform.k;
		let mut found: Option<(usize, f64)> = None;
		for (i, edge) in self.edges.iter().enumerate() {
			let (Some(&a), Some(&b)) = (positions.get(&edge.source), positions.get(&edge.target))
			else {
				continue;
			};
			let dist = segment_distance((gx, gy), a, b);
			if dist <= limit && found.is_none_or(|(_, best)| dist < best) {
				found = Some((i, dist));
			}
		}
		found.map(|(i, _)| i)
	}

	pub fn target_at(&self, sx: f64, sy: f64) -> Option<HoverTarget> {
		self.node_at_position(sx, sy)
			.map(HoverTarget::Node)
			.or_else(|| self.edge_at_position(sx, sy).map(HoverTarget::Edge))
	}

	pub fn set_hover(&mut self, target: Option<HoverTarget>) {
		if self.hover.target == target {
			return;
		}
		let was_hovering = self.hover.target.is_some();

		// Keep the previous highlight around while it fades out
		if was_hovering && target.is_none() {
			self.hover.prev_target = self.hover.target.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
			self.hover.prev_edges = std::mem::take(&mut self.hover.edges);
		} else {
			self.hover.prev_target = None;
			self.hover.prev_neighbors.clear();
			self.hover.prev_edges.clear();
		}

		self.hover.target = target;
		self.hover.neighbors.clear();
		self.hover.edges.clear();
		self.hover.tooltip_t = 0.0;

		let highlight = if self.options.interaction.hover {
			target
		} else {
			None
		};
		match highlight {
			Some(HoverTarget::Node(idx)) => {
				for (i, edge) in self.edges.iter().enumerate() {
					if edge.source == idx {
						self.hover.neighbors.insert(edge.target);
						self.hover.edges.insert(i);
					} else if edge.target == idx {
						self.hover.neighbors.insert(edge.source);
						self.hover.edges.insert(i);
					}
				}
			}
			Some(HoverTarget::Edge(i)) => {
				if let Some(edge) = self.edges.get(i) {
					self.hover.neighbors.insert(edge.source);
					self.hover.neighbors.insert(edge.target);
					self.hover.edges.insert(i);
				}
			}
			None => {}
		}
		if target.is_some() && !was_hovering {
			self.hover.delay_t = 0.0;
		}
		match target {
			Some(HoverTarget::Node(idx)) => {
				if let Some(id) = self.with_node(idx, |n| n.id.clone()) {
					debug!("hovering node {id}");
				}
			}
			Some(HoverTarget::Edge(i)) => debug!("hovering edge #{i}"),
			None => {}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.is_hovered(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.options.interaction.hover
			&& (self.hover.target == Some(HoverTarget::Node(idx))
				|| self.hover.prev_target == Some(HoverTarget::Node(idx)))
	}

	/// Whether hover highlighting is on and something is, or was just, hovered.
	pub fn has_active_highlight(&self) -> bool {
		self.options.interaction.hover
			&& (self.hover.target.is_some() || self.hover.prev_target.is_some())
	}

	pub fn is_edge_highlighted(&self, i: usize) -> bool {
		self.hover.edges.contains(&i) || self.hover.prev_edges.contains(&i)
	}

	/// Tooltip for the hovered node or edge once the hover delay has elapsed.
	pub fn tooltip(&self) -> Option<Tooltip> {
		if self.drag.active {
			return None;
		}
		let target = self.hover.target?;
		if self.hover.tooltip_t * 1000.0 < f64::from(self.options.interaction.tooltip_delay_ms) {
			return None;
		}
		let text = match target {
			HoverTarget::Node(idx) => self.with_node(idx, |n| n.tooltip.clone())?,
			HoverTarget::Edge(i) => self.edges.get(i)?.tooltip.clone(),
		};
		Some(Tooltip {
			text,
			x: self.pointer.0,
			y: self.pointer.1,
		})
	}

	pub fn tick(&mut self, dt: f32) {
		if self.options.physics.enabled {
			self.graph.update(dt);
		}
		let dt = dt as f64;

		let (target, delay, speed) = if self.hover.target.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.target.is_some() {
			self.hover.tooltip_t += dt;
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_target = None;
				self.hover.prev_neighbors.clear();
				self.hover.prev_edges.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		let (drag_nodes, drag_view) = (
			self.options.interaction.drag_nodes,
			self.options.interaction.drag_view,
		);
		let hit = if drag_nodes {
			self.node_at_position(x, y)
		} else {
			None
		};

		if let Some(idx) = hit {
			self.drag.active = true;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = x;
			self.drag.start_y = y;
			let drag = &mut self.drag;
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					drag.node_start_x = node.x();
					drag.node_start_y = node.y();
					node.data.is_anchor = true;
				}
			});
		} else if drag_view {
			self.pan.active = true;
			self.pan.start_x = x;
			self.pan.start_y = y;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		self.pointer = (x, y);

		// Tracked even without hover highlighting, tooltips still need it
		if !self.drag.active && !self.pan.active {
			let target = self.target_at(x, y);
			self.set_hover(target);
		}

		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (
					(x - self.drag.start_x) / self.transform.k,
					(y - self.drag.start_y) / self.transform.k,
				);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
					}
				});
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Ends a drag or pan; a dragged node goes back under simulation control.
	pub fn pointer_up(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
		self.drag.active = false;
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.set_hover(None);
	}

	/// Zooms around a screen point, positive `delta_y` zooming out.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		if !self.options.interaction.zoom_view {
			return;
		}
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}
}

/// Deterministic scatter for seeding positions without the circular layout.
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn segment_distance((px, py): (f64, f64), (ax, ay): (f64, f64), (bx, by): (f64, f64)) -> f64 {
	let (dx, dy) = (bx - ax, by - ay);
	let len2 = dx * dx + dy * dy;
	let t = if len2 < f64::EPSILON {
		0.0
	} else {
		(((px - ax) * dx + (py - ay) * dy) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (ax + t * dx, ay + t * dy);
	((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::style::Solver;
	use crate::dataset::Dataset;

	fn static_options() -> GraphOptions {
		let mut options = GraphOptions::default();
		options.physics.enabled = false;
		options.physics.stabilization = false;
		options
	}

	fn static_state() -> ForceGraphState {
		let data = GraphData::from(&Dataset::uttarakhand());
		ForceGraphState::new(&data, static_options(), 1200.0, 900.0)
	}

	fn index_of(state: &ForceGraphState, id: &str) -> DefaultNodeIdx {
		let mut found = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some(node.index());
			}
		});
		found.unwrap()
	}

	fn graph_to_screen(state: &ForceGraphState, (x, y): (f64, f64)) -> (f64, f64) {
		let t = &state.transform;
		(x * t.k + t.x, y * t.k + t.y)
	}

	fn screen_pos(state: &ForceGraphState, id: &str) -> (f64, f64) {
		graph_to_screen(state, state.positions()[&index_of(state, id)])
	}

	#[test]
	fn one_node_per_id_and_one_connector_per_edge() {
		let state = static_state();
		let mut nodes = 0;
		state.graph.visit_nodes(|_| nodes += 1);
		let mut connectors = 0;
		state.graph.visit_edges(|_, _, _| connectors += 1);
		assert_eq!(nodes, 20);
		assert_eq!(connectors, 26);
		assert_eq!(state.edges.len(), 26);

		let (ndma, usdma) = (index_of(&state, "ndma"), index_of(&state, "usdma"));
		let guides = &state.edges[0];
		assert_eq!((guides.source, guides.target), (ndma, usdma));
		assert_eq!(guides.label, "guides");
	}

	#[test]
	fn unknown_link_endpoints_are_dropped() {
		let mut data = GraphData::from(&Dataset::uttarakhand());
		data.links[0].target = "nowhere".into();
		let state = ForceGraphState::new(&data, static_options(), 800.0, 600.0);
		assert_eq!(state.edges.len(), 25);
	}

	#[test]
	fn node_hover_shows_literal_tooltip_after_delay() {
		let mut state = static_state();
		let (x, y) = screen_pos(&state, "flood");
		state.pointer_move(x, y);
		assert_eq!(
			state.hover.target,
			Some(HoverTarget::Node(index_of(&state, "flood")))
		);
		assert_eq!(state.tooltip(), None);

		state.tick(0.05);
		assert_eq!(state.tooltip(), None);
		state.tick(0.06);
		let tooltip = state.tooltip().unwrap();
		assert_eq!(tooltip.text, "Flash floods and riverine floods");
		assert_eq!((tooltip.x, tooltip.y), (x, y));
	}

	#[test]
	fn edge_hover_shows_literal_tooltip() {
		let mut state = static_state();
		let (ax, ay) = screen_pos(&state, "ndma");
		let (bx, by) = screen_pos(&state, "usdma");
		let (mx, my) = ((ax + bx) / 2.0, (ay + by) / 2.0);
		state.pointer_move(mx, my);
		assert_eq!(state.hover.target, Some(HoverTarget::Edge(0)));
		assert!(state.is_edge_highlighted(0));
		assert!(state.is_highlighted(index_of(&state, "ndma")));

		state.tick(0.2);
		assert_eq!(
			state.tooltip().unwrap().text,
			"NDMA provides national guidance to USDMA"
		);
	}

	#[test]
	fn node_hover_highlights_both_directions() {
		let mut state = static_state();
		let server = index_of(&state, "server");
		state.set_hover(Some(HoverTarget::Node(server)));
		for id in ["sensors", "sirens", "bhudev"] {
			assert!(state.is_highlighted(index_of(&state, id)), "{id}");
		}
		assert!(!state.is_highlighted(index_of(&state, "flood")));
		assert_eq!(state.hover.edges.len(), 3);
	}

	#[test]
	fn highlight_fades_after_leaving() {
		let mut state = static_state();
		let flood = index_of(&state, "flood");
		state.set_hover(Some(HoverTarget::Node(flood)));
		for _ in 0..60 {
			state.tick(0.016);
		}
		assert!(state.hover.highlight_t > 0.5);

		state.pointer_leave();
		assert!(state.is_hovered(flood));
		assert_eq!(state.tooltip(), None);
		for _ in 0..400 {
			state.tick(0.016);
		}
		assert_eq!(state.hover.highlight_t, 0.0);
		assert!(!state.has_active_highlight());
	}

	#[test]
	fn hover_disabled_keeps_tooltips_without_highlight() {
		let data = GraphData::from(&Dataset::uttarakhand());
		let mut options = static_options();
		options.interaction.hover = false;
		let mut state = ForceGraphState::new(&data, options, 1200.0, 900.0);
		let flood = index_of(&state, "flood");
		let (x, y) = screen_pos(&state, "flood");
		state.pointer_move(x, y);
		assert_eq!(state.hover.target, Some(HoverTarget::Node(flood)));

		state.tick(0.2);
		assert_eq!(
			state.tooltip().map(|t| t.text).as_deref(),
			Some("Flash floods and riverine floods")
		);
		assert!(!state.has_active_highlight());
		assert!(!state.is_hovered(flood));
		assert!(!state.is_highlighted(index_of(&state, "usdma")));
		assert!(state.hover.edges.is_empty());
	}

	#[test]
	fn every_edge_has_a_segment_for_both_solvers() {
		let data = GraphData::from(&Dataset::uttarakhand());
		for solver in [Solver::BarnesHut, Solver::Repulsion] {
			let mut options = GraphOptions::default();
			options.physics.solver = solver;
			let mut state = ForceGraphState::new(&data, options, 1200.0, 900.0);
			for round in 0..2 {
				let placed = state.placed();
				let segments = state.edge_segments(&placed);
				assert_eq!(segments.len(), 26);
				for (edge, segment) in state.edges.iter().zip(&segments) {
					assert!(
						segment.is_some(),
						"{solver:?} round {round}: {:?} -> {:?} has no segment",
						edge.source,
						edge.target
					);
				}
				// Keep running after stabilization, as the animation loop does
				for _ in 0..600 {
					state.tick(0.016);
				}
			}
		}
	}

	#[test]
	fn separated_outlines_trim_to_boundaries() {
		let dot = |x| Placed {
			x,
			y: 0.0,
			shape: NodeShape::Dot,
			extent: (16.0, 16.0),
		};
		let segment = edge_segment(&dot(0.0), &dot(100.0), 9.0).unwrap();
		assert!(!segment.overlapping);
		assert_eq!(segment.start, (16.0, 0.0));
		assert_eq!(segment.tip, (84.0, 0.0));
		assert_eq!(segment.back, (75.0, 0.0));
		assert_eq!(segment.midpoint(), (50.0, 0.0));
	}

	#[test]
	fn overlapping_outlines_fall_back_to_centres() {
		let boxed = |x| Placed {
			x,
			y: 0.0,
			shape: NodeShape::Box,
			extent: (60.0, 11.0),
		};
		let segment = edge_segment(&boxed(0.0), &boxed(100.0), 9.0).unwrap();
		assert!(segment.overlapping);
		assert_eq!(segment.start, (0.0, 0.0));
		assert_eq!(segment.tip, (100.0, 0.0));
		assert_eq!(segment.back, (91.0, 0.0));
		assert_eq!(segment.dir, (1.0, 0.0));

		assert_eq!(edge_segment(&boxed(5.0), &boxed(5.0), 9.0), None);
	}

	#[test]
	fn measured_label_widths_size_outlines() {
		let data = GraphData::from(&Dataset::uttarakhand());
		let state = ForceGraphState::measured(&data, static_options(), 1200.0, 900.0, |label| {
			if label == "USDMA" { 80.0 } else { 10.0 }
		});
		let usdma = index_of(&state, "usdma");
		let extent = state.with_node(usdma, |n| n.extent).unwrap();
		assert_eq!(extent, (45.0, 11.0));
	}

	#[test]
	fn wide_outlines_weigh_more() {
		let state = static_state();
		let mut mass = HashMap::new();
		state.graph.visit_nodes(|node| {
			mass.insert(node.data.user_data.id.clone(), node.data.mass);
		});
		// A fixed-size hexagon keeps the base mass
		assert_eq!(mass["risk_reduction"], 10.0);
		assert!(mass["geoplatform"] > mass["risk_reduction"]);
		assert!(mass["geoplatform"] > mass["usdma"]);
	}

	#[test]
	fn dragging_moves_node_and_releases_it() {
		let mut state = static_state();
		let flood = index_of(&state, "flood");
		let before = state.positions()[&flood];
		let (x, y) = screen_pos(&state, "flood");

		state.pointer_down(x, y);
		assert!(state.drag.active);
		state.pointer_move(x + 50.0, y);
		let after = state.positions()[&flood];
		assert!((after.0 - before.0 - 50.0).abs() < 1e-3);
		assert!((after.1 - before.1).abs() < 1e-3);

		state.pointer_up();
		assert!(!state.drag.active);
		let mut anchored = true;
		state.graph.visit_nodes(|node| {
			if node.index() == flood {
				anchored = node.data.is_anchor;
			}
		});
		assert!(!anchored);
	}

	#[test]
	fn background_drag_pans() {
		let mut state = static_state();
		let start = (state.transform.x, state.transform.y);
		state.pointer_down(2.0, 2.0);
		assert!(state.pan.active);
		state.pointer_move(32.0, -8.0);
		assert_eq!((state.transform.x, state.transform.y), (start.0 + 30.0, start.1 - 10.0));
	}

	#[test]
	fn zoom_is_clamped() {
		let mut state = static_state();
		for _ in 0..100 {
			state.zoom_at(600.0, 450.0, -1.0);
		}
		assert_eq!(state.transform.k, MAX_ZOOM);
		for _ in 0..200 {
			state.zoom_at(600.0, 450.0, 1.0);
		}
		assert_eq!(state.transform.k, MIN_ZOOM);
	}

	#[test]
	fn zoom_keeps_point_under_cursor() {
		let mut state = static_state();
		let before = state.screen_to_graph(300.0, 200.0);
		state.zoom_at(300.0, 200.0, -1.0);
		let after = state.screen_to_graph(300.0, 200.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn stabilization_keeps_graph_visible() {
		let data = GraphData::from(&Dataset::uttarakhand());
		let state = ForceGraphState::new(&data, GraphOptions::default(), 1200.0, 900.0);
		for (x, y) in state.positions().into_values() {
			assert!(x.is_finite() && y.is_finite());
			let (sx, sy) = graph_to_screen(&state, (x, y));
			assert!((0.0..=1200.0).contains(&sx), "x {sx}");
			assert!((0.0..=900.0).contains(&sy), "y {sy}");
		}
		assert!(state.transform.k <= 1.0);
	}

	#[test]
	fn unstyled_nodes_use_default_shape() {
		let mut data = GraphData::from(&Dataset::uttarakhand());
		data.nodes[0].style = None;
		let state = ForceGraphState::new(&data, static_options(), 800.0, 600.0);
		let mut shape = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == "earthquake" {
				shape = Some(node.data.user_data.style.shape);
			}
		});
		assert_eq!(shape, Some(state.options.nodes.shape));
	}

	#[test]
	fn segment_distance_clamps_to_endpoints() {
		assert_eq!(segment_distance((5.0, 3.0), (0.0, 0.0), (10.0, 0.0)), 3.0);
		assert_eq!(segment_distance((13.0, 4.0), (0.0, 0.0), (10.0, 0.0)), 5.0);
	}
}
