//! Category styles, shape geometry and view options.

use force_graph::SimulationParameters;

use crate::dataset::Category;

/// Padding between a label and the outline of shapes that contain it.
const LABEL_MARGIN: f64 = 5.0;
/// Average glyph widths as a fraction of the font size, for when the canvas
/// cannot measure text.
const GLYPH_WIDTH: f64 = 0.55;
const CAPITAL_WIDTH: f64 = 0.72;
const SPACE_WIDTH: f64 = 0.28;

/// Outline drawn for a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
	/// Filled circle of fixed size, label below.
	Dot,
	/// Ellipse sized to the label.
	Ellipse,
	/// Rounded rectangle sized to the label.
	Box,
	/// Circle sized to the label.
	Circle,
	/// Regular hexagon of fixed size, label below.
	Hexagon,
}

impl NodeShape {
	/// CSS-friendly name, used by the legend swatches.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeShape::Dot => "dot",
			NodeShape::Ellipse => "ellipse",
			NodeShape::Box => "box",
			NodeShape::Circle => "circle",
			NodeShape::Hexagon => "hexagon",
		}
	}

	/// Whether the label is drawn inside the outline.
	pub fn label_inside(self) -> bool {
		matches!(self, NodeShape::Ellipse | NodeShape::Box | NodeShape::Circle)
	}

	/// Half width and half height of the outline in graph units, for a label
	/// rendering `text_w` wide.
	pub fn extent(self, text_w: f64, font_size: f64, size: f64) -> (f64, f64) {
		match self {
			NodeShape::Dot | NodeShape::Hexagon => (size, size),
			NodeShape::Box => (text_w / 2.0 + LABEL_MARGIN, font_size / 2.0 + LABEL_MARGIN),
			NodeShape::Ellipse => (
				text_w / 2.0 + 2.0 * LABEL_MARGIN,
				font_size / 2.0 + 1.5 * LABEL_MARGIN,
			),
			NodeShape::Circle => {
				let r = text_w.max(font_size) / 2.0 + LABEL_MARGIN;
				(r, r)
			}
		}
	}

	/// Whether an offset from the node centre lies inside the outline.
	pub fn contains(self, (hw, hh): (f64, f64), dx: f64, dy: f64) -> bool {
		match self {
			NodeShape::Dot | NodeShape::Circle | NodeShape::Hexagon => dx * dx + dy * dy <= hw * hw,
			NodeShape::Ellipse => (dx / hw).powi(2) + (dy / hh).powi(2) <= 1.0,
			NodeShape::Box => dx.abs() <= hw && dy.abs() <= hh,
		}
	}

	/// Distance from the centre to the outline along the unit vector `(ux, uy)`.
	pub fn boundary_distance(self, (hw, hh): (f64, f64), ux: f64, uy: f64) -> f64 {
		match self {
			NodeShape::Dot | NodeShape::Circle | NodeShape::Hexagon => hw,
			NodeShape::Ellipse => 1.0 / ((ux / hw).powi(2) + (uy / hh).powi(2)).sqrt(),
			NodeShape::Box => {
				let tx = if ux.abs() > f64::EPSILON { hw / ux.abs() } else { f64::INFINITY };
				let ty = if uy.abs() > f64::EPSILON { hh / uy.abs() } else { f64::INFINITY };
				tx.min(ty)
			}
		}
	}
}

/// Approximate rendered width of `text` in a sans-serif face.
pub fn text_width(text: &str, font_size: f64) -> f64 {
	text.chars()
		.map(|c| {
			if c.is_whitespace() {
				SPACE_WIDTH
			} else if c.is_uppercase() || c == 'm' || c == 'w' {
				CAPITAL_WIDTH
			} else {
				GLYPH_WIDTH
			}
		})
		.sum::<f64>()
		* font_size
}

/// Size and colour of a label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontStyle {
	/// Pixel size at zoom 1.
	pub size: f64,
	/// CSS colour.
	pub color: &'static str,
}

impl FontStyle {
	/// Canvas font string. Labels scale with the view like the shapes around them.
	pub fn css(&self) -> String {
		format!("{}px sans-serif", self.size)
	}
}

/// Visual style of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeStyle {
	/// Fill colour.
	pub background: &'static str,
	/// Outline colour.
	pub border: &'static str,
	/// Outline shape.
	pub shape: NodeShape,
}

/// Style for every node of `category`.
pub fn category_style(category: Category) -> NodeStyle {
	let (background, border, shape) = match category {
		Category::Hazard => ("#e74c3c", "#c0392b", NodeShape::Ellipse),
		Category::Organisation => ("#3498db", "#2980b9", NodeShape::Box),
		Category::System => ("#9b59b6", "#8e44ad", NodeShape::Ellipse),
		Category::Infrastructure => ("#1abc9c", "#16a085", NodeShape::Circle),
		Category::Project => ("#f39c12", "#e67e22", NodeShape::Box),
		Category::Outcome => ("#2ecc71", "#27ae60", NodeShape::Hexagon),
		Category::Community => ("#95a5a6", "#7f8c8d", NodeShape::Ellipse),
	};
	NodeStyle {
		background,
		border,
		shape,
	}
}

/// Defaults for nodes whose category does not override them.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeOptions {
	/// Shape used when no category style applies.
	pub shape: NodeShape,
	/// Radius of fixed-size shapes.
	pub size: f64,
	/// Label font.
	pub font: FontStyle,
}

/// Style shared by every edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeOptions {
	/// Line colour.
	pub color: &'static str,
	/// Line colour while highlighted.
	pub highlight: &'static str,
	/// Arrowhead length relative to the default.
	pub arrow_scale: f64,
	/// Line width at zoom 1.
	pub width: f64,
	/// Relationship label font, drawn centred on the edge.
	pub font: FontStyle,
}

impl EdgeOptions {
	/// Arrowhead length in graph units.
	pub fn arrow_length(&self) -> f64 {
		15.0 * self.arrow_scale
	}
}

/// Force model used for layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Solver {
	/// Strong long range repulsion, loose springs.
	BarnesHut,
	/// Weaker repulsion, stiffer springs; produces a tighter layout.
	Repulsion,
}

impl Solver {
	/// Parses a solver name as written in the page URL.
	pub fn parse(name: &str) -> Option<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"barneshut" | "barnes-hut" => Some(Solver::BarnesHut),
			"repulsion" => Some(Solver::Repulsion),
			_ => None,
		}
	}

	/// Name for logging.
	pub fn as_str(self) -> &'static str {
		match self {
			Solver::BarnesHut => "barnesHut",
			Solver::Repulsion => "repulsion",
		}
	}

	/// Simulation constants for this solver.
	pub fn parameters(self) -> SimulationParameters {
		match self {
			Solver::BarnesHut => SimulationParameters {
				force_charge: 600.0,
				force_spring: 0.04,
				force_max: 140.0,
				node_speed: 3000.0,
				damping_factor: 0.9,
			},
			Solver::Repulsion => SimulationParameters {
				force_charge: 300.0,
				force_spring: 0.08,
				force_max: 100.0,
				node_speed: 3000.0,
				damping_factor: 0.85,
			},
		}
	}
}

/// Initial placement of nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOptions {
	/// Seed nodes evenly on a circle instead of scattering them.
	pub improved_layout: bool,
}

/// Physics simulation settings.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsOptions {
	/// Run the simulation every frame.
	pub enabled: bool,
	/// Settle the layout before the first frame is drawn.
	pub stabilization: bool,
	/// Ticks spent settling.
	pub stabilization_iterations: usize,
	/// Force model.
	pub solver: Solver,
	/// Seconds per simulation tick while stabilizing.
	pub time_step: f32,
}

/// User interaction toggles.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionOptions {
	/// Highlight and show tooltips under the cursor.
	pub hover: bool,
	/// Hover time before a tooltip appears.
	pub tooltip_delay_ms: u32,
	/// Allow dragging nodes.
	pub drag_nodes: bool,
	/// Allow wheel zoom.
	pub zoom_view: bool,
	/// Allow panning by dragging the background.
	pub drag_view: bool,
}

/// Everything that controls how the graph looks and behaves.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphOptions {
	/// Initial placement.
	pub layout: LayoutOptions,
	/// Simulation.
	pub physics: PhysicsOptions,
	/// Node defaults.
	pub nodes: NodeOptions,
	/// Edge style.
	pub edges: EdgeOptions,
	/// Interaction toggles.
	pub interaction: InteractionOptions,
	/// Canvas clear colour.
	pub background: &'static str,
}

impl Default for GraphOptions {
	fn default() -> Self {
		Self {
			layout: LayoutOptions {
				improved_layout: true,
			},
			physics: PhysicsOptions {
				enabled: true,
				stabilization: true,
				stabilization_iterations: 300,
				solver: Solver::BarnesHut,
				time_step: 0.016,
			},
			nodes: NodeOptions {
				shape: NodeShape::Dot,
				size: 16.0,
				font: FontStyle {
					size: 12.0,
					color: "#2c3e50",
				},
			},
			edges: EdgeOptions {
				color: "#7f8c8d",
				highlight: "#2c3e50",
				arrow_scale: 0.6,
				width: 1.0,
				font: FontStyle {
					size: 10.0,
					color: "#2c3e50",
				},
			},
			interaction: InteractionOptions {
				hover: true,
				tooltip_delay_ms: 100,
				drag_nodes: true,
				zoom_view: true,
				drag_view: true,
			},
			background: "#ffffff",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hazard_is_red_ellipse() {
		let style = category_style(Category::Hazard);
		assert_eq!(style.background, "#e74c3c");
		assert_eq!(style.border, "#c0392b");
		assert_eq!(style.shape, NodeShape::Ellipse);
	}

	#[test]
	fn categories_have_distinct_colours() {
		let mut seen = std::collections::HashSet::new();
		for category in Category::ALL {
			assert!(seen.insert(category_style(category).background));
		}
	}

	#[test]
	fn outcome_is_fixed_size_hexagon() {
		let style = category_style(Category::Outcome);
		assert_eq!(style.shape, NodeShape::Hexagon);
		assert!(!style.shape.label_inside());
		let short = style.shape.extent(text_width("x", 12.0), 12.0, 16.0);
		let long = style.shape.extent(text_width("Risk Reduction & Resilience", 12.0), 12.0, 16.0);
		assert_eq!(short, long);
	}

	#[test]
	fn label_shapes_grow_with_text() {
		for shape in [NodeShape::Box, NodeShape::Ellipse, NodeShape::Circle] {
			let (short, _) = shape.extent(text_width("USDMA", 12.0), 12.0, 16.0);
			let (long, _) = shape.extent(
				text_width("Geospatial Platform & Risk Assessment", 12.0),
				12.0,
				16.0,
			);
			assert!(long > short, "{shape:?}");
		}
	}

	#[test]
	fn capitals_are_estimated_wider() {
		assert!(text_width("USDMA", 12.0) > text_width("usdma", 12.0));
		// "USDMA" renders about 43px wide at 12px sans-serif
		let (hw, _) = NodeShape::Box.extent(text_width("USDMA", 12.0), 12.0, 16.0);
		assert!(2.0 * (hw - LABEL_MARGIN) >= 43.0);
	}

	#[test]
	fn box_contains_corners_ellipse_does_not() {
		let extent = (40.0, 10.0);
		assert!(NodeShape::Box.contains(extent, 39.0, 9.0));
		assert!(!NodeShape::Ellipse.contains(extent, 39.0, 9.0));
		assert!(NodeShape::Ellipse.contains(extent, 39.0, 0.0));
		assert!(!NodeShape::Box.contains(extent, 41.0, 0.0));
	}

	#[test]
	fn boundary_distance_matches_axes() {
		let extent = (40.0, 10.0);
		assert!((NodeShape::Ellipse.boundary_distance(extent, 1.0, 0.0) - 40.0).abs() < 1e-9);
		assert!((NodeShape::Ellipse.boundary_distance(extent, 0.0, 1.0) - 10.0).abs() < 1e-9);
		assert!((NodeShape::Box.boundary_distance(extent, 0.0, -1.0) - 10.0).abs() < 1e-9);
		assert_eq!(NodeShape::Dot.boundary_distance(extent, 0.6, 0.8), 40.0);
	}

	#[test]
	fn solver_names_parse() {
		assert_eq!(Solver::parse("barnesHut"), Some(Solver::BarnesHut));
		assert_eq!(Solver::parse(" Repulsion "), Some(Solver::Repulsion));
		assert_eq!(Solver::parse("hierarchical"), None);
		assert_eq!(Solver::parse(Solver::Repulsion.as_str()), Some(Solver::Repulsion));
	}

	#[test]
	fn default_options_match_network_defaults() {
		let options = GraphOptions::default();
		assert_eq!(options.interaction.tooltip_delay_ms, 100);
		assert_eq!(options.physics.solver, Solver::BarnesHut);
		assert!(options.physics.stabilization);
		assert_eq!(options.edges.color, "#7f8c8d");
		assert!((options.edges.arrow_length() - 9.0).abs() < 1e-9);
	}
}
