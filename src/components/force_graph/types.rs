use super::style::{NodeStyle, category_style};
use crate::dataset::Dataset;

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub tooltip: String,
	/// Falls back to the default shape and a palette colour when unset.
	pub style: Option<NodeStyle>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub label: String,
	pub tooltip: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl From<&Dataset> for GraphData {
	fn from(data: &Dataset) -> Self {
		let nodes = data
			.nodes
			.iter()
			.map(|n| GraphNode {
				id: n.id.clone(),
				label: n.label.clone(),
				tooltip: n.tooltip.clone(),
				style: Some(category_style(n.category)),
			})
			.collect();
		let links = data
			.edges
			.iter()
			.map(|e| GraphLink {
				source: e.source.clone(),
				target: e.target.clone(),
				label: e.label.clone(),
				tooltip: e.tooltip.clone(),
			})
			.collect();
		Self { nodes, links }
	}
}
