//! Node and edge records for the knowledge graph.
//!
//! Records serialise in the data-set format used by browser network
//! libraries: nodes as `{id, label, group, title}` and edges as
//! `{from, to, label, title}`.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod uttarakhand;

/// Classification of a node. Each category has exactly one visual style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	/// Natural hazards.
	Hazard,
	/// Government and research bodies.
	Organisation,
	/// Warning systems and apps.
	System,
	/// Physical infrastructure.
	Infrastructure,
	/// Projects and initiatives.
	Project,
	/// Outcomes and processes.
	Outcome,
	/// People affected by the hazards.
	Community,
}

impl Category {
	/// Every category, in legend order.
	pub const ALL: [Category; 7] = [
		Category::Hazard,
		Category::Organisation,
		Category::System,
		Category::Infrastructure,
		Category::Project,
		Category::Outcome,
		Category::Community,
	];

	/// Wire name (the `group` field).
	pub fn as_str(self) -> &'static str {
		match self {
			Category::Hazard => "hazard",
			Category::Organisation => "organisation",
			Category::System => "system",
			Category::Infrastructure => "infrastructure",
			Category::Project => "project",
			Category::Outcome => "outcome",
			Category::Community => "community",
		}
	}

	/// Human readable name for the legend.
	pub fn display_name(self) -> &'static str {
		match self {
			Category::Hazard => "Hazards",
			Category::Organisation => "Organisations",
			Category::System => "Systems & apps",
			Category::Infrastructure => "Infrastructure",
			Category::Project => "Projects & initiatives",
			Category::Outcome => "Outcomes",
			Category::Community => "Community",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An entity in the diagram.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
	/// Unique identifier referenced by edges.
	pub id: String,
	/// Text drawn on or next to the node.
	pub label: String,
	/// Determines colour and shape.
	#[serde(rename = "group")]
	pub category: Category,
	/// Hover text.
	#[serde(rename = "title")]
	pub tooltip: String,
}

/// A directed, labelled relationship between two nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
	/// Source node id.
	#[serde(rename = "from")]
	pub source: String,
	/// Target node id.
	#[serde(rename = "to")]
	pub target: String,
	/// Relationship drawn at the edge midpoint.
	pub label: String,
	/// Hover text.
	#[serde(rename = "title")]
	pub tooltip: String,
}

/// Errors raised while loading or checking a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
	/// Two nodes share an id.
	#[error("duplicate node id `{id}`")]
	DuplicateNodeId {
		/// The repeated id.
		id: String,
	},
	/// An edge references a node that does not exist.
	#[error("edge #{index} ({from} -> {to}) references unknown node `{missing}`")]
	DanglingEdge {
		/// Position of the edge in the edge list.
		index: usize,
		/// Source id of the edge.
		from: String,
		/// Target id of the edge.
		to: String,
		/// The endpoint that could not be resolved.
		missing: String,
	},
	/// Malformed JSON, or a record with an unknown category.
	#[error("invalid dataset json: {0}")]
	Json(#[from] serde_json::Error),
}

/// Immutable node and edge lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
	/// All nodes.
	pub nodes: Vec<NodeRecord>,
	/// All edges.
	pub edges: Vec<EdgeRecord>,
}

impl Dataset {
	/// The Uttarakhand disaster-management graph.
	pub fn uttarakhand() -> Self {
		uttarakhand::dataset()
	}

	/// Checks that node ids are unique and every edge endpoint exists.
	///
	/// Stops at the first problem so the offending record can be reported.
	pub fn validate(&self) -> Result<(), DatasetError> {
		let mut ids = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !ids.insert(node.id.as_str()) {
				return Err(DatasetError::DuplicateNodeId {
					id: node.id.clone(),
				});
			}
		}

		for (index, edge) in self.edges.iter().enumerate() {
			let missing = [&edge.source, &edge.target]
				.into_iter()
				.find(|id| !ids.contains(id.as_str()));
			if let Some(missing) = missing {
				return Err(DatasetError::DanglingEdge {
					index,
					from: edge.source.clone(),
					to: edge.target.clone(),
					missing: missing.clone(),
				});
			}
		}
		Ok(())
	}

	/// Serialises to `{"nodes": [...], "edges": [...]}`.
	pub fn to_json(&self) -> Result<String, DatasetError> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	/// Parses the format produced by [`Dataset::to_json`].
	pub fn from_json(json: &str) -> Result<Self, DatasetError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Looks up a node by id.
	pub fn node(&self, id: &str) -> Option<&NodeRecord> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Nodes belonging to `category`, in declaration order.
	pub fn nodes_in(&self, category: Category) -> impl Iterator<Item = &NodeRecord> {
		self.nodes.iter().filter(move |n| n.category == category)
	}

	/// Edges leaving `id`.
	pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a EdgeRecord> {
		self.edges.iter().filter(move |e| e.source == id)
	}

	/// Edges arriving at `id`.
	pub fn edges_to<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a EdgeRecord> {
		self.edges.iter().filter(move |e| e.target == id)
	}
}
