use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::{error, info, warn};

use crate::components::force_graph::style::{GraphOptions, Solver};
use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::components::legend::Legend;
use crate::dataset::{Dataset, DatasetError};

/// Builds the graph, refusing to render a dataset with broken references.
fn load_graph() -> Result<GraphData, DatasetError> {
	let dataset = Dataset::uttarakhand();
	if let Err(e) = dataset.validate() {
		error!("dataset rejected: {e}");
		return Err(e);
	}
	info!(
		"dataset loaded: {} nodes, {} edges",
		dataset.nodes.len(),
		dataset.edges.len()
	);
	Ok(GraphData::from(&dataset))
}

/// Default options, with the physics solver optionally picked by `?solver=`.
fn graph_options(solver: Option<String>) -> GraphOptions {
	let mut options = GraphOptions::default();
	if let Some(name) = solver {
		match Solver::parse(&name) {
			Some(solver) => options.physics.solver = solver,
			None => warn!(
				"unknown solver `{name}`, using {}",
				options.physics.solver.as_str()
			),
		}
	}
	options
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let options = graph_options(query.with_untracked(|q| q.get("solver")));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"The network could not be drawn"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{move || {
				let options = options.clone();
				load_graph()
					.map(|data| {
						view! {
							<div class="graph-container">
								<ForceGraphCanvas data=data options=options fullscreen=true />
								<div class="graph-overlay">
									<h1>"Disaster Management in Uttarakhand"</h1>
									<p class="subtitle">
										"Hover for details. Drag nodes to explore. Scroll to zoom."
									</p>
									<Legend />
								</div>
							</div>
						}
					})
			}}
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn literal_dataset_loads() {
		let data = load_graph().unwrap();
		assert_eq!(data.nodes.len(), 20);
		assert_eq!(data.links.len(), 26);
	}

	#[test]
	fn solver_query_selects_solver() {
		let options = graph_options(Some("repulsion".into()));
		assert_eq!(options.physics.solver, Solver::Repulsion);
	}

	#[test]
	fn unknown_solver_keeps_default() {
		let options = graph_options(Some("hierarchicalRepulsion".into()));
		assert_eq!(options.physics.solver, Solver::BarnesHut);
		assert_eq!(graph_options(None), GraphOptions::default());
	}
}
