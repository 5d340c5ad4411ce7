use leptos::prelude::*;

use super::force_graph::style::category_style;
use crate::dataset::Category;

/// Colour and shape key for every node category.
#[component]
pub fn Legend() -> impl IntoView {
	let entries = Category::ALL
		.into_iter()
		.map(|category| {
			let style = category_style(category);
			view! {
				<li class="legend-entry">
					<span
						class=format!("legend-swatch legend-{}", style.shape.as_str())
						style=format!(
							"background: {}; border-color: {};",
							style.background,
							style.border,
						)
					></span>
					{category.display_name()}
				</li>
			}
		})
		.collect_view();

	view! { <ul class="graph-legend">{entries}</ul> }
}
