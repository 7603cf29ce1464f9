use leptos::prelude::*;

use crate::controller::Command;
use crate::dispatch::Dispatcher;

/// Floating hover summary of a node.
#[component]
pub fn NodeTooltip() -> impl IntoView {
	let dispatcher = expect_context::<Dispatcher>();
	let tooltip = move || dispatcher.track(|c| c.tooltip.clone());

	view! {
		<div
			id="tooltip"
			class="tooltip"
			style="position: absolute; pointer-events: none; white-space: pre-line;"
			style:opacity=move || if tooltip().is_some() { "1" } else { "0" }
			style:left=move || tooltip().map(|t| format!("{}px", t.left)).unwrap_or_default()
			style:top=move || tooltip().map(|t| format!("{}px", t.top)).unwrap_or_default()
		>
			{move || tooltip().map(|t| t.lines.join("\n")).unwrap_or_default()}
		</div>
	}
}

/// Persistent properties of the last clicked node.
#[component]
pub fn DetailPanel() -> impl IntoView {
	let dispatcher = expect_context::<Dispatcher>();
	let details = move || dispatcher.track(|c| c.details.clone());

	view! {
		<aside id="sidebar" class="sidebar" class:collapsed=move || details().is_none()>
			<button
				id="close-sidebar"
				class="close-button"
				on:click=move |_| dispatcher.send(Command::CloseDetailPanel)
			>
				"×"
			</button>
			<h2>"Node Properties"</h2>
			<ul id="node-properties">
				{move || {
					details()
						.unwrap_or_default()
						.into_iter()
						.map(|(key, value)| {
							view! {
								<li>
									<strong>{format!("{key}:")}</strong>
									" "
									{value}
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</aside>
	}
}
