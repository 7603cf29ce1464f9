use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::components::panels::{DetailPanel, NodeTooltip};
use crate::components::query_builder::{QueryBuilder, QueryForm};
use crate::config::AppConfig;
use crate::controller::{Command, Controller};
use crate::dispatch::Dispatcher;

/// Query builder, graph canvas and detail panels.
#[component]
pub fn Home() -> impl IntoView {
	let config = expect_context::<AppConfig>();
	let dispatcher = Dispatcher::new(Controller::new(config, 800.0));
	provide_context(dispatcher);
	dispatcher.send(Command::LoadSchema);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

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

			<div class="container">
				<QueryBuilder />
				<main class="main-content">
					<QueryForm />
					<ForceGraphCanvas />
				</main>
				<DetailPanel />
				<NodeTooltip />
			</div>
		</ErrorBoundary>
	}
}
