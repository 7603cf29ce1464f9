use graph_query_canvas::config::AppConfig;
use graph_query_canvas::{App, init_logging};
use leptos::prelude::*;
use log::warn;

fn main() {
	let (config, problem) = match AppConfig::from_document() {
		Ok(config) => (config, None),
		Err(e) => (AppConfig::default(), Some(e)),
	};
	init_logging(config.level());
	if let Some(e) = problem {
		warn!("{e}; falling back to defaults");
	}

	mount_to_body(move || view! { <App config=config /> });
}
