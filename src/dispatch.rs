use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::controller::{Command, Controller, Effect};

/// Copyable handle to the [`Controller`] shared through context.
///
/// Views subscribe to `revision`, which bumps whenever an update reports
/// [`Effect::Refresh`]. Per-frame physics goes through [`Dispatcher::update`]
/// and never touches the signal.
#[derive(Clone, Copy)]
pub struct Dispatcher {
	controller: StoredValue<Controller, LocalStorage>,
	revision: RwSignal<u64>,
}

impl Dispatcher {
	pub fn new(controller: Controller) -> Self {
		Self {
			controller: StoredValue::new_local(controller),
			revision: RwSignal::new(0),
		}
	}

	pub fn send(self, command: Command) {
		let mut effects = Vec::new();
		self.controller
			.update_value(|controller| effects = controller.update(command));
		for effect in effects {
			self.run(effect);
		}
	}

	fn run(self, effect: Effect) {
		match effect {
			Effect::Refresh => self.revision.update(|r| *r += 1),
			Effect::FetchSchema => {
				let config = self.with(|c| c.config.api.clone());
				spawn_local(async move {
					let result = api::fetch_schema(&config).await;
					self.send(Command::SchemaLoaded(result));
				});
			}
			Effect::SubmitQuery(query) => {
				let config = self.with(|c| c.config.api.clone());
				spawn_local(async move {
					let result = api::run_query(&config, &query).await;
					self.send(Command::QueryFinished(result));
				});
			}
			Effect::Alert(message) => {
				if let Some(window) = web_sys::window() {
					let _ = window.alert_with_message(&message);
				}
			}
		}
	}

	/// Untracked read.
	pub fn with<U>(self, f: impl FnOnce(&Controller) -> U) -> U {
		self.controller.with_value(f)
	}

	/// Read and subscribe the current reactive scope to refreshes.
	pub fn track<U>(self, f: impl FnOnce(&Controller) -> U) -> U {
		self.revision.track();
		self.with(f)
	}

	/// Mutate without notifying views.
	pub fn update(self, f: impl FnOnce(&mut Controller)) {
		self.controller.update_value(f);
	}
}
