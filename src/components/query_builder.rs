use leptos::prelude::*;

use crate::controller::Command;
use crate::dispatch::Dispatcher;
use crate::query::{DEFAULT_LIMIT, Role, SelectionState, Side};

const SIDES: [(Side, &str, &str); 3] = [
	(Side::Source, "source", "Source"),
	(Side::Target, "target", "Target"),
	(Side::Both, "both", "Both"),
];

/// Which list a checkbox row belongs to.
#[derive(Clone, Copy, PartialEq)]
enum Entity {
	Label,
	Property,
}

impl Entity {
	fn slug(self) -> &'static str {
		match self {
			Entity::Label => "label",
			Entity::Property => "property",
		}
	}

	fn role(self, selection: &SelectionState, name: &str) -> Role {
		match self {
			Entity::Label => selection.label(name).map(|l| l.role),
			Entity::Property => selection.property(name).map(|p| p.role),
		}
		.unwrap_or_default()
	}

	fn toggle(self, name: String, side: Side, checked: bool) -> Command {
		match self {
			Entity::Label => Command::ToggleLabelRole {
				label: name,
				side,
				checked,
			},
			Entity::Property => Command::TogglePropertyRole {
				property: name,
				side,
				checked,
			},
		}
	}
}

#[component]
fn RoleCheckboxes(name: String, entity: Entity) -> impl IntoView {
	let dispatcher = expect_context::<Dispatcher>();

	let boxes = SIDES
		.into_iter()
		.map(|(side, slug, text)| {
			let id = format!("{slug}-{}-{name}", entity.slug());
			let (read_name, send_name) = (name.clone(), name.clone());
			let checked =
				move || dispatcher.track(|c| entity.role(&c.selection, &read_name).is_checked(side));
			let on_change = move |ev: web_sys::Event| {
				let command = entity.toggle(send_name.clone(), side, event_target_checked(&ev));
				dispatcher.send(command);
			};
			view! {
				<input type="checkbox" id=id.clone() prop:checked=checked on:change=on_change />
				<label for=id>{text}</label>
			}
		})
		.collect_view();

	view! { <div class="checkbox-group">{boxes}</div> }
}

#[component]
fn LabelRow(name: String) -> impl IntoView {
	view! {
		<div class="label-row" data-label=name.clone()>
			<span class="label-name">{name.clone()}</span>
			<RoleCheckboxes name=name.clone() entity=Entity::Label />
		</div>
	}
}

#[component]
fn PropertyRow(name: String) -> impl IntoView {
	let dispatcher = expect_context::<Dispatcher>();
	// The input owns its text after creation; rows are rebuilt only on schema load.
	let initial = dispatcher.with(|c| {
		c.selection
			.property(&name)
			.map(|p| p.value.clone())
			.unwrap_or_default()
	});
	let property = name.clone();
	let on_input = move |ev: web_sys::Event| {
		dispatcher.send(Command::SetPropertyValue {
			property: property.clone(),
			value: event_target_value(&ev),
		});
	};

	view! {
		<div class="property-row" data-property=name.clone()>
			<span class="property-name">{name.clone()}</span>
			<RoleCheckboxes name=name.clone() entity=Entity::Property />
			<input
				type="text"
				class="property-input"
				id=format!("input-{name}")
				placeholder="Value"
				prop:value=initial
				on:input=on_input
			/>
		</div>
	}
}

/// Collapsible schema panel that turns role selections into a query.
#[component]
pub fn QueryBuilder() -> impl IntoView {
	let dispatcher = expect_context::<Dispatcher>();
	let labels = move || {
		dispatcher.track(|c| c.selection.labels.iter().map(|l| l.name.clone()).collect::<Vec<_>>())
	};
	let properties = move || {
		dispatcher.track(|c| {
			c.selection
				.properties
				.iter()
				.map(|p| p.name.clone())
				.collect::<Vec<_>>()
		})
	};
	let collapsed = move || !dispatcher.track(|c| c.schema_panel_open);

	view! {
		<aside id="left-sidebar" class="left-sidebar" class:collapsed=collapsed>
			<button
				id="close-left-sidebar"
				class="close-button"
				on:click=move |_| dispatcher.send(Command::CloseSchemaPanel)
			>
				"×"
			</button>
			<h2>"Query Builder"</h2>
			<form
				id="query-builder-form"
				on:submit=move |ev| {
					ev.prevent_default();
					dispatcher.send(Command::BuildQuery);
				}
			>
				<h3>"Labels"</h3>
				<div id="label-list">
					<For each=labels key=|name| name.clone() let:name>
						<LabelRow name=name />
					</For>
				</div>
				<h3>"Properties"</h3>
				<div id="property-list">
					<For each=properties key=|name| name.clone() let:name>
						<PropertyRow name=name />
					</For>
				</div>
				<label for="limit-input">"Limit"</label>
				<input
					id="limit-input"
					type="number"
					min="1"
					placeholder=DEFAULT_LIMIT.to_string()
					on:input=move |ev| dispatcher.send(Command::SetLimit(event_target_value(&ev)))
				/>
				<button type="submit">"Build Query"</button>
			</form>
		</aside>
	}
}

/// Editable query text and the run action.
#[component]
pub fn QueryForm() -> impl IntoView {
	let dispatcher = expect_context::<Dispatcher>();
	let query_text = move || dispatcher.track(|c| c.query_text.clone());

	view! {
		<form
			id="query-form"
			on:submit=move |ev| {
				ev.prevent_default();
				dispatcher.send(Command::RunQuery);
			}
		>
			<button
				id="toggle-left-sidebar"
				type="button"
				on:click=move |_| dispatcher.send(Command::ToggleSchemaPanel)
			>
				"Query Builder"
			</button>
			<textarea
				id="query-input"
				rows="2"
				placeholder="MATCH r=(n)-->(m) RETURN r LIMIT 25"
				prop:value=query_text
				on:input=move |ev| dispatcher.send(Command::SetQueryText(event_target_value(&ev)))
			></textarea>
			<button type="submit">"Run Query"</button>
		</form>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use wasm_bindgen_test::*;

	use super::*;
	use crate::config::AppConfig;
	use crate::controller::Controller;
	use crate::schema::Schema;

	wasm_bindgen_test_configure!(run_in_browser);

	#[wasm_bindgen_test]
	fn label_row_renders_role_checkboxes() {
		let mut controller = Controller::new(AppConfig::default(), 800.0);
		controller.update(Command::SchemaLoaded(Ok(Schema {
			labels: vec!["Host".into()],
			properties: vec![],
		})));
		mount_to_body(move || {
			provide_context(Dispatcher::new(controller));
			view! { <LabelRow name="Host".to_string() /> }
		});

		let document = web_sys::window().unwrap().document().unwrap();
		let row = document
			.query_selector("[data-label='Host']")
			.unwrap()
			.unwrap();
		let group = row.query_selector(".checkbox-group").unwrap().unwrap();
		assert_eq!(group.child_element_count(), 6);
		for slug in ["source", "target", "both"] {
			assert!(document.get_element_by_id(&format!("{slug}-label-Host")).is_some());
		}
	}
}
