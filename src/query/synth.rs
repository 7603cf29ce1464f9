use std::fmt::Write;

use super::selection::{Role, SelectionState};

pub const DEFAULT_LIMIT: u32 = 25;

/// Ordered names and property pairs constraining one end of the pattern.
#[derive(Debug, Default, PartialEq)]
struct Endpoint<'a> {
	labels: Vec<&'a str>,
	properties: Vec<(&'a str, &'a str)>,
}

impl Endpoint<'_> {
	fn render(&self, var: &str) -> String {
		let mut out = String::from(var);
		for label in &self.labels {
			out.push(':');
			out.push_str(label);
		}
		if !self.properties.is_empty() {
			out.push_str(" {");
			for (i, (key, value)) in self.properties.iter().enumerate() {
				if i > 0 {
					out.push_str(", ");
				}
				// Values go in verbatim; quotes are not escaped.
				let _ = write!(out, "{key}: \"{value}\"");
			}
			out.push('}');
		}
		out
	}
}

fn endpoints(selection: &SelectionState) -> (Endpoint<'_>, Endpoint<'_>) {
	let (mut source, mut target) = (Endpoint::default(), Endpoint::default());

	let both = selection.labels.iter().filter(|l| l.role == Role::Both);
	for label in both {
		source.labels.push(&label.name);
		target.labels.push(&label.name);
	}
	for label in selection.labels.iter().filter(|l| l.role != Role::Both) {
		if label.role.covers_source() {
			source.labels.push(&label.name);
		}
		if label.role.covers_target() {
			target.labels.push(&label.name);
		}
	}

	for property in &selection.properties {
		let Some(value) = property.active_value() else {
			continue;
		};
		if property.role.covers_source() {
			source.properties.push((&property.name, value));
		}
		if property.role.covers_target() {
			target.properties.push((&property.name, value));
		}
	}

	(source, target)
}

/// Build the single `MATCH` pattern for the current selection.
///
/// A blank `limit` falls back to [`DEFAULT_LIMIT`].
pub fn synthesize(selection: &SelectionState, limit: &str) -> String {
	let (source, target) = endpoints(selection);
	let limit = match limit.trim() {
		"" => DEFAULT_LIMIT.to_string(),
		limit => limit.to_owned(),
	};
	format!(
		"MATCH r=({})-->({}) RETURN r LIMIT {limit}",
		source.render("n"),
		target.render("m"),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::query::selection::Side;
	use crate::schema::{Schema, SchemaResponse};

	fn state(labels: &[&str], properties: &[&str]) -> SelectionState {
		SelectionState::from_schema(&Schema::from(SchemaResponse {
			labels: labels.iter().map(|s| s.to_string()).collect(),
			input_properties: properties.iter().map(|s| s.to_string()).collect(),
		}))
	}

	#[test]
	fn empty_selection() {
		assert_eq!(
			synthesize(&SelectionState::default(), ""),
			"MATCH r=(n)-->(m) RETURN r LIMIT 25"
		);
	}

	#[test]
	fn both_label_leads_both_sides() {
		let mut s = state(&["A", "B"], &[]);
		s.set_label_role("A", Side::Both, true);
		s.set_label_role("B", Side::Source, true);
		assert_eq!(
			synthesize(&s, ""),
			"MATCH r=(n:A:B)-->(m:A) RETURN r LIMIT 25"
		);
	}

	#[test]
	fn both_labels_precede_single_side_in_descending_order() {
		// Schema order after load: Zone, Host, Alert.
		let mut s = state(&["Alert", "Host", "Zone"], &[]);
		s.set_label_role("Zone", Side::Source, true);
		s.set_label_role("Zone", Side::Target, true);
		s.set_label_role("Host", Side::Both, true);
		s.set_label_role("Alert", Side::Both, true);
		assert_eq!(
			synthesize(&s, "10"),
			"MATCH r=(n:Host:Alert:Zone)-->(m:Host:Alert:Zone) RETURN r LIMIT 10"
		);
	}

	#[test]
	fn blank_property_values_never_appear() {
		let mut s = state(&[], &["name", "ip"]);
		s.set_property_role("name", Side::Both, true);
		s.set_property_role("ip", Side::Source, true);
		s.set_property_value("name", "   ");
		s.set_property_value("ip", "");
		assert_eq!(synthesize(&s, ""), "MATCH r=(n)-->(m) RETURN r LIMIT 25");
	}

	#[test]
	fn value_without_role_is_ignored() {
		let mut s = state(&[], &["name"]);
		s.set_property_value("name", "alice");
		assert_eq!(synthesize(&s, ""), "MATCH r=(n)-->(m) RETURN r LIMIT 25");
	}

	#[test]
	fn property_blocks_follow_list_order() {
		// Order after load: name, ip, hostname.
		let mut s = state(&["Host"], &["hostname", "ip", "name"]);
		s.set_label_role("Host", Side::Target, true);
		s.set_property_role("name", Side::Source, true);
		s.set_property_value("name", " web-1 ");
		s.set_property_role("ip", Side::Both, true);
		s.set_property_value("ip", "10.0.0.1");
		s.set_property_role("hostname", Side::Target, true);
		s.set_property_value("hostname", "db");
		assert_eq!(
			synthesize(&s, "5"),
			"MATCH r=(n {name: \"web-1\", ip: \"10.0.0.1\"})-->(m:Host {ip: \"10.0.0.1\", hostname: \"db\"}) RETURN r LIMIT 5"
		);
	}

	#[test]
	fn quotes_are_not_escaped() {
		let mut s = state(&[], &["name"]);
		s.set_property_role("name", Side::Source, true);
		s.set_property_value("name", "a\"b");
		assert_eq!(
			synthesize(&s, ""),
			"MATCH r=(n {name: \"a\"b\"})-->(m) RETURN r LIMIT 25"
		);
	}

	#[test]
	fn limit_is_trimmed_and_whitespace_defaults() {
		let s = SelectionState::default();
		assert_eq!(synthesize(&s, " 7 "), "MATCH r=(n)-->(m) RETURN r LIMIT 7");
		assert_eq!(synthesize(&s, "  "), "MATCH r=(n)-->(m) RETURN r LIMIT 25");
	}
}
