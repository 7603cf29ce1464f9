use crate::schema::Schema;

/// Which endpoint of the pattern a checkbox refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
	Source,
	Target,
	Both,
}

/// Role of a label or property in the generated pattern.
///
/// `Both` excludes the single-side roles; `SourceAndTarget` is the two
/// single-side checkboxes ticked together, which orders after `Both` entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
	#[default]
	Unselected,
	Source,
	Target,
	SourceAndTarget,
	Both,
}

impl Role {
	fn from_flags(source: bool, target: bool, both: bool) -> Self {
		match (source, target, both) {
			(_, _, true) => Role::Both,
			(true, true, false) => Role::SourceAndTarget,
			(true, false, false) => Role::Source,
			(false, true, false) => Role::Target,
			(false, false, false) => Role::Unselected,
		}
	}

	/// Checkbox states as `(source, target, both)`.
	pub fn flags(self) -> (bool, bool, bool) {
		match self {
			Role::Unselected => (false, false, false),
			Role::Source => (true, false, false),
			Role::Target => (false, true, false),
			Role::SourceAndTarget => (true, true, false),
			Role::Both => (false, false, true),
		}
	}

	/// Whether the checkbox for `side` is ticked.
	pub fn is_checked(self, side: Side) -> bool {
		let (source, target, both) = self.flags();
		match side {
			Side::Source => source,
			Side::Target => target,
			Side::Both => both,
		}
	}

	/// Apply a checkbox change.
	pub fn toggled(self, side: Side, checked: bool) -> Self {
		let (mut source, mut target, mut both) = self.flags();
		match side {
			Side::Both => {
				both = checked;
				if checked {
					source = false;
					target = false;
				}
			}
			Side::Source | Side::Target => {
				if side == Side::Source {
					source = checked;
				} else {
					target = checked;
				}
				if checked {
					both = false;
				}
			}
		}
		Role::from_flags(source, target, both)
	}

	pub fn covers_source(self) -> bool {
		matches!(self, Role::Source | Role::SourceAndTarget | Role::Both)
	}

	pub fn covers_target(self) -> bool {
		matches!(self, Role::Target | Role::SourceAndTarget | Role::Both)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelSelection {
	pub name: String,
	pub role: Role,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyConstraint {
	pub name: String,
	pub role: Role,
	pub value: String,
}

impl PropertyConstraint {
	/// Trimmed value, `None` when blank.
	pub fn active_value(&self) -> Option<&str> {
		let value = self.value.trim();
		(!value.is_empty()).then_some(value)
	}
}

/// Everything the user has picked in the query builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
	pub labels: Vec<LabelSelection>,
	pub properties: Vec<PropertyConstraint>,
	pub limit: String,
}

impl SelectionState {
	/// Fresh, unselected entries for every schema label and property.
	pub fn from_schema(schema: &Schema) -> Self {
		Self {
			labels: schema
				.labels
				.iter()
				.map(|name| LabelSelection {
					name: name.clone(),
					role: Role::Unselected,
				})
				.collect(),
			properties: schema
				.properties
				.iter()
				.map(|name| PropertyConstraint {
					name: name.clone(),
					role: Role::Unselected,
					value: String::new(),
				})
				.collect(),
			limit: String::new(),
		}
	}

	pub fn label(&self, name: &str) -> Option<&LabelSelection> {
		self.labels.iter().find(|l| l.name == name)
	}

	pub fn property(&self, name: &str) -> Option<&PropertyConstraint> {
		self.properties.iter().find(|p| p.name == name)
	}

	pub fn set_label_role(&mut self, name: &str, side: Side, checked: bool) {
		if let Some(label) = self.labels.iter_mut().find(|l| l.name == name) {
			label.role = label.role.toggled(side, checked);
		}
	}

	pub fn set_property_role(&mut self, name: &str, side: Side, checked: bool) {
		if let Some(property) = self.properties.iter_mut().find(|p| p.name == name) {
			property.role = property.role.toggled(side, checked);
		}
	}

	pub fn set_property_value(&mut self, name: &str, value: &str) {
		if let Some(property) = self.properties.iter_mut().find(|p| p.name == name) {
			property.value = value.to_owned();
		}
	}

	pub fn set_limit(&mut self, limit: &str) {
		self.limit = limit.to_owned();
	}
}
