use derive_more::Deref;
use tracing::debug;

use crate::TempltrError;
use crate::TempltrResult;

/// A node in a data record.
///
/// Records are decoded from JSON, TOML or YAML files. Only strings, arrays
/// and objects have a counterpart here; the engine never sees nulls,
/// booleans or numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// Inserted verbatim wherever `{key}` appears.
	Scalar(String),
	/// Repeats a `[ ... ]` block once per element.
	Sequence(Vec<Value>),
	/// Addressed through dotted markers such as `{key.sub}`.
	Mapping(Mapping),
}

impl Value {
	/// Short description of the value's kind, used in log output.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Scalar(_) => "scalar",
			Self::Sequence(_) => "sequence",
			Self::Mapping(_) => "mapping",
		}
	}

	/// Convert a decoded data value.
	///
	/// Returns `None` for kinds the engine cannot substitute (null, boolean
	/// and number). Such values are also dropped wherever they appear inside
	/// arrays and objects.
	pub fn from_json(value: serde_json::Value) -> Option<Self> {
		match value {
			serde_json::Value::String(s) => Some(Self::Scalar(s)),
			serde_json::Value::Array(items) => {
				Some(Self::Sequence(
					items.into_iter().filter_map(Self::from_json).collect(),
				))
			}
			serde_json::Value::Object(map) => Some(Self::Mapping(Mapping::from_json(map))),
			other => {
				debug!(kind = json_kind(&other), "skipping value without a template form");
				None
			}
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Scalar(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Scalar(value)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(values: Vec<T>) -> Self {
		Self::Sequence(values.into_iter().map(Into::into).collect())
	}
}

impl From<Mapping> for Value {
	fn from(value: Mapping) -> Self {
		Self::Mapping(value)
	}
}

/// Ordered key/value pairs with unique keys.
///
/// Entry order is the order in which keys appeared in the source file, and
/// it is the order in which the engine visits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Mapping(Vec<(String, Value)>);

impl Mapping {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert an entry, replacing the value of an existing key in place so
	/// that its original position is kept.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		let key = key.into();
		let value = value.into();

		if let Some(entry) = self.0.iter_mut().find(|(existing, _)| *existing == key) {
			entry.1 = value;
		} else {
			self.0.push((key, value));
		}
	}

	/// Builder form of [`Mapping::insert`].
	#[must_use]
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(key, value);
		self
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0
			.iter()
			.find_map(|(existing, value)| (existing == key).then_some(value))
	}

	fn from_json(map: serde_json::Map<String, serde_json::Value>) -> Self {
		let mut mapping = Self::new();

		for (key, value) in map {
			match Value::from_json(value) {
				Some(value) => mapping.insert(key, value),
				None => debug!(key = %key, "leaving marker for key unexpanded"),
			}
		}

		mapping
	}

	/// Convert a decoded record into a mapping. Records must be objects at
	/// the top level.
	pub fn from_record(value: serde_json::Value, path_display: &str) -> TempltrResult<Self> {
		match value {
			serde_json::Value::Object(map) => Ok(Self::from_json(map)),
			other => {
				Err(TempltrError::InvalidRecord {
					path: path_display.to_string(),
					kind: json_kind(&other).to_string(),
				})
			}
		}
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut mapping = Self::new();
		for (key, value) in iter {
			mapping.insert(key, value);
		}
		mapping
	}
}

fn json_kind(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "boolean",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}
