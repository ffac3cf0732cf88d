//! Placeholder substitution.
//!
//! Markers take two forms. Scalar markers `{key}` and `{key.sub}` are
//! replaced by string values, and block regions `[ ... ]` are repeated once
//! per element of a sequence value. Substitution walks the value tree and
//! builds a new string at every step; the template and the value are never
//! modified.
//!
//! Markers are not validated. An unbalanced `[` or a malformed marker is an
//! authoring error: the affected region is simply left as written. A marker
//! that no value addresses, or one that addresses a value of the wrong kind
//! (for example `{user}` when `user` is an object), stays in the output
//! unexpanded.

use tracing::trace;

use crate::Mapping;
use crate::Value;
use crate::scanner::find_block;

/// Replace every `{key}` in `template` with `value`.
///
/// `key` is matched literally, so characters such as `.` or `*` carry no
/// special meaning. `value` is inserted as-is without escaping.
pub fn substitute_scalar(template: &str, key: &str, value: &str) -> String {
	let marker = format!("{{{key}}}");
	template.replace(&marker, value)
}

/// Expand every block region referencing `key` once per element of
/// `values`.
///
/// The item template between the brackets is rendered for each element and
/// the renderings are concatenated without a separator. An empty sequence
/// removes the region. Elements are dispatched by kind: scalars fill
/// `{key}`, nested sequences expand nested regions for the same `key`, and
/// mappings fill `{key.sub}` markers.
///
/// Rendered text is never searched again, so values that happen to contain
/// marker syntax cannot cause further expansion.
pub fn substitute_sequence(template: &str, key: &str, values: &[Value]) -> String {
	let mut result = String::with_capacity(template.len());
	let mut cursor = 0;

	while let Some(span) = find_block(template, key, cursor) {
		let item_template = &template[span.inner()];
		trace!(key, elements = values.len(), "expanding block");

		result.push_str(&template[cursor..span.open]);
		for value in values {
			result.push_str(&substitute(item_template, key, value));
		}

		cursor = span.outer().end;
	}

	result.push_str(&template[cursor..]);
	result
}

/// Fill markers for every entry of `mapping`, addressing each entry as
/// `key_prefix.sub_key`.
///
/// Entries are visited in mapping order and nested mappings extend the path
/// further, so `{a.b.c}` resolves against `{"a": {"b": {"c": "..."}}}` at any
/// depth.
pub fn substitute_mapping(template: &str, key_prefix: &str, mapping: &Mapping) -> String {
	mapping
		.iter()
		.fold(template.to_string(), |rendered, (sub_key, value)| {
			substitute(&rendered, &join_key(key_prefix, sub_key), value)
		})
}

/// Fill the markers addressed by `value` under the key path `key`.
pub fn substitute(template: &str, key: &str, value: &Value) -> String {
	match value {
		Value::Scalar(text) => substitute_scalar(template, key, text),
		Value::Sequence(values) => substitute_sequence(template, key, values),
		Value::Mapping(mapping) => substitute_mapping(template, key, mapping),
	}
}

/// Render one data record against a page template.
///
/// Each top-level entry is substituted under its own name, so a record
/// `{"title": "Home"}` fills `{title}`.
pub fn render_record(template: &str, record: &Mapping) -> String {
	record
		.iter()
		.fold(template.to_string(), |rendered, (key, value)| {
			trace!(key, kind = value.kind(), "substituting record entry");
			substitute(&rendered, key, value)
		})
}

/// Append `sub_key` to a dotted key path.
///
/// The dot is always added, so an empty key still contributes a segment:
/// `{"": {"b": "v"}}` fills `{.b}`.
pub fn join_key(prefix: &str, sub_key: &str) -> String {
	format!("{prefix}.{sub_key}")
}
