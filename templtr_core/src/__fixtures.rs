use std::path::Path;

use crate::Mapping;
use crate::Value;

/// Write `content` to `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create_dir_all: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {relative}: {e}"));
}

/// A blog post record with scalars, a nested object and arrays.
pub fn post_record() -> Mapping {
	Mapping::new()
		.with("title", "Hello")
		.with("author", Mapping::new().with("name", "Ada").with("age", "37"))
		.with("tags", vec!["rust", "web"])
}

/// `{"x": [["a", "b"], ["c"]]}` style nested sequences.
pub fn nested_sequences() -> Vec<Value> {
	vec![Value::from(vec!["a", "b"]), Value::from(vec!["c"])]
}

/// A list of people, each an object.
pub fn people() -> Vec<Value> {
	vec![
		Value::from(Mapping::new().with("name", "Ada").with("age", "37")),
		Value::from(Mapping::new().with("name", "Grace").with("age", "45")),
	]
}
