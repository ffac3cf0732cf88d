use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::TempltrError;
use crate::TempltrResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["templtr.toml", ".templtr.toml", ".config/templtr.toml"];

/// Configuration loaded from a `templtr.toml` file.
///
/// ```toml
/// [paths]
/// pages = "pages"
/// content = "content"
///
/// [build]
/// template_extension = "html"
/// output_file = "index.html"
/// minify = true
///
/// [exclude]
/// patterns = ["drafts/", "*.wip.json"]
/// ```
///
/// Every section is optional and a missing file is equivalent to an empty
/// one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TempltrConfig {
	/// Where templates and records live, relative to the project root.
	#[serde(default)]
	pub paths: PathsConfig,
	/// How pages are rendered and written.
	#[serde(default)]
	pub build: BuildConfig,
	/// Records to leave out of the build.
	#[serde(default)]
	pub exclude: ExcludeConfig,
}

/// Project directory layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
	/// Directory holding one template per page, named `<page>.<ext>`.
	#[serde(default = "default_pages_dir")]
	pub pages: PathBuf,
	/// Directory holding one record directory per page.
	#[serde(default = "default_content_dir")]
	pub content: PathBuf,
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			pages: default_pages_dir(),
			content: default_content_dir(),
		}
	}
}

/// Build output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
	/// Extension of page templates, without the leading dot.
	#[serde(default = "default_template_extension")]
	pub template_extension: String,
	/// File name written inside each record's output directory.
	#[serde(default = "default_output_file")]
	pub output_file: String,
	/// Strip newlines, carriage returns and tabs from templates before
	/// rendering.
	#[serde(default = "default_minify")]
	pub minify: bool,
}

impl Default for BuildConfig {
	fn default() -> Self {
		Self {
			template_extension: default_template_extension(),
			output_file: default_output_file(),
			minify: default_minify(),
		}
	}
}

/// Configuration for excluding record files from the build.
///
/// Patterns follow gitignore syntax and are relative to the content
/// directory, so `"drafts/"` skips a whole page while `"*.wip.json"` skips
/// matching records of every page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

fn default_pages_dir() -> PathBuf {
	PathBuf::from("pages")
}

fn default_content_dir() -> PathBuf {
	PathBuf::from("content")
}

fn default_template_extension() -> String {
	"html".to_string()
}

fn default_output_file() -> String {
	"index.html".to_string()
}

fn default_minify() -> bool {
	true
}

impl TempltrConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> TempltrResult<Option<TempltrConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;

		Ok(Some(config))
	}

	/// Load the config at `root`, falling back to defaults when there is
	/// none.
	pub fn load_or_default(root: &Path) -> TempltrResult<TempltrConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	/// Parse config file contents.
	pub fn parse(content: &str) -> TempltrResult<TempltrConfig> {
		toml::from_str(content).map_err(|e| TempltrError::ConfigParse(e.to_string()))
	}

	/// Absolute location of the pages directory.
	pub fn pages_dir(&self, root: &Path) -> PathBuf {
		root.join(&self.paths.pages)
	}

	/// Absolute location of the content directory.
	pub fn content_dir(&self, root: &Path) -> PathBuf {
		root.join(&self.paths.content)
	}

	/// Location of the template for `page`.
	pub fn template_path(&self, root: &Path, page: &str) -> PathBuf {
		self.pages_dir(root)
			.join(format!("{page}.{}", self.build.template_extension))
	}
}

/// Read a record file and decode it according to its extension.
pub fn load_data_file(path: &Path, path_display: &str) -> TempltrResult<serde_json::Value> {
	let content = std::fs::read_to_string(path).map_err(|e| {
		TempltrError::DataFile {
			path: path_display.to_string(),
			reason: e.to_string(),
		}
	})?;
	let format = path
		.extension()
		.and_then(|e| e.to_str())
		.unwrap_or("")
		.to_ascii_lowercase();

	parse_data_file(&content, format.as_str(), path_display)
}

/// Parse a data file's content into a `serde_json::Value` based on its
/// format. Key order is preserved for every format.
pub fn parse_data_file(
	content: &str,
	format: &str,
	path_display: &str,
) -> TempltrResult<serde_json::Value> {
	match format {
		"json" => {
			serde_json::from_str(content).map_err(|e| {
				TempltrError::DataFile {
					path: path_display.to_string(),
					reason: e.to_string(),
				}
			})
		}
		"toml" => {
			let toml_value: toml::Value = toml::from_str(content).map_err(|e| {
				TempltrError::DataFile {
					path: path_display.to_string(),
					reason: e.to_string(),
				}
			})?;
			Ok(toml_to_json(toml_value))
		}
		"yaml" | "yml" => {
			serde_yaml_ng::from_str(content).map_err(|e| {
				TempltrError::DataFile {
					path: path_display.to_string(),
					reason: e.to_string(),
				}
			})
		}
		other => Err(TempltrError::UnsupportedDataFormat(other.to_string())),
	}
}

/// Convert a `toml::Value` to a `serde_json::Value`.
///
/// NaN and infinite floats have no JSON form and become `null`, like every
/// other non-string scalar they are dropped when the record is rendered.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
	match value {
		toml::Value::String(s) => serde_json::Value::String(s),
		toml::Value::Integer(i) => serde_json::Value::Number(i.into()),
		toml::Value::Float(f) => {
			serde_json::Number::from_f64(f).map_or(serde_json::Value::Null, serde_json::Value::Number)
		}
		toml::Value::Boolean(b) => serde_json::Value::Bool(b),
		toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
		toml::Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect()),
		toml::Value::Table(table) => {
			serde_json::Value::Object(
				table
					.into_iter()
					.map(|(k, v)| (k, toml_to_json(v)))
					.collect(),
			)
		}
	}
}
