use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;
use tracing::debug;
use tracing::info;

use crate::Mapping;
use crate::TempltrError;
use crate::TempltrResult;
use crate::config::CONFIG_FILE_CANDIDATES;
use crate::config::TempltrConfig;
use crate::config::load_data_file;
use crate::engine::render_record;

/// A page template together with the records rendered through it.
#[derive(Debug, Clone)]
pub struct Page {
	/// Name of the page, taken from its content directory.
	pub name: String,
	/// Path of the template file.
	pub template_path: PathBuf,
	/// Template contents, minified when the build is configured to.
	pub template: String,
	/// Records belonging to this page, sorted by path.
	pub records: Vec<RecordEntry>,
}

/// A data record discovered in a page's content directory.
#[derive(Debug, Clone)]
pub struct RecordEntry {
	/// Record name, taken from the file stem.
	pub name: String,
	/// Path of the data file.
	pub file: PathBuf,
	/// Decoded record.
	pub data: Mapping,
}

/// A scanned project ready to be built.
#[derive(Debug)]
pub struct Project {
	/// Project root directory.
	pub root: PathBuf,
	/// Configuration in effect for this project.
	pub config: TempltrConfig,
	/// Pages sorted by name.
	pub pages: Vec<Page>,
}

impl Project {
	/// Total number of records across all pages.
	pub fn record_count(&self) -> usize {
		self.pages.iter().map(|page| page.records.len()).sum()
	}
}

/// A rendered output document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
	/// Page the document belongs to.
	pub page: String,
	/// Record the document was rendered from.
	pub record: String,
	/// Output path relative to the build directory.
	pub path: PathBuf,
	/// Rendered contents.
	pub content: String,
}

/// Result of building a project.
#[derive(Debug, Default)]
pub struct BuildResult {
	/// Root of the project the build was computed from.
	pub root: PathBuf,
	/// Names of every page, including pages without records.
	pub pages: Vec<String>,
	/// Rendered documents in page and record order.
	pub documents: Vec<RenderedDocument>,
}

/// Result of initialising a project.
#[derive(Debug, Default)]
pub struct InitResult {
	/// Directories that did not exist and were created.
	pub created_dirs: Vec<PathBuf>,
	/// The config file, when one was written.
	pub created_config: Option<PathBuf>,
}

/// Sample config written by [`init_project`].
pub const SAMPLE_CONFIG: &str = r#"# templtr configuration

[paths]
pages = "pages"
content = "content"

[build]
template_extension = "html"
output_file = "index.html"
minify = true

# Records to skip, in gitignore syntax relative to the content directory.
# [exclude]
# patterns = ["drafts/", "*.wip.json"]
"#;

/// Remove newlines, carriage returns and tabs.
pub fn minify(template: &str) -> String {
	template
		.chars()
		.filter(|c| !matches!(c, '\n' | '\r' | '\t'))
		.collect()
}

/// Load the configuration at `root` and scan the project with it.
pub fn scan_project_with_config(root: &Path) -> TempltrResult<Project> {
	let config = TempltrConfig::load_or_default(root)?;
	scan_project(root, config)
}

/// Discover every page and record under `root`.
///
/// Each directory inside the content directory is a page and every file
/// inside a page directory is one record. Hidden entries and records matched
/// by `[exclude]` patterns are skipped.
pub fn scan_project(root: &Path, config: TempltrConfig) -> TempltrResult<Project> {
	let content_dir = config.content_dir(root);
	if !content_dir.is_dir() {
		return Err(TempltrError::MissingDirectory {
			path: make_relative(&content_dir, root),
		});
	}

	let exclude = build_exclude_matcher(&content_dir, &config.exclude.patterns)?;
	let mut pages = Vec::new();

	for page_dir in sorted_entries(&content_dir)? {
		if is_hidden(&page_dir) {
			continue;
		}

		if !page_dir.is_dir() {
			debug!(path = %page_dir.display(), "skipping file outside of a page directory");
			continue;
		}

		if exclude.matched(&page_dir, true).is_ignore() {
			debug!(path = %page_dir.display(), "page excluded");
			continue;
		}

		let Some(name) = file_stem(&page_dir) else {
			continue;
		};

		let template_path = config.template_path(root, &name);
		if !template_path.is_file() {
			return Err(TempltrError::MissingTemplate {
				page: name,
				path: make_relative(&template_path, root),
			});
		}

		let mut template = std::fs::read_to_string(&template_path)?;
		if config.build.minify {
			template = minify(&template);
		}

		let records = scan_records(root, &page_dir, &exclude)?;
		debug!(page = %name, records = records.len(), "scanned page");

		pages.push(Page {
			name,
			template_path,
			template,
			records,
		});
	}

	Ok(Project {
		root: root.to_path_buf(),
		config,
		pages,
	})
}

fn scan_records(
	root: &Path,
	page_dir: &Path,
	exclude: &Gitignore,
) -> TempltrResult<Vec<RecordEntry>> {
	let mut records = Vec::new();

	for file in sorted_entries(page_dir)? {
		if is_hidden(&file) || !file.is_file() {
			continue;
		}

		if exclude.matched(&file, false).is_ignore() {
			debug!(path = %file.display(), "record excluded");
			continue;
		}

		let Some(name) = file_stem(&file) else {
			continue;
		};

		let path_display = make_relative(&file, root);
		let value = load_data_file(&file, &path_display)?;
		let data = Mapping::from_record(value, &path_display)?;

		records.push(RecordEntry { name, file, data });
	}

	Ok(records)
}

/// Render every record of every page.
pub fn compute_build(project: &Project) -> BuildResult {
	let output_file = &project.config.build.output_file;
	let mut result = BuildResult {
		root: project.root.clone(),
		..BuildResult::default()
	};

	for page in &project.pages {
		result.pages.push(page.name.clone());

		for record in &page.records {
			let content = render_record(&page.template, &record.data);
			info!(page = %page.name, record = %record.name, "rendered record");

			result.documents.push(RenderedDocument {
				page: page.name.clone(),
				record: record.name.clone(),
				path: Path::new(&page.name).join(&record.name).join(output_file),
				content,
			});
		}
	}

	result
}

/// Write a build to `out_dir`.
///
/// The directory is cleared first so that output from removed records does
/// not linger. Every page gets a directory even when it has no records.
///
/// An existing `out_dir` that is the project root or one of its ancestors
/// is rejected with [`TempltrError::OutputContainsProject`] before anything
/// is removed.
pub fn write_build(out_dir: &Path, result: &BuildResult) -> TempltrResult<()> {
	if out_dir.exists() {
		ensure_outside_project(out_dir, &result.root)?;
		std::fs::remove_dir_all(out_dir)?;
	}
	std::fs::create_dir_all(out_dir)?;

	for page in &result.pages {
		std::fs::create_dir_all(out_dir.join(page))?;
	}

	for document in &result.documents {
		let path = out_dir.join(&document.path);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&path, &document.content)?;
	}

	Ok(())
}

fn ensure_outside_project(out_dir: &Path, root: &Path) -> TempltrResult<()> {
	let out_dir = out_dir.canonicalize()?;
	let Ok(root) = root.canonicalize() else {
		return Ok(());
	};

	if root.starts_with(&out_dir) {
		return Err(TempltrError::OutputContainsProject {
			path: out_dir.display().to_string(),
		});
	}

	Ok(())
}

/// Create the pages and content directories, and a sample config when the
/// project has none. Existing directories and config files are left alone.
pub fn init_project(root: &Path) -> TempltrResult<InitResult> {
	let config = TempltrConfig::load_or_default(root)?;
	let mut result = InitResult::default();

	for dir in [config.pages_dir(root), config.content_dir(root)] {
		if !dir.exists() {
			std::fs::create_dir_all(&dir)?;
			result.created_dirs.push(dir);
		}
	}

	if TempltrConfig::resolve_path(root).is_none() {
		let config_path = root.join(CONFIG_FILE_CANDIDATES[0]);
		std::fs::write(&config_path, SAMPLE_CONFIG)?;
		result.created_config = Some(config_path);
	}

	Ok(result)
}

/// Build a `Gitignore` matcher from `[exclude]` patterns, rooted at the
/// content directory.
fn build_exclude_matcher(content_dir: &Path, patterns: &[String]) -> TempltrResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(content_dir);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			TempltrError::InvalidExcludePattern {
				pattern: pattern.clone(),
				reason: e.to_string(),
			}
		})?;
	}
	builder.build().map_err(|e| {
		TempltrError::InvalidExcludePattern {
			pattern: patterns.join(", "),
			reason: e.to_string(),
		}
	})
}

fn sorted_entries(dir: &Path) -> TempltrResult<Vec<PathBuf>> {
	let mut entries = std::fs::read_dir(dir)?
		.map(|entry| entry.map(|e| e.path()))
		.collect::<Result<Vec<_>, _>>()?;
	entries.sort();
	Ok(entries)
}

fn is_hidden(path: &Path) -> bool {
	path.file_name()
		.and_then(|name| name.to_str())
		.is_some_and(|name| name.starts_with('.'))
}

fn file_stem(path: &Path) -> Option<String> {
	path.file_stem()
		.and_then(|stem| stem.to_str())
		.map(ToString::to_string)
}

/// Make a path relative to root for display purposes.
pub fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
