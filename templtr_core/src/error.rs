use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum TempltrError {
	#[error(transparent)]
	#[diagnostic(code(templtr::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(templtr::config_parse),
		help("check that templtr.toml is valid TOML with [paths], [build] and/or [exclude] sections")
	)]
	ConfigParse(String),

	#[error("failed to load data file `{path}`: {reason}")]
	#[diagnostic(code(templtr::data_file))]
	DataFile { path: String, reason: String },

	#[error("unsupported data file format: `{0}`")]
	#[diagnostic(
		code(templtr::unsupported_format),
		help("supported formats: json, toml, yaml, yml")
	)]
	UnsupportedDataFormat(String),

	#[error("record `{path}` must be an object at the top level, found {kind}")]
	#[diagnostic(
		code(templtr::invalid_record),
		help("wrap the record's fields in a single top-level object")
	)]
	InvalidRecord { path: String, kind: String },

	#[error("no matching template for page `{page}`")]
	#[diagnostic(
		code(templtr::missing_template),
		help("create `{path}` or remove the `{page}` content directory")
	)]
	MissingTemplate { page: String, path: String },

	#[error("directory not found: `{path}`")]
	#[diagnostic(
		code(templtr::missing_directory),
		help("run `templtr init` to create the project directories")
	)]
	MissingDirectory { path: String },

	#[error("invalid exclude pattern `{pattern}`: {reason}")]
	#[diagnostic(code(templtr::invalid_exclude_pattern))]
	InvalidExcludePattern { pattern: String, reason: String },

	#[error("refusing to clear output directory `{path}` because it contains the project")]
	#[diagnostic(
		code(templtr::output_contains_project),
		help("choose an output directory outside of the project sources, such as `dist`")
	)]
	OutputContainsProject { path: String },
}

pub type TempltrResult<T> = Result<T, TempltrError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
