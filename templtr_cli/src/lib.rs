use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render static pages from HTML templates and structured data.",
	long_about = "templtr renders one HTML document per data record.\n\nPage templates live in \
	              `pages/<page>.html` and contain `{key}` markers, `{key.sub}` markers for \
	              nested objects, and `[ ... ]` blocks that repeat once per array element. \
	              Records live in `content/<page>/<record>.json` (TOML and YAML are accepted \
	              too).\n\nQuick start:\n  templtr init         Create the project \
	              directories\n  templtr build dist   Render every record into `dist/`"
)]
pub struct TempltrCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize a templtr project.
	///
	/// Creates the `pages` and `content` directories and a sample
	/// `templtr.toml`. Existing directories and config files are left
	/// untouched.
	Init,
	/// Build every page into an output directory.
	///
	/// Each directory in `content/` is a page rendered with the matching
	/// template from `pages/`. Every record in the page directory produces
	/// `<outdir>/<page>/<record>/index.html`. The output directory is
	/// removed and recreated on every build.
	Build {
		/// Directory to write the rendered site to, relative to the current
		/// directory.
		out_dir: PathBuf,

		/// Show which files would be written without touching the disk.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Rebuild whenever a file in the project changes.
		#[arg(long, default_value_t = false)]
		watch: bool,
	},
	/// Render a single record and print the result.
	///
	/// Useful for previewing a template without building the whole site.
	Render {
		/// Template file to render.
		#[arg(long, short)]
		template: PathBuf,

		/// Record file (JSON, TOML or YAML) to render the template with.
		#[arg(long, short)]
		data: PathBuf,

		/// Keep newlines and tabs from the template.
		#[arg(long, default_value_t = false)]
		no_minify: bool,
	},
}

/// Whether a watch event concerns project sources rather than the build
/// output.
///
/// `ignored_dir` and the watched root must both be canonical, otherwise the
/// build's own writes under a relative root are not recognised and trigger
/// another rebuild.
pub fn touches_sources(paths: &[PathBuf], ignored_dir: &Path) -> bool {
	paths.iter().any(|path| !path.starts_with(ignored_dir))
}
