use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::time::Duration;
use std::time::Instant;

use clap::Parser;
use owo_colors::OwoColorize;
use templtr_cli::Commands;
use templtr_cli::TempltrCli;
use templtr_cli::touches_sources;
use templtr_core::Mapping;
use templtr_core::TempltrConfig;
use templtr_core::compute_build;
use templtr_core::config::load_data_file;
use templtr_core::init_project;
use templtr_core::make_relative;
use templtr_core::minify;
use templtr_core::render_record;
use templtr_core::scan_project_with_config;
use templtr_core::write_build;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = TempltrCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// --verbose enables INFO level, otherwise use RUST_LOG or default to WARN.
	let filter = if args.verbose {
		EnvFilter::new("info")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.init();

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Build {
			out_dir,
			dry_run,
			watch,
		}) => run_build(&args, out_dir, *dry_run, *watch),
		Some(Commands::Render {
			template,
			data,
			no_minify,
		}) => run_render(template, data, *no_minify),
		None => {
			eprintln!("Please specify a command. Run `templtr --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<templtr_core::TempltrError>() {
			Ok(templtr_err) => {
				let report: miette::Report = (*templtr_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn resolve_root(args: &TempltrCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_init(args: &TempltrCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	println!("Initializing project...");

	let result = init_project(&root)?;
	for dir in &result.created_dirs {
		println!("Created directory: {}", make_relative(dir, &root));
	}
	if let Some(config_path) = &result.created_config {
		println!("Created {}", make_relative(config_path, &root));
	}

	println!("Project initialized!");

	if !result.created_dirs.is_empty() {
		let config = TempltrConfig::load_or_default(&root)?;
		let pages = config.paths.pages.display();
		let content = config.paths.content.display();
		let ext = &config.build.template_extension;

		println!();
		println!("Next steps:");
		println!("  1. Add a template: {pages}/blog.{ext}");
		println!("     <h1>{{title}}</h1><ul>[<li>{{tags}}</li>]</ul>");
		println!("  2. Add a record:   {content}/blog/first-post.json");
		println!("     {{\"title\": \"Hello\", \"tags\": [\"intro\", \"news\"]}}");
		println!("  3. Run `templtr build dist` to render the site");
	}

	Ok(())
}

fn run_build(
	args: &TempltrCli,
	out_dir: &Path,
	dry_run: bool,
	watch: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	// Run the initial build.
	run_build_once(args, out_dir, dry_run)?;

	if !watch || dry_run {
		return Ok(());
	}

	// Watch mode
	println!("\nWatching for file changes... (press Ctrl+C to stop)");

	// Event paths are reported relative to the watched path, so both sides
	// must be canonical for the output directory to be recognised.
	let root = resolve_root(args).canonicalize()?;
	let ignored_dir = out_dir
		.canonicalize()
		.or_else(|_| std::path::absolute(out_dir))?;
	let (tx, rx) = mpsc::channel();

	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			if let Ok(event) = res {
				if touches_sources(&event.paths, &ignored_dir)
					&& matches!(
						event.kind,
						notify::EventKind::Modify(_)
							| notify::EventKind::Create(_)
							| notify::EventKind::Remove(_)
					) {
					let _ = tx.send(());
				}
			}
		})?;

	use notify::Watcher;
	watcher.watch(&root, notify::RecursiveMode::Recursive)?;

	loop {
		rx.recv()?;
		// Debounce: drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		println!("\nFile change detected, rebuilding...");
		if let Err(e) = run_build_once(args, out_dir, false) {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

fn run_build_once(
	args: &TempltrCli,
	out_dir: &Path,
	dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	println!("Started build...");
	let start = Instant::now();

	let project = scan_project_with_config(&root)?;
	let result = compute_build(&project);

	for page in &result.pages {
		println!("Building {}...", colored!(page, bold));

		let documents = result.documents.iter().filter(|doc| &doc.page == page);
		if dry_run || args.verbose {
			for document in documents {
				println!("  {}", out_dir.join(&document.path).display());
			}
		}

		println!("Finished building {page}");
	}

	if dry_run {
		println!(
			"Dry run: would write {} file(s) for {} page(s) to {}",
			result.documents.len(),
			result.pages.len(),
			out_dir.display()
		);
		return Ok(());
	}

	write_build(out_dir, &result)?;

	let elapsed = start.elapsed().as_millis();
	println!(
		"{}",
		colored!(format!("Build finished in {elapsed} milliseconds"), green)
	);

	Ok(())
}

fn run_render(
	template_path: &Path,
	data_path: &Path,
	no_minify: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let mut template = std::fs::read_to_string(template_path)?;
	if !no_minify {
		template = minify(&template);
	}

	let path_display = data_path.display().to_string();
	let value = load_data_file(data_path, &path_display)?;
	let record = Mapping::from_record(value, &path_display)?;

	println!("{}", render_record(&template, &record));

	Ok(())
}
