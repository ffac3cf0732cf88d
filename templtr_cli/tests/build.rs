mod common;

use common::write_file;
use predicates::prelude::PredicateBooleanExt;
use templtr_core::AnyEmptyResult;

fn blog_project(root: &std::path::Path) -> std::io::Result<()> {
	write_file(
		root,
		"pages/blog.html",
		"<html>\n\t<h1>{title}</h1>\n\t<p>{author.name}</p>\n\t<ul>[<li>{tags}</li>]</ul>\n</html>\n",
	)?;
	write_file(
		root,
		"content/blog/first.json",
		r#"{"title": "First", "author": {"name": "Ada"}, "tags": ["intro", "news"]}"#,
	)?;
	write_file(
		root,
		"content/blog/second.toml",
		"title = \"Second\"\ntags = []\n\n[author]\nname = \"Grace\"\n",
	)
}

#[test]
fn build_renders_every_record() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	blog_project(tmp.path())?;
	let out_dir = tmp.path().join("dist");

	common::templtr_cmd()
		.arg("build")
		.arg(&out_dir)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Started build..."))
		.stdout(predicates::str::contains("Building blog..."))
		.stdout(predicates::str::contains("Finished building blog"))
		.stdout(predicates::str::is_match(r"Build finished in \d+ milliseconds")?);

	let first = std::fs::read_to_string(out_dir.join("blog/first/index.html"))?;
	assert_eq!(
		first,
		"<html><h1>First</h1><p>Ada</p><ul><li>intro</li><li>news</li></ul></html>"
	);

	let second = std::fs::read_to_string(out_dir.join("blog/second/index.html"))?;
	assert_eq!(second, "<html><h1>Second</h1><p>Grace</p><ul></ul></html>");

	Ok(())
}

#[test]
fn build_clears_previous_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	blog_project(tmp.path())?;
	let out_dir = tmp.path().join("dist");
	write_file(&out_dir, "old/index.html", "stale")?;

	common::templtr_cmd()
		.arg("build")
		.arg(&out_dir)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert!(!out_dir.join("old").exists());
	assert!(out_dir.join("blog/first/index.html").is_file());

	Ok(())
}

#[test]
fn build_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	blog_project(tmp.path())?;
	let out_dir = tmp.path().join("dist");

	common::templtr_cmd()
		.arg("build")
		.arg(&out_dir)
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("would write 2 file(s) for 1 page(s)"))
		.stdout(predicates::str::contains("first"))
		.stdout(predicates::str::contains("Build finished").not());

	assert!(!out_dir.exists());

	Ok(())
}

#[test]
fn build_fails_without_template() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "content/about/team.json", r#"{"title": "Team"}"#)?;
	std::fs::create_dir_all(tmp.path().join("pages"))?;
	let out_dir = tmp.path().join("dist");

	common::templtr_cmd()
		.arg("build")
		.arg(&out_dir)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("no matching template for page `about`"));

	assert!(!out_dir.exists());

	Ok(())
}

#[test]
fn build_fails_without_content_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::templtr_cmd()
		.arg("build")
		.arg(tmp.path().join("dist"))
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("directory not found: `content`"));

	Ok(())
}

#[test]
fn build_reports_invalid_record() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "pages/blog.html", "{title}")?;
	write_file(tmp.path(), "content/blog/broken.json", "{ not json")?;

	common::templtr_cmd()
		.arg("build")
		.arg(tmp.path().join("dist"))
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("failed to load data file"));

	Ok(())
}

#[test]
fn build_honours_exclude_patterns() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	blog_project(tmp.path())?;
	write_file(tmp.path(), "content/blog/draft.wip.json", r#"{"title": "Draft"}"#)?;
	write_file(tmp.path(), "templtr.toml", "[exclude]\npatterns = [\"*.wip.json\"]\n")?;
	let out_dir = tmp.path().join("dist");

	common::templtr_cmd()
		.arg("build")
		.arg(&out_dir)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert!(out_dir.join("blog/first/index.html").is_file());
	assert!(!out_dir.join("blog/draft.wip").exists());

	Ok(())
}

#[test]
fn no_subcommand_exits_with_usage_hint() {
	common::templtr_cmd()
		.assert()
		.failure()
		.code(1)
		.stderr(predicates::str::contains("Please specify a command"));
}

#[test]
fn build_refuses_to_clear_project_root() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	blog_project(tmp.path())?;

	common::templtr_cmd()
		.arg("build")
		.arg(tmp.path())
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("refusing to clear"));

	assert!(tmp.path().join("pages/blog.html").is_file());
	assert!(tmp.path().join("content/blog/first.json").is_file());

	Ok(())
}
