mod common;

use common::write_file;
use templtr_core::AnyEmptyResult;

#[test]
fn render_prints_rendered_record() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(
		tmp.path(),
		"page.html",
		"<ul>\n\t[<li>{people.name} ({people.age})</li>]\n</ul>\n",
	)?;
	write_file(
		tmp.path(),
		"people.yaml",
		"people:\n  - name: Ada\n    age: \"37\"\n  - name: Grace\n    age: \"45\"\n",
	)?;

	common::templtr_cmd()
		.arg("render")
		.arg("--template")
		.arg(tmp.path().join("page.html"))
		.arg("--data")
		.arg(tmp.path().join("people.yaml"))
		.assert()
		.success()
		.stdout("<ul><li>Ada (37)</li><li>Grace (45)</li></ul>\n");

	Ok(())
}

#[test]
fn render_keeps_whitespace_with_no_minify() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "page.html", "<p>\n\t{title}\n</p>")?;
	write_file(tmp.path(), "record.json", r#"{"title": "Hi"}"#)?;

	common::templtr_cmd()
		.arg("render")
		.arg("--template")
		.arg(tmp.path().join("page.html"))
		.arg("--data")
		.arg(tmp.path().join("record.json"))
		.arg("--no-minify")
		.assert()
		.success()
		.stdout("<p>\n\tHi\n</p>\n");

	Ok(())
}

#[test]
fn render_leaves_non_string_values_unexpanded() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "page.html", "{title} {count} {draft}")?;
	write_file(
		tmp.path(),
		"record.json",
		r#"{"title": "Hi", "count": 3, "draft": false}"#,
	)?;

	common::templtr_cmd()
		.arg("render")
		.arg("-t")
		.arg(tmp.path().join("page.html"))
		.arg("-d")
		.arg(tmp.path().join("record.json"))
		.assert()
		.success()
		.stdout("Hi {count} {draft}\n");

	Ok(())
}

#[test]
fn render_rejects_unsupported_format() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "page.html", "{title}")?;
	write_file(tmp.path(), "record.csv", "title\nHi\n")?;

	common::templtr_cmd()
		.arg("render")
		.arg("--template")
		.arg(tmp.path().join("page.html"))
		.arg("--data")
		.arg(tmp.path().join("record.csv"))
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("unsupported data file format: `csv`"));

	Ok(())
}
