use std::path::Path;

use assert_cmd::Command;

pub fn templtr_cmd() -> Command {
	let mut cmd = Command::new(env!("CARGO_BIN_EXE_templtr"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Write `content` to `relative` under `root`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(root: &Path, relative: &str, content: &str) -> std::io::Result<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}
