//! Init command: writes an example `wrapkit.config.json`.

use crate::cli::InitArgs;
use crate::commands::utils;
use crate::config::{WrapConfig, CONFIG_FILE};
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use std::path::{Path, PathBuf};

/// Execute the init command in the current directory.
pub async fn execute(args: InitArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let path = write_example(&cwd, args.force)?;

    ui::success(&format!("Created {}", path.display()));
    ui::info("Set \"url\" and \"name\", then run 'wrapkit build'");
    Ok(())
}

/// Write the example config into `dir`, refusing to overwrite unless `force`.
fn write_example(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists (pass --force to overwrite it)",
            path.display()
        )));
    }

    let mut contents = WrapConfig::example_config()?;
    contents.push('\n');
    std::fs::write(&path, contents).context(format!("Failed to write {}", path.display()))?;
    Ok(path)
}
