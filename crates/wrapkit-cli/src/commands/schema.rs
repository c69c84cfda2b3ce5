//! Schema command: prints the JSON schema of `wrapkit.config.json` to stdout.

use crate::config::WrapConfig;
use crate::error::Result;

pub async fn execute() -> Result<()> {
    let schema = WrapConfig::json_schema()?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
