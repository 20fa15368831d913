//! Config commands - write defaults and show the resolved config

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::cli::write_json_output;
use crate::errors::{Result, VeilaError};
use crate::fs::write_config;
use crate::schemas::Config;

/// Write a default config file at `path`
pub fn init(path: &Path, force: bool, out: &mut dyn Write) -> Result<()> {
    if path.exists() && !force {
        return Err(VeilaError::ConfigError(format!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    write_config(path, &Config::default())?;
    info!(path = %path.display(), "wrote config");
    writeln!(out, "Wrote {}", path.display())?;
    Ok(())
}

/// Print the resolved config with the token masked
pub fn show(path: &Path, config: &Config, json: bool, out: &mut dyn Write) -> Result<()> {
    let redacted = config.redacted();
    if json {
        return write_json_output(out, &redacted);
    }

    writeln!(out, "config file:  {}", path.display())?;
    writeln!(out, "api_base_url: {}", redacted.api_base_url)?;
    writeln!(
        out,
        "api_token:    {}",
        redacted.api_token.as_deref().unwrap_or("(none)")
    )?;
    writeln!(out, "page_size:    {}", redacted.page_size)?;
    writeln!(out, "timeout:      {}s", redacted.timeout_seconds)?;
    Ok(())
}
