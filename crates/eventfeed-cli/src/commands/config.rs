//! Configuration commands.

use std::io::Write;
use std::path::Path;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Dump the effective configuration as TOML.
pub fn dump(config: &CliConfig, path: &Path, out: &mut impl Write) -> CliResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))?;
    writeln!(out, "# config.toml ({})", path.display())?;
    writeln!(out, "{}", toml_str)?;
    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &CliConfig, out: &mut impl Write) -> CliResult<()> {
    config.validate()?;
    writeln!(out, "Configuration is valid.")?;
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path, out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "config: {}", path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(f: impl FnOnce(&mut Vec<u8>) -> CliResult<()>) -> CliResult<String> {
        let mut out = Vec::new();
        f(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn dump_includes_path_and_sections() {
        let text = output(|out| dump(&CliConfig::default(), Path::new("/tmp/c.toml"), out)).unwrap();
        assert!(text.starts_with("# config.toml (/tmp/c.toml)\n"));
        assert!(text.contains("[display]"));
        assert!(text.contains("[filters]"));
    }

    #[test]
    fn validate_reports_success() {
        let text = output(|out| validate(&CliConfig::default(), out)).unwrap();
        assert_eq!(text, "Configuration is valid.\n");
    }

    #[test]
    fn validate_propagates_problems() {
        let mut config = CliConfig::default();
        config.filters.limit = Some(0);
        let err = output(|out| validate(&config, out)).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn path_prints_location() {
        let text = output(|out| path(Path::new("/etc/eventfeed.toml"), out)).unwrap();
        assert_eq!(text, "config: /etc/eventfeed.toml\n");
    }
}
