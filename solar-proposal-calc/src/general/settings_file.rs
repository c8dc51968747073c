use anyhow::{Context, Result};
use proposal_model::Configuration;
use std::fs;
use std::path::Path;

/// Loads a configuration from a TOML file.
///
/// Missing keys keep their default values, so a file may only override
/// the regional yield or the offered terms.
pub fn load_configuration<P: AsRef<Path>>(path: P) -> Result<Configuration> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    parse_configuration(&content)
        .with_context(|| format!("Failed to parse configuration file: {}", path.display()))
}

/// Parses a configuration from TOML text
pub fn parse_configuration(content: &str) -> Result<Configuration> {
    let config: Configuration = toml::from_str(content)?;
    Ok(config)
}

/// Loads the configuration at `path`, or the defaults when no path is given
pub fn load_or_default(path: Option<&Path>) -> Result<Configuration> {
    match path {
        Some(path) => load_configuration(path),
        None => Ok(Configuration::default()),
    }
}

/// Renders a configuration as TOML, e.g. to seed a settings file
pub fn configuration_to_toml(config: &Configuration) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize configuration")
}
