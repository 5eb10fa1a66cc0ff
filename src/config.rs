//! Connection defaults for karafctl.
//!
//! Flags always win; the config file only fills gaps. The file lives at
//! `~/.config/karafctl/config.json` and is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::ConnectionArgs;
use karafkit::{ConnectionOptions, DEFAULT_CLIENT_BIN};

/// File-level connection defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub client_bin: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub delay: Option<String>,
    pub retry: Option<String>,
}

/// Get the config file path
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("karafctl").join("config.json"))
}

/// Load the config file; a missing file is an empty config
pub fn load() -> Result<FileConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let content =
        fs::read_to_string(&path).with_context(|| format!("Could not read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid config format in {}", path.display()))
}

/// Resolved connection settings for one invocation.
pub struct Connection {
    pub client_bin: String,
    pub options: ConnectionOptions,
}

/// Resolve connection settings: CLI flags over file defaults over the
/// stock client location.
pub fn resolve(args: &ConnectionArgs) -> Result<Connection> {
    Ok(merge(args, load()?))
}

fn merge(args: &ConnectionArgs, file: FileConfig) -> Connection {
    Connection {
        client_bin: args
            .client_bin
            .clone()
            .or(file.client_bin)
            .unwrap_or_else(|| DEFAULT_CLIENT_BIN.to_string()),
        options: ConnectionOptions {
            host: args.host.clone().or(file.host),
            port: args.port.clone().or(file.port),
            user: args.user.clone().or(file.user),
            password: args.password.clone().or(file.password),
            delay: args.delay.clone().or(file.delay),
            retry: args.retry.clone().or(file.retry),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_defaults() {
        let args = ConnectionArgs {
            host: Some("cli-host".to_string()),
            ..ConnectionArgs::default()
        };
        let file = FileConfig {
            host: Some("file-host".to_string()),
            port: Some("8101".to_string()),
            ..FileConfig::default()
        };

        let connection = merge(&args, file);
        assert_eq!(connection.options.host.as_deref(), Some("cli-host"));
        assert_eq!(connection.options.port.as_deref(), Some("8101"));
    }

    #[test]
    fn client_bin_falls_back_to_stock_location() {
        let connection = merge(&ConnectionArgs::default(), FileConfig::default());
        assert_eq!(connection.client_bin, DEFAULT_CLIENT_BIN);
    }

    #[test]
    fn empty_sides_leave_options_unset() {
        let connection = merge(&ConnectionArgs::default(), FileConfig::default());
        assert!(connection.options.to_args().is_empty());
    }

    #[test]
    fn partial_config_files_parse() {
        let file: FileConfig =
            serde_json::from_str(r#"{"host": "karaf.example.org", "retry": "3"}"#).unwrap();
        assert_eq!(file.host.as_deref(), Some("karaf.example.org"));
        assert_eq!(file.retry.as_deref(), Some("3"));
        assert!(file.client_bin.is_none());
    }
}
