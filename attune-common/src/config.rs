//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration only: where the data lives and how to log.
//! Root folder resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `ATTUNE_ROOT_FOLDER` environment variable
//! 3. TOML config file `root_folder`
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or malformed TOML file is never fatal. The compiled defaults
//! are used and the load error is handed back for the caller to log.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "ATTUNE_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DEFAULT_DATABASE_FILE: &str = "attune.db";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the database (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Database file name relative to the root folder (optional)
    #[serde(default)]
    pub database_file: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Compiled-in defaults for the current platform
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/attune (or /var/lib/attune for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("attune"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/attune"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/attune
        dirs::data_dir()
            .map(|d| d.join("attune"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/attune"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\attune
        dirs::data_local_dir()
            .map(|d| d.join("attune"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\attune"))
    } else {
        PathBuf::from("./attune_data")
    }
}

/// Locate the TOML config file for the platform, if one exists
pub fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("attune").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/attune/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
}

/// Load the platform TOML config, falling back to defaults
///
/// The load error, if any, is returned alongside the defaults rather than
/// logged here, so the caller can report it once tracing is initialized.
pub fn load_or_default() -> (TomlConfig, Option<Error>) {
    load_from_or_default(config_file_path().as_deref())
}

/// Load the given TOML config (if any), falling back to defaults
pub fn load_from_or_default(path: Option<&Path>) -> (TomlConfig, Option<Error>) {
    let Some(path) = path else {
        return (TomlConfig::default(), None);
    };

    match load_toml_config(path) {
        Ok(config) => (config, None),
        Err(e) => (
            TomlConfig::default(),
            Some(Error::Config(format!(
                "Ignoring config file {}: {}",
                path.display(),
                e
            ))),
        ),
    }
}

/// Resolves the root folder following the priority order above
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
    cli_arg: Option<PathBuf>,
    toml: TomlConfig,
}

impl RootFolderResolver {
    /// Create a resolver over an already loaded config
    pub fn with_config(module_name: &str, toml: TomlConfig) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_arg: None,
            toml,
        }
    }

    /// Set the command-line override
    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    pub fn config(&self) -> &TomlConfig {
        &self.toml
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            debug!("{}: root folder from command line", self.module_name);
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.is_empty() {
                debug!("{}: root folder from {}", self.module_name, ROOT_FOLDER_ENV);
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml.root_folder {
            debug!("{}: root folder from config file", self.module_name);
            return path.clone();
        }

        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Prepares the resolved root folder for use
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
    database_file: String,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self {
            root_folder,
            database_file: DEFAULT_DATABASE_FILE.to_string(),
        }
    }

    /// Override the database file name
    pub fn with_database_file(mut self, file: Option<String>) -> Self {
        if let Some(file) = file {
            self.database_file = file;
        }
        self
    }

    /// Create the root folder if it does not exist
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(&self.database_file)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }
}
