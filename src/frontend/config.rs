use crate::codegen::ArtifactOptions;
use crate::core::NamingConventions;
use crate::errors::{GenError, Result};
use crate::infrastructure::{LogConfig, LogFormat, LogOutput};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::Level;

/// File names probed by [`Config::discover`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["cimgen.toml", ".cimgenrc"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub conventions: NamingConventions,

    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_package")]
    pub package: String,

    #[serde(default = "default_enums_file")]
    pub enums_file: String,

    #[serde(default = "default_structs_file")]
    pub structs_file: String,

    #[serde(default = "default_funcs_file")]
    pub funcs_file: String,

    /// Empty disables the support artifact.
    #[serde(default = "default_support_file")]
    pub support_file: String,

    #[serde(default = "default_structs_includes")]
    pub structs_includes: Vec<String>,

    #[serde(default = "default_funcs_includes")]
    pub funcs_includes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub filter: Option<String>,

    /// Log to daily-rotated files in this directory instead of stderr.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            package: default_package(),
            enums_file: default_enums_file(),
            structs_file: default_structs_file(),
            funcs_file: default_funcs_file(),
            support_file: default_support_file(),
            structs_includes: default_structs_includes(),
            funcs_includes: default_funcs_includes(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            filter: None,
            directory: None,
        }
    }
}

fn default_directory() -> PathBuf { PathBuf::from(".") }
fn default_package() -> String { "cimgui".to_string() }
fn default_enums_file() -> String { "enums.go".to_string() }
fn default_structs_file() -> String { "structs.go".to_string() }
fn default_funcs_file() -> String { "funcs.go".to_string() }
fn default_support_file() -> String { "value_types.go".to_string() }
fn default_level() -> String { "info".to_string() }

fn default_structs_includes() -> Vec<String> {
    ArtifactOptions::default().structs_includes
}

fn default_funcs_includes() -> Vec<String> {
    ArtifactOptions::default().funcs_includes
}

impl OutputConfig {
    pub fn artifact_options(&self) -> ArtifactOptions {
        ArtifactOptions {
            package: self.package.clone(),
            structs_includes: self.structs_includes.clone(),
            funcs_includes: self.funcs_includes.clone(),
            support: !self.support_file.is_empty(),
        }
    }
}

impl LogSettings {
    /// Unknown level names fall back to `info`.
    pub fn to_log_config(&self) -> LogConfig {
        let level = Level::from_str(&self.level).unwrap_or(Level::INFO);
        let output = match &self.directory {
            Some(dir) => LogOutput::File {
                directory: dir.to_string_lossy().to_string(),
                prefix: "cimgen".to_string(),
            },
            None => LogOutput::Stderr,
        };

        let config = LogConfig::new().with_level(level).with_format(self.format).with_output(output);
        match &self.filter {
            Some(filter) => config.with_filter(filter.clone()),
            None => config,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| GenError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// First configuration file found walking up from `start`.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Loads the nearest configuration file above the current directory,
    /// or the defaults when there is none.
    pub fn discover() -> Result<Self> {
        let found = std::env::current_dir().ok().and_then(|cwd| Self::find(&cwd));
        match found {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn generate_default() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        fs::write(path, content).map_err(|source| GenError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
