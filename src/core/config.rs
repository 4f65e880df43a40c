//! # Configuration
//!
//! Resolves the font, font directory and post-completion command with a
//! fixed override hierarchy: defaults → config file → CLI flags.
//!
//! The config file is optional. With `-c` only that path is read; otherwise
//! the default locations are tried in order and the first readable one wins:
//!
//! ```text
//! ~/.cltirc                    (YAML)
//! ~/.config/clti/cltirc        (YAML)
//! ~/.config/clti/config.toml   (TOML)
//! ```
//!
//! ```yaml
//! font: banner3
//! font_directory: ~/fonts/figlet_fonts/contributed
//! command: notify-send "time is up"
//! ```

use log::{debug, info};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse files)
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    pub font: Option<String>,
    pub font_directory: Option<String>,
    pub command: Option<String>,
}

/// A config file that was found and parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: FileConfig,
}

/// Values given explicitly on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub font: Option<String>,
    pub font_directory: Option<String>,
    pub command: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_FONT: &str = "banner3";
pub const DEFAULT_FONT_DIRECTORY: &str = "~/fonts/figlet_fonts/contributed";
pub const FONT_EXTENSION: &str = "flf";

/// Built-in fallbacks for everything the flags and the config file leave out.
#[derive(Debug, Clone)]
pub struct Defaults {
    pub font: String,
    pub font_directory: String,
    pub font_extension: String,
    /// Searched in order when no `-c` is given.
    pub config_locations: Vec<PathBuf>,
}

impl Defaults {
    pub fn standard() -> Self {
        let config_locations = match dirs::home_dir() {
            Some(home) => vec![
                home.join(".cltirc"),
                home.join(".config").join("clti").join("cltirc"),
                home.join(".config").join("clti").join("config.toml"),
            ],
            None => Vec::new(),
        };

        Self {
            font: DEFAULT_FONT.to_string(),
            font_directory: DEFAULT_FONT_DIRECTORY.to_string(),
            font_extension: FONT_EXTENSION.to_string(),
            config_locations,
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Initial countdown length. May be zero or negative.
    pub duration_secs: i64,
    pub font: String,
    pub(crate) font_directory: PathBuf,
    /// Full path of the font file the text renderer should load.
    pub font_path: PathBuf,
    pub command: Option<String>,
    /// The config file that contributed values, if any.
    pub config_path: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Yaml { path: PathBuf, source: serde_yaml::Error },
    Toml { path: PathBuf, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            ConfigError::Yaml { path, source } => {
                write!(f, "config parse error in {}: {source}", path.display())
            }
            ConfigError::Toml { path, source } => {
                write!(f, "config parse error in {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Yaml { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Find and parse the config file.
///
/// An explicit path must be readable and well-formed. Default locations that
/// cannot be read are skipped; the first readable one is parsed and returned.
pub fn load_config(
    explicit: Option<&Path>,
    defaults: &Defaults,
) -> Result<Option<LoadedConfig>, ConfigError> {
    if let Some(path) = explicit {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        return parse_loaded(path, &contents).map(Some);
    }

    for candidate in &defaults.config_locations {
        match fs::read_to_string(candidate) {
            Ok(contents) => return parse_loaded(candidate, &contents).map(Some),
            Err(e) => debug!("Skipping config candidate {}: {}", candidate.display(), e),
        }
    }

    debug!("No config file found, using defaults");
    Ok(None)
}

fn parse_loaded(path: &Path, contents: &str) -> Result<LoadedConfig, ConfigError> {
    let config = parse_config(path, contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(LoadedConfig {
        path: path.to_path_buf(),
        config,
    })
}

/// Parses a config document. `.toml` files are TOML, everything else YAML.
pub fn parse_config(path: &Path, contents: &str) -> Result<FileConfig, ConfigError> {
    if is_blank_document(contents) {
        return Ok(FileConfig::default());
    }

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_str(contents).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Nothing but whitespace and `#` comments.
fn is_blank_document(contents: &str) -> bool {
    contents.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

// ============================================================================
// Resolution
// ============================================================================

/// Collapse defaults → config file → CLI flags into one immutable config.
pub fn resolve(
    duration_secs: i64,
    overrides: &Overrides,
    loaded: Option<&LoadedConfig>,
    defaults: &Defaults,
) -> SessionConfig {
    let file = loaded.map(|l| &l.config);

    let font = overrides
        .font
        .clone()
        .or_else(|| file.and_then(|f| f.font.clone()))
        .unwrap_or_else(|| defaults.font.clone());

    let font_directory = overrides
        .font_directory
        .clone()
        .or_else(|| file.and_then(|f| f.font_directory.clone()))
        .unwrap_or_else(|| defaults.font_directory.clone());
    let font_directory = expand_home(&font_directory);

    // No built-in command: nothing runs unless asked for.
    let command = overrides
        .command
        .clone()
        .or_else(|| file.and_then(|f| f.command.clone()));

    let font_path = font_file_path(&font_directory, &font, &defaults.font_extension);

    SessionConfig {
        duration_secs,
        font,
        font_directory,
        font_path,
        command,
        config_path: loaded.map(|l| l.path.clone()),
    }
}

/// `<dir>/<font>.<ext>`, unless the font name already carries the extension.
fn font_file_path(directory: &Path, font: &str, extension: &str) -> PathBuf {
    let has_extension = Path::new(font)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    if has_extension {
        directory.join(font)
    } else {
        directory.join(format!("{font}.{extension}"))
    }
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
