use std::path::{Path, PathBuf};

pub use cssclock_proto::config::*;

use log::{debug, info, warn};
use masterror::{AppError, AppResult, Error};
use shellexpand::full;

/// Failures while locating or decoding the configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to expand path `{path}`: {context}")]
    Expand { path: String, context: String },
    #[error("config file does not exist: {path:?}")]
    NotFound { path: PathBuf },
    #[error("failed to read config at {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl From<ConfigLoadError> for AppError {
    fn from(err: ConfigLoadError) -> Self {
        match err {
            ConfigLoadError::NotFound { .. } => AppError::not_found(err.to_string()),
            ConfigLoadError::Parse { .. } => AppError::validation(err.to_string()),
            ConfigLoadError::Expand { .. } | ConfigLoadError::Read { .. } => {
                AppError::internal(err.to_string())
            }
        }
    }
}

/// Load the configuration from `path`, or from the default location.
///
/// An explicit path must exist. A missing default file, or any file that
/// cannot be read or parsed, falls back to [`Config::default`]. Invalid
/// values inside a readable file fall back one field at a time.
pub fn get_config(path: Option<PathBuf>) -> AppResult<(Config, PathBuf)> {
    let expanded = match path {
        Some(path) => {
            info!("Config path provided {path:?}");
            let expanded = expand_path(&path)?;

            if !expanded.exists() {
                return Err(ConfigLoadError::NotFound { path: expanded }.into());
            }

            expanded
        }
        None => expand_path(Path::new(DEFAULT_CONFIG_FILE_PATH))?,
    };

    let config = if expanded.exists() {
        read_config(&expanded).unwrap_or_else(|err| {
            warn!("{err}, using defaults");
            Config::default()
        })
    } else {
        info!("No config file at {expanded:?}, using defaults");
        Config::default()
    };

    Ok((config, expanded))
}

fn expand_path(path: &Path) -> Result<PathBuf, ConfigLoadError> {
    let str_path = path.to_string_lossy();
    let expanded = full(&str_path).map_err(|e| ConfigLoadError::Expand {
        path: str_path.to_string(),
        context: e.to_string(),
    })?;

    Ok(PathBuf::from(expanded.as_ref()))
}

/// Read and decode a configuration file, replacing invalid values with
/// their defaults.
pub fn read_config(path: &Path) -> Result<Config, ConfigLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Decoding config file {path:?}");

    let mut config: Config = toml::from_str(&content).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    for err in config.sanitize() {
        warn!("{err} in {path:?}, using the default");
    }

    expand_image_path(&mut config.clock);
    info!("Config file loaded successfully");

    Ok(config)
}

/// Expand `~` and environment variables in the image directory, keeping the
/// raw value when expansion fails.
pub fn expand_image_path(clock: &mut ClockConfig) {
    let expanded = match full(&clock.image_path) {
        Ok(expanded) => expanded.into_owned(),
        Err(err) => {
            warn!("Failed to expand image path {:?}: {err}", clock.image_path);
            return;
        }
    };

    if expanded != clock.image_path {
        debug!("Expanded image path {:?} to {expanded:?}", clock.image_path);
        clock.image_path = expanded;
    }
}
