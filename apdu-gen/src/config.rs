//! Layered configuration for `apdu-gen`.
//!
//! Layers are merged lowest to highest: built-in defaults, the discovered
//! configuration file, `APDU_GEN_*` environment variables, then CLI flags.

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::discovery::resolve_config_path;
use crate::emit::Dialect;
use crate::error::GenError;

/// Prefix for environment variable overrides, e.g. `APDU_GEN_DIALECT`.
pub const ENV_PREFIX: &str = "APDU_GEN_";

/// Resolved generator settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Host language of the generated document.
    pub dialect: Dialect,
    /// Compare against the destination instead of rewriting it.
    pub check: bool,
}

/// Values supplied on the command line; unset fields leave lower layers alone.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CliOverrides {
    /// Value of `--dialect`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
    /// `Some(true)` when `--check` was passed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<bool>,
}

/// Loads configuration from every layer.
///
/// # Errors
///
/// Returns [`GenError::MissingConfig`] for a missing explicit file,
/// [`GenError::Io`] if the file cannot be read, and [`GenError::Config`] if
/// the merged values do not deserialize.
pub fn load_config(
    overrides: &CliOverrides,
    explicit: Option<&Utf8Path>,
) -> Result<GenConfig, GenError> {
    let mut figment = Figment::from(Serialized::defaults(GenConfig::default()));
    if let Some(path) = resolve_config_path(explicit)? {
        figment = figment.merge(file_layer(&path)?);
    }
    let config: GenConfig = figment
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config_path"]))
        .merge(Serialized::defaults(overrides))
        .extract()?;
    debug!(dialect = config.dialect.as_str(), check = config.check, "resolved configuration");
    Ok(config)
}

fn file_layer(path: &Utf8Path) -> Result<Figment, GenError> {
    debug!(path = %path, "loading configuration file");
    let data = std::fs::read_to_string(path).map_err(|source| GenError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Figment::from(Toml::string(&data)))
}
