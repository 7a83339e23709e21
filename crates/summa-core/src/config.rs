//! Ingestion configuration.
//!
//! Configuration is read once per run, usually from the `[data_ingestion]`
//! and `[training]` tables of a TOML file, and never mutated afterwards.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::IngestError;
use crate::Result;
use crate::training::TrainingConfig;

/// What to do when two distinct entry names sanitize to the same path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Later entries overwrite earlier ones. Each collision is logged and
    /// recorded as a report warning.
    #[default]
    LastWriteWins,
    /// Abort the run with [`IngestError::NameCollision`].
    Reject,
    /// Write the later entry under a `_N`-suffixed name.
    Rename,
}

impl CollisionPolicy {
    /// Returns the kebab-case name used in config files and on the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LastWriteWins => "last-write-wins",
            Self::Reject => "reject",
            Self::Rename => "rename",
        }
    }
}

impl FromStr for CollisionPolicy {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "last-write-wins" => Ok(Self::LastWriteWins),
            "reject" => Ok(Self::Reject),
            "rename" => Ok(Self::Rename),
            other => Err(IngestError::Config {
                reason: format!(
                    "unknown collision policy '{other}' (expected last-write-wins, reject or rename)"
                ),
            }),
        }
    }
}

/// Options for the archive unpacker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnpackOptions {
    /// Collision handling for sanitized names.
    pub collision_policy: CollisionPolicy,
}

/// Settings for one ingestion run.
///
/// # Examples
///
/// ```
/// use summa_core::IngestionConfig;
///
/// let config = IngestionConfig::new(
///     "https://example.com/data.zip",
///     "artifacts/data.zip",
///     "artifacts/data",
/// );
/// assert_eq!(config.source_url(), "https://example.com/data.zip");
/// assert!(config.root_dir().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionConfig {
    root_dir: Option<PathBuf>,
    source_url: String,
    local_data_file: PathBuf,
    unzip_dir: PathBuf,
    collision_policy: CollisionPolicy,
}

impl IngestionConfig {
    /// Creates a configuration with no root directory and the default
    /// collision policy.
    pub fn new(
        source_url: impl Into<String>,
        local_data_file: impl Into<PathBuf>,
        unzip_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root_dir: None,
            source_url: source_url.into(),
            local_data_file: local_data_file.into(),
            unzip_dir: unzip_dir.into(),
            collision_policy: CollisionPolicy::default(),
        }
    }

    /// Sets the artifact root created before the run.
    #[must_use]
    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    /// Sets the collision policy.
    #[must_use]
    pub const fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Replaces the source URL.
    #[must_use]
    pub fn with_source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = source_url.into();
        self
    }

    /// Replaces the local archive path.
    #[must_use]
    pub fn with_local_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_data_file = path.into();
        self
    }

    /// Replaces the unpack directory.
    #[must_use]
    pub fn with_unzip_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.unzip_dir = path.into();
        self
    }

    /// URL of the dataset archive.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Where the archive is stored locally.
    #[must_use]
    pub fn local_data_file(&self) -> &Path {
        &self.local_data_file
    }

    /// Where the archive is unpacked.
    #[must_use]
    pub fn unzip_dir(&self) -> &Path {
        &self.unzip_dir
    }

    /// Artifact root directory, if configured.
    #[must_use]
    pub fn root_dir(&self) -> Option<&Path> {
        self.root_dir.as_deref()
    }

    /// Collision policy for the unpacker.
    #[must_use]
    pub const fn collision_policy(&self) -> CollisionPolicy {
        self.collision_policy
    }

    /// Unpacker options derived from this configuration.
    #[must_use]
    pub const fn unpack_options(&self) -> UnpackOptions {
        UnpackOptions {
            collision_policy: self.collision_policy,
        }
    }

    /// Checks that required fields are non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.source_url.trim().is_empty() {
            return Err(config_error("data_ingestion.source_url must not be empty"));
        }
        if self.local_data_file.as_os_str().is_empty() {
            return Err(config_error(
                "data_ingestion.local_data_file must not be empty",
            ));
        }
        if self.unzip_dir.as_os_str().is_empty() {
            return Err(config_error("data_ingestion.unzip_dir must not be empty"));
        }
        Ok(())
    }
}

/// The `[data_ingestion]` table as written.
///
/// Every key is optional here so that callers can fill gaps (for example
/// from command-line flags) before [`IngestionSection::resolve`] checks
/// that the required ones are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestionSection {
    /// Artifact root created before the run.
    pub root_dir: Option<PathBuf>,
    /// Archive URL. `source_URL` is accepted as well.
    #[serde(alias = "source_URL")]
    pub source_url: Option<String>,
    /// Local archive path.
    pub local_data_file: Option<PathBuf>,
    /// Unpack directory.
    pub unzip_dir: Option<PathBuf>,
    /// Collision policy, `last-write-wins` when absent.
    pub collision_policy: Option<CollisionPolicy>,
}

impl IngestionSection {
    /// Builds a validated [`IngestionConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Config`] naming the first required key that
    /// is missing or empty.
    pub fn resolve(self) -> Result<IngestionConfig> {
        let source_url = self
            .source_url
            .ok_or_else(|| config_error("data_ingestion.source_url is missing"))?;
        let local_data_file = self
            .local_data_file
            .ok_or_else(|| config_error("data_ingestion.local_data_file is missing"))?;
        let unzip_dir = self
            .unzip_dir
            .ok_or_else(|| config_error("data_ingestion.unzip_dir is missing"))?;

        let mut config = IngestionConfig::new(source_url, local_data_file, unzip_dir)
            .with_collision_policy(self.collision_policy.unwrap_or_default());
        if let Some(root_dir) = self.root_dir {
            config = config.with_root_dir(root_dir);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// The `[data_ingestion]` table.
    pub data_ingestion: Option<IngestionSection>,
    /// The `[training]` table.
    pub training: Option<TrainingConfig>,
}

impl ConfigFile {
    /// Parses a configuration document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| config_error(e.message()))
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| IngestError::Config {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&source).map_err(|err| match err {
            IngestError::Config { reason } => IngestError::Config {
                reason: format!("{}: {reason}", path.display()),
            },
            other => other,
        })
    }

    /// Returns the validated `[data_ingestion]` table.
    pub fn ingestion(&self) -> Result<IngestionConfig> {
        self.data_ingestion
            .clone()
            .ok_or_else(|| config_error("missing [data_ingestion] section"))?
            .resolve()
    }

    /// Returns the `[training]` table.
    pub fn training(&self) -> Result<&TrainingConfig> {
        self.training
            .as_ref()
            .ok_or_else(|| config_error("missing [training] section"))
    }
}

fn config_error(reason: impl Into<String>) -> IngestError {
    IngestError::Config {
        reason: reason.into(),
    }
}
