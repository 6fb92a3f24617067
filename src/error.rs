//! Domain-specific error types for the profile site generator.
//!
//! Each pipeline stage returns its own [`thiserror`] enum; they aggregate
//! into [`BiolinkError`], which the binary converts to [`anyhow::Error`] at
//! the CLI boundary.
//!
//! # Error hierarchy
//!
//! ```text
//! BiolinkError
//! ├── Config(ConfigError)     — reading, parsing, validating config.yml
//! ├── Resource(ResourceError) — mandatory resource files
//! ├── Render(RenderError)     — backend reachability
//! └── Assemble(AssembleError) — output tree, template, build tools
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Flat classification of every fatal condition a run can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configuration file could not be read.
    ConfigNotFound,
    /// The configuration file is not a valid document.
    ConfigParseError,
    /// A required field is missing or a value is out of range.
    ConfigInvalid,
    /// A mandatory resource file is absent.
    ResourceMissing,
    /// The output directory already exists.
    OutputCollision,
    /// The template could not be obtained.
    TemplateFetchFailed,
    /// A custom backend did not confirm its identity.
    BackendUnreachable,
    /// The CSS compiler or script bundler failed.
    BuildFailed,
    /// Writing to the output tree failed.
    WriteFailed,
    /// Strict validation found tokens that were not substituted.
    UnresolvedTokens,
}

/// Top-level error type for a site build.
#[derive(Error, Debug)]
pub enum BiolinkError {
    /// Configuration loading or validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A referenced resource is unusable.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Deriving presentation values failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Producing the output tree failed.
    #[error(transparent)]
    Assemble(#[from] AssembleError),
}

impl BiolinkError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(e) => e.kind(),
            Self::Resource(ResourceError::Missing { .. }) => ErrorKind::ResourceMissing,
            Self::Render(RenderError::BackendUnreachable { .. }) => ErrorKind::BackendUnreachable,
            Self::Assemble(e) => e.kind(),
        }
    }
}

/// Errors that arise from loading `config.yml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file {}: {source}", .path.display())]
    NotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid YAML for the configuration schema.
    #[error("cannot parse config file {}: {source}", .path.display())]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying deserialization error.
        source: serde_yaml::Error,
    },

    /// The file was read but is not UTF-8 text.
    #[error("cannot decode config file {}: {source}", .path.display())]
    Encoding {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying decoding error.
        source: std::string::FromUtf8Error,
    },

    /// A field is missing, empty, or out of range.
    #[error("invalid config: {field}: {reason}")]
    Invalid {
        /// Dotted field name, e.g. `profile.opacity`.
        field: String,
        /// Human-readable reason.
        reason: String,
    },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::Invalid`].
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::ConfigNotFound,
            Self::Parse { .. } | Self::Encoding { .. } => ErrorKind::ConfigParseError,
            Self::Invalid { .. } => ErrorKind::ConfigInvalid,
        }
    }
}

/// Errors that arise from resource validation.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A mandatory resource does not exist under the resources directory.
    #[error("{field} resource not found: {}", .path.display())]
    Missing {
        /// Config field that referenced the resource.
        field: &'static str,
        /// Full path that was checked.
        path: PathBuf,
    },
}

/// Errors that arise while deriving presentation values.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A custom backend could not be reached or did not identify itself.
    #[error("backend {url} is unreachable: {reason}")]
    BackendUnreachable {
        /// Backend URL from the configuration.
        url: String,
        /// Why the probe failed.
        reason: String,
    },
}

/// Errors that arise while producing the output tree.
#[derive(Error, Debug)]
pub enum AssembleError {
    /// The output path already exists.
    #[error("output directory already exists: {}", .0.display())]
    OutputCollision(PathBuf),

    /// The template could not be cloned or copied.
    #[error("failed to fetch template from {source_desc}: {reason}")]
    TemplateFetchFailed {
        /// Description of the template source.
        source_desc: String,
        /// Why fetching failed.
        reason: String,
    },

    /// A build tool failed.
    #[error("{step} failed: {reason}")]
    BuildFailed {
        /// Build step, e.g. `"stylesheet compilation"`.
        step: &'static str,
        /// Tool output or failure description.
        reason: String,
    },

    /// A filesystem write failed.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Strict validation found template tokens left unsubstituted.
    #[error("unresolved template tokens: {}", .0.join(", "))]
    UnresolvedTokens(Vec<String>),
}

impl AssembleError {
    /// Shorthand for [`AssembleError::WriteFailed`].
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutputCollision(_) => ErrorKind::OutputCollision,
            Self::TemplateFetchFailed { .. } => ErrorKind::TemplateFetchFailed,
            Self::BuildFailed { .. } => ErrorKind::BuildFailed,
            Self::WriteFailed { .. } => ErrorKind::WriteFailed,
            Self::UnresolvedTokens(_) => ErrorKind::UnresolvedTokens,
        }
    }
}
