//! Existence checks for files referenced from the configuration.
//!
//! Only presence is checked, never content. `background` is mandatory;
//! `music` and `profile.avatar` are optional and a missing file only
//! disables the feature.
use std::path::{Path, PathBuf};

use crate::config::Configuration;
use crate::error::ResourceError;
use crate::logging::Log;

/// Name of the resources directory inside the generated site.
pub const RESOURCES_DIR_NAME: &str = "resources";

/// Whether `filename` exists as a regular file under `resources_dir`.
#[must_use]
pub fn check_resource(resources_dir: &Path, filename: &str) -> bool {
    resources_dir.join(filename).is_file()
}

/// Public URL of a resource as referenced from the generated pages.
#[must_use]
pub fn public_path(filename: &str) -> String {
    format!("./{RESOURCES_DIR_NAME}/{filename}")
}

/// Resources confirmed present on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedResources {
    /// Directory every name below is relative to.
    pub dir: PathBuf,
    /// Background file name.
    pub background: String,
    /// Music file name, when declared and present.
    pub music: Option<String>,
    /// Avatar file name, when declared and present.
    pub avatar: Option<String>,
}

/// Check every resource the configuration references.
///
/// # Errors
///
/// Returns [`ResourceError::Missing`] when `background` does not exist.
/// Missing optional resources are logged as warnings.
pub fn validate(
    config: &Configuration,
    resources_dir: &Path,
    log: &dyn Log,
) -> Result<ValidatedResources, ResourceError> {
    if !check_resource(resources_dir, &config.background) {
        return Err(ResourceError::Missing {
            field: "background",
            path: resources_dir.join(&config.background),
        });
    }
    log.debug(&format!("background: {}", config.background));

    let optional = |field: &str, name: Option<&String>| {
        let name = name?;
        if check_resource(resources_dir, name) {
            log.debug(&format!("{field}: {name}"));
            Some(name.clone())
        } else {
            log.warn(&format!(
                "{field} resource not found: {}; feature disabled",
                resources_dir.join(name).display()
            ));
            None
        }
    };

    Ok(ValidatedResources {
        dir: resources_dir.to_path_buf(),
        background: config.background.clone(),
        music: optional("music", config.music.as_ref()),
        avatar: optional("profile.avatar", config.profile.avatar.as_ref()),
    })
}
