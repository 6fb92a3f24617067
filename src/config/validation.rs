//! Required-field and range checks that turn a raw document into a
//! [`Configuration`].
use std::path::{Component, Path};

use super::{
    Configuration, DEFAULT_BACKGROUND_BLUR, DEFAULT_LAYOUT, DEFAULT_PROFILE_BLUR, Geolocation,
    Profile, RawConfig, RawGeolocation, RawProfile,
};
use crate::error::ConfigError;

/// Validate a raw document and apply defaults.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] naming the first offending field.
pub(crate) fn validate(raw: RawConfig) -> Result<Configuration, ConfigError> {
    let name = required("name", raw.name)?;
    let description = required("description", raw.description)?;
    let background = required("background", raw.background)?;
    resource_name("background", &background)?;

    let music = optional(raw.music);
    if let Some(music) = &music {
        resource_name("music", music)?;
    }

    let backend = optional(raw.backend);
    if let Some(url) = &backend
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err(ConfigError::invalid(
            "backend",
            format!("'{url}' is not an http(s) URL"),
        ));
    }

    Ok(Configuration {
        name,
        description,
        background,
        background_blur: optional(raw.background_blur)
            .unwrap_or_else(|| DEFAULT_BACKGROUND_BLUR.to_string()),
        effects: raw.effects,
        music,
        links: raw
            .links
            .unwrap_or_default()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect(),
        profile: validate_profile(raw.profile.unwrap_or_default())?,
        backend,
    })
}

fn validate_profile(raw: RawProfile) -> Result<Profile, ConfigError> {
    let avatar = optional(raw.avatar);
    if let Some(avatar) = &avatar {
        resource_name("profile.avatar", avatar)?;
    }

    let opacity = raw
        .opacity
        .map(|value| {
            u8::try_from(value)
                .ok()
                .filter(|v| *v <= 100)
                .ok_or_else(|| {
                    ConfigError::invalid(
                        "profile.opacity",
                        format!("{value} is outside 0-100"),
                    )
                })
        })
        .transpose()?;

    let discord = optional(raw.discord);
    if let Some(id) = &discord
        && !id.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ConfigError::invalid(
            "profile.discord",
            format!("'{id}' is not a numeric account id"),
        ));
    }

    Ok(Profile {
        avatar,
        layout: optional(raw.layout).unwrap_or_else(|| DEFAULT_LAYOUT.to_string()),
        opacity,
        blur: optional(raw.blur).unwrap_or_else(|| DEFAULT_PROFILE_BLUR.to_string()),
        discord,
        geolocation: raw.geolocation.map(validate_geolocation).transpose()?,
    })
}

fn validate_geolocation(raw: RawGeolocation) -> Result<Geolocation, ConfigError> {
    Ok(Geolocation {
        latitude: required("profile.geolocation.latitude", raw.latitude)?,
        longitude: required("profile.geolocation.longitude", raw.longitude)?,
    })
}

/// A present, non-blank string.
fn required(field: &str, value: Option<String>) -> Result<String, ConfigError> {
    optional(value).ok_or_else(|| ConfigError::invalid(field, "is required and must not be empty"))
}

/// Treat blank strings the same as absent ones.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resource names must stay inside the resources directory.
fn resource_name(field: &str, name: &str) -> Result<(), ConfigError> {
    let path = Path::new(name);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ConfigError::invalid(
            field,
            format!("'{name}' must be relative to the resources directory"),
        ));
    }
    Ok(())
}
