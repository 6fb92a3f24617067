//! Profile configuration: the validated, read-only view of `config.yml`.
//!
//! [`load`] reads and parses the document into a raw shape (every field
//! optional, mirroring the YAML) and then validates it into a
//! [`Configuration`] whose required fields are guaranteed non-empty and
//! whose defaults have been applied. Nothing downstream mutates it.
pub mod loader;
pub mod validation;

pub use loader::{load, parse};

use serde::Deserialize;

/// Input path used when the caller does not supply one.
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Presence service used for the Discord widget unless overridden.
pub const DEFAULT_BACKEND: &str = "https://api.lanyard.rest";

/// Default `background_blur`.
pub const DEFAULT_BACKGROUND_BLUR: &str = "5px";

/// Default `profile.layout`.
pub const DEFAULT_LAYOUT: &str = "center";

/// Default `profile.blur`.
pub const DEFAULT_PROFILE_BLUR: &str = "10px";

/// Default `profile.opacity` as a fraction.
pub const DEFAULT_OPACITY: f64 = 0.2;

/// Validated profile configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Display name (non-empty).
    pub name: String,
    /// Short description under the name (non-empty).
    pub description: String,
    /// Background file name relative to the resources directory (non-empty).
    pub background: String,
    /// CSS length applied to the page background blur.
    pub background_blur: String,
    /// Symbolic effect identifiers, if any were declared.
    pub effects: Option<Effects>,
    /// Music file name relative to the resources directory.
    pub music: Option<String>,
    /// Declared links in document order, complete or not.
    pub links: Vec<LinkEntry>,
    /// Profile card settings.
    pub profile: Profile,
    /// Presence backend URL as written in the document.
    pub backend: Option<String>,
}

impl Configuration {
    /// Backend URL in effect for this run.
    #[must_use]
    pub fn backend_url(&self) -> &str {
        self.backend.as_deref().unwrap_or(DEFAULT_BACKEND)
    }

    /// Whether the document overrides the built-in backend.
    #[must_use]
    pub fn has_custom_backend(&self) -> bool {
        self.backend
            .as_deref()
            .is_some_and(|b| b.trim_end_matches('/') != DEFAULT_BACKEND)
    }
}

/// Effect slots; each value is a symbolic identifier resolved to a body class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Effects {
    /// Page background effect.
    #[serde(default)]
    pub background: Option<String>,
    /// Name heading effect.
    #[serde(default)]
    pub name: Option<String>,
    /// Description paragraph effect.
    #[serde(default)]
    pub description: Option<String>,
}

/// A link as declared; only entries with all three fields are rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LinkEntry {
    /// Icon identifier.
    #[serde(default)]
    pub icon: Option<String>,
    /// Link target.
    #[serde(default)]
    pub url: Option<String>,
    /// CSS color for the icon.
    #[serde(default)]
    pub color: Option<String>,
}

/// A link with every field present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link<'a> {
    /// Icon identifier.
    pub icon: &'a str,
    /// Link target.
    pub url: &'a str,
    /// CSS color for the icon.
    pub color: &'a str,
}

impl LinkEntry {
    /// Borrow as a [`Link`] when icon, url, and color are all present and
    /// non-empty.
    #[must_use]
    pub fn complete(&self) -> Option<Link<'_>> {
        fn field(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.trim().is_empty())
        }
        Some(Link {
            icon: field(&self.icon)?,
            url: field(&self.url)?,
            color: field(&self.color)?,
        })
    }
}

/// Profile card settings with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Avatar file name relative to the resources directory.
    pub avatar: Option<String>,
    /// Layout name; opaque apart from the `center` special case.
    pub layout: String,
    /// Card opacity as a percentage (0–100), when declared.
    pub opacity: Option<u8>,
    /// CSS length applied to the card backdrop blur.
    pub blur: String,
    /// Discord account identifier for the live status widget.
    pub discord: Option<String>,
    /// Coordinates for the map widget.
    pub geolocation: Option<Geolocation>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            avatar: None,
            layout: DEFAULT_LAYOUT.to_string(),
            opacity: None,
            blur: DEFAULT_PROFILE_BLUR.to_string(),
            discord: None,
            geolocation: None,
        }
    }
}

/// Map coordinates, kept as their literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geolocation {
    /// Latitude as written.
    pub latitude: String,
    /// Longitude as written.
    pub longitude: String,
}

// ---------------------------------------------------------------------------
// Raw document shape
// ---------------------------------------------------------------------------

/// `config.yml` exactly as deserialized, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawConfig {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) background: Option<String>,
    #[serde(default)]
    pub(crate) background_blur: Option<String>,
    #[serde(default)]
    pub(crate) effects: Option<Effects>,
    #[serde(default)]
    pub(crate) music: Option<String>,
    #[serde(default)]
    pub(crate) links: Option<Vec<Option<LinkEntry>>>,
    #[serde(default)]
    pub(crate) profile: Option<RawProfile>,
    #[serde(default)]
    pub(crate) backend: Option<String>,
}

/// `profile:` mapping as deserialized.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawProfile {
    #[serde(default)]
    pub(crate) avatar: Option<String>,
    #[serde(default)]
    pub(crate) layout: Option<String>,
    #[serde(default)]
    pub(crate) opacity: Option<i64>,
    #[serde(default)]
    pub(crate) blur: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub(crate) discord: Option<String>,
    #[serde(default)]
    pub(crate) geolocation: Option<RawGeolocation>,
}

/// `profile.geolocation:` mapping as deserialized.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawGeolocation {
    #[serde(default, deserialize_with = "scalar_text")]
    pub(crate) latitude: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub(crate) longitude: Option<String>,
}

/// A YAML scalar that may be written quoted or bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

/// Deserialize a scalar into its literal text, so `discord: 123` and
/// `discord: "123"` are equivalent.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(value.map(|s| match s {
        Scalar::Text(t) => t,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
    }))
}
