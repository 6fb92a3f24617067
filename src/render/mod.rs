//! Derived presentation values computed from the configuration.
//!
//! [`render`] applies its rules in a fixed order so later rules append
//! body classes after earlier ones:
//!
//! 1. resolved effect tags
//! 2. `music-include` when music is present
//! 3. link anchors
//! 4. `nd-<layout>`
//! 5. `avatar-include` and the avatar image
//! 6. name/description block
//! 7. opacity normalisation
//! 8. Discord widget (custom backends are probed first)
//! 9. map widget
pub mod markup;
pub mod probe;

pub use probe::{BackendProbe, HttpProbe};

use crate::config::{Configuration, DEFAULT_OPACITY, Geolocation};
use crate::effects::BodyClasses;
use crate::error::RenderError;
use crate::logging::Log;
use crate::resources::{ValidatedResources, public_path};

/// Values substituted into the template, built once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedPresentation {
    /// Body classes in insertion order.
    pub body_classes: BodyClasses,
    /// Public path of the music file, when enabled.
    pub music_path: Option<String>,
    /// Link anchors joined by newlines.
    pub links_markup: String,
    /// Layout name passed through to the stylesheet.
    pub layout: String,
    /// Avatar and name/description markup.
    pub information_markup: String,
    /// Card opacity as a fraction in `[0, 1]`.
    pub opacity: f64,
    /// Widget blocks joined by newlines; empty when there are none.
    pub widgets_markup: String,
    /// Discord account id for the client script, when the widget is enabled.
    pub discord_id: Option<String>,
    /// Coordinates for the secondary page, when the map widget is enabled.
    pub geolocation: Option<Geolocation>,
}

/// Normalise a 0–100 percentage to a fraction, defaulting to 0.2.
#[must_use]
pub fn normalize_opacity(percent: Option<u8>) -> f64 {
    percent.map_or(DEFAULT_OPACITY, |p| f64::from(p) / 100.0)
}

/// Build the derived presentation.
///
/// `effects` are the tags returned by [`crate::effects::resolve`];
/// `resources` tells which optional files were confirmed present.
///
/// # Errors
///
/// Returns [`RenderError::BackendUnreachable`] when a Discord widget is
/// requested with a custom backend that `probe` cannot confirm.
pub fn render(
    config: &Configuration,
    effects: &BodyClasses,
    resources: &ValidatedResources,
    probe: &dyn BackendProbe,
    log: &dyn Log,
) -> Result<DerivedPresentation, RenderError> {
    let mut body_classes = effects.clone();

    let music_path = resources.music.as_deref().map(|music| {
        body_classes.insert("music-include");
        public_path(music)
    });

    let complete: Vec<_> = config.links.iter().filter_map(|l| l.complete()).collect();
    let dropped = config.links.len() - complete.len();
    if dropped > 0 {
        log.debug(&format!("{dropped} incomplete link(s) skipped"));
    }
    let links_markup = markup::links(complete);

    let layout = config.profile.layout.clone();
    body_classes.insert(format!("nd-{layout}"));

    if resources.avatar.is_some() {
        body_classes.insert("avatar-include");
    }
    let information_markup = markup::information(
        resources.avatar.as_deref(),
        &config.name,
        &config.description,
        &layout,
    );

    let opacity = normalize_opacity(config.profile.opacity);

    let mut widgets = Vec::new();

    let discord_id = config.profile.discord.clone();
    if let Some(id) = &discord_id {
        if config.has_custom_backend() {
            let url = config.backend_url();
            log.info(&format!("probing backend {url}"));
            probe
                .confirm(url)
                .map_err(|e| RenderError::BackendUnreachable {
                    url: url.to_string(),
                    reason: format!("{e:#}"),
                })?;
            log.debug(&format!("backend {url} confirmed"));
        }
        widgets.push(markup::discord_widget(id).into_string());
    }

    let geolocation = config.profile.geolocation.clone();
    if geolocation.is_some() {
        widgets.push(markup::map_widget().into_string());
    }

    Ok(DerivedPresentation {
        body_classes,
        music_path,
        links_markup,
        layout,
        information_markup,
        opacity,
        widgets_markup: widgets.join("\n"),
        discord_id,
        geolocation,
    })
}
