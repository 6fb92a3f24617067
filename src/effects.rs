//! Symbolic effect names to body-class tags.
//!
//! Each effect slot has a fixed table of known identifiers. Unknown
//! identifiers are reported through the log and dropped; they never fail
//! the run.
use crate::config::Effects;
use crate::logging::Log;

/// An effect slot of the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectSlot {
    /// `effects.background`
    Background,
    /// `effects.name`
    Name,
    /// `effects.description`
    Description,
}

impl EffectSlot {
    /// Slots in resolution order.
    pub const ALL: [Self; 3] = [Self::Background, Self::Name, Self::Description];

    /// Configuration key for this slot.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Name => "name",
            Self::Description => "description",
        }
    }

    /// Known `(identifier, tag)` pairs for this slot.
    #[must_use]
    pub const fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Background => &[
                ("night_time", "nighttime"),
                ("old_tv", "oldtv"),
                ("blurred", "blurred"),
            ],
            Self::Name => &[("rainbow", "name-rainbow"), ("flash", "name-flash")],
            Self::Description => &[("typewriter", "description-typewrite")],
        }
    }

    /// Tag for `identifier`, if it is known for this slot.
    #[must_use]
    pub fn lookup(self, identifier: &str) -> Option<&'static str> {
        self.table()
            .iter()
            .find(|(id, _)| *id == identifier)
            .map(|(_, tag)| *tag)
    }

    fn value(self, effects: &Effects) -> Option<&str> {
        match self {
            Self::Background => effects.background.as_deref(),
            Self::Name => effects.name.as_deref(),
            Self::Description => effects.description.as_deref(),
        }
    }
}

/// Insertion-ordered set of body classes.
///
/// Output order is the order of first insertion, so generated markup is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyClasses(Vec<String>);

impl BodyClasses {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append `class` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.contains(&class) {
            return false;
        }
        self.0.push(class);
        true
    }

    /// Whether `class` is in the set.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    /// Classes in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Space-separated form for a `class` attribute.
    #[must_use]
    pub fn to_attribute(&self) -> String {
        self.0.join(" ")
    }
}

impl Extend<String> for BodyClasses {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for class in iter {
            self.insert(class);
        }
    }
}

/// Resolve declared effects to tags in slot order: background, name,
/// description.
///
/// Unknown identifiers are logged as warnings naming the slot and value,
/// and skipped.
pub fn resolve(effects: Option<&Effects>, log: &dyn Log) -> BodyClasses {
    let mut tags = BodyClasses::new();
    let Some(effects) = effects else {
        return tags;
    };

    for slot in EffectSlot::ALL {
        let Some(value) = slot.value(effects).map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        match slot.lookup(value) {
            Some(tag) => {
                log.debug(&format!("{} effect '{value}' -> {tag}", slot.key()));
                tags.insert(tag);
            }
            None => {
                let known: Vec<&str> = slot.table().iter().map(|(id, _)| *id).collect();
                log.warn(&format!(
                    "unknown {} effect '{value}' ignored (known: {})",
                    slot.key(),
                    known.join(", ")
                ));
            }
        }
    }
    tags
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::BufferedLog;

    fn effects(background: Option<&str>, name: Option<&str>, description: Option<&str>) -> Effects {
        Effects {
            background: background.map(String::from),
            name: name.map(String::from),
            description: description.map(String::from),
        }
    }

    #[test]
    fn no_effects_resolves_to_nothing() {
        let log = BufferedLog::new();
        assert!(resolve(None, &log).as_slice().is_empty());
        assert!(log.warnings().is_empty());
    }

    #[test]
    fn every_known_value_maps_to_its_tag() {
        let cases = [
            (EffectSlot::Background, "night_time", "nighttime"),
            (EffectSlot::Background, "old_tv", "oldtv"),
            (EffectSlot::Background, "blurred", "blurred"),
            (EffectSlot::Name, "rainbow", "name-rainbow"),
            (EffectSlot::Name, "flash", "name-flash"),
            (EffectSlot::Description, "typewriter", "description-typewrite"),
        ];
        for (slot, id, tag) in cases {
            assert_eq!(slot.lookup(id), Some(tag));
        }
    }

    #[test]
    fn identifiers_are_slot_specific() {
        assert_eq!(EffectSlot::Name.lookup("old_tv"), None);
        assert_eq!(EffectSlot::Background.lookup("typewriter"), None);
    }

    #[test]
    fn tags_follow_slot_order() {
        let log = BufferedLog::new();
        let tags = resolve(
            Some(&effects(Some("blurred"), Some("flash"), Some("typewriter"))),
            &log,
        );
        assert_eq!(
            tags.as_slice(),
            ["blurred", "name-flash", "description-typewrite"]
        );
    }

    #[test]
    fn unknown_background_warns_and_keeps_others() {
        let log = BufferedLog::new();
        let tags = resolve(
            Some(&effects(Some("sparkles"), Some("rainbow"), Some("typewriter"))),
            &log,
        );
        assert_eq!(tags.as_slice(), ["name-rainbow", "description-typewrite"]);

        let warnings = log.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("background"), "{}", warnings[0]);
        assert!(warnings[0].contains("sparkles"), "{}", warnings[0]);
    }

    #[test]
    fn body_classes_ignore_duplicates() {
        let mut classes = BodyClasses::new();
        assert!(classes.insert("nd-center"));
        assert!(classes.insert("music-include"));
        assert!(!classes.insert("nd-center"));
        assert_eq!(classes.as_slice().len(), 2);
        assert_eq!(classes.to_attribute(), "nd-center music-include");
    }

    #[test]
    fn body_classes_extend_preserves_order() {
        let mut classes = BodyClasses::new();
        classes.insert("b");
        classes.extend(["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(classes.as_slice(), ["b", "a", "c"]);
    }
}
