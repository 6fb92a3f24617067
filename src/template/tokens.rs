//! The fixed placeholder vocabulary of the site template.

/// How many occurrences of a placeholder are replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceMode {
    /// Only the first occurrence in a document.
    First,
    /// Every occurrence in a document.
    All,
}

/// A placeholder token known to the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// `{WIDGETS}`
    Widgets,
    /// `{BODYCLASS}`
    BodyClass,
    /// `{SOCIALS}`
    Socials,
    /// `{INFORMATION}`
    Information,
    /// `{BACKGROUND}`
    Background,
    /// `{BACKGROUNDBLUR}`
    BackgroundBlur,
    /// `{BLUR}`
    Blur,
    /// `{MUSIC}`
    Music,
    /// `{TEXTLAYOUT}`
    TextLayout,
    /// `{OPACITY}`
    Opacity,
    /// `{API}`
    Api,
    /// `{DISCORDID}`
    DiscordId,
    /// `{LAT}`
    Lat,
    /// `{LNG}`
    Lng,
}

impl Token {
    /// Every known token.
    pub const ALL: [Self; 14] = [
        Self::Widgets,
        Self::BodyClass,
        Self::Socials,
        Self::Information,
        Self::Background,
        Self::BackgroundBlur,
        Self::Blur,
        Self::Music,
        Self::TextLayout,
        Self::Opacity,
        Self::Api,
        Self::DiscordId,
        Self::Lat,
        Self::Lng,
    ];

    /// Literal text of the placeholder, braces included.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Widgets => "{WIDGETS}",
            Self::BodyClass => "{BODYCLASS}",
            Self::Socials => "{SOCIALS}",
            Self::Information => "{INFORMATION}",
            Self::Background => "{BACKGROUND}",
            Self::BackgroundBlur => "{BACKGROUNDBLUR}",
            Self::Blur => "{BLUR}",
            Self::Music => "{MUSIC}",
            Self::TextLayout => "{TEXTLAYOUT}",
            Self::Opacity => "{OPACITY}",
            Self::Api => "{API}",
            Self::DiscordId => "{DISCORDID}",
            Self::Lat => "{LAT}",
            Self::Lng => "{LNG}",
        }
    }

    /// Coordinates may repeat in the secondary page; everything else
    /// appears once.
    #[must_use]
    pub const fn mode(self) -> ReplaceMode {
        match self {
            Self::Lat | Self::Lng => ReplaceMode::All,
            _ => ReplaceMode::First,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.placeholder())
    }
}

/// Ordered token → value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap(Vec<(Token, String)>);

impl TokenMap {
    /// An empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Set the value for `token`, replacing any previous value in place.
    pub fn insert(&mut self, token: Token, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(t, _)| *t == token) {
            slot.1 = value;
        } else {
            self.0.push((token, value));
        }
    }

    /// Value mapped to `token`.
    #[must_use]
    pub fn get(&self, token: Token) -> Option<&str> {
        self.0
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `token` has a value.
    #[must_use]
    pub fn contains(&self, token: Token) -> bool {
        self.get(token).is_some()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, &str)> {
        self.0.iter().map(|(t, v)| (*t, v.as_str()))
    }

    /// Mapped tokens in insertion order.
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.0.iter().map(|(t, _)| *t)
    }
}
