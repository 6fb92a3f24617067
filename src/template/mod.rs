//! Placeholder substitution over the four template documents.
pub mod substitute;
pub mod tokens;

pub use substitute::{Substitution, substitute, substitute_tracked};
pub use tokens::{ReplaceMode, Token, TokenMap};

use crate::config::Configuration;
use crate::error::AssembleError;
use crate::render::DerivedPresentation;
use crate::resources::public_path;

/// A text document at the template root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    /// The profile page.
    Page,
    /// The page embedded by the map widget.
    SecondaryPage,
    /// Stylesheet source, compiled after substitution.
    Stylesheet,
    /// Client script source, bundled after substitution.
    Script,
}

impl Document {
    /// Every template document.
    pub const ALL: [Self; 4] = [
        Self::Page,
        Self::SecondaryPage,
        Self::Stylesheet,
        Self::Script,
    ];

    /// File name relative to the template root.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Page => "index.html",
            Self::SecondaryPage => "map.html",
            Self::Stylesheet => "style.css",
            Self::Script => "script.js",
        }
    }
}

/// Text of all template documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDocuments {
    /// `index.html`
    pub page: String,
    /// `map.html`
    pub secondary_page: String,
    /// `style.css`
    pub stylesheet: String,
    /// `script.js`
    pub script: String,
}

impl TemplateDocuments {
    /// Text of `document`.
    #[must_use]
    pub fn get(&self, document: Document) -> &str {
        match document {
            Document::Page => &self.page,
            Document::SecondaryPage => &self.secondary_page,
            Document::Stylesheet => &self.stylesheet,
            Document::Script => &self.script,
        }
    }

    fn get_mut(&mut self, document: Document) -> &mut String {
        match document {
            Document::Page => &mut self.page,
            Document::SecondaryPage => &mut self.secondary_page,
            Document::Stylesheet => &mut self.stylesheet,
            Document::Script => &mut self.script,
        }
    }

    /// Replace the text of `document`.
    pub fn set(&mut self, document: Document, text: String) {
        *self.get_mut(document) = text;
    }

    /// Substitute `tokens` into every document.
    #[must_use]
    pub fn substituted(&self, tokens: &TokenMap) -> SubstitutedDocuments {
        let mut out = SubstitutedDocuments::default();
        for document in Document::ALL {
            let result = substitute_tracked(self.get(document), tokens);
            out.documents.set(document, result.text);
            for token in result.replaced {
                if !out.replaced.contains(&token) {
                    out.replaced.push(token);
                }
            }
            out.leftovers
                .extend(result.leftover.into_iter().map(|token| (document, token)));
        }
        out
    }
}

/// Template documents after substitution, with what the pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutedDocuments {
    /// Substituted text of every document.
    pub documents: TemplateDocuments,
    /// Tokens replaced in at least one document.
    pub replaced: Vec<Token>,
    /// Template placeholders left after their single replacement.
    pub leftovers: Vec<(Document, Token)>,
}

impl SubstitutedDocuments {
    /// Text of `document`.
    #[must_use]
    pub fn get(&self, document: Document) -> &str {
        self.documents.get(document)
    }
}

/// Map every applicable token to its value.
///
/// `{LAT}` and `{LNG}` are mapped only when a geolocation is configured,
/// so a template without a map keeps no dangling coordinates.
#[must_use]
pub fn build_token_map(config: &Configuration, derived: &DerivedPresentation) -> TokenMap {
    let mut map = TokenMap::new();
    map.insert(Token::Widgets, derived.widgets_markup.as_str());
    map.insert(Token::BodyClass, derived.body_classes.to_attribute());
    map.insert(Token::Socials, derived.links_markup.as_str());
    map.insert(Token::Information, derived.information_markup.as_str());
    map.insert(Token::Background, public_path(&config.background));
    map.insert(Token::BackgroundBlur, config.background_blur.as_str());
    map.insert(Token::Blur, config.profile.blur.as_str());
    map.insert(Token::Music, derived.music_path.clone().unwrap_or_default());
    map.insert(Token::TextLayout, derived.layout.as_str());
    map.insert(Token::Opacity, derived.opacity.to_string());
    map.insert(Token::Api, config.backend_url());
    map.insert(Token::DiscordId, derived.discord_id.clone().unwrap_or_default());
    if let Some(geo) = &derived.geolocation {
        map.insert(Token::Lat, geo.latitude.as_str());
        map.insert(Token::Lng, geo.longitude.as_str());
    }
    map
}

/// Describe every mapped token that was not consumed.
///
/// A token is reported when the template repeats a placeholder that is
/// replaced only once, or when no document contained it at all.
#[must_use]
pub fn token_problems(substituted: &SubstitutedDocuments, tokens: &TokenMap) -> Vec<String> {
    let mut problems: Vec<String> = substituted
        .leftovers
        .iter()
        .map(|(document, token)| format!("{token} left in {}", document.file_name()))
        .collect();
    for token in tokens.tokens() {
        if !substituted.replaced.contains(&token) {
            problems.push(format!("{token} not found in any template document"));
        }
    }
    problems
}

/// Strict-mode gate over [`token_problems`].
///
/// # Errors
///
/// Returns [`AssembleError::UnresolvedTokens`] listing every problem.
pub fn check_strict(
    substituted: &SubstitutedDocuments,
    tokens: &TokenMap,
) -> Result<(), AssembleError> {
    let problems = token_problems(substituted, tokens);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AssembleError::UnresolvedTokens(problems))
    }
}
