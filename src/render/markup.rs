//! HTML fragments substituted into the page template.
//!
//! All user-supplied text goes through [`maud`], so names, descriptions,
//! and URLs are escaped.
use maud::{Markup, html};

use crate::config::Link;
use crate::resources::public_path;

/// Layout that renders the name block without a column wrapper.
pub const CENTER_LAYOUT: &str = "center";

/// Path of the secondary page embedded by the map widget.
pub const MAP_PAGE: &str = "./map.html";

/// One anchor per link, joined by newlines, in input order.
#[must_use]
pub fn links<'a>(links: impl IntoIterator<Item = Link<'a>>) -> String {
    links
        .into_iter()
        .map(|link| link_anchor(link).into_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn link_anchor(link: Link<'_>) -> Markup {
    html! {
        a class="social" href=(link.url) target="_blank" rel="noopener noreferrer" style={ "color: " (link.color) } {
            i class=(link.icon) {}
        }
    }
}

/// Avatar image referencing a file in the resources directory.
#[must_use]
pub fn avatar(filename: &str) -> Markup {
    html! {
        img class="avatar" src=(public_path(filename)) alt="avatar";
    }
}

/// Name heading and description paragraph.
///
/// The `center` layout emits the pair flat; any other layout wraps it in a
/// column container.
#[must_use]
pub fn name_block(name: &str, description: &str, layout: &str) -> Markup {
    let pair = html! {
        h1 class="name" { (name) }
        p class="description" { (description) }
    };
    if layout == CENTER_LAYOUT {
        pair
    } else {
        html! {
            div class="flex flex-col" { (pair) }
        }
    }
}

/// Information block: optional avatar followed by the name block.
#[must_use]
pub fn information(avatar_file: Option<&str>, name: &str, description: &str, layout: &str) -> String {
    html! {
        @if let Some(file) = avatar_file {
            (avatar(file))
        }
        (name_block(name, description, layout))
    }
    .into_string()
}

/// Placeholder the client script fills with live Discord presence.
#[must_use]
pub fn discord_widget(discord_id: &str) -> Markup {
    html! {
        div class="widget" id="discord-status" data-discord-id=(discord_id) {}
    }
}

/// Map widget embedding the secondary page.
#[must_use]
pub fn map_widget() -> Markup {
    html! {
        div class="widget" id="map" {
            iframe src=(MAP_PAGE) title="map" loading="lazy" {}
        }
    }
}
