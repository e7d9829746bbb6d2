use dioxus::prelude::*;
use types::{
    Capabilities,
    tile::{Tile, visible_tiles},
};

use crate::icon::TileIcon;

/// One dashboard tile. `children` is the footer action, usually a link to
/// the tile's destination.
#[component]
pub fn TileCard(tile: &'static Tile, #[props(default)] index: usize, children: Element) -> Element {
    let accent = tile.accent.class();
    // Cards fade in one after another.
    let delay = format!("animation-delay: {}ms", index * 100);

    rsx! {
        div { class: "tile-card", style: "{delay}",
            div { class: "tile-card-body",
                div { class: "tile-icon {accent}",
                    TileIcon { icon: tile.icon }
                }
                div { class: "tile-text",
                    h2 { class: "tile-title", "{tile.title}" }
                    p { class: "tile-subtitle", "{tile.subtitle}" }
                }
            }
            div { class: "tile-card-footer", {children} }
        }
    }
}

/// The tiles `capabilities` unlocks, in catalogue order. `action` renders
/// each card's footer.
#[component]
pub fn TileGrid(capabilities: Capabilities, action: Callback<&'static Tile, Element>) -> Element {
    rsx! {
        div { class: "dashboard-grid",
            for (index, tile) in visible_tiles(&capabilities).enumerate() {
                TileCard { key: "{tile.title}", tile, index, {action.call(tile)} }
            }
        }
    }
}

#[component]
pub fn AdminBadge() -> Element {
    rsx! {
        span { class: "admin-badge", "Administrator" }
    }
}
