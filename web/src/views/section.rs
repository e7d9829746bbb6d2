use crate::Route;
use dioxus::prelude::*;
use types::tile::Destination;
use ui::TileIcon;

/// Landing page for a tile's destination. The section itself is served by
/// its own module; this only anchors the route inside the app shell.
#[component]
pub fn Section(destination: Destination) -> Element {
    let tile = destination.tile();
    let accent = tile.accent.class();

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    div { class: "tile-icon {accent}",
                        TileIcon { icon: tile.icon }
                    }
                    h1 { class: "page-title", "{tile.title}" }
                    p { class: "page-subtitle", "{tile.subtitle}" }
                }
            }
            div { class: "card",
                div { class: "card-body",
                    p { class: "text-muted", "This section is provided by its own module." }
                    Link { to: Route::Dashboard {}, class: "btn btn-secondary", "Back to dashboard" }
                }
            }
        }
    }
}
