use dioxus::prelude::*;
use types::Capabilities;

use crate::{icon::SignOutIcon, tile::AdminBadge};

/// Title bar of the dashboard with the sign-out button.
#[component]
pub fn DashboardHeader(
    capabilities: Capabilities,
    #[props(default)] signing_out: bool,
    on_sign_out: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "page-header",
            div { class: "page-header-content",
                h1 { class: "page-title",
                    "My Dashboard"
                    if capabilities.is_admin() {
                        AdminBadge {}
                    }
                }
            }
            div { class: "page-header-actions",
                button {
                    class: "btn btn-primary",
                    disabled: signing_out,
                    onclick: move |_| on_sign_out.call(()),
                    SignOutIcon {}
                    "Sign out"
                }
            }
        }
    }
}
