use crate::{
    Route,
    services::{ApiAuthorization, ApiReferenceData},
    use_session,
};
use dioxus::prelude::*;
use tokio_util::sync::CancellationToken;
use types::{
    Capabilities, DeviceType,
    dashboard::{self, DashboardUpdate},
    tile::Tile,
};
use ui::{DashboardHeader, TileGrid};

#[component]
pub fn Dashboard() -> Element {
    let mut capabilities = use_signal(|| None::<Capabilities>);
    // Loaded as reference data for the dashboard, not rendered here.
    let mut device_types = use_signal(Vec::<DeviceType>::new);
    let mut signing_out = use_signal(|| false);
    let mut session = use_session();

    let cancel = use_hook(CancellationToken::new);
    use_drop({
        let cancel = cancel.clone();
        move || cancel.cancel()
    });

    use_future(move || {
        let cancel = cancel.clone();
        async move {
            dashboard::initialize(&ApiAuthorization, &ApiReferenceData, &cancel, |update| {
                match update {
                    DashboardUpdate::Capabilities(caps) => capabilities.set(Some(caps)),
                    DashboardUpdate::DeviceTypes(list) => device_types.set(list),
                }
            })
            .await;
        }
    });

    let caps = capabilities().unwrap_or_default();

    rsx! {
        div {
            DashboardHeader {
                capabilities: caps,
                signing_out: signing_out(),
                on_sign_out: move |_| {
                    let nav = navigator();
                    spawn(async move {
                        signing_out.set(true);
                        dashboard::sign_out(&ApiAuthorization, || {
                            session.refresh();
                            nav.push(Route::Dashboard {});
                        })
                        .await;
                        // Still mounted when the backend kept the session.
                        signing_out.set(false);
                    });
                },
            }

            if capabilities.read().is_none() {
                div { class: "loading", "Loading..." }
            } else {
                TileGrid {
                    capabilities: caps,
                    action: move |tile: &'static Tile| rsx! {
                        Link {
                            to: Route::from(tile.destination),
                            class: "tile-link",
                            "{tile.action}"
                        }
                    },
                }
            }
        }
    }
}
