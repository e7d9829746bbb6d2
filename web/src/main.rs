use dioxus::prelude::*;

mod services;
mod views;

use types::tile::Destination;
use views::{Dashboard, Login, Section};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login?:error")]
    Login { error: Option<String> },
    #[layout(AuthenticatedLayout)]
        #[route("/")]
        Dashboard {},
        #[route("/:destination")]
        Section { destination: Destination },
}

impl From<Destination> for Route {
    fn from(destination: Destination) -> Self {
        Route::Section { destination }
    }
}

fn main() {
    #[cfg(feature = "server")]
    {
        server::init_tracing();
        dioxus::serve(|| async move {
            let routes = server::init().await?;

            Ok(dioxus::server::router(App).merge(routes))
        });
    }

    #[cfg(all(feature = "web", not(feature = "server")))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Dashgate" }
        document::Link { rel: "icon", href: asset!("/assets/favicon.svg") }
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }

        Router::<Route> {}
    }
}

/// The signed-in user, re-fetchable so sign-out can drop back to the login
/// page.
#[derive(Clone, Copy)]
pub struct SessionState(Resource<ServerFnResult<Option<types::CurrentUser>>>);

impl SessionState {
    pub fn refresh(&mut self) {
        self.0.restart();
    }
}

pub fn use_session() -> SessionState {
    use_context::<SessionState>()
}

#[component]
fn AuthenticatedLayout() -> Element {
    let user = use_server_future(api::get_current_user)?;
    use_context_provider(|| SessionState(user));

    match &*user.read() {
        Some(Ok(Some(person))) => {
            let initial = person.initial();

            rsx! {
                div { class: "app-layout",
                    aside { class: "sidebar",
                        div { class: "sidebar-header",
                            Link { to: Route::Dashboard {}, class: "sidebar-logo", "Dashgate" }
                        }
                        div { class: "sidebar-footer",
                            div { class: "sidebar-user",
                                div { class: "sidebar-avatar", "{initial}" }
                                div { class: "sidebar-user-info",
                                    div { class: "sidebar-user-name", "{person.display_name}" }
                                    div { class: "sidebar-user-role", "{person.username}" }
                                }
                            }
                        }
                    }
                    main { class: "main-content",
                        Outlet::<Route> {}
                    }
                }
            }
        }
        Some(Ok(None)) => {
            navigator().push(Route::Login { error: None });
            rsx! {
                div { class: "loading", "Redirecting to login..." }
            }
        }
        Some(Err(e)) => {
            tracing::error!(error = %e, "failed to load current user");
            navigator().push(Route::Login {
                error: Some(e.to_string()),
            });
            rsx! {
                div { class: "loading", "Redirecting to login..." }
            }
        }
        None => {
            rsx! {
                div { class: "loading", "Loading..." }
            }
        }
    }
}
