use dioxus::prelude::*;

#[component]
pub fn Login(error: Option<String>) -> Element {
    let error = error.map(|code| match code.as_str() {
        "sign-in-failed" => "Sign-in failed. Please try again.".to_string(),
        _ => code,
    });

    rsx! {
        div { class: "login-page",
            div { class: "login-card",
                div { class: "login-header",
                    h1 { class: "login-title", "Dashgate" }
                    p { class: "login-subtitle", "Trainings, appointments and administration" }
                }
                if let Some(error) = error {
                    div { class: "alert alert-error", "{error}" }
                }
                form {
                    action: "/auth/login",
                    method: "get",
                    button {
                        r#type: "submit",
                        class: "btn btn-primary login-btn",
                        "Sign in"
                    }
                }
            }
        }
    }
}
