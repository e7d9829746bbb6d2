mod auth_routes;
mod authz;
mod config;
mod signed_token;
pub mod storage;

use axum::Router;
use axum::http::{HeaderMap, header};
use dioxus::fullstack::FullstackContext;
use tracing_subscriber::EnvFilter;
use types::{CurrentUser, DeviceType, Error, Module, Result, SESSION_COOKIE_NAME};

use crate::auth_routes::{AuthState, auth_router};
pub use crate::config::{CONFIG, Config};
use crate::storage::{POOL, Session};

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Another subscriber may already be installed by the dioxus launcher.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Run migrations and build the routes served next to the Dioxus app.
pub async fn init() -> anyhow::Result<Router> {
    storage::migrate(&POOL).await.map_err(Error::into_inner)?;
    let auth_state = AuthState::new(&CONFIG).map_err(Error::into_inner)?;

    tracing::info!(url = %CONFIG.dashgate_url, "dashgate initialized");
    Ok(auth_router(auth_state))
}

fn session_token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    cookie_header
        .split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value)
}

/// The session of the user making the current server-function request.
async fn current_session() -> Result<Session> {
    let headers: HeaderMap = FullstackContext::extract().await?;

    let token = session_token_from_headers(&headers)
        .ok_or_else(|| Error::unauthenticated(anyhow::anyhow!("not signed in")))?;

    Session::find_token(token).await
}

pub async fn current_user() -> Result<CurrentUser> {
    Ok(current_session().await?.user_data().current_user())
}

pub async fn is_admin() -> Result<bool> {
    let session = current_session().await?;
    Ok(authz::is_admin(session.user_data(), &CONFIG))
}

pub async fn has_module_access(module: Module) -> Result<bool> {
    let session = current_session().await?;
    Ok(authz::has_module_access(session.user_data(), module, &CONFIG))
}

/// End the current session. The cookie stays in the browser but no longer
/// resolves to anything.
pub async fn sign_out() -> Result<()> {
    let session = current_session().await?;
    session.delete().await?;
    tracing::info!(username = %session.user_data().username, "signed out");
    Ok(())
}

pub async fn list_device_types() -> Result<Vec<DeviceType>> {
    current_session().await?;
    storage::device_type::list(&POOL).await
}
