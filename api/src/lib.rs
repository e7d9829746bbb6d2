use dioxus::prelude::*;
use types::{CurrentUser, DeviceType, ErrorKind, Module};

#[post("/api/current-user")]
pub async fn get_current_user() -> ServerFnResult<Option<CurrentUser>> {
    match server::current_user().await {
        Ok(user) => Ok(Some(user)),
        Err(e) if e.kind() == ErrorKind::Unauthenticated => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[post("/api/capabilities/admin")]
pub async fn is_admin() -> ServerFnResult<bool> {
    Ok(server::is_admin().await?)
}

#[post("/api/capabilities/module")]
pub async fn has_module_access(module: Module) -> ServerFnResult<bool> {
    Ok(server::has_module_access(module).await?)
}

#[post("/api/sign-out")]
pub async fn sign_out() -> ServerFnResult<()> {
    Ok(server::sign_out().await?)
}

#[post("/api/device-types")]
pub async fn list_device_types() -> ServerFnResult<Vec<DeviceType>> {
    Ok(server::list_device_types().await?)
}
