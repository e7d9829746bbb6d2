//! The service traits backed by this app's server functions.

use dioxus::prelude::ServerFnError;
use types::{
    AuthorizationService, DeviceType, Error, Module, ReferenceDataService, Result, err,
};

fn server_error(e: ServerFnError) -> Error {
    err!("{e}")
}

#[derive(Clone, Copy)]
pub struct ApiAuthorization;

impl AuthorizationService for ApiAuthorization {
    async fn is_admin(&self) -> Result<bool> {
        api::is_admin().await.map_err(server_error)
    }

    async fn has_module_access(&self, module: Module) -> Result<bool> {
        api::has_module_access(module).await.map_err(server_error)
    }

    async fn sign_out(&self) -> Result<()> {
        api::sign_out().await.map_err(server_error)
    }
}

#[derive(Clone, Copy)]
pub struct ApiReferenceData;

impl ReferenceDataService for ApiReferenceData {
    async fn list_device_types(&self) -> Result<Vec<DeviceType>> {
        api::list_device_types().await.map_err(server_error)
    }
}
