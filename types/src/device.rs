use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceModel {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub models: Vec<DeviceModel>,
}

/// Read-only access to device reference data.
#[allow(async_fn_in_trait)]
pub trait ReferenceDataService {
    /// All device types ordered by name, each with its models.
    async fn list_device_types(&self) -> Result<Vec<DeviceType>>;
}
