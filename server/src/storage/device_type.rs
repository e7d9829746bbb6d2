use std::collections::HashMap;

use sqlx::SqlitePool;
use types::{DeviceModel, DeviceType, Result};

#[derive(sqlx::FromRow)]
struct DeviceTypeRow {
    id: String,
    name: String,
    description: String,
}

#[derive(sqlx::FromRow)]
struct DeviceModelRow {
    id: String,
    device_type_id: String,
    name: String,
}

/// All device types ordered by name, each carrying its models (also by name).
pub async fn list(pool: &SqlitePool) -> Result<Vec<DeviceType>> {
    let types: Vec<DeviceTypeRow> = sqlx::query_as(
        r#"
        SELECT id, name, description
        FROM device_types
        ORDER BY name ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let model_rows: Vec<DeviceModelRow> = sqlx::query_as(
        r#"
        SELECT id, device_type_id, name
        FROM device_models
        ORDER BY name ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut models: HashMap<String, Vec<DeviceModel>> = HashMap::new();
    for row in model_rows {
        models.entry(row.device_type_id).or_default().push(DeviceModel {
            id: row.id,
            name: row.name,
        });
    }

    Ok(types
        .into_iter()
        .map(|row| DeviceType {
            models: models.remove(&row.id).unwrap_or_default(),
            id: row.id,
            name: row.name,
            description: row.description,
        })
        .collect())
}
