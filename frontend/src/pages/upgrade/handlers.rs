use crate::base::get_auth_token;
use crate::config::get_api_base_url;
use crate::models::InventoryItem;
use gloo_net::http::Request;
use shared::shared_case::CatalogItem;
use shared::shared_upgrade::{UpgradeConfig, UpgradeSpinRequest, UpgradeSpinResponse};

async fn get_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, String> {
    let token = match get_auth_token() {
        Some(token) => token,
        None => return Err("Please log in again".to_string()),
    };

    match Request::get(&format!("{}{}", get_api_base_url(), path))
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
    {
        Ok(response) if response.ok() => response
            .json::<T>()
            .await
            .map_err(|e| format!("Error parsing response: {:?}", e)),
        Ok(response) => Err(format!("Error status: {}", response.status())),
        Err(e) => Err(format!("Network error: {:?}", e)),
    }
}

pub async fn fetch_inventory() -> Result<Vec<InventoryItem>, String> {
    get_json("/api/inventory").await
}

pub async fn fetch_upgrade_targets() -> Result<Vec<CatalogItem>, String> {
    get_json("/api/upgrade/targets").await
}

pub async fn fetch_upgrade_config() -> Result<UpgradeConfig, String> {
    get_json("/api/upgrade/config").await
}

pub async fn submit_upgrade_spin(
    item_ids: Vec<i64>,
    target_item_id: i64,
) -> Result<UpgradeSpinResponse, String> {
    let token = match get_auth_token() {
        Some(token) => token,
        None => return Err("Please log in again".to_string()),
    };

    let request = UpgradeSpinRequest {
        item_ids,
        target_item_id,
        timestamp: js_sys::Date::now() as u64,
    };

    let built = Request::post(&format!("{}/api/upgrade/spin", get_api_base_url()))
        .header("Content-Type", "application/json")
        .header("Authorization", &format!("Bearer {}", token))
        .json(&request)
        .map_err(|e| format!("Failed to build request: {:?}", e))?;

    match built.send().await {
        Ok(response) if response.ok() => response
            .json::<UpgradeSpinResponse>()
            .await
            .map_err(|e| format!("Error parsing spin response: {:?}", e)),
        Ok(response) => Err(format!("Error status: {}", response.status())),
        Err(e) => Err(format!("Network error: {:?}", e)),
    }
}
