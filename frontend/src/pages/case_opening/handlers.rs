use crate::base::get_auth_token;
use crate::config::get_api_base_url;
use gloo_net::http::Request;
use shared::shared_case::{CaseDetail, CaseOpenRequest, CaseOpenResponse};

pub async fn fetch_case_detail(case_id: i64) -> Result<CaseDetail, String> {
    match Request::get(&format!("{}/api/cases/{}", get_api_base_url(), case_id))
        .send()
        .await
    {
        Ok(response) if response.ok() => response
            .json::<CaseDetail>()
            .await
            .map_err(|e| format!("Error parsing case: {:?}", e)),
        Ok(response) if response.status() == 404 => Err("Case not found".to_string()),
        Ok(response) => Err(format!("Error status: {}", response.status())),
        Err(e) => Err(format!("Network error: {:?}", e)),
    }
}

pub async fn open_case(case_id: i64, count: u32) -> Result<CaseOpenResponse, String> {
    let token = match get_auth_token() {
        Some(token) => token,
        None => return Err("Please log in again".to_string()),
    };

    let request = Request::post(&format!("{}/api/cases/{}/open", get_api_base_url(), case_id))
        .header("Content-Type", "application/json")
        .header("Authorization", &format!("Bearer {}", token))
        .json(&CaseOpenRequest { count })
        .map_err(|e| format!("Failed to build request: {:?}", e))?;

    match request.send().await {
        Ok(response) if response.ok() => response
            .json::<CaseOpenResponse>()
            .await
            .map_err(|e| format!("Error parsing open response: {:?}", e)),
        Ok(response) if response.status() == 402 => {
            Err("Insufficient balance".to_string())
        }
        Ok(response) => Err(format!("Error status: {}", response.status())),
        Err(e) => Err(format!("Network error: {:?}", e)),
    }
}
