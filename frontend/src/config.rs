use web_sys::window;

pub fn get_api_base_url() -> String {
    // Relative URLs on the production domain, absolute ones everywhere else
    // so the dev build works when opened from another machine.
    if let Some(window) = window() {
        if let Ok(location) = window.location().host() {
            if location.contains("casevault.app") {
                return "".to_string();
            }

            let protocol = window
                .location()
                .protocol()
                .unwrap_or_else(|_| "http:".to_string());

            return format!("{}//{}", protocol, location);
        }
    }

    // Default to 127.0.0.1 for development
    "http://127.0.0.1:3000".to_string()
}

pub fn get_asset_url(path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{}{}", get_api_base_url(), path)
    }
}
