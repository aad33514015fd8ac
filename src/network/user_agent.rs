//! Request identification headers

/// User agent sent with every API call, with an optional operator suffix
pub fn user_agent(suffix: Option<&str>) -> String {
    match suffix.map(str::trim).filter(|s| !s.is_empty()) {
        Some(suffix) => format!("city-letter-finder/{} {}", crate::VERSION, suffix),
        None => format!("city-letter-finder/{}", crate::VERSION),
    }
}

/// Accept header for the JSON API
pub fn accept_json() -> &'static str {
    "application/json"
}
