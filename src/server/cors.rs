// CORS policy
//
// The frontend is deployed on an allow-listed origin plus Vercel preview
// URLs; local development runs on localhost. Everything else is denied.
// Preflights are answered by the layer itself with 200.

use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;

const MAX_AGE_SECS: u64 = 86_400;

pub fn cors_layer(config: &Config) -> CorsLayer {
    let allowed = config.allowed_origins.clone();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request_parts| {
                origin
                    .to_str()
                    .map(|o| origin_allowed(o, &allowed))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .max_age(Duration::from_secs(MAX_AGE_SECS))
}

/// Allow-listed origins, localhost on any port, and Vercel deployments.
fn origin_allowed(origin: &str, allowed: &[String]) -> bool {
    let origin = origin.trim_end_matches('/');
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(origin)) {
        return true;
    }
    is_localhost(origin) || is_vercel_deployment(origin)
}

fn is_localhost(origin: &str) -> bool {
    let Some(rest) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };
    let host = rest.split(':').next().unwrap_or("");
    host == "localhost" || host == "127.0.0.1"
}

fn is_vercel_deployment(origin: &str) -> bool {
    let Some(host) = origin.strip_prefix("https://") else {
        return false;
    };
    let host = host.split(':').next().unwrap_or("");
    host.contains(".vercel.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed_list() -> Vec<String> {
        vec!["https://tutor.example.com".to_string()]
    }

    #[test]
    fn test_allow_listed_origin() {
        assert!(origin_allowed("https://tutor.example.com", &allowed_list()));
        assert!(origin_allowed("https://TUTOR.example.com", &allowed_list()));
    }

    #[test]
    fn test_unknown_origin_denied() {
        assert!(!origin_allowed("https://evil.example.com", &allowed_list()));
        assert!(!origin_allowed("", &allowed_list()));
    }

    #[test]
    fn test_localhost_any_port_allowed() {
        assert!(origin_allowed("http://localhost:3000", &[]));
        assert!(origin_allowed("http://localhost:5173", &[]));
        assert!(origin_allowed("http://127.0.0.1:8080", &[]));
        assert!(origin_allowed("https://localhost", &[]));
    }

    #[test]
    fn test_localhost_lookalike_denied() {
        assert!(!origin_allowed("http://localhost.evil.com", &[]));
        assert!(!origin_allowed("http://127.0.0.1.evil.com", &[]));
    }

    #[test]
    fn test_vercel_previews_allowed() {
        assert!(origin_allowed("https://tutor-git-main.vercel.app", &[]));
        assert!(origin_allowed("https://tutor-abc123.vercel.app", &[]));
    }

    #[test]
    fn test_vercel_requires_https() {
        assert!(!origin_allowed("http://tutor.vercel.app", &[]));
    }

    #[test]
    fn test_trailing_slash_tolerated() {
        assert!(origin_allowed(
            "https://tutor.example.com/",
            &allowed_list()
        ));
    }
}
