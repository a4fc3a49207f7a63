//! Shared helpers for the stand-in PlantPredict service

#![allow(dead_code)]

use axum::http::HeaderMap;

/// Token presented in the `Authorization: Bearer` header, if any
pub fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// URL of a local port with nothing listening on it
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
