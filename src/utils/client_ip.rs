//! Client identity extraction for quota accounting.

use axum::http::HeaderMap;
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Returns the identity a request's quota is tracked under.
///
/// Without a proxy this is the peer IP. When `behind_proxy` is set, the first
/// `X-Forwarded-For` entry wins, then `X-Real-IP`, then the peer IP.
///
/// # Examples
///
/// ```ignore
/// let peer: SocketAddr = "10.0.0.1:5000".parse().unwrap();
/// assert_eq!(client_identity(&HeaderMap::new(), peer, false), "10.0.0.1");
/// ```
pub fn client_identity(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        if let Some(ip) = header_str(headers, X_FORWARDED_FOR)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return ip.to_string();
        }

        if let Some(ip) = header_str(headers, X_REAL_IP)
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
