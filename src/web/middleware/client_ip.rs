//! Client address resolution.
//!
//! The client address is the socket peer. Forwarding headers are honored only
//! when the peer is a configured trusted proxy.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tracing::Instrument;

/// Resolved client address, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

/// Extract the client IP from a request.
fn resolve_client_ip(req: &Request<Body>, trusted: &[IpAddr]) -> String {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let Some(peer) = peer else {
        return "unknown".to_string();
    };

    if trusted.contains(&peer) {
        // Take the first IP in the chain
        if let Some(ip) = req
            .headers()
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return ip.to_string();
        }

        if let Some(real_ip) = req
            .headers()
            .get("X-Real-IP")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return real_ip.to_string();
        }
    }

    peer.to_string()
}

/// Resolve the client IP, store it as [`ClientIp`] and run the rest of the
/// stack inside a span carrying it.
pub async fn client_ip(trusted: Arc<Vec<IpAddr>>, mut req: Request<Body>, next: Next) -> Response {
    let ip = resolve_client_ip(&req, &trusted);
    let span = tracing::info_span!("client", ip = %ip);
    req.extensions_mut().insert(ClientIp(ip));
    next.run(req).instrument(span).await
}
