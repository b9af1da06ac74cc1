//! Middleware for Web API.

pub mod client_ip;
pub mod cors;
pub mod security;

pub use client_ip::{client_ip, ClientIp};
pub use cors::create_cors_layer;
pub use security::security_headers;
