//! Client address extractor
//!
//! Resolves the address used in the submission rate-limit key. The service
//! sits behind a proxy, so only the forwarding headers are consulted.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";
const UNKNOWN_CLIENT: &str = "unknown";

/// Best-effort client address; never rejects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddress(pub String);

impl ClientAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `x-forwarded-for` hop, then `x-real-ip`
    fn resolve(headers: &HeaderMap) -> Self {
        let forwarded = headers
            .get(FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let real_ip = || {
            headers
                .get(REAL_IP)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let addr = forwarded
            .or_else(real_ip)
            .unwrap_or(UNKNOWN_CLIENT)
            .to_string();

        Self(addr)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientAddress
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::resolve(&parts.headers))
    }
}
