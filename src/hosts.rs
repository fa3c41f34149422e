//! Host-header allowlist middleware.

use poem::http::StatusCode;
use poem::http::header::HOST;
use poem::{Endpoint, Middleware, Request, Result};

/// Rejects requests whose `Host` header is not in the configured allowlist.
/// An empty allowlist admits every host.
pub struct AllowedHosts {
    hosts: Vec<String>,
}

impl AllowedHosts {
    pub fn new(hosts: Vec<String>) -> Self {
        Self { hosts }
    }
}

impl<E: Endpoint> Middleware<E> for AllowedHosts {
    type Output = AllowedHostsEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        AllowedHostsEndpoint {
            ep,
            hosts: self.hosts.clone(),
        }
    }
}

pub struct AllowedHostsEndpoint<E> {
    ep: E,
    hosts: Vec<String>,
}

impl<E: Endpoint> Endpoint for AllowedHostsEndpoint<E> {
    type Output = E::Output;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        if !self.hosts.is_empty() {
            let host = req
                .headers()
                .get(HOST)
                .and_then(|v| v.to_str().ok())
                .map(strip_port)
                .unwrap_or_default();
            if !self.hosts.iter().any(|allowed| allowed == host) {
                return Err(poem::Error::from_string(
                    "disallowed host",
                    StatusCode::BAD_REQUEST,
                ));
            }
        }
        self.ep.call(req).await
    }
}

/// Drops the port from a Host header value. IPv6 literals keep their
/// brackets, so "[::1]:3000" matches an allowlisted "[::1]".
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        match host.find(']') {
            Some(i) => &host[..=i],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    }
}
