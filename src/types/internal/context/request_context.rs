use std::net::IpAddr;

use crate::providers::TokenProvider;
use crate::types::internal::auth::Principal;
use poem::Request;
use poem_openapi::auth::{Bearer, BearerAuthorization};

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Built once per request and passed by reference. There is no global
/// "current principal"; everything a coordinator knows about the caller
/// comes from here.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Caller identity if a valid bearer token was presented
    pub principal: Option<Principal>,

    /// Source of the request (API or CLI)
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Create an anonymous API context
    pub fn new() -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            principal: None,
            source: RequestSource::API,
            actor_id: "unknown".to_owned(),
        }
    }

    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            principal: None,
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Build the context for an incoming HTTP request
    ///
    /// An absent, malformed or expired bearer token leaves the context
    /// unauthenticated; guarded endpoints reject it later.
    pub fn from_request(req: &Request, token_provider: &TokenProvider) -> Self {
        let mut ctx = Self::new();
        ctx.ip_address = Self::extract_ip_address(req);

        if let Ok(bearer) = Bearer::from_request(req) {
            match token_provider.validate_token(&bearer.token) {
                Ok(principal) => {
                    ctx = ctx.with_principal(principal);
                }
                Err(e) => {
                    tracing::debug!(request_id = %ctx.request_id, "Bearer token rejected: {}", e);
                }
            }
        }

        tracing::trace!("Request context created: {:?}", ctx);
        ctx
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    pub fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Proxy / load balancer
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // nginx
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    /// Set the authenticated principal and use its user id as actor
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.actor_id = principal.user_id.to_string();
        self.principal = Some(principal);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_app_data;
    use std::collections::BTreeSet;

    fn member() -> Principal {
        Principal {
            user_id: 3,
            username: "asha".to_string(),
            roles: BTreeSet::from(["Member".to_string()]),
        }
    }

    #[tokio::test]
    async fn test_from_request_with_valid_bearer() {
        let app_data = setup_test_app_data().await;
        let token_provider = &app_data.providers.token_provider;
        let token = token_provider.issue_token(&member()).unwrap();

        let req = Request::builder()
            .header("Authorization", format!("Bearer {}", token))
            .finish();
        let ctx = RequestContext::from_request(&req, token_provider);

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.actor_id, "3");
        assert_eq!(ctx.principal, Some(member()));
    }

    #[tokio::test]
    async fn test_from_request_with_garbage_token_is_anonymous() {
        let app_data = setup_test_app_data().await;

        let req = Request::builder()
            .header("Authorization", "Bearer not-a-jwt")
            .finish();
        let ctx = RequestContext::from_request(&req, &app_data.providers.token_provider);

        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.actor_id, "unknown");
    }

    #[tokio::test]
    async fn test_from_request_records_client_address() {
        let app_data = setup_test_app_data().await;

        let req = Request::builder().header("X-Forwarded-For", "203.0.113.9").finish();
        let ctx = RequestContext::from_request(&req, &app_data.providers.token_provider);

        assert_eq!(ctx.ip_address, Some("203.0.113.9".parse().unwrap()));
        assert_eq!(ctx.source, RequestSource::API);
    }

    #[test]
    fn test_extract_ip_prefers_forwarded_for() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
            .header("X-Real-IP", "198.51.100.4")
            .finish();

        assert_eq!(
            RequestContext::extract_ip_address(&req),
            Some("203.0.113.9".parse().unwrap())
        );
    }

    #[test]
    fn test_extract_ip_falls_back_to_real_ip() {
        let req = Request::builder().header("X-Real-IP", "198.51.100.4").finish();

        assert_eq!(
            RequestContext::extract_ip_address(&req),
            Some("198.51.100.4".parse().unwrap())
        );
    }
}
