use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::interface::{AccountRepository, IdentityResolver};
use super::model::{AdminStatus, Identity, Role};
use crate::error::{AppError, Result};
use crate::services::jwt::{extract_token, Claims, JwtService};
use crate::AppState;

// =============================================================================
// IDENTITY RESOLUTION
// =============================================================================

/// Re-reads the account behind a token on every request, so rejections and
/// deletions take effect before the token expires.
pub struct StoreIdentityResolver<'a> {
    accounts: &'a dyn AccountRepository,
}

impl<'a> StoreIdentityResolver<'a> {
    pub fn new(accounts: &'a dyn AccountRepository) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl IdentityResolver for StoreIdentityResolver<'_> {
    async fn resolve(&self, claims: &Claims) -> Result<Option<Identity>> {
        match claims.role {
            Role::SuperAdmin => Ok(self
                .accounts
                .find_super_admin_by_email(&claims.email)
                .await?
                .filter(|account| account.id == claims.sub)
                .map(|account| Identity {
                    id: account.id,
                    email: account.email,
                    name: account.name,
                    role: Role::SuperAdmin,
                })),
            Role::Admin => Ok(self
                .accounts
                .find_admin_by_email(&claims.email)
                .await?
                .filter(|admin| admin.id == claims.sub && admin.status == AdminStatus::Approved)
                .map(|admin| Identity {
                    id: admin.id,
                    email: admin.email,
                    name: admin.name,
                    role: Role::Admin,
                })),
            Role::Visitor => Ok(None),
        }
    }
}

// =============================================================================
// GATE
// =============================================================================

pub struct AuthorizationGate<'a> {
    jwt: &'a JwtService,
    resolver: &'a dyn IdentityResolver,
}

impl<'a> AuthorizationGate<'a> {
    pub fn new(jwt: &'a JwtService, resolver: &'a dyn IdentityResolver) -> Self {
        Self { jwt, resolver }
    }

    /// Token present, valid, and backed by an eligible account.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Identity> {
        let token = extract_token(headers)?;
        let claims = self.jwt.verify(&token)?;
        self.resolver
            .resolve(&claims)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Never fails: anything short of an eligible identity is a visitor.
    pub async fn resolve_role(&self, headers: &HeaderMap) -> Role {
        match self.authenticate(headers).await {
            Ok(identity) => identity.role,
            Err(AppError::Unauthorized) => Role::Visitor,
            Err(err) => {
                warn!(error = %err, "role resolution failed, treating caller as visitor");
                Role::Visitor
            }
        }
    }

    pub async fn require_role(&self, headers: &HeaderMap, allowed: &[Role]) -> Result<Identity> {
        let identity = self.authenticate(headers).await?;
        if !allowed.contains(&identity.role) {
            debug!(role = identity.role.as_str(), "role not permitted for route");
            return Err(AppError::forbidden("Insufficient permissions"));
        }
        Ok(identity)
    }
}

async fn require(state: &AppState, headers: &HeaderMap, allowed: &[Role]) -> Result<Identity> {
    let resolver = StoreIdentityResolver::new(state.repos.accounts.as_ref());
    AuthorizationGate::new(&state.jwt_service, &resolver)
        .require_role(headers, allowed)
        .await
}

// =============================================================================
// EXTRACTORS
// =============================================================================

/// The caller's effective role; visitors included.
#[derive(Debug, Clone, Copy)]
pub struct Viewer(pub Role);

impl Viewer {
    pub fn is_staff(&self) -> bool {
        matches!(self.0, Role::Admin | Role::SuperAdmin)
    }
}

impl FromRequestParts<Arc<AppState>> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        let resolver = StoreIdentityResolver::new(state.repos.accounts.as_ref());
        let role = AuthorizationGate::new(&state.jwt_service, &resolver)
            .resolve_role(&parts.headers)
            .await;
        Ok(Self(role))
    }
}

/// An approved admin or a super-admin.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Identity);

impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        require(state, &parts.headers, &[Role::Admin, Role::SuperAdmin])
            .await
            .map(Self)
    }
}

#[derive(Debug, Clone)]
pub struct SuperAdminSession(pub Identity);

impl FromRequestParts<Arc<AppState>> for SuperAdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        require(state, &parts.headers, &[Role::SuperAdmin])
            .await
            .map(Self)
    }
}
