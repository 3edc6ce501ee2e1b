use db::models::user::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id of the authenticated principal.
    pub sub: i64,
    /// Global role (student, instructor, admin).
    pub role: Role,
    /// Expiry as a unix timestamp.
    pub exp: usize,
}

/// The authenticated principal, extracted from a Bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.sub
    }

    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin
    }
}
