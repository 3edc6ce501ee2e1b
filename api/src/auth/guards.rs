//! Access-control guards and the shared ownership predicate.
//!
//! Route groups are wrapped in `allow_authenticated`; handlers that act on an
//! owned resource call [`is_owner`] instead of re-deriving instructor checks
//! per endpoint. Admins bypass ownership everywhere.

use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use db::models::{assignment, course};

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Helper to extract and validate the user from the request, then insert the
/// claims back into the request extensions for downstream handlers.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}

/// A resource with a single owning instructor.
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for course::Model {
    fn owner_id(&self) -> i64 {
        self.instructor_id
    }
}

impl Owned for assignment::Model {
    fn owner_id(&self) -> i64 {
        self.instructor_id
    }
}

/// The single ownership predicate: true when the principal owns the resource
/// or is an admin.
pub fn is_owner(user: &AuthUser, resource: &impl Owned) -> bool {
    user.is_admin() || user.id() == resource.owner_id()
}
