use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use contracts::system::auth::TokenClaims;

// Takes the headers rather than the whole request: a `&Request<Body>`
// parameter would be held across the `validate_token` await and `Body`
// is not `Sync`, which would make the middleware futures non-`Send`.
async fn claims_from_request(headers: &HeaderMap) -> Result<TokenClaims, StatusCode> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    super::jwt::validate_token(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

/// Middleware that requires a valid staff token, any role.
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = claims_from_request(req.headers()).await?;

    // Claims go into request extensions for the handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware for warehouse operations: receiving, inspection, refunds.
/// Admins pass too.
pub async fn require_warehouse(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = claims_from_request(req.headers()).await?;

    if !claims.role.can_operate_warehouse() {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware for administration surfaces, admin role only.
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = claims_from_request(req.headers()).await?;

    if !claims.is_admin() {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
