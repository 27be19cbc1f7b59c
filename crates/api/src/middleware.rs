use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use stockroom_auth::{JwtValidator, require_active};

use crate::app::errors;
use crate::context::CurrentUser;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Authentication gate for every protected route.
///
/// Verifies the access token, rejects inactive accounts, and stashes the
/// caller in request extensions for handlers and role checks.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token(req.headers()).ok_or_else(|| {
        errors::json_error(
            StatusCode::UNAUTHORIZED,
            "No se proporcionó access token",
        )
    })?;

    let claims = state
        .jwt
        .validate(token)
        .map_err(|e| errors::json_error(StatusCode::UNAUTHORIZED, e.to_string()))?;

    require_active(claims.activo).map_err(errors::domain_error_to_response)?;

    req.extensions_mut()
        .insert(CurrentUser::new(claims.sub, claims.tipo_usuario));

    Ok(next.run(req).await)
}

/// `accessToken` cookie first, then `Authorization: Bearer` (original order).
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(cookie) = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
    {
        for pair in cookie.split(';') {
            if let Some(value) = pair.trim().strip_prefix("accessToken=")
                && !value.is_empty()
            {
                return Some(value);
            }
        }
    }

    let header = headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use axum::http::header::{AUTHORIZATION, COOKIE};

    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, v.parse().unwrap());
        }
        map
    }

    #[test]
    fn bearer_header_is_accepted() {
        let h = headers(&[(AUTHORIZATION.as_str(), "Bearer abc.def.ghi")]);
        assert_eq!(extract_token(&h), Some("abc.def.ghi"));
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let h = headers(&[
            (COOKIE.as_str(), "theme=dark; accessToken=tok123"),
            (AUTHORIZATION.as_str(), "Bearer other"),
        ]);
        assert_eq!(extract_token(&h), Some("tok123"));
    }

    #[test]
    fn missing_or_empty_credentials_yield_none() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
        let h = headers(&[(AUTHORIZATION.as_str(), "Bearer ")]);
        assert_eq!(extract_token(&h), None);
        let h = headers(&[(AUTHORIZATION.as_str(), "Basic abc")]);
        assert_eq!(extract_token(&h), None);
    }
}
