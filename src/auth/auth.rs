use crate::{
    auth::jwt::{generate_access_token, verify_token},
    config::{Config, TokenMode},
    error::ApiError,
};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

/// Caller identified by the `Authorization: Bearer <token>` header.
pub struct AuthUser {
    pub username: String,
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing token".into()))?;

    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| ApiError::Internal("Config missing".into()))?;

    let username = resolve_token(config, token)?;

    Ok(AuthUser { username })
}

/// Token handed back by `/login` for an authenticated user.
pub fn issue_token(config: &Config, username: &str) -> Result<String, ApiError> {
    match config.token_mode {
        TokenMode::Username => Ok(username.to_string()),
        TokenMode::Jwt => {
            let secret = jwt_secret(config)?;
            generate_access_token(username, secret, config.access_token_ttl)
                .map_err(|e| ApiError::Internal(e.to_string()))
        }
    }
}

/// Maps a bearer token back to the username it stands for.
pub fn resolve_token(config: &Config, token: &str) -> Result<String, ApiError> {
    match config.token_mode {
        // demo mode: the token is the username, nothing to verify
        TokenMode::Username => Ok(token.to_string()),
        TokenMode::Jwt => {
            let secret = jwt_secret(config)?;
            verify_token(token, secret)
                .map(|claims| claims.sub)
                .map_err(|e| {
                    tracing::debug!(error = %e, "Rejected bearer token");
                    ApiError::Unauthorized("Invalid token".into())
                })
        }
    }
}

fn jwt_secret(config: &Config) -> Result<&str, ApiError> {
    config
        .jwt_secret
        .as_deref()
        .ok_or_else(|| ApiError::Internal("JWT_SECRET missing".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn config(mode: &str) -> Config {
        Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("mysql://hrms@localhost/hrms".into()),
            "AUTH_TOKEN_MODE" => Some(mode.into()),
            "JWT_SECRET" => Some("test-secret".into()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn username_mode_token_is_the_username() {
        let config = config("username");
        let token = issue_token(&config, "alice").unwrap();

        assert_eq!(token, "alice");
        assert_eq!(resolve_token(&config, &token).unwrap(), "alice");
    }

    #[test]
    fn jwt_mode_token_is_signed() {
        let config = config("jwt");
        let token = issue_token(&config, "alice").unwrap();

        assert_ne!(token, "alice");
        assert_eq!(resolve_token(&config, &token).unwrap(), "alice");
        assert!(matches!(
            resolve_token(&config, "alice"),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn header_must_be_bearer() {
        let req = TestRequest::default()
            .app_data(Data::new(config("username")))
            .insert_header(("Authorization", "Basic YWxpY2U6cHc="))
            .to_http_request();

        assert!(matches!(authenticate(&req), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn bearer_header_yields_user() {
        let req = TestRequest::default()
            .app_data(Data::new(config("username")))
            .insert_header(("Authorization", "Bearer alice"))
            .to_http_request();

        assert_eq!(authenticate(&req).unwrap().username, "alice");
    }
}
