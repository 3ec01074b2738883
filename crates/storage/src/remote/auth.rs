use async_trait::async_trait;
use quiz_core::Clock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::error_message;
use crate::auth::{AuthGateway, AuthGatewayError, AuthSession};

/// GoTrue-style token endpoint client.
pub struct RemoteAuth {
    http: Client,
    auth_base: Url,
    anon_key: String,
    clock: Clock,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    #[serde(default)]
    user: Option<TokenUser>,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Clone, Copy)]
enum Grant {
    Password,
    Refresh,
}

impl RemoteAuth {
    pub(crate) fn new(http: Client, auth_base: Url, anon_key: String) -> Self {
        Self {
            http,
            auth_base,
            anon_key,
            clock: Clock::default(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthGatewayError> {
        self.auth_base
            .join(path)
            .map_err(|e| AuthGatewayError::Transport(e.to_string()))
    }

    async fn token(
        &self,
        grant: Grant,
        body: serde_json::Value,
        fallback_email: &str,
    ) -> Result<AuthSession, AuthGatewayError> {
        let grant_type = match grant {
            Grant::Password => "password",
            Grant::Refresh => "refresh_token",
        };
        let response = self
            .http
            .post(self.endpoint("token")?)
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthGatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthGatewayError::Transport(e.to_string()))?;
        session_from_response(status, &text, grant, fallback_email, self.clock)
    }
}

fn session_from_response(
    status: StatusCode,
    body: &str,
    grant: Grant,
    fallback_email: &str,
    clock: Clock,
) -> Result<AuthSession, AuthGatewayError> {
    if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
        return Err(match grant {
            Grant::Password => AuthGatewayError::InvalidCredentials,
            Grant::Refresh => AuthGatewayError::InvalidRefreshToken,
        });
    }
    if !status.is_success() {
        return Err(AuthGatewayError::Rejected {
            status: status.as_u16(),
            message: error_message(body),
        });
    }
    let token: TokenResponse =
        serde_json::from_str(body).map_err(|e| AuthGatewayError::Decode(e.to_string()))?;
    Ok(AuthSession {
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        expires_at: clock.after_secs(token.expires_in),
        email: token
            .user
            .and_then(|u| u.email)
            .unwrap_or_else(|| fallback_email.to_owned()),
    })
}

#[async_trait]
impl AuthGateway for RemoteAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthGatewayError> {
        let email = email.trim();
        let session = self
            .token(
                Grant::Password,
                json!({ "email": email, "password": password }),
                email,
            )
            .await?;
        log::info!("signed in as {}", session.email);
        Ok(session)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthGatewayError> {
        self.token(
            Grant::Refresh,
            json!({ "refresh_token": refresh_token }),
            "",
        )
        .await
    }

    async fn sign_out(&self, session: &AuthSession) -> Result<(), AuthGatewayError> {
        let response = self
            .http
            .post(self.endpoint("logout")?)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| AuthGatewayError::Transport(e.to_string()))?;
        let status = response.status();
        // An already-expired token still counts as signed out.
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(AuthGatewayError::Rejected {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::{fixed_clock, fixed_now};

    #[test]
    fn token_response_becomes_session() {
        let body = r#"{
            "access_token": "at",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "rt",
            "user": { "email": "owner@example.com" }
        }"#;
        let session =
            session_from_response(StatusCode::OK, body, Grant::Password, "x", fixed_clock())
                .unwrap();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.email, "owner@example.com");
        assert_eq!(session.expires_at, fixed_now() + chrono::Duration::seconds(3600));
    }

    #[test]
    fn bad_request_maps_to_grant_specific_error() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert!(matches!(
            session_from_response(StatusCode::BAD_REQUEST, body, Grant::Password, "", fixed_clock()),
            Err(AuthGatewayError::InvalidCredentials)
        ));
        assert!(matches!(
            session_from_response(StatusCode::BAD_REQUEST, body, Grant::Refresh, "", fixed_clock()),
            Err(AuthGatewayError::InvalidRefreshToken)
        ));
    }

    #[test]
    fn server_errors_keep_message() {
        let err = session_from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"msg":"database down"}"#,
            Grant::Password,
            "",
            fixed_clock(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AuthGatewayError::Rejected { status: 500, ref message } if message == "database down"
        ));
    }
}
