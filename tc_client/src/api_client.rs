//! HTTP API client for the tournament backend.
//!
//! Every call goes through one request path that attaches the session's
//! bearer token, decodes JSON and turns error statuses into [`ApiError`].

use crate::logging::log_api_request;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::{Duration, Instant};
use tennis_club::{
    auth::{
        AuthError, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
        TokenVerification, UserSummary,
    },
    session::{SessionError, SessionManager, TokenStatus, TokenValidator},
    tournament::{
        DashboardStats, Match, NewMatch, NewRegistration, Registration, Tournament,
        TournamentDraft, TournamentId,
    },
};
use thiserror::Error;

/// Errors surfaced by backend calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response: connection refused, DNS failure, timeout
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// 401 or 403; a session token sent with the request has been dropped
    #[error("{message}")]
    Unauthorized { status: u16, message: String },

    /// Any other non-2xx status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// 2xx with a body that is not the expected JSON
    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// HTTP status, when the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. } | ApiError::Rejected { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Error body as sent by the backend
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Human-readable message for a failed response
///
/// Prefers the body's `message`, then its `error`, then a generic text with
/// the status code.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error, status {}", status.as_u16()))
}

/// API client for communicating with the tournament backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    session: SessionManager,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String, session: SessionManager) -> Self {
        Self::with_http_client(base_url, session, reqwest::Client::new())
    }

    /// Create a client whose requests give up after `timeout`
    ///
    /// # Errors
    ///
    /// * `ApiError::Transport` - the HTTP client could not be built
    pub fn with_timeout(
        base_url: String,
        session: SessionManager,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self::with_http_client(base_url, session, client))
    }

    pub fn with_http_client(
        base_url: String,
        session: SessionManager,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the reply
    ///
    /// With `authenticated` set, the current token is attached and a 401/403
    /// reply drops the session that token belongs to.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        authenticated: bool,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ApiResult<T> {
        let token = if authenticated { self.session.token() } else { None };
        let mut request = self.client.request(method.clone(), self.url(path));
        if let Some(token) = &token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        let request = build(request);

        let started = Instant::now();
        let result = request.send().await;
        let elapsed = started.elapsed().as_millis() as u64;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                log_api_request(method.as_str(), path, None, elapsed);
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        log_api_request(method.as_str(), path, Some(status.as_u16()), elapsed);
        let body = response.text().await.map_err(ApiError::Transport)?;

        if status.is_success() {
            let body = if body.trim().is_empty() { "null" } else { &body };
            return serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()));
        }

        let message = error_message(status, &body);
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            if let Some(token) = &token {
                self.session.reject_token(token);
            }
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
                message,
            });
        }

        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::GET, path, true, |r| r).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(method, path, true, |r| r.json(body)).await
    }

    /// Log in and start a session
    ///
    /// # Errors
    ///
    /// * `ApiError::Unauthorized` / `ApiError::Rejected` - the backend refused
    ///   the credentials; its message is carried through
    /// * `ApiError::Auth` - the reply lacked a token or a user
    /// * `ApiError::Session` - the session could not be persisted
    pub async fn login(&self, email: String, password: String) -> ApiResult<UserSummary> {
        let request = LoginRequest { email, password };
        let response: LoginResponse = self
            .execute(Method::POST, "/api/auth/login", false, |r| r.json(&request))
            .await?;

        let (token, user) = response.into_credentials()?;
        self.session.set_auth(token, user.clone())?;
        tracing::info!("Logged in as {} ({})", user.email, user.role);
        Ok(user)
    }

    /// Create an athlete account; does not log in
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterResponse> {
        self.execute(Method::POST, "/api/auth/register", false, |r| r.json(request))
            .await
    }

    /// Ask the backend whether the current session token is still valid
    pub async fn verify_session(&self) -> Option<TokenStatus> {
        let token = self.session.token()?;
        Some(self.verify_token(&token).await)
    }

    pub async fn list_tournaments(&self) -> ApiResult<Vec<Tournament>> {
        self.get("/api/torneos").await
    }

    pub async fn get_tournament(&self, id: TournamentId) -> ApiResult<Tournament> {
        self.get(&format!("/api/torneos/{}", id)).await
    }

    pub async fn create_tournament(&self, draft: &TournamentDraft) -> ApiResult<Tournament> {
        self.send_json(Method::POST, "/api/torneos", draft).await
    }

    pub async fn update_tournament(
        &self,
        id: TournamentId,
        draft: &TournamentDraft,
    ) -> ApiResult<Tournament> {
        self.send_json(Method::PUT, &format!("/api/torneos/{}", id), draft)
            .await
    }

    pub async fn delete_tournament(&self, id: TournamentId) -> ApiResult<()> {
        let _: serde_json::Value = self
            .execute(Method::DELETE, &format!("/api/torneos/{}", id), true, |r| r)
            .await?;
        Ok(())
    }

    pub async fn list_registrations(&self) -> ApiResult<Vec<Registration>> {
        self.get("/api/inscripciones").await
    }

    pub async fn tournament_registrations(
        &self,
        tournament_id: TournamentId,
    ) -> ApiResult<Vec<Registration>> {
        self.get(&format!("/api/inscripciones/torneo/{}", tournament_id))
            .await
    }

    /// Register an athlete for a tournament
    ///
    /// The backend identifies the caller through `X-User-ID` and
    /// `X-User-Perfil`; both come from the session's user.
    pub async fn create_registration(
        &self,
        registration: &NewRegistration,
    ) -> ApiResult<Registration> {
        let caller = self
            .session
            .user()
            .and_then(|u| u.id.map(|id| (id, u.role.wire_name())));
        self.execute(Method::POST, "/api/inscripciones", true, |mut r| {
            if let Some((id, role)) = caller {
                r = r.header("X-User-ID", id.to_string()).header("X-User-Perfil", role);
            }
            r.json(registration)
        })
        .await
    }

    pub async fn list_matches(&self) -> ApiResult<Vec<Match>> {
        self.get("/api/partidos").await
    }

    pub async fn create_match(&self, new_match: &NewMatch) -> ApiResult<Match> {
        self.send_json(Method::POST, "/api/partidos", new_match)
            .await
    }

    pub async fn list_users(&self) -> ApiResult<Vec<UserSummary>> {
        self.get("/api/usuarios").await
    }

    /// Create an account with any role (administrators only)
    pub async fn create_user(&self, request: &RegisterRequest) -> ApiResult<UserSummary> {
        self.send_json(Method::POST, "/api/usuarios", request).await
    }

    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.get("/api/dashboard/stats").await
    }
}

#[async_trait]
impl TokenValidator for ApiClient {
    /// Checks `token` itself rather than the session's current token, so the
    /// answer can be matched against the token that was asked about.
    async fn verify_token(&self, token: &str) -> TokenStatus {
        let path = "/api/auth/verify-token";
        let started = Instant::now();
        let result = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await;
        let elapsed = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                let status = response.status();
                log_api_request("GET", path, Some(status.as_u16()), elapsed);
                match status {
                    s if s.is_success() => {
                        let reply = response.json::<TokenVerification>().await.ok();
                        if reply.as_ref().is_some_and(TokenVerification::is_rejection) {
                            TokenStatus::Rejected
                        } else {
                            TokenStatus::Valid
                        }
                    }
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TokenStatus::Rejected,
                    _ => TokenStatus::Unavailable,
                }
            }
            Err(e) => {
                log_api_request("GET", path, None, elapsed);
                tracing::warn!("Token check failed, keeping session: {}", e);
                TokenStatus::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_message() {
        let body = r#"{"message": "Torneo no encontrado", "error": "not_found"}"#;
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, body),
            "Torneo no encontrado"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_error_field() {
        let body = r#"{"error": "Credenciales inválidas"}"#;
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, body),
            "Credenciales inválidas"
        );
    }

    #[test]
    fn test_error_message_generic_for_non_json() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>Bad gateway</html>"),
            "HTTP error, status 502"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "HTTP error, status 500"
        );
    }

    #[test]
    fn test_error_message_ignores_blank_fields() {
        let body = r#"{"message": "  "}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "HTTP error, status 400"
        );
    }

    #[test]
    fn test_api_error_status() {
        let err = ApiError::Unauthorized {
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert_eq!(err.status(), Some(403));
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Forbidden");

        let err = ApiError::Decode("eof".to_string());
        assert_eq!(err.status(), None);
    }
}
