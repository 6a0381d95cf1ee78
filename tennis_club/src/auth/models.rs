//! Authentication data models.
//!
//! Field names on the wire follow the backend's JSON (Spanish keys); the Rust
//! side uses English names through `serde` renames.

use super::errors::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User ID type
pub type UserId = i64;

/// Profile of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "administrador")]
    Administrator,
    #[serde(rename = "profesor")]
    Instructor,
    #[serde(rename = "deportista")]
    Athlete,
}

impl Role {
    /// Badge text shown next to the user's name
    pub fn label(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::Instructor => "Instructor",
            Role::Athlete => "Athlete",
        }
    }

    /// Profile name as the backend spells it, e.g. in the `X-User-Perfil` header
    pub fn wire_name(&self) -> &'static str {
        match self {
            Role::Administrator => "administrador",
            Role::Instructor => "profesor",
            Role::Athlete => "deportista",
        }
    }

    /// Whether this profile may create or edit tournaments
    pub fn can_manage_tournaments(&self) -> bool {
        matches!(self, Role::Administrator | Role::Instructor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Profile snippet of the authenticated user, returned at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido")]
    pub surname: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "perfil")]
    pub role: Role,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl UserSummary {
    /// "Name Surname"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Credentials posted to the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of a login response
///
/// Both `token` and `user` are optional on the wire; a response lacking
/// either one is not a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Split into token and user, or fail with `InvalidCredentials`
    pub fn into_credentials(self) -> AuthResult<(String, UserSummary)> {
        match (self.token, self.user) {
            (Some(token), Some(user)) if !token.is_empty() => Ok((token, user)),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

/// Self-registration request
///
/// Self-registration only ever creates athletes, so `role` is fixed by
/// [`RegisterRequest::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido")]
    pub surname: String,
    pub email: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub username: String,
    pub password: String,
    #[serde(rename = "perfil")]
    pub role: Role,
}

impl RegisterRequest {
    pub fn new(
        name: String,
        surname: String,
        email: String,
        username: String,
        password: String,
    ) -> Self {
        Self {
            name,
            surname,
            email,
            phone: None,
            username,
            password,
            role: Role::Athlete,
        }
    }

    pub fn with_phone(mut self, phone: String) -> Self {
        self.phone = Some(phone);
        self
    }

    /// Check required fields and the password confirmation
    ///
    /// # Errors
    ///
    /// * `AuthError::MissingField` - a required field is blank
    /// * `AuthError::PasswordMismatch` - `confirmation` differs from the password
    pub fn validate(&self, confirmation: &str) -> AuthResult<()> {
        let required = [
            ("name", &self.name),
            ("surname", &self.surname),
            ("email", &self.email),
            ("username", &self.username),
            ("password", &self.password),
        ];

        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(AuthError::MissingField(field));
        }

        if self.password != confirmation {
            return Err(AuthError::PasswordMismatch);
        }

        Ok(())
    }
}

/// Register endpoint reply
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Verify-token endpoint reply
///
/// A 2xx reply that explicitly says `"valid": false` is a rejection; a reply
/// without the field is judged by its status alone.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenVerification {
    #[serde(default)]
    pub valid: Option<bool>,
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TokenVerification {
    pub fn is_rejection(&self) -> bool {
        self.valid == Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> RegisterRequest {
        RegisterRequest::new(
            "Ana".to_string(),
            "Lopez".to_string(),
            "ana@example.com".to_string(),
            "ana".to_string(),
            "secret123".to_string(),
        )
    }

    #[test]
    fn test_user_summary_from_backend_json() {
        let json = r#"{
            "id": 7,
            "nombre": "Ana",
            "apellido": "Lopez",
            "email": "ana@example.com",
            "telefono": null,
            "perfil": "profesor",
            "activo": true,
            "fecha_registro": "2024-03-01T10:00:00"
        }"#;

        let user: UserSummary = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, Some(7));
        assert_eq!(user.role, Role::Instructor);
        assert_eq!(user.full_name(), "Ana Lopez");
        assert!(user.username.is_none());
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::Administrator.label(), "Administrator");
        assert_eq!(Role::Instructor.to_string(), "Instructor");
        assert_eq!(Role::Athlete.label(), "Athlete");
        assert!(!Role::Athlete.can_manage_tournaments());
        assert!(Role::Instructor.can_manage_tournaments());
    }

    #[test]
    fn test_role_wire_name_matches_serde() {
        for role in [Role::Administrator, Role::Instructor, Role::Athlete] {
            assert_eq!(serde_json::to_value(role).unwrap(), role.wire_name());
        }
    }

    #[test]
    fn test_token_verification_reply() {
        let reply: TokenVerification = serde_json::from_str(
            r#"{"valid": true, "user_id": "7", "claims": {}, "message": "Token válido"}"#,
        )
        .unwrap();
        assert!(!reply.is_rejection());
        assert_eq!(reply.user_id, Some(serde_json::json!("7")));

        let reply: TokenVerification = serde_json::from_str(r#"{"valid": false}"#).unwrap();
        assert!(reply.is_rejection());

        let reply: TokenVerification = serde_json::from_str("{}").unwrap();
        assert!(!reply.is_rejection());
    }

    #[test]
    fn test_register_request_forces_athlete() {
        let request = sample_request();
        assert_eq!(request.role, Role::Athlete);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["perfil"], "deportista");
        assert_eq!(value["nombre"], "Ana");
        assert!(value.get("telefono").is_none());
    }

    #[test]
    fn test_register_validate_missing_field() {
        let mut request = sample_request();
        request.email = "  ".to_string();
        assert!(matches!(
            request.validate("secret123"),
            Err(AuthError::MissingField("email"))
        ));
    }

    #[test]
    fn test_register_validate_password_mismatch() {
        let request = sample_request();
        assert!(matches!(
            request.validate("other"),
            Err(AuthError::PasswordMismatch)
        ));
        assert!(request.validate("secret123").is_ok());
    }

    #[test]
    fn test_login_response_requires_token_and_user() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"message": "Login exitoso"}"#).unwrap();
        assert!(matches!(
            response.into_credentials(),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
