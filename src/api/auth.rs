//! User endpoints: login, registration and password recovery
//!
//! These flows share no state with the expense list. Login and register
//! return a [`Session`] for the caller to store.

use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};

use super::client::{ApiClient, Auth};
use crate::error::{ExpenseError, ExpenseResult};
use crate::session::Session;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    new_password: &'a str,
    token: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// User account endpoints
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    /// Create the API on top of a configured client
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a session
    pub fn login(&self, email: &str, password: &str) -> ExpenseResult<Session> {
        self.token_request("login", email, password)
    }

    /// Create an account and return its first session
    pub fn register(&self, email: &str, password: &str) -> ExpenseResult<Session> {
        self.token_request("register", email, password)
    }

    /// Ask the server to send a password-reset link
    pub fn forgot_password(&self, email: &str) -> ExpenseResult<()> {
        let email = require("email", email)?;
        let request = self
            .client
            .request(Method::POST, &["api", "user", "forgot-password"], Auth::None)?
            .json(&ForgotPasswordRequest { email });
        self.client.send(request)?;
        Ok(())
    }

    /// Set a new password using the token from a reset link
    pub fn reset_password(&self, token: &str, new_password: &str) -> ExpenseResult<()> {
        let token = require("reset token", token)?;
        if new_password.is_empty() {
            return Err(ExpenseError::Validation("New password is required".into()));
        }

        let request = self
            .client
            .request(Method::POST, &["api", "user", "reset-password"], Auth::None)?
            .json(&ResetPasswordRequest {
                new_password,
                token,
            });
        self.client.send(request)?;
        Ok(())
    }

    fn token_request(&self, action: &str, email: &str, password: &str) -> ExpenseResult<Session> {
        let email = require("email", email)?;
        if password.is_empty() {
            return Err(ExpenseError::Validation("Password is required".into()));
        }

        let request = self
            .client
            .request(Method::POST, &["api", "user", action], Auth::None)?
            .json(&Credentials { email, password });
        let response = self.client.send(request)?;
        let body = response.text()?;

        Session::new(extract_token(&body)?, Some(email.to_string()))
    }
}

/// Pull the token out of a login/register response
///
/// Accepts `{"token": "..."}`, a bare JSON string, or plain text.
fn extract_token(body: &str) -> ExpenseResult<String> {
    let body = body.trim();

    if let Ok(response) = serde_json::from_str::<TokenResponse>(body) {
        return Ok(response.token);
    }
    if let Ok(token) = serde_json::from_str::<String>(body) {
        return Ok(token);
    }
    if !body.is_empty() && !body.contains(char::is_whitespace) && !body.starts_with('{') {
        return Ok(body.to_string());
    }

    Err(ExpenseError::Request(
        "Server response did not contain a token".into(),
    ))
}

/// Get the reset token from either a raw token or a reset link
///
/// Links look like `http://host/api/user/reset-password/?token=abc`.
pub fn reset_token_from_input(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match Url::parse(input) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .filter(|token| !token.is_empty()),
        Err(_) => Some(input.to_string()),
    }
}

fn require<'a>(name: &str, value: &'a str) -> ExpenseResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ExpenseError::Validation(format!("{} is required", capitalize(name))));
    }
    Ok(value)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;
    use crate::config::settings::Settings;

    fn api(base_url: &str) -> AuthApi {
        let settings = Settings {
            api_base_url: base_url.to_string(),
            ..Settings::default()
        };
        AuthApi::new(ApiClient::new(&settings, None).unwrap())
    }

    #[test]
    fn test_register_returns_session() {
        let (base, server) = test_server::serve_once(200, r#"{"token":"abc.def"}"#);

        let session = api(&base).register("me@example.com", "hunter2").unwrap();
        let request = server.join().unwrap();

        assert_eq!(request.request_line, "POST /api/user/register HTTP/1.1");
        assert!(request.header("authorization").is_none());
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"email": "me@example.com", "password": "hunter2"})
        );
        assert_eq!(session.token(), "abc.def");
        assert_eq!(session.email.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn test_login_failure_surfaces_message() {
        let (base, server) = test_server::serve_once(401, r#"{"message":"Invalid credentials"}"#);

        let err = api(&base).login("me@example.com", "wrong").unwrap_err();
        server.join().unwrap();

        assert_eq!(err.to_string(), "Server returned 401: Invalid credentials");
    }

    #[test]
    fn test_reset_password_body() {
        let (base, server) = test_server::serve_once(200, "Password updated");

        api(&base).reset_password("tok123", "n3w-pass").unwrap();
        let request = server.join().unwrap();

        assert_eq!(request.request_line, "POST /api/user/reset-password HTTP/1.1");
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"newPassword": "n3w-pass", "token": "tok123"})
        );
    }

    #[test]
    fn test_forgot_password_validates_before_sending() {
        let err = api("http://127.0.0.1:9").forgot_password("  ").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: Email is required");
    }

    #[test]
    fn test_extract_token_variants() {
        assert_eq!(extract_token(r#"{"token":"a"}"#).unwrap(), "a");
        assert_eq!(extract_token(r#""b""#).unwrap(), "b");
        assert_eq!(extract_token("c.d.e").unwrap(), "c.d.e");
        assert!(extract_token(r#"{"ok":true}"#).is_err());
        assert!(extract_token("").is_err());
    }

    #[test]
    fn test_reset_token_from_input() {
        assert_eq!(
            reset_token_from_input("http://localhost:5173/api/user/reset-password/?token=xyz"),
            Some("xyz".to_string())
        );
        assert_eq!(reset_token_from_input("xyz"), Some("xyz".to_string()));
        assert_eq!(reset_token_from_input("http://localhost/reset"), None);
        assert_eq!(reset_token_from_input(""), None);
    }
}
