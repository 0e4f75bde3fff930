//! Shared HTTP plumbing for the expense and user endpoints
//!
//! `ApiClient` owns the blocking reqwest client, the base URL and the
//! session. Requests that need a credential fail locally when there is no
//! session or it has expired; non-2xx answers become
//! [`ExpenseError::Status`] carrying the server's message.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode, Url};
use tracing::debug;

use crate::config::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::session::Session;

/// Whether a request must carry the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Required,
    None,
}

/// Blocking HTTP client bound to one API base URL and (optionally) a session
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Option<Session>,
}

impl ApiClient {
    /// Build a client from settings
    pub fn new(settings: &Settings, session: Option<Session>) -> ExpenseResult<Self> {
        let raw = settings.api_base_url.trim();
        let base_url = Url::parse(raw)
            .map_err(|e| ExpenseError::Config(format!("Invalid API URL '{}': {}", raw, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ExpenseError::Config(format!("Invalid API URL '{}'", raw)));
        }

        let http = Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(concat!("expense-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExpenseError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// The session this client authenticates with
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The configured base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve path segments against the base URL, percent-encoding each one
    pub fn endpoint(&self, segments: &[&str]) -> ExpenseResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ExpenseError::Config(format!("Invalid API URL '{}'", self.base_url)))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Start a request, attaching the bearer token when required
    pub fn request(
        &self,
        method: Method,
        segments: &[&str],
        auth: Auth,
    ) -> ExpenseResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        let builder = self.http.request(method, url);

        match auth {
            Auth::None => Ok(builder),
            Auth::Required => {
                let session = self.session.as_ref().ok_or_else(|| {
                    ExpenseError::Session("Not logged in. Run 'expense login' first".into())
                })?;
                session.ensure_valid()?;
                Ok(builder.bearer_auth(session.token()))
            }
        }
    }

    /// Send a request and turn non-success statuses into errors
    pub fn send(&self, builder: RequestBuilder) -> ExpenseResult<Response> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        debug!(%method, %url, "sending request");
        let response = self.http.execute(request)?;
        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "received response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(ExpenseError::Status {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }
}

/// Pick the most useful message out of an error response body
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(serde_json::Value::String(text)) = map.get(key) {
                if !text.trim().is_empty() {
                    return text.trim().to_string();
                }
            }
        }
    }

    if !body.is_empty() && !body.starts_with('{') && !body.starts_with('<') {
        let mut text: String = body.chars().take(200).collect();
        if body.chars().count() > 200 {
            text.push_str("...");
        }
        return text;
    }

    status
        .canonical_reason()
        .unwrap_or("unexpected response")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let settings = Settings {
            api_base_url: base.into(),
            ..Settings::default()
        };
        ApiClient::new(&settings, None).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let c = client("http://localhost:8080");
        assert_eq!(
            c.endpoint(&["api", "expenses"]).unwrap().as_str(),
            "http://localhost:8080/api/expenses"
        );

        let c = client("https://example.com/tracker/");
        assert_eq!(
            c.endpoint(&["api", "expenses", "a b"]).unwrap().as_str(),
            "https://example.com/tracker/api/expenses/a%20b"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let settings = Settings {
            api_base_url: "not a url".into(),
            ..Settings::default()
        };
        let err = ApiClient::new(&settings, None).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }

    #[test]
    fn test_authenticated_request_needs_session() {
        let c = client("http://localhost:8080");
        let err = c
            .request(Method::GET, &["api", "expenses"], Auth::Required)
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Session);

        assert!(c.request(Method::POST, &["api", "user", "login"], Auth::None).is_ok());
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":"Title is required"}"#),
            "Title is required"
        );
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, r#"{"error":"Invalid token"}"#),
            "Invalid token"
        );
        assert_eq!(error_message(StatusCode::FORBIDDEN, "Access denied"), "Access denied");
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, "<html>nope</html>"),
            "Not Found"
        );
    }
}
