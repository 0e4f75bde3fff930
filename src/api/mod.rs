//! Remote API access
//!
//! [`ExpenseApi`] is the seam between the expense list controller and the
//! server: [`HttpExpenseApi`] talks to the real endpoints, tests substitute
//! an in-memory implementation. [`AuthApi`] covers the user endpoints used
//! by the login, registration and password-recovery flows.
//!
//! | Operation | Method & Path |
//! |---|---|
//! | list | `GET /api/expenses` |
//! | create | `POST /api/expenses` |
//! | update | `PUT /api/expenses/{id}` |
//! | delete | `DELETE /api/expenses/{id}` |

mod auth;
mod client;
mod expenses;

pub use auth::{reset_token_from_input, AuthApi};
pub use client::{ApiClient, Auth};
pub use expenses::HttpExpenseApi;

use crate::error::ExpenseResult;
use crate::models::{Expense, ExpenseFields, ExpenseId};

/// Operations the expense API offers
///
/// Implementations perform exactly one request per call and never retry.
pub trait ExpenseApi {
    /// Fetch every expense of the authenticated user, in server order
    fn list(&self) -> ExpenseResult<Vec<Expense>>;

    /// Create an expense; returns the stored record with its new id
    fn create(&self, fields: &ExpenseFields) -> ExpenseResult<Expense>;

    /// Replace an expense; the server may or may not echo the record back
    fn update(&self, id: &ExpenseId, fields: &ExpenseFields) -> ExpenseResult<Option<Expense>>;

    /// Delete an expense
    fn delete(&self, id: &ExpenseId) -> ExpenseResult<()>;
}

impl<T: ExpenseApi + ?Sized> ExpenseApi for &T {
    fn list(&self) -> ExpenseResult<Vec<Expense>> {
        (**self).list()
    }

    fn create(&self, fields: &ExpenseFields) -> ExpenseResult<Expense> {
        (**self).create(fields)
    }

    fn update(&self, id: &ExpenseId, fields: &ExpenseFields) -> ExpenseResult<Option<Expense>> {
        (**self).update(id, fields)
    }

    fn delete(&self, id: &ExpenseId) -> ExpenseResult<()> {
        (**self).delete(id)
    }
}

/// One-shot HTTP server for exercising the reqwest client in tests
#[cfg(test)]
pub(crate) mod test_server {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// What the server saw
    pub struct RecordedRequest {
        pub request_line: String,
        pub headers: Vec<(String, String)>,
        pub body: String,
    }

    impl RecordedRequest {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        }
    }

    /// Accept a single connection, record the request and answer with `status` and `body`
    pub fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<RecordedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut headers = Vec::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((key, value)) = line.split_once(':') {
                    let key = key.trim().to_ascii_lowercase();
                    let value = value.trim().to_string();
                    if key == "content-length" {
                        content_length = value.parse().unwrap();
                    }
                    headers.push((key, value));
                }
            }

            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let reason = match status {
                200 => "OK",
                201 => "Created",
                204 => "No Content",
                400 => "Bad Request",
                401 => "Unauthorized",
                404 => "Not Found",
                _ => "Internal Server Error",
            };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            RecordedRequest {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: String::from_utf8(request_body).unwrap(),
            }
        });

        (base_url, handle)
    }
}
