//! Session handling
//!
//! A [`Session`] is the bearer credential handed to the API client when it
//! is constructed; there is no ambient global token. The login and register
//! flows create one and the [`SessionStore`] keeps it between runs.
//!
//! Expiry contract: when the token is a JWT carrying an `exp` claim, the
//! session expires at that instant and is rejected locally before any
//! request is sent. The server offers no refresh endpoint, so an expired
//! session means logging in again.

mod store;
mod token;

pub use store::SessionStore;
pub use token::Session;
