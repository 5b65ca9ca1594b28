//! # tunehub-auth
//!
//! Session token issuance and OAuth handshake validation for TuneHub.
//!
//! ## Modules
//!
//! - `jwt` — session token creation and validation
//! - `oauth` — authorization-code handshake state handling

pub mod jwt;
pub mod oauth;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use oauth::{GrantedLogin, HandshakeOutcome, complete_handshake, generate_state};
