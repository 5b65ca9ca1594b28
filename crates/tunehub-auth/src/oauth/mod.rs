//! Authorization-code handshake support.
//!
//! The handshake is stateless on the server side: the anti-forgery state
//! travels in a cookie on the client and comes back as a query parameter
//! on the provider redirect. This module generates the state value and
//! decides whether a returning callback is genuine.

pub mod handshake;
pub mod state;

pub use handshake::{GrantedLogin, HandshakeOutcome, complete_handshake};
pub use state::generate_state;
