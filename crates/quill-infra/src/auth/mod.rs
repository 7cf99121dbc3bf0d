//! Authentication implementations.

mod session;

pub use session::{JwtSessionGate, SessionConfig};
