//! TripFlow terminal chat client
//!
//! The session state machine and relay client live in the library so the
//! end-to-end tests can drive them against an in-process relay; the
//! binary adds the REPL on top.

pub mod relay;
pub mod session;

pub use relay::{ChatError, RelayClient};
pub use session::{APOLOGY, ChatSession, GREETING};
