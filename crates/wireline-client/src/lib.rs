//! Wireline client runtime
//!
//! Async session layer for the Wireline chat client: the WebSocket
//! connection pump, the driver for login negotiation, and the full-duplex
//! chat relay. Protocol decisions live in the Sans-IO [`wireline_core`]
//! machines; this crate only executes the actions they return.
//!
//! # Components
//!
//! - [`transport`]: [`transport::ServerLink`] handle plus
//!   [`transport::connect`]
//! - [`Session`]: owns one link end-to-end, sequences negotiation then chat
//! - [`Console`]: output seam so tests capture what the user would see

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod console;
mod relay;
mod session;
pub mod transport;

pub use console::Console;
pub use session::{Session, SessionError};
