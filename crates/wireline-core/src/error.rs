//! Error types for login negotiation.
//!
//! The negotiation machine is strict about input ordering: a server message
//! while a local reply is pending, or any handshake input after completion,
//! is a driver bug and is reported as such rather than silently absorbed.

use thiserror::Error;

use crate::login::LoginState;

/// Errors that can occur during login negotiation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// Input arrived in a state that cannot accept it
    #[error("invalid login transition: cannot {operation} in {state:?}")]
    InvalidState {
        /// State when the input arrived
        state: LoginState,
        /// Input that was attempted
        operation: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_names_the_operation() {
        let err = LoginError::InvalidState {
            state: LoginState::Ready,
            operation: "handle_message",
        };
        assert!(err.to_string().contains("handle_message"));
        assert!(err.to_string().contains("Ready"));
    }
}
