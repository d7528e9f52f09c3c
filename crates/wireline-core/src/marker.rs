//! Marker substrings used to classify server handshake text.
//!
//! The server speaks free text; the client recognizes intent by fixed,
//! case-sensitive substrings matched at any position. A message carrying
//! several markers resolves by first-match priority: success, then error,
//! then username prompt. No anchoring or escaping is applied, so any text
//! containing a marker is treated as that marker.

/// Login accepted by the server.
pub const LOGIN_SUCCESS: &str = "Login successful";

/// Server rejected the previous reply and will re-prompt.
pub const LOGIN_ERROR: &str = "ERROR";

/// First known username prompt phrasing.
pub const PROMPT_HAVE_USERNAME: &str = "Do you already have a username?";

/// Second known username prompt phrasing.
pub const PROMPT_ENTER_USERNAME: &str = "Please enter your username:";

/// Chat phase has begun.
pub const CHAT_ACTIVE: &str = "Chat is now active";

/// Server is still waiting for a peer to join.
pub const CHAT_WAITING: &str = "Waiting";

/// Handshake intent of a single inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Contains the success marker.
    Success,
    /// Contains the error marker.
    Error,
    /// Contains one of the username prompt markers.
    UsernamePrompt,
    /// No recognized marker.
    Unrecognized,
}

/// Classify a handshake message by marker priority.
///
/// Exactly one kind is returned for any input.
pub fn classify(text: &str) -> MessageKind {
    if text.contains(LOGIN_SUCCESS) {
        MessageKind::Success
    } else if text.contains(LOGIN_ERROR) {
        MessageKind::Error
    } else if text.contains(PROMPT_HAVE_USERNAME) || text.contains(PROMPT_ENTER_USERNAME) {
        MessageKind::UsernamePrompt
    } else {
        MessageKind::Unrecognized
    }
}

/// True if the message releases the client into the chat phase.
///
/// An active chat and a still-waiting room are equally terminal for the
/// readiness wait; the client does not distinguish them.
pub fn is_chat_ready(text: &str) -> bool {
    text.contains(CHAT_ACTIVE) || text.contains(CHAT_WAITING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_success() {
        assert_eq!(classify("Login successful, welcome"), MessageKind::Success);
    }

    #[test]
    fn classify_error() {
        assert_eq!(classify("ERROR: name taken"), MessageKind::Error);
    }

    #[test]
    fn classify_prompts() {
        assert_eq!(classify("Do you already have a username? (y/n)"), MessageKind::UsernamePrompt);
        assert_eq!(classify("Please enter your username:"), MessageKind::UsernamePrompt);
    }

    #[test]
    fn classify_unrecognized() {
        assert_eq!(classify("Welcome to the server"), MessageKind::Unrecognized);
        assert_eq!(classify(""), MessageKind::Unrecognized);
    }

    #[test]
    fn success_outranks_error() {
        assert_eq!(classify("ERROR before, but Login successful"), MessageKind::Success);
    }

    #[test]
    fn error_outranks_prompt() {
        assert_eq!(classify("ERROR - Please enter your username:"), MessageKind::Error);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(classify("login successful"), MessageKind::Unrecognized);
        assert_eq!(classify("error"), MessageKind::Unrecognized);
    }

    #[test]
    fn readiness_markers() {
        assert!(is_chat_ready("Chat is now active"));
        assert!(is_chat_ready("Waiting for a peer..."));
        assert!(!is_chat_ready("almost there"));
    }
}
