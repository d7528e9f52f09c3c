//! Property-based tests for the login negotiation machine.
//!
//! Tests verify classifier priority and negotiation invariants under
//! arbitrary server message sequences, covering paths a scripted handshake
//! would miss.

use proptest::prelude::*;
use wireline_core::{
    LoginAction, LoginState, Negotiation,
    marker::{self, MessageKind},
};

/// Filler text guaranteed to contain no marker (markers all carry
/// uppercase).
fn filler() -> impl Strategy<Value = String> {
    "[a-z ]{0,24}"
}

/// One scripted server message, weighted toward interesting handshake
/// traffic.
fn server_message() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => filler(),
        2 => Just(marker::PROMPT_ENTER_USERNAME.to_string()),
        1 => Just(marker::PROMPT_HAVE_USERNAME.to_string()),
        2 => Just(marker::LOGIN_SUCCESS.to_string()),
        1 => Just(format!("{}: bad name", marker::LOGIN_ERROR)),
        1 => Just(marker::CHAT_ACTIVE.to_string()),
        1 => Just("Waiting for a peer".to_string()),
        1 => Just(String::new()),
    ]
}

proptest! {
    #[test]
    fn classifier_priority_is_success_error_prompt(
        with_success in any::<bool>(),
        with_error in any::<bool>(),
        with_prompt in any::<bool>(),
        pre in filler(),
        post in filler(),
    ) {
        let mut text = pre;
        if with_prompt {
            text.push_str(marker::PROMPT_ENTER_USERNAME);
        }
        if with_error {
            text.push_str(marker::LOGIN_ERROR);
        }
        if with_success {
            text.push_str(marker::LOGIN_SUCCESS);
        }
        text.push_str(&post);

        let expected = if with_success {
            MessageKind::Success
        } else if with_error {
            MessageKind::Error
        } else if with_prompt {
            MessageKind::UsernamePrompt
        } else {
            MessageKind::Unrecognized
        };

        prop_assert_eq!(marker::classify(&text), expected);
    }

    #[test]
    fn sends_happen_only_for_prompted_replies(
        script in prop::collection::vec(server_message(), 0..30),
    ) {
        let mut negotiation = Negotiation::new();
        let mut prompts = 0usize;
        let mut sends = 0usize;
        let mut saw_ack_state = false;

        for msg in &script {
            if negotiation.is_ready() {
                break;
            }

            let actions = negotiation.handle_message(msg).unwrap();
            if negotiation.state() == LoginState::AwaitingLoginAck {
                saw_ack_state = true;
            }

            for action in actions {
                match action {
                    LoginAction::Send(_) => sends += 1,
                    LoginAction::RequestReply => {
                        prompts += 1;
                        for reply_action in negotiation.handle_reply("user").unwrap() {
                            if matches!(reply_action, LoginAction::Send(_)) {
                                sends += 1;
                            }
                        }
                    },
                    LoginAction::Display(_) => {},
                }
            }
        }

        // A reply goes out exactly once per accepted prompt, never
        // otherwise; in particular handle_message alone never sends.
        prop_assert_eq!(sends, prompts);

        // Ready is only reachable through the acknowledgement state.
        if negotiation.is_ready() {
            prop_assert!(saw_ack_state);
        }
    }

    #[test]
    fn acknowledgement_content_is_never_displayed(ack in server_message()) {
        let mut negotiation = Negotiation::new();
        negotiation.handle_message(marker::LOGIN_SUCCESS).unwrap();

        // Whatever the acknowledgement carries, markers included, it is
        // consumed silently.
        let actions = negotiation.handle_message(&ack).unwrap();
        prop_assert!(actions.is_empty());
        prop_assert_eq!(negotiation.state(), LoginState::AwaitingChatReady);
    }

    #[test]
    fn every_reply_loop_message_is_displayed(msg in server_message()) {
        let mut negotiation = Negotiation::new();

        let actions = negotiation.handle_message(&msg).unwrap();
        prop_assert!(!actions.is_empty());
        prop_assert!(
            matches!(&actions[0], LoginAction::Display(text) if text == &msg)
        );
    }
}
