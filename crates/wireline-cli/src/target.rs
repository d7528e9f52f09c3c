//! Connection-target normalization.
//!
//! Accepts whatever the user pasted - a bare host, an http(s) URL from a
//! tunnel provider, or an explicit ws(s) URL - and produces a WebSocket
//! URL. Pure string transformation; establishment happens elsewhere.

/// Target used when none is given on the command line.
pub const DEFAULT_TARGET: &str = "ws://127.0.0.1:8080";

/// Normalize a user-supplied target into a WebSocket URL.
///
/// HTTP-style schemes are rewritten to their WebSocket counterparts; a
/// target with no recognized scheme gets `ws://` prepended.
pub fn normalize(target: Option<&str>) -> String {
    let Some(target) = target else {
        return DEFAULT_TARGET.to_string();
    };

    if let Some(rest) = target.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = target.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if target.starts_with("ws") {
        target.to_string()
    } else {
        format!("ws://{target}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_target_falls_back_to_local_default() {
        assert_eq!(normalize(None), DEFAULT_TARGET);
    }

    #[test]
    fn bare_host_gets_ws_scheme() {
        assert_eq!(normalize(Some("example.com")), "ws://example.com");
    }

    #[test]
    fn https_becomes_wss() {
        assert_eq!(normalize(Some("https://example.com")), "wss://example.com");
    }

    #[test]
    fn http_becomes_ws() {
        assert_eq!(normalize(Some("http://example.com:8080")), "ws://example.com:8080");
    }

    #[test]
    fn websocket_urls_pass_through() {
        assert_eq!(normalize(Some("ws://10.0.0.5:8080")), "ws://10.0.0.5:8080");
        assert_eq!(normalize(Some("wss://chat.example.com")), "wss://chat.example.com");
    }
}
