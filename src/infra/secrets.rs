use std::panic;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_MARKERS: [&str; 3] = ["token", "secret", "password"];

/// Replaces every occurrence of `token` in `input`. Blank tokens leave the
/// input untouched.
pub fn redact_token(input: &str, token: &str) -> String {
    let token = token.trim();
    if token.is_empty() {
        return input.to_owned();
    }

    input.replace(token, REDACTED)
}

/// Scrubs whitespace-separated chunks that look like credentials.
pub fn redact_text(input: &str) -> String {
    input
        .split_whitespace()
        .map(redact_chunk)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn install_panic_redaction_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic payload omitted".to_owned());

        let scrubbed = redact_text(&payload);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "tgids panic: {} at {}:{}:{}",
                scrubbed,
                location.file(),
                location.line(),
                location.column()
            );
        } else {
            eprintln!("tgids panic: {}", scrubbed);
        }
    }));
}

fn redact_chunk(chunk: &str) -> String {
    let lowered = chunk.to_ascii_lowercase();
    if SENSITIVE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
        || chunk
            .split(|ch: char| ch == '/' || ch == '=' || ch == '"' || ch == '\'')
            .any(looks_like_bot_token)
    {
        REDACTED.to_owned()
    } else {
        chunk.to_owned()
    }
}

/// Bot tokens are `<numeric bot id>:<35ish chars of [A-Za-z0-9_-]>`, and
/// appear as `bot<token>` inside API URLs.
fn looks_like_bot_token(value: &str) -> bool {
    let value = value.strip_prefix("bot").unwrap_or(value);
    let Some((bot_id, secret)) = value.split_once(':') else {
        return false;
    };

    bot_id.len() >= 5
        && bot_id.chars().all(|ch| ch.is_ascii_digit())
        && secret.len() >= 20
        && secret
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "1234567890:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw";

    #[test]
    fn redact_token_replaces_every_occurrence() {
        let input = format!("GET /bot{TOKEN}/getUpdates failed for {TOKEN}");

        let output = redact_token(&input, TOKEN);

        assert!(!output.contains(TOKEN));
        assert_eq!(output.matches(REDACTED).count(), 2);
    }

    #[test]
    fn redact_token_ignores_blank_token() {
        assert_eq!(redact_token("connection refused", "  "), "connection refused");
    }

    #[test]
    fn redact_text_scrubs_bot_tokens_in_urls() {
        let input = format!("error sending request for url (https://api.telegram.org/bot{TOKEN}/getUpdates)");

        let output = redact_text(&input);

        assert!(!output.contains("AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw"));
        assert!(output.contains(REDACTED));
        assert!(output.starts_with("error sending request"));
    }

    #[test]
    fn redact_text_scrubs_marker_chunks() {
        let output = redact_text("token=abc secret:xyz chat_id=-100");

        assert_eq!(output, "[REDACTED] [REDACTED] chat_id=-100");
    }

    #[test]
    fn chat_ids_and_short_pairs_are_not_tokens() {
        assert!(!looks_like_bot_token("-1001234567890"));
        assert!(!looks_like_bot_token("12:30"));
        assert!(looks_like_bot_token(TOKEN));
    }
}
