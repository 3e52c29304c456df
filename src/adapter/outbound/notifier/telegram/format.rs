//! MarkdownV2 rendering for Telegram notifications.

use crate::domain::{Channel, DisplayPayload};

/// Longest body kept in a message. Telegram rejects texts over 4096 chars.
const MAX_BODY_CHARS: usize = 3000;

/// Render a payload as a MarkdownV2 message for `channel`.
pub fn render_message(payload: &DisplayPayload, channel: &Channel) -> String {
    let mut msg = format!(
        "🔔 *New OTP* \\| {}\n\
        \n\
        🕒 `{}`\n\
        {} {}\n\
        📱 {} `{}`\n",
        escape_markdown(&payload.feed_label),
        escape_markdown(&payload.timestamp),
        payload.flag,
        escape_markdown(&payload.country),
        escape_markdown(&payload.category),
        escape_markdown(&payload.masked_subject),
    );

    if !payload.code.is_empty() {
        msg.push_str(&format!("🔑 Code: `{}`\n", escape_markdown(&payload.code)));
    }

    let body = truncate(payload.body_for(channel), MAX_BODY_CHARS);
    if !body.is_empty() {
        msg.push_str(&format!("\n💬 {}", escape_markdown(&body)));
    }

    msg
}

/// Truncate a string with ellipsis (Unicode-safe).
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
        '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> DisplayPayload {
        DisplayPayload {
            feed_label: "API 1".into(),
            timestamp: "2026-10-18 10:00:01".into(),
            flag: "🇵🇰".into(),
            country: "Pakistan".into(),
            category: "WhatsApp".into(),
            masked_subject: "92300XXXX67".into(),
            code: "123-456".into(),
            body: "Your code is 123-456.\nDo not share.".into(),
            flat_body: "Your code is 123-456. Do not share.".into(),
        }
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("hello"), "hello");
        assert_eq!(escape_markdown("hello_world"), "hello\\_world");
        assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
        assert_eq!(escape_markdown("test.com"), "test\\.com");
        assert_eq!(escape_markdown("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hello...");
        assert_eq!(truncate("ab", 2), "ab");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate("日本語テスト", 3), "日本語...");
        assert_eq!(truncate("café", 4), "café");
    }

    #[test]
    fn render_includes_escaped_fields() {
        let text = render_message(&payload(), &Channel::new("-100"));

        assert!(text.contains("API 1"));
        assert!(text.contains("🇵🇰 Pakistan"));
        assert!(text.contains("`92300XXXX67`"));
        assert!(text.contains("Code: `123\\-456`"));
        assert!(text.contains("2026\\-10\\-18"));
        assert!(text.contains("Your code is 123\\-456\\.\nDo not share\\."));
    }

    #[test]
    fn render_uses_flat_body_for_flat_channels() {
        let text = render_message(&payload(), &Channel::new("@otp").flat());

        assert!(text.contains("Your code is 123\\-456\\. Do not share\\."));
        assert!(!text.contains("456\\.\nDo"));
    }

    #[test]
    fn render_omits_empty_code_line() {
        let mut p = payload();
        p.code = String::new();

        let text = render_message(&p, &Channel::new("-100"));

        assert!(!text.contains("Code:"));
    }
}
