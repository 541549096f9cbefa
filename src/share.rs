//! Share link for an open group.

/// Builds a deep link that opens the messaging app with a prefilled invitation.
///
/// `base` is the app's "send text" prefix (for LINE, `https://line.me/R/msg/text/?`); the message
/// is appended URL-encoded.
pub fn share_link(base: &str, store_name: &str, deadline_text: &str, app_url: &str) -> String {
    let message = format!(
        "🍱 Group order: {}\n⏰ Order by {}\n👉 {}",
        store_name, deadline_text, app_url
    );
    format!("{}{}", base, urlencoding::encode(&message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_encoded_after_base() {
        let link = share_link(
            "https://line.me/R/msg/text/?",
            "Golden Wok",
            "12:30",
            "https://order.example.com",
        );
        assert!(link.starts_with("https://line.me/R/msg/text/?"));
        let encoded = &link["https://line.me/R/msg/text/?".len()..];
        assert!(!encoded.contains(' '));
        assert!(encoded.contains("Golden%20Wok"));

        let decoded = urlencoding::decode(encoded).unwrap();
        assert!(decoded.contains("Order by 12:30"));
        assert!(decoded.ends_with("https://order.example.com"));
    }
}
