//! Prompt composition
//!
//! The chat state machine has two states keyed on chat-id presence: NEW sends
//! the full layout instruction template plus a separate system persona;
//! CONTINUING sends a short continuation message and no persona, since the
//! backend session already holds it. The transition is one-way.

use crate::templates;

/// The composed outbound prompt for one turn
#[derive(Debug, Clone)]
pub struct ComposedPrompt {
    /// System persona; None on the continuation path
    pub system: Option<String>,
    pub message: String,
}

/// Compose the outbound message for a turn
pub fn compose(user_text: &str, serialized_catalogue: &str, has_chat_id: bool) -> ComposedPrompt {
    if has_chat_id {
        return ComposedPrompt {
            system: None,
            message: compose_continuation(user_text, serialized_catalogue),
        };
    }

    ComposedPrompt {
        system: Some(templates::STORE_SYSTEM_PERSONA.to_string()),
        message: compose_new_store(user_text, serialized_catalogue),
    }
}

fn compose_new_store(user_text: &str, serialized_catalogue: &str) -> String {
    let mut message = String::new();
    message.push_str(templates::STORE_LAYOUT_INSTRUCTIONS);

    if !serialized_catalogue.is_empty() {
        message.push_str("\n\nPRODUCT CATALOGUE (use these products, prices, and images):\n");
        message.push_str(serialized_catalogue);
    }

    let enhancement = templates::store_template_enhancement(user_text);
    if !enhancement.is_empty() {
        message.push('\n');
        message.push_str(&enhancement);
    }

    message.push_str(&format!(
        "\n\nCreate a {}. Use Tailwind CSS and modern React components.",
        user_text
    ));
    message
}

fn compose_continuation(user_text: &str, serialized_catalogue: &str) -> String {
    let mut message = format!("Apply this update to the existing store: {}", user_text);
    if !serialized_catalogue.is_empty() {
        message.push_str("\n\nCurrent product catalogue for reference:\n");
        message.push_str(serialized_catalogue);
    }
    message
}

/// Fixed single-asset regeneration instruction forwarded as a continuation
pub fn compose_regeneration(file_path: &str, prompt: &str, size: &str, format: &str) -> String {
    [
        "Regenerate ONE image asset only.".to_string(),
        format!("Target path: {}", file_path),
        format!("Image requirements: {}, format: {}", size, format),
        "Keep the same file name and path.".to_string(),
        "Do not modify or delete any other files.".to_string(),
        format!("Prompt: {}", prompt),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOGUE_BLOCK: &str =
        "<product>\nNAME: Hoodie\nDESCRIPTION: d\nPRICE: $65\nCATEGORY: Custom\nIMAGE_URL: u\n</product>";

    #[test]
    fn test_new_store_includes_layout_and_persona() {
        let composed = compose("a sneaker drop store", CATALOGUE_BLOCK, false);

        assert_eq!(
            composed.system.as_deref(),
            Some(templates::STORE_SYSTEM_PERSONA)
        );
        assert!(composed
            .message
            .contains("Create a viral pop-up store landing page."));
        assert!(composed.message.contains(CATALOGUE_BLOCK));
        assert!(composed
            .message
            .contains("Create a a sneaker drop store. Use Tailwind CSS and modern React components."));
    }

    #[test]
    fn test_continuation_has_no_persona() {
        let composed = compose("make the hero darker", CATALOGUE_BLOCK, true);

        assert!(composed.system.is_none());
        assert!(!composed.message.contains(templates::STORE_SYSTEM_PERSONA));
        assert!(!composed
            .message
            .contains("Create a viral pop-up store landing page."));
        assert!(composed.message.contains("make the hero darker"));
        assert!(composed.message.contains(CATALOGUE_BLOCK));
    }

    #[test]
    fn test_new_store_without_catalogue_block() {
        let composed = compose("a meme store", "", false);
        assert!(!composed.message.contains("PRODUCT CATALOGUE"));
    }

    #[test]
    fn test_new_store_keyword_template_enhancement() {
        let composed = compose("a fashion boutique drop", "", false);
        assert!(composed
            .message
            .contains("SUGGESTED STORE TEMPLATE: Fashion Boutique"));

        let plain = compose("a sneaker drop store", "", false);
        assert!(!plain.message.contains("SUGGESTED STORE TEMPLATE"));
    }

    #[test]
    fn test_compose_regeneration_wording() {
        let message = compose_regeneration("public/hero.png", "neon skyline", "1024x1024", "png");
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines[0], "Regenerate ONE image asset only.");
        assert_eq!(lines[1], "Target path: public/hero.png");
        assert_eq!(lines[2], "Image requirements: 1024x1024, format: png");
        assert_eq!(lines[3], "Keep the same file name and path.");
        assert_eq!(lines[4], "Do not modify or delete any other files.");
        assert_eq!(lines[5], "Prompt: neon skyline");
    }
}
