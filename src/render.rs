use crate::discord::WebhookMessage;

/// Display name used when no username override is set.
pub const DEFAULT_DISPLAY_NAME: &str = "Webhook";

/// Format an accent color as six lowercase hex digits. Values wider than
/// 24 bits are masked rather than allowed to break rendering.
pub fn color_hex(color: u32) -> String {
    format!("{:06x}", color & 0x00FF_FFFF)
}

/// The accent color as RGB channels, for terminal rendering.
pub fn color_rgb(color: u32) -> (u8, u8, u8) {
    let color = color & 0x00FF_FFFF;
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// The pretty-printed payload exactly as `submit` would send it, whitespace
/// aside. serde_json emits struct fields in definition order, so the view is
/// stable across renders.
pub fn raw_json(message: &WebhookMessage) -> String {
    serde_json::to_string_pretty(message).expect("webhook message is always serializable")
}

/// How the message would look on arrival, independent of any particular UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub content: Option<String>,
    pub embeds: Vec<EmbedPreview>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedPreview {
    pub title: Option<String>,
    pub description: Option<String>,
    pub accent: u32,
}

impl Preview {
    pub fn of(message: &WebhookMessage) -> Self {
        let embeds = message
            .embeds
            .iter()
            .map(|embed| EmbedPreview {
                title: non_empty(&embed.title),
                description: non_empty(&embed.description),
                accent: embed.color,
            })
            .collect();

        Self {
            display_name: non_empty(&message.username)
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
            avatar_url: non_empty(&message.avatar_url),
            content: non_empty(&message.content),
            embeds,
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
