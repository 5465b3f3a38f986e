use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Discord's blurple, used as the accent color for freshly added embeds.
pub const DEFAULT_EMBED_COLOR: u32 = 0x5865F2;

/// Shown when the webhook endpoint answers with a non-2xx status.
pub const SEND_FAILED_MESSAGE: &str = "Failed to send webhook";

/// A webhook execution payload, using Discord's wire field names.
///
/// Optional text fields are sent as empty strings rather than omitted; the
/// webhook endpoint treats both the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub content: String,
    pub username: String,
    pub avatar_url: String,
    pub embeds: Vec<Embed>,
}

/// One rich content block. Only `title`, `description` and `color` are
/// editable in the form; the remaining fields are carried through untouched
/// so a pasted payload is not stripped on its way out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<EmbedField>>,
}

impl Embed {
    pub fn new() -> Self {
        Self {
            color: DEFAULT_EMBED_COLOR,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedThumbnail {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// POST a message to a webhook endpoint.
///
/// `.json(...)` serializes with the same serde_json routine as the raw-JSON
/// view, so what the user inspects is what goes over the wire.
pub fn execute_webhook(webhook_url: &str, message: &WebhookMessage) -> Result<()> {
    let client = reqwest::blocking::Client::new();

    let response = client.post(webhook_url).json(message).send()?;

    if !response.status().is_success() {
        bail!("{SEND_FAILED_MESSAGE}");
    }

    Ok(())
}
