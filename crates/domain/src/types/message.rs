//! Outbound chat message types.
//!
//! These are platform-agnostic: the core services build `Message` values and
//! the infrastructure messenger translates them into Discord REST payloads.

use serde::{Deserialize, Serialize};

/// Embed accent colors, mirroring the palette the community is used to.
pub mod color {
    pub const ORANGE: u32 = 0x00E6_7E22;
    pub const GREEN: u32 = 0x002E_CC71;
    pub const GOLD: u32 = 0x00F1_C40F;
    pub const DARK_RED: u32 = 0x0099_2D22;
    pub const RED: u32 = 0x00E7_4C3C;
    pub const BLUE: u32 = 0x0034_98DB;
    pub const TEAL: u32 = 0x001A_BC9C;
    pub const PURPLE: u32 = 0x009B_59B6;
    pub const LIGHT_GREY: u32 = 0x0097_9C9F;
    pub const DARK_PURPLE: u32 = 0x0071_368A;
    pub const DARK_GREEN: u32 = 0x001F_8B4C;
}

/// A rich embed attached to an outbound message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub color: Option<u32>,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub author_name: Option<String>,
    pub author_icon_url: Option<String>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField { name: name.into(), value: value.into(), inline: false });
        self
    }

    pub fn inline_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField { name: name.into(), value: value.into(), inline: true });
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn author(mut self, name: impl Into<String>, icon_url: Option<String>) -> Self {
        self.author_name = Some(name.into());
        self.author_icon_url = icon_url;
        self
    }
}

/// A titled field inside an embed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// An outbound message: plain content, embeds, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub content: Option<String>,
    #[serde(default)]
    pub embeds: Vec<Embed>,
}

impl Message {
    /// Plain-text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), embeds: Vec::new() }
    }

    /// Single-embed message.
    pub fn embed(embed: Embed) -> Self {
        Self { content: None, embeds: vec![embed] }
    }

    /// Multi-embed message.
    pub fn embeds(embeds: Vec<Embed>) -> Self {
        Self { content: None, embeds }
    }
}
