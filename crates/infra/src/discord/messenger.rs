//! Discord REST messenger.
//!
//! Implements the core [`Messenger`] port against the Discord HTTP API.
//! Delivery is a single POST per message; failures bubble up as
//! `HeraldError::Channel` for the caller to log.

use async_trait::async_trait;
use poroherald_core::Messenger;
use poroherald_domain::{Embed, HeraldError, Message, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::http::HttpClient;

const API_BASE: &str = "https://discord.com/api/v10";
const USER_AGENT: &str = "PoroHerald/0.1";

/// REST client for sending messages and checking the bot identity.
pub struct DiscordMessenger {
    http: HttpClient,
    api_base: String,
}

impl DiscordMessenger {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_api_base(token, API_BASE)
    }

    /// Point the client at a different API root (used by tests).
    pub fn with_api_base(token: &str, api_base: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bot {token}"))
            .map_err(|_| HeraldError::Config("bot token is not a valid header value".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, api_base: api_base.into() })
    }

    /// Identity of the authenticated bot.
    ///
    /// Called once at startup; an authentication failure here is the only
    /// fatal error in the system.
    pub async fn current_user(&self) -> Result<DiscordUser> {
        let url = format!("{}/users/@me", self.api_base);
        let response = self.http.send(self.http.request(Method::GET, &url)).await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(HeraldError::Channel(format!("authentication failed: HTTP {status}")));
        }

        response
            .json::<DiscordUser>()
            .await
            .map_err(|err| HeraldError::Channel(format!("invalid identity response: {err}")))
    }
}

#[async_trait]
impl Messenger for DiscordMessenger {
    async fn send(&self, channel_id: &str, message: Message) -> Result<()> {
        let url = format!("{}/channels/{}/messages", self.api_base, channel_id);
        let body = message_payload(&message);

        debug!(channel_id, embeds = message.embeds.len(), "sending Discord message");
        let response =
            self.http.send(self.http.request(Method::POST, &url).json(&body)).await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(HeraldError::Channel(format!("Discord {status}: {detail}")));
        }
        Ok(())
    }
}

fn message_payload(message: &Message) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    if let Some(content) = &message.content {
        payload.insert("content".into(), json!(content));
    }
    if !message.embeds.is_empty() {
        let embeds: Vec<_> = message.embeds.iter().map(embed_payload).collect();
        payload.insert("embeds".into(), json!(embeds));
    }
    serde_json::Value::Object(payload)
}

fn embed_payload(embed: &Embed) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    if let Some(title) = &embed.title {
        payload.insert("title".into(), json!(title));
    }
    if let Some(description) = &embed.description {
        payload.insert("description".into(), json!(description));
    }
    if let Some(url) = &embed.url {
        payload.insert("url".into(), json!(url));
    }
    if let Some(color) = embed.color {
        payload.insert("color".into(), json!(color));
    }
    if !embed.fields.is_empty() {
        let fields: Vec<_> = embed
            .fields
            .iter()
            .map(|f| json!({"name": f.name, "value": f.value, "inline": f.inline}))
            .collect();
        payload.insert("fields".into(), json!(fields));
    }
    if let Some(image) = &embed.image_url {
        payload.insert("image".into(), json!({"url": image}));
    }
    if let Some(thumbnail) = &embed.thumbnail_url {
        payload.insert("thumbnail".into(), json!({"url": thumbnail}));
    }
    if let Some(author) = &embed.author_name {
        let mut author_obj = serde_json::Map::new();
        author_obj.insert("name".into(), json!(author));
        if let Some(icon) = &embed.author_icon_url {
            author_obj.insert("icon_url".into(), json!(icon));
        }
        payload.insert("author".into(), serde_json::Value::Object(author_obj));
    }
    serde_json::Value::Object(payload)
}

/// Identity payload returned by `/users/@me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
}
