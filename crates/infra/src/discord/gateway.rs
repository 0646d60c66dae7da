//! Discord gateway client.
//!
//! Maintains the WebSocket session that delivers user commands: hello,
//! identify, heartbeats, and `MESSAGE_CREATE` dispatches. Disconnects
//! reconnect with capped exponential backoff; the consumer just reads a
//! stream of [`IncomingMessage`] values.

use futures::{SinkExt, StreamExt};
use poroherald_domain::{HeraldError, Result};
use reqwest::Method;
use serde_json::json;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, error, info, trace, warn};

use crate::http::HttpClient;

const API_BASE: &str = "https://discord.com/api/v10";
// GUILDS | GUILD_MESSAGES | DIRECT_MESSAGES | MESSAGE_CONTENT
const DEFAULT_INTENTS: u64 = (1 << 0) | (1 << 9) | (1 << 12) | (1 << 15);
const INITIAL_BACKOFF_SECS: u64 = 5;
const MAX_BACKOFF_SECS: u64 = 60;
const DEFAULT_HEARTBEAT_MS: u64 = 41_250;

/// A user message observed on the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub channel_id: String,
    pub author_id: String,
    pub author_name: Option<String>,
    pub content: String,
}

/// Gateway connection settings.
#[derive(Debug, Clone)]
pub struct DiscordGatewayConfig {
    pub token: String,
    pub intents: u64,
}

impl DiscordGatewayConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into(), intents: DEFAULT_INTENTS }
    }
}

/// Owns the reconnect loop and forwards dispatches to the consumer.
pub struct DiscordGateway {
    config: DiscordGatewayConfig,
    http: HttpClient,
    api_base: String,
}

impl DiscordGateway {
    pub fn new(config: DiscordGatewayConfig) -> Result<Self> {
        let http = HttpClient::builder().user_agent("PoroHerald/0.1").build()?;
        Ok(Self { config, http, api_base: API_BASE.to_string() })
    }

    async fn gateway_url(&self) -> Result<String> {
        let url = format!("{}/gateway/bot", self.api_base);
        let response = self.http.send(self.http.request(Method::GET, &url)).await?;
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| HeraldError::Channel(format!("invalid gateway response: {err}")))?;

        body["url"]
            .as_str()
            .map(|s| format!("{s}/?v=10&encoding=json"))
            .ok_or_else(|| HeraldError::Channel("no gateway URL in response".into()))
    }

    /// Spawn the gateway task and return the stream of incoming messages.
    ///
    /// The task runs until the receiving side is dropped.
    pub fn start(self) -> mpsc::UnboundedReceiver<IncomingMessage> {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut backoff_secs = INITIAL_BACKOFF_SECS;

            loop {
                info!("connecting to Discord gateway");

                let gateway_url = match self.gateway_url().await {
                    Ok(url) => url,
                    Err(err) => {
                        error!(error = %err, retry_secs = backoff_secs, "failed to resolve gateway URL");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(MAX_BACKOFF_SECS);
                        continue;
                    }
                };

                let (ws, _) = match tokio_tungstenite::connect_async(&gateway_url).await {
                    Ok(connection) => connection,
                    Err(err) => {
                        error!(error = %err, retry_secs = backoff_secs, "gateway WebSocket connect failed");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(MAX_BACKOFF_SECS);
                        continue;
                    }
                };

                backoff_secs = INITIAL_BACKOFF_SECS;
                info!("Discord gateway connected");

                if !self.run_session(ws, &tx).await {
                    // Receiver dropped: shut the task down for good.
                    return;
                }

                info!(retry_secs = backoff_secs, "Discord gateway disconnected, reconnecting");
                tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                backoff_secs = (backoff_secs * 2).min(MAX_BACKOFF_SECS);
            }
        });

        rx
    }

    /// Drive one WebSocket session. Returns `false` when the consumer is
    /// gone and the gateway should stop entirely.
    async fn run_session(
        &self,
        mut ws: tokio_tungstenite::WebSocketStream<
            tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
        >,
        tx: &mpsc::UnboundedSender<IncomingMessage>,
    ) -> bool {
        let mut heartbeat_interval_ms = DEFAULT_HEARTBEAT_MS;
        let mut sequence: Option<u64> = None;
        let mut identified = false;

        loop {
            tokio::select! {
                frame = ws.next() => {
                    match frame {
                        Some(Ok(WsMessage::Text(text))) => {
                            let Ok(payload) = serde_json::from_str::<serde_json::Value>(&text) else {
                                continue;
                            };

                            if let Some(s) = payload["s"].as_u64() {
                                sequence = Some(s);
                            }

                            match payload["op"].as_u64().unwrap_or(0) {
                                10 => {
                                    heartbeat_interval_ms = payload["d"]["heartbeat_interval"]
                                        .as_u64()
                                        .unwrap_or(DEFAULT_HEARTBEAT_MS);
                                    debug!(heartbeat_ms = heartbeat_interval_ms, "gateway hello");

                                    if !identified {
                                        let identify = json!({
                                            "op": 2,
                                            "d": {
                                                "token": self.config.token,
                                                "intents": self.config.intents,
                                                "properties": {
                                                    "os": std::env::consts::OS,
                                                    "browser": "poroherald",
                                                    "device": "poroherald"
                                                }
                                            }
                                        });
                                        if ws.send(WsMessage::Text(identify.to_string())).await.is_err() {
                                            warn!("failed to send identify payload");
                                            return true;
                                        }
                                        identified = true;
                                    }
                                }
                                11 => trace!("heartbeat acknowledged"),
                                7 => {
                                    warn!("gateway requested reconnect");
                                    return true;
                                }
                                9 => {
                                    warn!("invalid session, re-identifying");
                                    identified = false;
                                }
                                0 => {
                                    let event = payload["t"].as_str().unwrap_or("");
                                    match event {
                                        "READY" => {
                                            let user = payload["d"]["user"]["username"]
                                                .as_str()
                                                .unwrap_or("unknown");
                                            info!(user, "Discord gateway ready");
                                        }
                                        "MESSAGE_CREATE" => {
                                            let data = &payload["d"];
                                            if data["author"]["bot"].as_bool().unwrap_or(false) {
                                                continue;
                                            }

                                            let message = IncomingMessage {
                                                channel_id: data["channel_id"]
                                                    .as_str()
                                                    .unwrap_or_default()
                                                    .to_string(),
                                                author_id: data["author"]["id"]
                                                    .as_str()
                                                    .unwrap_or_default()
                                                    .to_string(),
                                                author_name: data["author"]["username"]
                                                    .as_str()
                                                    .map(str::to_string),
                                                content: data["content"]
                                                    .as_str()
                                                    .unwrap_or_default()
                                                    .to_string(),
                                            };

                                            if tx.send(message).is_err() {
                                                info!("gateway consumer dropped, stopping");
                                                return false;
                                            }
                                        }
                                        other => trace!(event = other, "ignoring gateway event"),
                                    }
                                }
                                _ => {}
                            }
                        }
                        Some(Ok(WsMessage::Close(_))) => {
                            warn!("gateway closed by server");
                            return true;
                        }
                        Some(Err(err)) => {
                            error!(error = %err, "gateway stream error");
                            return true;
                        }
                        None => return true,
                        _ => {}
                    }
                }
                _ = tokio::time::sleep(std::time::Duration::from_millis(heartbeat_interval_ms)) => {
                    let heartbeat = json!({"op": 1, "d": sequence});
                    if ws.send(WsMessage::Text(heartbeat.to_string())).await.is_err() {
                        error!("heartbeat send failed");
                        return true;
                    }
                    trace!(sequence = ?sequence, "heartbeat sent");
                }
            }
        }
    }
}
