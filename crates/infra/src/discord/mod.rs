//! Discord integration: REST delivery and the gateway connection.

pub mod gateway;
pub mod messenger;

pub use gateway::{DiscordGateway, DiscordGatewayConfig, IncomingMessage};
pub use messenger::{DiscordMessenger, DiscordUser};
