//! PoroHerald - patch & Clash notification bot.
//!
//! Main entry point: bootstrap, context wiring, scheduler startup and the
//! gateway consumption loop.

use poroherald_app::{AppContext, CommandRouter};
use poroherald_core::Messenger;
use poroherald_infra::discord::{DiscordGateway, DiscordGatewayConfig};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging first so the .env loading outcome is visible.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => warn!(error = %err, "could not load .env file"),
    }

    let config = poroherald_infra::config::load()?;
    let mut context = AppContext::new(config)?;

    // Authenticating to the platform is the only fatal startup step.
    let identity = context.messenger.current_user().await?;
    info!(bot = %identity.username, id = %identity.id, "connected to Discord");

    context.start_schedulers().await?;

    let gateway = DiscordGateway::new(DiscordGatewayConfig::new(
        context.config.discord.token.clone(),
    ))?;
    let mut incoming = gateway.start();

    let router = CommandRouter::new(context.patch_lookup.clone(), context.clash_lookup.clone());
    let messenger = context.messenger.clone();

    info!("PoroHerald running");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown requested");
                break;
            }
            maybe_message = incoming.recv() => {
                let Some(message) = maybe_message else {
                    warn!("gateway stream ended");
                    break;
                };

                if let Some(reply) = router.handle(&message.content).await {
                    if let Err(err) = messenger.send(&message.channel_id, reply).await {
                        error!(channel_id = %message.channel_id, error = %err, "failed to send reply");
                    }
                }
            }
        }
    }

    context.stop_schedulers().await?;
    info!("PoroHerald stopped");
    Ok(())
}
