//! Dispatches parsed commands to the lookup services.

use std::sync::Arc;

use poroherald_core::lookup::help_message;
use poroherald_core::{ClashLookupService, PatchLookupService};
use poroherald_domain::Message;
use tracing::debug;

use super::{parse, Command};

/// Maps incoming message content to a reply, if any.
pub struct CommandRouter {
    patch: Arc<PatchLookupService>,
    clash: Arc<ClashLookupService>,
}

impl CommandRouter {
    pub fn new(patch: Arc<PatchLookupService>, clash: Arc<ClashLookupService>) -> Self {
        Self { patch, clash }
    }

    /// Handle one incoming message. `None` means "not a command, stay
    /// quiet"; every recognised command produces a reply.
    pub async fn handle(&self, content: &str) -> Option<Message> {
        let command = parse(content)?;
        debug!(?command, "handling chat command");

        let reply = match command {
            Command::Ayuda => help_message(),
            Command::Parche => self.patch.latest_patch().await,
            Command::Campeones => self.patch.champions().await,
            Command::Ver(champion) => self.patch.champion(&champion).await,
            Command::VerUsage => Message::text("Debes especificar un campeón. Ej: `p!ver Ahri`"),
            Command::Objetos => self.patch.items().await,
            Command::Runas => self.patch.runes().await,
            Command::PatchCalendario => self.patch.calendar().await,
            Command::Siguiente => self.patch.next_patch().await,
            Command::Clash => self.clash.next_event(),
            Command::ClashCalendario => self.clash.calendar(),
            Command::Horarios => self.clash.schedules(),
            Command::Premios => self.clash.prizes(),
        };
        Some(reply)
    }
}
