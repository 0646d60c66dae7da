//! Clash reminder tick service.
//!
//! Unlike the patch rules, Clash reminders do not short-circuit: every due
//! `(event, day, kind)` pair is delivered in the same tick, each under its
//! own ledger id.

use std::sync::Arc;

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use poroherald_domain::constants::{CONFIRMATION_END_HOUR, CONFIRMATION_START_HOUR};
use poroherald_domain::{color, ClashCalendar, ClashInfo, Embed, Message, ReminderDomain, Result};
use tracing::{debug, info, warn};

use super::ports::{Clock, Messenger, SentReminderStore};
use super::rules::{self, ClashDue, ClashDueKind};
use crate::text;

/// Fallback prize line when `clash_info.json` carries no prize table.
const DEFAULT_FIRST_PRIZE: &str = "Recompensas épicas";

/// Configuration for the Clash tick service.
#[derive(Debug, Clone)]
pub struct ClashReminderConfig {
    /// Output channel; an empty value makes every tick a silent skip.
    pub channel_id: String,
    /// How long past its trigger instant a reminder is still due.
    pub due_window: Duration,
}

/// Drives the Clash reminder rules once per scheduler tick.
pub struct ClashReminderService {
    config: ClashReminderConfig,
    calendar: Arc<ClashCalendar>,
    info: Arc<ClashInfo>,
    clock: Arc<dyn Clock>,
    messenger: Arc<dyn Messenger>,
    ledger: Arc<dyn SentReminderStore>,
}

impl ClashReminderService {
    pub fn new(
        config: ClashReminderConfig,
        calendar: Arc<ClashCalendar>,
        info: Arc<ClashInfo>,
        clock: Arc<dyn Clock>,
        messenger: Arc<dyn Messenger>,
        ledger: Arc<dyn SentReminderStore>,
    ) -> Self {
        Self { config, calendar, info, clock, messenger, ledger }
    }

    /// Deliver every newly-due Clash reminder.
    ///
    /// A failed delivery leaves that id unrecorded and moves on to the next
    /// due reminder; the loop itself never aborts the tick.
    pub async fn run_tick(&self) -> Result<()> {
        if self.config.channel_id.is_empty() {
            debug!("no output channel configured, skipping clash tick");
            return Ok(());
        }

        let now = self.clock.now();

        for due in rules::clash_due(now, &self.calendar, self.config.due_window) {
            if self.ledger.has(ReminderDomain::Clash, &due.id).await {
                continue;
            }

            let message = self.build_message(&due, now);
            if let Err(err) = self.messenger.send(&self.config.channel_id, message).await {
                warn!(id = %due.id, error = %err, "failed to deliver clash reminder");
                continue;
            }

            if let Err(err) = self.ledger.record(ReminderDomain::Clash, &due.id).await {
                warn!(id = %due.id, error = %err, "failed to persist clash reminder id");
            }
            info!(id = %due.id, "clash reminder delivered");
        }

        Ok(())
    }

    fn build_message(&self, due: &ClashDue, now: DateTime<Tz>) -> Message {
        match due.kind {
            ClashDueKind::Formation => self.formation_message(due, now),
            ClashDueKind::TournamentMorning => self.morning_message(due, now),
            ClashDueKind::FinalCall => self.final_call_message(due, now),
        }
    }

    fn formation_message(&self, due: &ClashDue, now: DateTime<Tz>) -> Message {
        let mut embed = Embed::new()
            .title(format!(
                "📢 ¡La Formación de Equipos para Clash: {} ha comenzado!",
                due.event.name
            ))
            .color(color::GREEN);

        if let Some(first_day) = due.event.first_tournament_day() {
            embed = embed.field(
                "Días del Torneo",
                format!(
                    "{} de {}",
                    text::format_day_list(&due.event.tournament_days),
                    text::month_name(chrono::Datelike::month(&first_day)),
                ),
            );
            if let Some(start) = rules::local_at(first_day, 0, 0) {
                embed = embed
                    .field("Tiempo Restante para el Torneo", text::format_duration(start - now));
            }
        }

        embed = embed.field(
            "Hora de Confirmación General",
            format!("A partir de las {CONFIRMATION_START_HOUR}:00 CDMX."),
        );
        Message::embed(embed)
    }

    fn morning_message(&self, due: &ClashDue, now: DateTime<Tz>) -> Message {
        let mut embed = Embed::new()
            .title(format!("⚔️ ¡Hoy es día de Torneo Clash: {}!", due.event.name))
            .color(color::GOLD)
            .field("Premio del 1er Lugar", self.first_prize());

        if let Some(confirmation_start) = rules::local_at(due.day, CONFIRMATION_START_HOUR, 0) {
            embed = embed.field(
                format!("La Fase de Confirmación inicia a las {CONFIRMATION_START_HOUR}:00 CDMX"),
                format!("(Faltan: {})", text::format_duration(confirmation_start - now)),
            );
        }
        Message::embed(embed)
    }

    fn final_call_message(&self, due: &ClashDue, now: DateTime<Tz>) -> Message {
        let mut embed = Embed::new()
            .title(format!("🚨 ¡ÚLTIMA LLAMADA PARA CLASH: {}!", due.event.name))
            .description("**¡SOLO QUEDAN 10 MINUTOS PARA CONFIRMAR!**")
            .color(color::DARK_RED)
            .field("Premio del 1er Lugar", self.first_prize());

        if let Some(confirmation_end) = rules::local_at(due.day, CONFIRMATION_END_HOUR, 0) {
            embed = embed.field(
                format!("La Fase de Confirmación termina a las {CONFIRMATION_END_HOUR}:00 CDMX"),
                format!("(Cierra en: {})", text::format_duration(confirmation_end - now)),
            );
        }
        Message::embed(embed)
    }

    fn first_prize(&self) -> String {
        self.info.first_prize().unwrap_or(DEFAULT_FIRST_PRIZE).to_string()
    }
}
