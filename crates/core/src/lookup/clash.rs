//! Clash lookup commands: next event, season calendar, schedules, prizes.

use std::sync::Arc;

use chrono::Datelike;
use poroherald_domain::{color, ClashCalendar, ClashEvent, ClashInfo, Embed, Message};

use crate::reminders::ports::Clock;
use crate::reminders::rules::local_at;
use crate::text;

const NO_EVENTS: &str = "No hay más torneos de Clash programados.";

/// Read-only lookups over the Clash calendar and info tables.
pub struct ClashLookupService {
    calendar: Arc<ClashCalendar>,
    info: Arc<ClashInfo>,
    clock: Arc<dyn Clock>,
}

impl ClashLookupService {
    pub fn new(calendar: Arc<ClashCalendar>, info: Arc<ClashInfo>, clock: Arc<dyn Clock>) -> Self {
        Self { calendar, info, clock }
    }

    /// `c!clash` - the next upcoming Clash event.
    pub fn next_event(&self) -> Message {
        let now = self.clock.now();
        let Some(event) = self.calendar.next_after(now.date_naive()) else {
            return Message::text(NO_EVENTS);
        };

        let mut description = format!(
            "Corresponde a la versión {}.\n\n**Inicio de Formación de Equipos:** {}\n",
            event.version,
            text::format_day_month(event.team_formation_start),
        );
        if let Some(first_day) = event.first_tournament_day() {
            description.push_str(&format!(
                "**Días del Torneo:** {} de {}\n",
                text::format_day_list(&event.tournament_days),
                month_and_year(first_day),
            ));
        }
        if let Some(formation_start) = local_at(event.team_formation_start, 0, 0) {
            description.push_str(&format!(
                "\n**Tiempo para Formar Equipo:** {}",
                text::format_duration(formation_start - now),
            ));
        }

        Message::embed(
            Embed::new()
                .title(format!("🏆 Próximo Clash: {}", event.name))
                .description(description)
                .color(color::RED),
        )
    }

    /// `c!calendario` - all future Clash events.
    pub fn calendar(&self) -> Message {
        let now = self.clock.now();
        let upcoming = self.calendar.upcoming(now.date_naive());
        if upcoming.is_empty() {
            return Message::text(NO_EVENTS);
        }

        let mut embed = Embed::new()
            .title("⚔️ Calendario de Futuros Torneos de Clash")
            .color(color::DARK_RED);
        for event in upcoming {
            embed = embed.field(
                format!("{} (Versión {})", event.name, event.version),
                format!("Torneo: **{}**.", tournament_days_line(event)),
            );
        }
        Message::embed(embed)
    }

    /// `c!horarios` - confirmation schedule tiers.
    pub fn schedules(&self) -> Message {
        let Some(table) = &self.info.schedules else {
            return Message::text("No se encontró la información de horarios de Clash.");
        };

        let title =
            if table.title.is_empty() { "Horarios de Clash" } else { table.title.as_str() };
        let mut embed = Embed::new().title(title).color(color::LIGHT_GREY);
        for tier in &table.tiers {
            embed = embed.field(&tier.name, &tier.hours);
        }
        Message::embed(embed)
    }

    /// `c!premios` - prize tiers.
    pub fn prizes(&self) -> Message {
        let Some(table) = &self.info.prizes else {
            return Message::text("No se encontró la información de premios de Clash.");
        };

        let title = if table.title.is_empty() { "Premios de Clash" } else { table.title.as_str() };
        let mut embed = Embed::new()
            .title(title)
            .description(&table.description)
            .color(color::GOLD);
        for tier in &table.entries {
            embed = embed.field(&tier.place, &tier.reward);
        }
        Message::embed(embed)
    }
}

fn month_and_year(date: chrono::NaiveDate) -> String {
    format!("{} de {}", text::month_name(date.month()), date.year())
}

fn tournament_days_line(event: &ClashEvent) -> String {
    match event.first_tournament_day() {
        Some(first_day) => format!(
            "{} de {}",
            text::format_day_list(&event.tournament_days),
            month_and_year(first_day),
        ),
        None => "por confirmar".to_string(),
    }
}
