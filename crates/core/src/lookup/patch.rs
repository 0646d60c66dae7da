//! Patch-notes lookup commands.
//!
//! Every method returns the full outbound `Message`, including the Spanish
//! "not available" fallbacks, so the command router only has to deliver it.

use std::sync::Arc;

use poroherald_domain::constants::PATCH_ROLLOUT_HOUR;
use poroherald_domain::{
    color, ChampionRoster, Embed, Message, PatchArticle, PatchCalendar, PatchSection,
};
use tracing::warn;

use crate::reminders::ports::{Clock, PatchFeed};
use crate::reminders::rules::local_at;
use crate::text;

const FEED_UNAVAILABLE: &str = "No se pudo obtener la información del parche en este momento.";
const LATEST_NOT_FOUND: &str = "Error: No se pudo encontrar el último parche.";

/// Read-only lookups over the patch calendar and the news feed.
pub struct PatchLookupService {
    calendar: Arc<PatchCalendar>,
    roster: Arc<ChampionRoster>,
    clock: Arc<dyn Clock>,
    feed: Arc<dyn PatchFeed>,
}

impl PatchLookupService {
    pub fn new(
        calendar: Arc<PatchCalendar>,
        roster: Arc<ChampionRoster>,
        clock: Arc<dyn Clock>,
        feed: Arc<dyn PatchFeed>,
    ) -> Self {
        Self { calendar, roster, clock, feed }
    }

    /// `p!parche` - latest patch title, link and summary graphic.
    pub async fn latest_patch(&self) -> Message {
        let Some(article) = self.fetch_latest().await else {
            return Message::text(FEED_UNAVAILABLE);
        };

        let mut embed = Embed::new()
            .title(format!("Notas del Parche: {}", article.title))
            .color(color::BLUE)
            .url(&article.url);
        if let Some(date) = article.published {
            embed = embed.description(format!("Anunciadas el {}.", text::format_short_date(date)));
        }
        if let Some(image) = self.feed.summary_image(&article.url).await.ok().flatten() {
            embed = embed.image(image);
        }
        Message::embed(embed)
    }

    /// `p!campeones` - champions with changes in the latest patch.
    pub async fn champions(&self) -> Message {
        let Some(article) = self.fetch_latest().await else {
            return Message::text(LATEST_NOT_FOUND);
        };

        let champions = self.feed.champion_list(&article.url).await.unwrap_or_else(|err| {
            warn!(error = %err, "champion list lookup failed");
            Vec::new()
        });
        if champions.is_empty() {
            return Message::text("No se encontraron campeones en estas notas del parche.");
        }

        let description = format!("- {}", champions.join("\n- "));
        Message::embed(
            Embed::new()
                .title(format!("Campeones en el Parche: {}", article.title))
                .description(description)
                .color(color::TEAL),
        )
    }

    /// `p!ver <campeón>` - detailed change blocks for one champion.
    pub async fn champion(&self, name: &str) -> Message {
        if !self.roster.contains(name) {
            return Message::embed(
                Embed::new()
                    .title("❌ Error: Campeón no encontrado")
                    .description(format!(
                        "No se encontró un campeón llamado **'{name}'**.\n\nRevisa la \
                         ortografía o usa `p!campeones` para ver la lista.",
                    ))
                    .color(color::RED),
            );
        }

        let Some(article) = self.fetch_latest().await else {
            return Message::text(LATEST_NOT_FOUND);
        };

        let changes = match self.feed.champion_changes(&article.url, name).await {
            Ok(Some(changes)) => changes,
            Ok(None) => {
                return Message::embed(
                    Embed::new()
                        .description(format!(
                            "No se encontraron cambios para **{}** en las notas del parche actual.",
                            text::title_case(name),
                        ))
                        .color(color::LIGHT_GREY),
                );
            }
            Err(err) => {
                warn!(champion = name, error = %err, "champion lookup failed");
                return Message::text(FEED_UNAVAILABLE);
            }
        };

        let mut main = Embed::new()
            .title(format!("Cambios para {} ({})", changes.name, article.title))
            .description(if changes.summary.is_empty() {
                "Sin resumen.".to_string()
            } else {
                changes.summary.clone()
            })
            .color(color::PURPLE);
        if let Some(portrait) = &changes.portrait_url {
            main = main.thumbnail(portrait);
        }

        let mut embeds = vec![main];
        for block in &changes.blocks {
            let body = if block.changes.is_empty() {
                "Sin detalles específicos.".to_string()
            } else {
                block.changes.join("\n")
            };
            embeds.push(
                Embed::new()
                    .author(&block.title, block.icon_url.clone())
                    .description(body)
                    .color(color::PURPLE),
            );
        }
        Message::embeds(embeds)
    }

    /// `p!objetos` - item changes in the latest patch.
    pub async fn items(&self) -> Message {
        self.section(PatchSection::Items, "objetos", "Cambios a Objetos", color::ORANGE).await
    }

    /// `p!runas` - rune changes in the latest patch.
    pub async fn runes(&self) -> Message {
        self.section(PatchSection::Runes, "runas", "Cambios a Runas", color::LIGHT_GREY).await
    }

    /// `p!calendario` - all future patch dates, next one annotated.
    pub async fn calendar(&self) -> Message {
        let now = self.clock.now();
        let upcoming = self.calendar.upcoming(now.date_naive());
        if upcoming.is_empty() {
            return Message::text("No hay más parches programados en el calendario.");
        }

        let mut lines = Vec::new();
        for (index, date) in upcoming.iter().enumerate() {
            let formatted = text::format_long_date(*date);
            if index == 0 {
                if let Some(rollout) = local_at(*date, PATCH_ROLLOUT_HOUR, 0) {
                    lines.push(format!(
                        "• **{formatted}** (Faltan: {})",
                        text::format_duration(rollout - now),
                    ));
                    continue;
                }
            }
            lines.push(format!("• {formatted}"));
        }

        Message::embed(
            Embed::new()
                .title("🗓️ Calendario de Futuros Parches")
                .description(lines.join("\n"))
                .color(color::DARK_PURPLE),
        )
    }

    /// `p!siguiente` - the next scheduled patch and time remaining.
    pub async fn next_patch(&self) -> Message {
        let now = self.clock.now();
        let next = self
            .calendar
            .dates()
            .iter()
            .filter_map(|date| local_at(*date, PATCH_ROLLOUT_HOUR, 0))
            .find(|rollout| *rollout > now);

        let Some(rollout) = next else {
            return Message::text(
                "No hay más parches programados en el calendario para este año.",
            );
        };

        Message::embed(
            Embed::new()
                .title("📅 Próximo Parche de LoL")
                .description(format!(
                    "La próxima actualización está programada para el **{}**.",
                    text::format_long_date(rollout.date_naive()),
                ))
                .color(color::BLUE)
                .field("Tiempo Restante", text::format_duration(rollout - now)),
        )
    }

    async fn section(
        &self,
        section: PatchSection,
        label: &str,
        heading: &str,
        accent: u32,
    ) -> Message {
        let Some(article) = self.fetch_latest().await else {
            return Message::text(LATEST_NOT_FOUND);
        };

        let blocks = match self.feed.section_changes(&article.url, section).await {
            Ok(blocks) => blocks,
            Err(err) => {
                warn!(section = label, error = %err, "section lookup failed");
                Vec::new()
            }
        };
        if blocks.is_empty() {
            return Message::embed(
                Embed::new()
                    .description(format!(
                        "No hay cambios a {label} en el parche **{}**.",
                        article.title,
                    ))
                    .color(accent),
            );
        }

        let mut embeds =
            vec![Embed::new().title(format!("{heading} ({})", article.title)).color(accent)];
        for block in &blocks {
            let mut description = if block.summary.is_empty() {
                "Sin resumen.".to_string()
            } else {
                block.summary.clone()
            };
            if !block.changes.is_empty() {
                description.push_str(&format!("\n\n**Cambios:**\n{}", block.changes.join("\n")));
            }

            let mut embed =
                Embed::new().title(&block.title).description(description).color(accent);
            if let Some(icon) = &block.icon_url {
                embed = embed.thumbnail(icon);
            }
            embeds.push(embed);
        }
        Message::embeds(embeds)
    }

    async fn fetch_latest(&self) -> Option<PatchArticle> {
        match self.feed.latest_patch().await {
            Ok(article) => article,
            Err(err) => {
                warn!(error = %err, "latest patch lookup failed");
                None
            }
        }
    }
}
