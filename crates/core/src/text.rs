//! Spanish-facing text helpers shared by reminders and lookup commands.
//!
//! The community reads the bot in Spanish, so durations and dates are
//! rendered here rather than through a locale-dependent formatter.

use chrono::{Datelike, Duration, NaiveDate};

/// Humanise a duration as "2 días, 3 horas, 5 minutos".
///
/// Seconds are dropped; a sub-minute duration renders as
/// "en menos de un minuto", matching the cadence of the reminder engine.
pub fn format_duration(delta: Duration) -> String {
    let total_minutes = delta.num_minutes();
    if total_minutes <= 0 {
        return "en menos de un minuto".to_string();
    }

    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{} día{}", days, plural(days)));
    }
    if hours > 0 {
        parts.push(format!("{} hora{}", hours, plural(hours)));
    }
    if minutes > 0 {
        parts.push(format!("{} minuto{}", minutes, plural(minutes)));
    }

    if parts.is_empty() {
        "en menos de un minuto".to_string()
    } else {
        parts.join(", ")
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// "10 de junio"
pub fn format_day_month(date: NaiveDate) -> String {
    format!("{} de {}", date.day(), month_name(date.month()))
}

/// "10 de junio de 2025"
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{} de {} de {}", date.day(), month_name(date.month()), date.year())
}

/// "10/06/2025"
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Day numbers joined the way the announcements phrase them: "5 y 6".
pub fn format_day_list(days: &[NaiveDate]) -> String {
    days.iter()
        .map(|d| d.day().to_string())
        .collect::<Vec<_>>()
        .join(" y ")
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "enero",
        2 => "febrero",
        3 => "marzo",
        4 => "abril",
        5 => "mayo",
        6 => "junio",
        7 => "julio",
        8 => "agosto",
        9 => "septiembre",
        10 => "octubre",
        11 => "noviembre",
        _ => "diciembre",
    }
}

/// Capitalise each whitespace-separated word ("miss fortune" -> "Miss Fortune").
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
