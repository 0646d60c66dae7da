//! Patch-notes article types as returned by the news-site scraper.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The most recent patch-notes article on the news feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatchArticle {
    pub title: String,
    pub url: String,
    /// Publication date when the feed exposes one.
    pub published: Option<NaiveDate>,
}

impl PatchArticle {
    /// Whether the article URL carries a date token matching `date` or the
    /// previous day (the site publishes against UTC, the calendar is local).
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        let previous = date.pred_opt().unwrap_or(date);
        self.url.contains(&date.to_string()) || self.url.contains(&previous.to_string())
    }
}

/// All change blocks for one champion in a patch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChampionChanges {
    pub name: String,
    pub portrait_url: Option<String>,
    pub summary: String,
    pub blocks: Vec<ChangeBlock>,
}

/// One titled block of changes (an ability, base stats, an item, a rune).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeBlock {
    pub title: String,
    pub icon_url: Option<String>,
    #[serde(default)]
    pub summary: String,
    pub changes: Vec<String>,
}

/// Non-champion sections of the patch notes that can be looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchSection {
    Items,
    Runes,
}

impl PatchSection {
    /// The HTML anchor id of the section header in the published notes.
    pub fn anchor_id(self) -> &'static str {
        match self {
            Self::Items => "patch-items",
            Self::Runes => "patch-runes",
        }
    }
}
