//! Scraper for the patch-notes pages of the official news site.
//!
//! Fetching and parsing are split: every `parse_*` helper is a pure function
//! over an HTML string so the selector logic stays testable with fixture
//! markup. The published page structure this mirrors:
//!
//! - article list: `<a href="..../news/game-updates/patch-...">` with a
//!   `div[data-testid="card-title"]` title and a `<time datetime>` stamp
//! - summary graphic: `<a class="cboxElement"><img src></a>`
//! - champion sections: `<h3 id="patch-{name}">` followed by an optional
//!   `<blockquote>` summary and `<h4 class="change-detail-title">` blocks
//! - item/rune sections: `<h2 id="patch-items|patch-runes">` containing
//!   `change-title` blocks

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use poroherald_core::PatchFeed;
use poroherald_domain::constants::{NEWS_BASE_URL, PATCH_LIST_URL};
use poroherald_domain::{
    ChampionChanges, ChangeBlock, HeraldError, PatchArticle, PatchSection, Result,
};
use reqwest::Method;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::errors::InfraError;
use crate::http::HttpClient;

/// [`PatchFeed`] implementation scraping the live news site.
pub struct LolNewsClient {
    http: HttpClient,
    list_url: String,
    base_url: String,
}

impl LolNewsClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http, list_url: PATCH_LIST_URL.to_string(), base_url: NEWS_BASE_URL.to_string() }
    }

    /// Point the client at a different feed root (used by tests).
    pub fn with_base_url(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let list_url = format!("{base_url}/es-mx/news/tags/patch-notes/");
        Self { http, list_url, base_url }
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.http.send(self.http.request(Method::GET, url)).await?;
        let response =
            response.error_for_status().map_err(InfraError::from).map_err(HeraldError::from)?;
        response.text().await.map_err(InfraError::from).map_err(HeraldError::from)
    }
}

#[async_trait]
impl PatchFeed for LolNewsClient {
    async fn latest_patch(&self) -> Result<Option<PatchArticle>> {
        let html = self.fetch_html(&self.list_url).await?;
        Ok(parse_latest_article(&html, &self.base_url))
    }

    async fn summary_image(&self, patch_url: &str) -> Result<Option<String>> {
        let html = self.fetch_html(patch_url).await?;
        Ok(parse_summary_image(&html))
    }

    async fn champion_list(&self, patch_url: &str) -> Result<Vec<String>> {
        let html = self.fetch_html(patch_url).await?;
        Ok(parse_champion_list(&html))
    }

    async fn champion_changes(
        &self,
        patch_url: &str,
        champion: &str,
    ) -> Result<Option<ChampionChanges>> {
        let html = self.fetch_html(patch_url).await?;
        Ok(parse_champion_changes(&html, champion))
    }

    async fn section_changes(
        &self,
        patch_url: &str,
        section: PatchSection,
    ) -> Result<Vec<ChangeBlock>> {
        let html = self.fetch_html(patch_url).await?;
        Ok(parse_section_changes(&html, section.anchor_id()))
    }
}

/// First patch-notes article on the listing page.
pub(crate) fn parse_latest_article(html: &str, base_url: &str) -> Option<PatchArticle> {
    let document = Html::parse_document(html);

    let link_sel = Selector::parse(r#"a[href*="/news/game-updates/patch-"]"#).ok()?;
    let title_sel = Selector::parse(r#"div[data-testid="card-title"]"#).ok()?;
    let time_sel = Selector::parse("time").ok()?;

    let link = document.select(&link_sel).next()?;
    let href = link.value().attr("href")?;

    let title = link
        .select(&title_sel)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| element_text(link));

    let published = link
        .select(&time_sel)
        .next()
        .and_then(|time| time.value().attr("datetime"))
        .and_then(parse_datetime_attr);

    Some(PatchArticle { title, url: absolute_url(href, base_url), published })
}

/// Summary-graphic URL inside a patch-notes article.
pub(crate) fn parse_summary_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let link_sel = Selector::parse("a.cboxElement").ok()?;
    let img_sel = Selector::parse("img").ok()?;

    let link = document.select(&link_sel).next()?;
    let img = link.select(&img_sel).next()?;
    img.value().attr("src").map(str::to_string)
}

/// Champion names linked from a patch-notes article, deduplicated in order.
pub(crate) fn parse_champion_list(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(link_sel) = Selector::parse(r#"a[href*="/champions/"]"#) else {
        return Vec::new();
    };

    let mut names = Vec::new();
    for link in document.select(&link_sel) {
        let name = element_text(link);
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// All change blocks for one champion.
pub(crate) fn parse_champion_changes(html: &str, champion: &str) -> Option<ChampionChanges> {
    let document = Html::parse_document(html);

    let target_id = format!("patch-{}", normalize_champion(champion));
    let header_sel = Selector::parse(&format!(r#"h3[id="{target_id}"]"#)).ok()?;
    let img_sel = Selector::parse("img").ok()?;

    let header = document.select(&header_sel).next()?;

    let mut changes = ChampionChanges {
        name: poroherald_core::text::title_case(champion),
        portrait_url: find_preceding_reference_icon(&document, header, &img_sel),
        summary: String::new(),
        blocks: Vec::new(),
    };

    // Walk the header's following siblings: the first blockquote is the
    // summary, each change-detail-title h4 opens a block, the next h3 ends
    // this champion's section.
    let mut pending_header: Option<ElementRef<'_>> = None;
    for sibling in header.next_siblings() {
        let Some(element) = ElementRef::wrap(sibling) else {
            continue;
        };
        let tag = element.value().name();

        if tag == "h3" {
            break;
        }
        if tag == "blockquote" && changes.summary.is_empty() && changes.blocks.is_empty() {
            changes.summary = element_text(element);
            continue;
        }
        if tag == "h4" && has_class(element, "change-detail-title") {
            if let Some(open) = pending_header.take() {
                changes.blocks.push(block_from_header(open, &img_sel, None));
            }
            pending_header = Some(element);
            continue;
        }
        if tag == "ul" {
            if let Some(open) = pending_header.take() {
                changes.blocks.push(block_from_header(open, &img_sel, Some(element)));
            }
        }
    }
    if let Some(open) = pending_header.take() {
        changes.blocks.push(block_from_header(open, &img_sel, None));
    }

    Some(changes)
}

/// Change blocks of a non-champion section (`patch-items`, `patch-runes`).
pub(crate) fn parse_section_changes(html: &str, anchor_id: &str) -> Vec<ChangeBlock> {
    let document = Html::parse_document(html);

    let Ok(header_sel) = Selector::parse(&format!(r#"h2[id="{anchor_id}"]"#)) else {
        return Vec::new();
    };
    let Ok(h2_sel) = Selector::parse("h2") else {
        return Vec::new();
    };
    let Ok(title_sel) = Selector::parse("h3.change-title, h4.change-title") else {
        return Vec::new();
    };
    let Ok(img_sel) = Selector::parse("img") else {
        return Vec::new();
    };

    let Some(main_header) = document.select(&header_sel).next() else {
        return Vec::new();
    };

    // Section headers are usually wrapped in a <header>; iterate siblings of
    // the wrapper so the section content is actually reachable.
    let iterate_from = main_header
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|parent| parent.value().name() == "header")
        .unwrap_or(main_header);

    let mut blocks = Vec::new();
    for sibling in iterate_from.next_siblings() {
        let Some(element) = ElementRef::wrap(sibling) else {
            continue;
        };
        let tag = element.value().name();

        // The next top-level section ends this one.
        if tag == "h2" || (tag == "header" && element.select(&h2_sel).next().is_some()) {
            break;
        }

        for item_header in element.select(&title_sel) {
            blocks.push(section_block_from_header(&document, item_header, &img_sel));
        }
    }
    blocks
}

fn section_block_from_header(
    document: &Html,
    item_header: ElementRef<'_>,
    img_sel: &Selector,
) -> ChangeBlock {
    let mut block = ChangeBlock {
        title: element_text(item_header),
        icon_url: find_preceding_reference_icon(document, item_header, img_sel),
        summary: String::new(),
        changes: Vec::new(),
    };

    // The summary blockquote sometimes follows the change list, so keep
    // scanning until the next item header rather than stopping at the first
    // match.
    for sibling in item_header.next_siblings() {
        let Some(element) = ElementRef::wrap(sibling) else {
            continue;
        };
        match element.value().name() {
            "h3" | "h4" => break,
            "blockquote" => block.summary = element_text(element),
            "ul" => block.changes = change_lines(element),
            _ => {}
        }
    }
    block
}

fn block_from_header(
    header: ElementRef<'_>,
    img_sel: &Selector,
    list: Option<ElementRef<'_>>,
) -> ChangeBlock {
    ChangeBlock {
        title: element_text(header),
        icon_url: header
            .select(img_sel)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string),
        summary: String::new(),
        changes: list.map(change_lines).unwrap_or_default(),
    }
}

/// Bullet lines of a change list, bolding the `<strong>` lead-ins and
/// spacing the before/after arrows.
fn change_lines(list: ElementRef<'_>) -> Vec<String> {
    let Ok(li_sel) = Selector::parse("li") else {
        return Vec::new();
    };

    list.select(&li_sel).map(|li| format!("• {}", format_change_line(li))).collect()
}

fn format_change_line(li: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    for child in li.children() {
        if let Some(element) = ElementRef::wrap(child) {
            if element.value().name() == "strong" {
                parts.push(format!("**{}**", element_text(element)));
            }
        } else if let Some(text) = child.value().as_text() {
            let spaced = text.replace('⇒', " ⇒ ");
            let trimmed = spaced.trim().to_string();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }
    }
    parts.join(" ")
}

/// Last `a.reference-link img` preceding `target` in document order. The
/// page puts each portrait/icon link right before the header it decorates.
fn find_preceding_reference_icon(
    document: &Html,
    target: ElementRef<'_>,
    img_sel: &Selector,
) -> Option<String> {
    let mut last_icon = None;
    for node in document.root_element().descendants() {
        if node.id() == target.id() {
            break;
        }
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if element.value().name() == "a" && has_class(element, "reference-link") {
            if let Some(src) =
                element.select(img_sel).next().and_then(|img| img.value().attr("src"))
            {
                last_icon = Some(src.to_string());
            }
        }
    }
    last_icon
}

fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Champion names map onto header ids by lowercasing and dropping spaces,
/// dots and apostrophes ("Dr. Mundo" -> "patch-drmundo").
fn normalize_champion(name: &str) -> String {
    name.to_lowercase().chars().filter(|c| !matches!(c, ' ' | '.' | '\'')).collect()
}

fn absolute_url(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{base_url}{href}")
    }
}

fn parse_datetime_attr(raw: &str) -> Option<NaiveDate> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(stamp) => Some(stamp.date_naive()),
        Err(err) => {
            debug!(raw, error = %err, "unparseable article timestamp");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
          <a href="/es-mx/news/game-updates/patch-25-12-notes/">
            <div data-testid="card-title">Notas de la versión 25.12</div>
            <time datetime="2025-06-10T17:00:00.000Z">10/6/2025</time>
          </a>
          <a href="/es-mx/news/game-updates/patch-25-11-notes/">
            <div data-testid="card-title">Notas de la versión 25.11</div>
          </a>
        </body></html>
    "#;

    const ARTICLE: &str = r##"
        <html><body>
          <a class="cboxElement" href="#"><img src="https://cdn.example.com/summary.jpg"></a>
          <a href="/es-mx/champions/ahri/">Ahri</a>
          <a href="/es-mx/champions/braum/">Braum</a>
          <a href="/es-mx/champions/ahri/">Ahri</a>

          <div>
            <a class="reference-link" href="#"><img src="https://cdn.example.com/ahri-portrait.png"></a>
            <h3 id="patch-ahri">Ahri</h3>
            <blockquote>Ajustes de poder en mid.</blockquote>
            <h4 class="change-detail-title"><img src="https://cdn.example.com/q.png"> Q - Orbe del Engaño</h4>
            <ul>
              <li><strong>Daño:</strong> 40/65/90 ⇒ 50/75/100</li>
              <li>Costo de maná: 55 ⇒ 50</li>
            </ul>
            <h4 class="change-detail-title">Estadísticas base</h4>
            <ul>
              <li><strong>Armadura:</strong> 18 ⇒ 21</li>
            </ul>
            <h3 id="patch-braum">Braum</h3>
            <blockquote>Otro campeón.</blockquote>
          </div>

          <header><h2 id="patch-items">Objetos</h2></header>
          <div>
            <a class="reference-link" href="#"><img src="https://cdn.example.com/item.png"></a>
            <h3 class="change-title">Filo Infinito</h3>
            <ul><li>Daño de ataque: 70 ⇒ 65</li></ul>
            <blockquote>Menos poder de picos tardíos.</blockquote>
          </div>
          <header><h2 id="patch-runes">Runas</h2></header>
          <div>
            <h4 class="change-title">Electrocutar</h4>
            <blockquote>Un poco más de chispa.</blockquote>
            <ul><li>Daño base: 30 ⇒ 40</li></ul>
          </div>
          <header><h2 id="patch-bugfixes">Errores</h2></header>
        </body></html>
    "##;

    #[test]
    fn latest_article_extracts_title_url_and_date() {
        let article =
            parse_latest_article(LISTING, "https://www.leagueoflegends.com").unwrap();

        assert_eq!(article.title, "Notas de la versión 25.12");
        assert_eq!(
            article.url,
            "https://www.leagueoflegends.com/es-mx/news/game-updates/patch-25-12-notes/"
        );
        assert_eq!(article.published, NaiveDate::from_ymd_opt(2025, 6, 10));
    }

    #[test]
    fn latest_article_is_none_without_patch_links() {
        assert!(parse_latest_article("<html><body></body></html>", "https://x").is_none());
    }

    #[test]
    fn summary_image_comes_from_cbox_link() {
        assert_eq!(
            parse_summary_image(ARTICLE).as_deref(),
            Some("https://cdn.example.com/summary.jpg")
        );
        assert!(parse_summary_image("<html></html>").is_none());
    }

    #[test]
    fn champion_list_dedupes_preserving_order() {
        assert_eq!(parse_champion_list(ARTICLE), vec!["Ahri", "Braum"]);
    }

    #[test]
    fn champion_changes_collects_blocks_until_next_champion() {
        let changes = parse_champion_changes(ARTICLE, "ahri").unwrap();

        assert_eq!(changes.name, "Ahri");
        assert_eq!(changes.portrait_url.as_deref(), Some("https://cdn.example.com/ahri-portrait.png"));
        assert_eq!(changes.summary, "Ajustes de poder en mid.");
        assert_eq!(changes.blocks.len(), 2);

        assert_eq!(changes.blocks[0].title, "Q - Orbe del Engaño");
        assert_eq!(changes.blocks[0].icon_url.as_deref(), Some("https://cdn.example.com/q.png"));
        assert_eq!(
            changes.blocks[0].changes,
            vec!["• **Daño:** 40/65/90  ⇒  50/75/100", "• Costo de maná: 55  ⇒  50"]
        );

        assert_eq!(changes.blocks[1].title, "Estadísticas base");
        assert!(changes.blocks[1].icon_url.is_none());
    }

    #[test]
    fn unknown_champion_yields_none() {
        assert!(parse_champion_changes(ARTICLE, "teemo").is_none());
    }

    #[test]
    fn champion_names_normalise_to_header_ids() {
        assert_eq!(normalize_champion("Dr. Mundo"), "drmundo");
        assert_eq!(normalize_champion("Kai'Sa"), "kaisa");
        assert_eq!(normalize_champion("Miss Fortune"), "missfortune");
    }

    #[test]
    fn items_section_stops_before_next_section() {
        let blocks = parse_section_changes(ARTICLE, "patch-items");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Filo Infinito");
        assert_eq!(blocks[0].icon_url.as_deref(), Some("https://cdn.example.com/item.png"));
        // The summary blockquote follows the list on this page
        assert_eq!(blocks[0].summary, "Menos poder de picos tardíos.");
        assert_eq!(blocks[0].changes, vec!["• Daño de ataque: 70  ⇒  65"]);
    }

    #[test]
    fn runes_section_parses_independently() {
        let blocks = parse_section_changes(ARTICLE, "patch-runes");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Electrocutar");
        assert_eq!(blocks[0].summary, "Un poco más de chispa.");
    }

    #[test]
    fn missing_section_is_empty() {
        assert!(parse_section_changes(ARTICLE, "patch-missing").is_empty());
    }
}
