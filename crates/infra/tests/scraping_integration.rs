//! End-to-end scraper tests against a mock news site.

use std::time::Duration;

use poroherald_core::PatchFeed;
use poroherald_domain::{HeraldError, PatchSection};
use poroherald_infra::{HttpClient, LolNewsClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = r#"
    <html><body>
      <a href="/es-mx/news/game-updates/patch-25-12-notes/">
        <div data-testid="card-title">Notas de la versión 25.12</div>
        <time datetime="2025-06-10T17:00:00.000Z">10/6/2025</time>
      </a>
    </body></html>
"#;

const ARTICLE: &str = r##"
    <html><body>
      <a class="cboxElement" href="#"><img src="https://cdn.example.com/summary.jpg"></a>
      <a href="/es-mx/champions/ahri/">Ahri</a>

      <a class="reference-link" href="#"><img src="https://cdn.example.com/ahri.png"></a>
      <h3 id="patch-ahri">Ahri</h3>
      <blockquote>Ajustes de poder.</blockquote>
      <h4 class="change-detail-title">Q - Orbe del Engaño</h4>
      <ul><li><strong>Daño:</strong> 40 ⇒ 50</li></ul>

      <header><h2 id="patch-items">Objetos</h2></header>
      <div>
        <h3 class="change-title">Filo Infinito</h3>
        <ul><li>Daño: 70 ⇒ 65</li></ul>
      </div>
      <header><h2 id="patch-bugfixes">Errores</h2></header>
    </body></html>
"##;

async fn mock_site() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/es-mx/news/tags/patch-notes/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/es-mx/news/game-updates/patch-25-12-notes/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE))
        .mount(&server)
        .await;

    server
}

fn client(server: &MockServer) -> LolNewsClient {
    let http = HttpClient::builder().max_attempts(1).build().expect("http client");
    LolNewsClient::with_base_url(http, server.uri())
}

#[tokio::test]
async fn latest_patch_resolves_against_the_feed() {
    let server = mock_site().await;
    let client = client(&server);

    let article = client.latest_patch().await.unwrap().expect("article");
    assert_eq!(article.title, "Notas de la versión 25.12");
    assert!(article.url.starts_with(&server.uri()));
    assert!(article.url.ends_with("/patch-25-12-notes/"));
}

#[tokio::test]
async fn article_lookups_share_the_fetched_url() {
    let server = mock_site().await;
    let client = client(&server);

    let article = client.latest_patch().await.unwrap().expect("article");

    let image = client.summary_image(&article.url).await.unwrap();
    assert_eq!(image.as_deref(), Some("https://cdn.example.com/summary.jpg"));

    let champions = client.champion_list(&article.url).await.unwrap();
    assert_eq!(champions, vec!["Ahri"]);

    let changes = client.champion_changes(&article.url, "ahri").await.unwrap().expect("changes");
    assert_eq!(changes.blocks.len(), 1);
    assert_eq!(changes.portrait_url.as_deref(), Some("https://cdn.example.com/ahri.png"));

    let items = client.section_changes(&article.url, PatchSection::Items).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Filo Infinito");

    let runes = client.section_changes(&article.url, PatchSection::Runes).await.unwrap();
    assert!(runes.is_empty());
}

#[tokio::test]
async fn feed_errors_map_to_network_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.latest_patch().await.unwrap_err();
    assert!(matches!(err, HeraldError::Network(_)));
}

#[tokio::test]
async fn slow_feed_times_out_instead_of_stalling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(LISTING)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let http = HttpClient::builder()
        .timeout(Duration::from_millis(50))
        .max_attempts(1)
        .build()
        .expect("http client");
    let client = LolNewsClient::with_base_url(http, server.uri());

    let err = client.latest_patch().await.unwrap_err();
    assert!(matches!(err, HeraldError::Network(_)));
}
