use anyhow::Result;
use httpmock::prelude::*;
use spiderverse_scraper::core::export;
use spiderverse_scraper::core::fetch::FETCH_FAILED_MESSAGE;
use spiderverse_scraper::domain::model::{CharacterBatch, Group};
use spiderverse_scraper::{LocalStorage, ScrapePipeline, ScraperEngine, ScraperError, Settings};
use tempfile::TempDir;

const WIKI_URL: &str = "https://intothespiderverse.fandom.com/wiki/Category:Characters";

const CATEGORY_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>Category:Characters | Into the Spider-Verse Wiki | Fandom</title>
<style>.category-page__member-left { width: 40px; } /* don't <em>wrap</em> */</style>
<script>
  var wgCategories = ["Characters"];
  if (window.innerWidth<1024) { document.body.className += ' compact'; } // it's a small screen
</script>
</head>
<body>
<p>This category's pages are listed below. Note: 1<2.</p>
<div class="category-page__members">
  <div class="category-page__members-wrapper">
    <ul class="category-page__members-for-char">
      <li class="category-page__member">
        <div class="category-page__member-left">
          <img src="data:image/gif;base64,R0lGODlhAQABAIABAAAAAP///yH5BAEAAAEALAAAAAABAAEAQAICTAEAOw%3D%3D"
               data-src="https://vignette.fandom.com/intothespiderverse/images/miles.png/revision/latest?cb=20181210"
               class="category-page__member-thumbnail lazyload" alt="Miles Morales">
        </div>
        <a href="/wiki/Miles_Morales" class="category-page__member-link" title="Miles Morales">Miles Morales</a>
      </li>
      <li class="category-page__member">
        <div class="category-page__member-left">
          <img src="https://cdn.example.org/peni.jpg" class="category-page__member-thumbnail">
        </div>
        <a href="/wiki/Peni_Parker" class="category-page__member-link" title="Peni Parker">Peni Parker</a>
      </li>
      <li class="category-page__member">
        <div class="category-page__member-left"></div>
        <a href="/wiki/Miguel" class="category-page__member-link">Miguel O&#39;Hara</a>
      </li>
      <li class="category-page__member">
        <a href="/wiki/Insomniac" class="category-page__member-link">Spider-Man (Insomniac Game)</a>
      </li>
    </ul>
  </div>
</div>
</body>
</html>"#;

fn settings(proxy: String, output_path: &str) -> Settings {
    Settings {
        wiki_url: WIKI_URL.to_string(),
        proxy_endpoint: proxy,
        output_path: output_path.to_string(),
        stats_seed: Some(2024),
        ..Settings::default()
    }
}

#[tokio::test]
async fn test_end_to_end_scrape_with_real_http() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let proxy_mock = server.mock(|when, then| {
        when.method(GET).path("/raw").query_param("url", WIKI_URL);
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(CATEGORY_PAGE);
    });

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ScrapePipeline::new(storage, settings(server.url("/raw"), &output_path));
    let report = ScraperEngine::new(pipeline).run().await.unwrap();

    proxy_mock.assert();
    assert!(report.output_path.ends_with("spiderverse-characters.csv"));

    let characters = &report.batch.characters;
    assert_eq!(characters.len(), 4);

    assert_eq!(characters[0].display_name, "Earth-1610");
    assert_eq!(
        characters[0].image_url,
        "https://images.weserv.nl/?url=https%3A%2F%2Fvignette.fandom.com%2Fintothespiderverse%2Fimages%2Fmiles.png%2Frevision%2Flatest&w=400&h=600&fit=cover"
    );

    assert_eq!(characters[1].group, Group::Anime);
    assert_eq!(characters[1].image_url, "https://cdn.example.org/peni.jpg");

    assert_eq!(characters[2].hero_name, "Miguel O'Hara");
    assert_eq!(characters[2].display_name, "Earth-928");
    assert_eq!(characters[2].image_url, "/placeholder.svg");

    assert_eq!(characters[3].group, Group::Games);
    assert_eq!(characters[3].display_name, "Earth-1003");

    let csv_path = temp_dir.path().join("spiderverse-characters.csv");
    let csv_text = std::fs::read_to_string(&csv_path).unwrap();
    let rows = export::parse(&csv_text).unwrap();
    assert_eq!(rows.len(), 4);
    for (row, character) in rows.iter().zip(characters) {
        assert_eq!(row, &export::ExportRow::from(character));
    }

    let json_path = temp_dir.path().join("spiderverse-characters.json");
    let snapshot: CharacterBatch =
        serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(&snapshot.characters, characters);
}

#[tokio::test]
async fn test_end_to_end_with_proxy_failure() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let proxy_mock = server.mock(|when, then| {
        when.method(GET).path("/raw");
        then.status(503);
    });

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ScrapePipeline::new(storage, settings(server.url("/raw"), &output_path));
    let result = ScraperEngine::new(pipeline).run().await;

    proxy_mock.assert();
    match result {
        Err(ScraperError::FetchError { message }) => assert_eq!(message, FETCH_FAILED_MESSAGE),
        other => panic!("expected fetch failure, got {:?}", other),
    }
    assert!(!temp_dir.path().join("spiderverse-characters.csv").exists());
}

#[tokio::test]
async fn test_page_without_members_exports_fallback_roster() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/raw");
        then.status(200).body("<html><body><p>Redesigned page</p></body></html>");
    });

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ScrapePipeline::new(storage, settings(server.url("/raw"), &output_path));
    let report = ScraperEngine::new(pipeline).run().await.unwrap();

    let characters = &report.batch.characters;
    assert_eq!(characters.len(), 12);
    let indices: Vec<u32> = characters.iter().map(|c| c.index).collect();
    assert_eq!(indices, (1..=12).collect::<Vec<u32>>());

    let expected = [
        ("Miles Morales", "Earth-1610", Group::Cartoons),
        ("Peter B. Parker", "Earth-616B", Group::Cartoons),
        ("Gwen Stacy (Spider-Gwen)", "Earth-65", Group::Cartoons),
        ("Spider-Man Noir", "Earth-90214", Group::Cartoons),
        ("Peni Parker", "Earth-14512", Group::Anime),
        ("Spider-Ham (Peter Porker)", "Earth-8311", Group::Cartoons),
        ("Miguel O'Hara (Spider-Man 2099)", "Earth-928", Group::Cartoons),
        ("Jessica Drew (Spider-Woman)", "Earth-404", Group::Cartoons),
        ("Hobie Brown (Spider-Punk)", "Earth-138", Group::Cartoons),
        ("Pavitr Prabhakar", "Earth-50101", Group::Cartoons),
        ("Ben Reilly (Scarlet Spider)", "Earth-94", Group::Cartoons),
        ("Cindy Moon (Silk)", "Earth-616", Group::Cartoons),
    ];
    for (character, (hero, universe, group)) in characters.iter().zip(expected) {
        assert_eq!(character.hero_name, hero);
        assert_eq!(character.display_name, universe);
        assert_eq!(character.group, group);
        let stats = character.stats.expect("fallback records carry stats");
        assert!((70..=99).contains(&stats.strength));
    }

    assert!(temp_dir.path().join("spiderverse-characters.csv").exists());
}

/// A saved page is parsed without touching the network
#[tokio::test]
async fn test_saved_page_needs_no_network() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let page_path = temp_dir.path().join("category.html");
    tokio::fs::write(&page_path, CATEGORY_PAGE).await?;
    let output_path = temp_dir.path().join("out").to_str().unwrap().to_string();

    let settings = Settings {
        input_file: Some(page_path.to_str().unwrap().to_string()),
        output_path: output_path.clone(),
        export_filename: "heroes.csv".to_string(),
        stats_seed: Some(1),
        ..Settings::default()
    };

    let storage = LocalStorage::new(output_path.clone());
    let report = ScraperEngine::new(ScrapePipeline::new(storage, settings))
        .run()
        .await?;

    assert_eq!(report.batch.len(), 4);
    assert!(temp_dir.path().join("out").join("heroes.csv").exists());
    assert!(temp_dir.path().join("out").join("heroes.json").exists());
    Ok(())
}
