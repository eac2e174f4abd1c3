use clap::Parser;
use spiderverse_scraper::core::analytics::{comparison_table, group_distribution, stat_averages};
use spiderverse_scraper::core::gallery::{self, GalleryAction, GalleryState, MAX_SELECTION};
use spiderverse_scraper::domain::model::{Character, StatKind};
use spiderverse_scraper::utils::{logger, validation::Validate};
use spiderverse_scraper::{CliConfig, LocalStorage, ScrapePipeline, ScraperEngine, ScraperError};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting spiderverse-scraper");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    let storage = LocalStorage::new(settings.output_path.clone());
    let pipeline = ScrapePipeline::new(storage, settings);
    let engine = ScraperEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            println!("✅ Scraped {} characters", report.batch.len());
            println!("📁 Output saved to: {}", report.output_path);
            print_gallery(&cli, &report.batch.characters);
        }
        Err(e) => exit_with(&e),
    }
}

fn exit_with(e: &ScraperError) -> ! {
    tracing::error!("❌ Scrape failed: {} (Severity: {:?})", e, e.severity());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn print_gallery(cli: &CliConfig, characters: &[Character]) {
    let mut state = gallery::reduce(&GalleryState::default(), GalleryAction::ReplaceBatch);
    state = gallery::reduce(&state, GalleryAction::Search(cli.search.clone()));
    state = gallery::reduce(&state, GalleryAction::Filter(cli.group));
    for index in &cli.select {
        state = gallery::reduce(&state, GalleryAction::ToggleSelect(*index));
    }
    if cli.select.len() > MAX_SELECTION {
        tracing::warn!("Only the first {} selected characters are compared", MAX_SELECTION);
    }

    let shown = gallery::visible(&state, characters);
    println!();
    println!("Gallery ({} of {}, group: {})", shown.len(), characters.len(), state.group_filter);
    for character in shown {
        let mark = if state.is_selected(character.index) { "*" } else { " " };
        let total = character.stats.map_or(0, |s| s.total());
        println!(
            "{} {:>3}  {:<36} {:<12} {:<9} {:>3}",
            mark, character.index, character.hero_name, character.display_name, character.group, total
        );
    }

    let picked = gallery::selected(&state, characters);
    if !picked.is_empty() {
        let table = comparison_table(&picked);
        println!();
        println!("Comparison ({}/{})", picked.len(), MAX_SELECTION);
        println!("{:<14} {}  | leader", "", table.heroes.join(" | "));
        for (kind, row) in StatKind::ALL.into_iter().zip(&table.rows) {
            let values: Vec<String> = row.values.iter().map(u8::to_string).collect();
            let leader = table.leader(kind).unwrap_or("-");
            println!("{:<14} {}  | {}", row.stat, values.join(" | "), leader);
        }
    }

    println!();
    println!("Groups");
    for share in group_distribution(characters) {
        println!("  {:<10} {:>3} ({}%)", share.group, share.count, share.percent);
    }

    let averages = stat_averages(characters);
    if !averages.is_empty() {
        println!("Average stats");
        for average in averages {
            println!("  {:<14} {:.1}", average.stat, average.average);
        }
    }
}
