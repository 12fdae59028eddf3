use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use library_view::controller::ScreenScope;
use library_view::logging;
use library_view::model::{InMemoryLibraryStore, InMemoryPlayback, SectionItems};
use library_view::view::HomeScreen;
use library_view::ViewConfig;

const DEFAULT_CATALOG: &str = "catalog.json";
const DEFAULT_CONFIG: &str = "library-view.json";
const FIRST_STATE_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== library-view starting ===");

    let mut args = std::env::args().skip(1);
    let catalog_path = args.next().unwrap_or_else(|| DEFAULT_CATALOG.to_string());
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let config = ViewConfig::load(&config_path)
        .with_context(|| format!("Failed to read config {}", config_path))?;
    let store = InMemoryLibraryStore::load_catalog_file(&catalog_path)
        .await
        .with_context(|| format!("Failed to load catalog {}", catalog_path))?;
    let store = Arc::new(store);
    let playback = Arc::new(InMemoryPlayback::new());

    let app_scope = ScreenScope::root("app");
    let home = HomeScreen::open(store, playback, &config, &app_scope);

    let mut sections = home.sections();
    let sections = tokio::time::timeout(
        FIRST_STATE_TIMEOUT,
        sections.wait_for(|s| !s.is_empty()),
    )
    .await
    .ok()
    .flatten()
    .unwrap_or_default();

    println!("Home");
    for section in &sections {
        println!("  {} ({} items)", section.title_key, section.items.len());
        match &section.items {
            SectionItems::Albums(albums) => {
                for album in albums {
                    println!("    {} - {}", album.title, album.artist_name);
                }
            }
            SectionItems::Artists(artists) => {
                for artist in artists {
                    println!("    {}", artist.name);
                }
            }
            SectionItems::Songs(songs) => {
                for song in songs {
                    println!("    {} - {}", song.title, song.artist_name);
                }
            }
        }
    }

    let mix = home.refresh_smart_mix().await.unwrap_or_default();
    println!("Smart mix ({} songs)", mix.len());
    for song in &mix {
        println!("    {} - {}", song.title, song.artist_name);
    }

    let suggestions = home.suggestions().get();
    println!(
        "Suggestions ({} songs, {} columns)",
        suggestions.len(),
        home.grid_columns()
    );

    home.close();
    app_scope.close();
    tracing::info!("library-view shutting down");
    Ok(())
}
