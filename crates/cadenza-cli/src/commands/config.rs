use anyhow::Result;
use cadenza_fetch::{config, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let config_path = config::config_file_path();
    println!("Config file: {}", config_path.display());
    let exists = config_path.exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  cache_dir: {}", config.cache_dir.display());
    println!("  catalog_base_url: {}", config.catalog_base_url);
    println!("  chart_playlist_id: {}", config.chart_playlist_id);
    println!("  cooldown_secs: {}", config.cooldown_secs);
    println!("  lyrics_base_url: {}", config.lyrics_base_url);
    println!("  wiki_stats_base_url: {}", config.wiki_stats_base_url);
    println!("  wiki_api_url: {}", config.wiki_api_url);
    println!("  logging.level: {}", config.logging.level);
    println!("  logging.coloured: {}", config.logging.coloured);

    println!("\nPriority: CLI args > ENV vars (CADENZA_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure cadenza.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
