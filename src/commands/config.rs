use anyhow::Result;
use colored::Colorize;
use hit_dashboard::config::Config;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration after defaults, file and
/// environment have been merged
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying configuration");

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// Loading already validated the configuration; this reports the result
pub fn validate(cfg: &Config) -> Result<()> {
    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  {}: {}", "Hits Endpoint".cyan(), cfg.source.hits_url());
    println!("  {}: {}s", "Timeout".cyan(), cfg.source.timeout_seconds);
    println!("  {}: {}", "Log Level".cyan(), cfg.logging.level);

    info!("Configuration validation successful");
    Ok(())
}
