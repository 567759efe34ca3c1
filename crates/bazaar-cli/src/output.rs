//! Terminal output formatting.

use bazaar_db::ChangeEvent;
use bazaar_web::ServerConfig;
use colored::Colorize;

/// Startup banner for `bazaar serve`.
pub fn print_banner(config: &ServerConfig, store: &str) {
    let addr = config.bind_addr();
    println!();
    println!("  {} {}", "Bazaar".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}        http://{}", "API".green(), addr);
    println!("  {}  ws://{}/ws", "WebSocket".green(), addr);
    println!("  {}      {}", "Store".green(), store);
    println!("  {}     {}", "Public".green(), config.public_url);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();
}

pub fn print_sent(event: &ChangeEvent) {
    println!(
        "{} {} {}",
        "✓".green(),
        event.entity().to_string().cyan(),
        event.action().to_string().bold()
    );
}
