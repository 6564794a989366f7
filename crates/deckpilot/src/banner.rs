use colored::Colorize;

pub fn print_banner_with_version() {
    println!(
        "{} {}",
        "deckpilot".cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("{}", "A keyboard-driven slideshow viewer for fixed decks".dimmed());
}
