mod app;
mod banner;
mod cli;
mod commands;
mod config;
mod controller;
mod deck;
mod fullscreen;
mod input;
mod render;
mod theme;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }
    cli.run()
}
