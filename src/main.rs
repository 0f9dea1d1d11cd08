mod app;
mod cli;
mod domain;
mod infra;
mod relay;
mod ui;
mod usecases;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    ui::install_panic_hook();

    let cli = cli::Cli::parse();
    app::run(cli)
}
