// LeConseil binary entrypoint

use clap::Parser;
use lecomptoir::cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
