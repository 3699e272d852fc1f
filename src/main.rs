use std::io::stdout;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};

use slide48::engine::Session;

mod app;
mod cli;
mod tui;

use app::App;
use cli::Cli;
use tui::crossterm::{Crossterm, CrosstermEvents};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.setup_logging()?;

    let session = match cli.seed {
        Some(seed) => {
            log::info!("seeding tile placement with {}", seed);
            Session::new(StdRng::seed_from_u64(seed))
        }
        None => Session::new(thread_rng()),
    };

    let w = stdout().lock();
    let renderer = Crossterm::new(w)?;
    let event_source = CrosstermEvents::default();
    let session = App::new(session, renderer, event_source).run()?;

    println!(
        "final score {}, best tile {}",
        session.score(),
        session.state().board().max_tile()
    );
    Ok(())
}
