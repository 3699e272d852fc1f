use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use slide48::error::Result;

/// Slide tiles around a 4x4 board, merge equal ones and try to reach 2048.
#[derive(Debug, Parser)]
#[command(name = "slide48", version, about)]
pub(crate) struct Cli {
    /// Seed for tile placement; games with the same seed and moves play out identically.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Where to write the log, since the game takes over the terminal.
    #[arg(long, default_value = "./slide48.log")]
    pub(crate) log_file: PathBuf,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,
}

impl Cli {
    pub(crate) fn setup_logging(&self) -> Result<()> {
        fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {}] {}",
                    record.level(),
                    record.target(),
                    message,
                ))
            })
            .level(self.verbose.log_level_filter())
            .chain(fern::log_file(&self.log_file)?)
            .apply()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["slide48"]).unwrap();
        assert_eq!(cli.seed, None);
        assert_eq!(cli.log_file, PathBuf::from("./slide48.log"));
        assert_eq!(cli.verbose.log_level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn flags() {
        let cli =
            Cli::try_parse_from(["slide48", "--seed", "7", "--log-file", "/tmp/s.log", "-vv"])
                .unwrap();
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.log_file, PathBuf::from("/tmp/s.log"));
        assert_eq!(cli.verbose.log_level_filter(), log::LevelFilter::Trace);

        let quiet = Cli::try_parse_from(["slide48", "-qqq"]).unwrap();
        assert_eq!(quiet.verbose.log_level_filter(), log::LevelFilter::Off);
    }

    #[test]
    fn seed_must_be_a_number() {
        assert!(Cli::try_parse_from(["slide48", "--seed", "abc"]).is_err());
    }
}
