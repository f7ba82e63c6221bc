use std::io::IsTerminal;
use std::path::PathBuf;

use crate::cli::parser::Cli;
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::Config;
use crate::errors::AppResult;
use crate::storage::Stores;
use crate::ui::prompt::{AutoConfirm, Prompter, StdinPrompter};
use crate::utils::date::today;
use chrono::NaiveDate;

/// Everything a command needs, built once per invocation.
pub struct Context {
    pub cfg: Config,
    pub config_path: PathBuf,
    pub stores: Stores,
    pub clock: Box<dyn Clock>,
    /// A pinned clock means a scripted run: no live timer.
    pub scripted: bool,
}

/// Config file selected by `--config`, or the platform default.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_file)
}

impl Context {
    pub fn load(cli: &Cli) -> AppResult<Self> {
        let config_path = config_path(cli);
        let mut cfg = Config::load_from(&config_path)?;
        if let Some(dir) = &cli.data_dir {
            cfg.data_directory = dir.clone();
        }

        let stores = Stores::open(&cfg.data_dir());
        let clock: Box<dyn Clock> = match cli.now {
            Some(now) => Box::new(FixedClock::at(now)),
            None => Box::new(SystemClock),
        };

        Ok(Self {
            cfg,
            config_path,
            stores,
            clock,
            scripted: cli.now.is_some(),
        })
    }

    pub fn today(&self) -> NaiveDate {
        today(self.clock.now(), self.cfg.tz())
    }

    /// Whether a live display makes sense for this run.
    pub fn interactive(&self) -> bool {
        !self.scripted && std::io::stdout().is_terminal()
    }
}

/// `--yes` answers every confirmation; otherwise ask on the terminal.
pub fn prompter(yes: bool) -> Box<dyn Prompter> {
    if yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(StdinPrompter)
    }
}
