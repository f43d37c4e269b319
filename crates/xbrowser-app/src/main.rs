//! xbrowser headless driver.
//!
//! Reads one command per line from stdin and runs it against the shell
//! core with a host that opens no real windows. Type `help` for the
//! command list.

mod app_state;
mod commands;
mod host;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use app_state::AppState;
use commands::Command;
use xbrowser_shell::BrowserInfo;
use xbrowser_store::FileStore;
use xbrowser_types::config::ShellConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Config from CLI arg or XBROWSER_CONFIG, else defaults.
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("XBROWSER_CONFIG").ok())
    {
        Some(path) => ShellConfig::load(Path::new(&path))
            .with_context(|| format!("loading config from {path}"))?,
        None => ShellConfig::default(),
    };

    let data_dir = std::env::var("XBROWSER_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(".xbrowser"));
    let store = FileStore::open(data_dir.clone())
        .with_context(|| format!("opening data directory {}", data_dir.display()))?;

    let info = BrowserInfo::current();
    log::info!("Starting {} v{} (home {})", info.name, info.version, config.home_url);

    let mut state = AppState::new(&config, Box::new(store))?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "{e}")?;
                continue;
            },
        };
        let quit = cmd == Command::Quit;
        for out in state.execute(cmd) {
            writeln!(stdout, "{out}")?;
        }
        stdout.flush()?;
        if quit {
            break;
        }
    }

    log::info!("Shutting down ({} surfaces open)", state.host.open_count());
    Ok(())
}
