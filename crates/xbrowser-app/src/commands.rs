//! Line commands understood by the driver.

use anyhow::{Result, bail};
use xbrowser_shell::SurfaceId;

pub const HELP: &str = "\
open <input>   load in the main pane
back | forward | reload | home
tab <input>    open a new tab
tabs           list tabs
focus <id> | close <id> | closeall
bookmark       toggle a bookmark on the main pane's page
bookmarks      list bookmarks
info           browser info
quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(String),
    Back,
    Forward,
    Reload,
    Home,
    Tab(String),
    Tabs,
    Focus(SurfaceId),
    Close(SurfaceId),
    CloseAll,
    Bookmark,
    Bookmarks,
    Info,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let cmd = match word {
            "open" => Self::Open(required(word, rest)?.to_string()),
            "back" => Self::Back,
            "forward" => Self::Forward,
            "reload" => Self::Reload,
            "home" => Self::Home,
            "tab" => Self::Tab(required(word, rest)?.to_string()),
            "tabs" => Self::Tabs,
            "focus" => Self::Focus(SurfaceId::new(required(word, rest)?)),
            "close" => Self::Close(SurfaceId::new(required(word, rest)?)),
            "closeall" => Self::CloseAll,
            "bookmark" => Self::Bookmark,
            "bookmarks" => Self::Bookmarks,
            "info" => Self::Info,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => bail!("unknown command: {other} (try 'help')"),
        };
        Ok(Some(cmd))
    }
}

fn required<'a>(word: &str, rest: &'a str) -> Result<&'a str> {
    if rest.is_empty() {
        bail!("usage: {word} <argument>");
    }
    Ok(rest)
}
