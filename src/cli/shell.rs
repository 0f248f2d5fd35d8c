//! Interactive session with periodic background sync
//!
//! One thread owns the store. User input lines and sync ticks arrive on
//! crossbeam channels and are handled one event at a time by a `select!`
//! loop, so a sync can never interleave with an add or an import. The store
//! is reloaded before each command to pick up writes from one-shot commands.
//!
//! The session store (and with it the last displayed quote) is dropped when
//! the session ends.

use crate::application::{add_quote, export_quotes, import_quotes, QuoteStore, SyncService};
use crate::application::transfer::DEFAULT_EXPORT_FILE;
use crate::cli::output::{
    format_category_list, format_filtered, format_last_quote, format_quote_list,
    format_sync_report, NO_QUOTES_AVAILABLE,
};
use crate::domain::CategoryFilter;
use crate::error::{QuotebookError, Result};
use crate::infrastructure::{KeyValueStore, RemoteSource};
use crossbeam_channel::{never, select, unbounded, Receiver};
use log::{debug, error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

const HELP: &str = "\
Commands:
  add <category> <text...>   Add a quote
  random                     Show a random quote from the selected category
  filter <category|all>      Select a category and show its first quote
  categories                 List categories
  list                       List quotes in the selected category
  last                       Show the last displayed quote
  sync                       Sync with the server now
  export [path]              Export quotes as JSON (default: quotes.json)
  import <path>              Import quotes from a JSON file
  help                       Show this help
  quit                       Leave the session";

/// A parsed shell input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add { category: String, text: String },
    Random,
    Filter(CategoryFilter),
    Categories,
    List,
    Last,
    Sync,
    Export(PathBuf),
    Import(PathBuf),
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "add" => {
                let (category, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                ShellCommand::Add {
                    category: category.to_string(),
                    text: text.trim().to_string(),
                }
            }
            "random" | "new" => ShellCommand::Random,
            "filter" => {
                if rest.is_empty() {
                    return Err(usage("filter <category|all>"));
                }
                ShellCommand::Filter(CategoryFilter::from(rest))
            }
            "categories" => ShellCommand::Categories,
            "list" => ShellCommand::List,
            "last" => ShellCommand::Last,
            "sync" => ShellCommand::Sync,
            "export" => ShellCommand::Export(PathBuf::from(if rest.is_empty() {
                DEFAULT_EXPORT_FILE
            } else {
                rest
            })),
            "import" => {
                if rest.is_empty() {
                    return Err(usage("import <path>"));
                }
                ShellCommand::Import(PathBuf::from(rest))
            }
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => {
                return Err(QuotebookError::Validation(format!(
                    "Unknown command: '{}'. Type 'help' for a list of commands.",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

fn usage(syntax: &str) -> QuotebookError {
    QuotebookError::Validation(format!("Usage: {}", syntax))
}

enum Flow {
    Continue,
    Quit,
}

/// Interactive session owning the store and the sync service
pub struct ShellSession<P: KeyValueStore, R: RemoteSource> {
    store: QuoteStore<P>,
    sync: SyncService<R>,
    post_new_quotes: bool,
}

impl<P: KeyValueStore, R: RemoteSource> ShellSession<P, R> {
    pub fn new(store: QuoteStore<P>, remote: R, post_new_quotes: bool) -> Self {
        ShellSession {
            store,
            sync: SyncService::new(remote),
            post_new_quotes,
        }
    }

    pub fn store(&self) -> &QuoteStore<P> {
        &self.store
    }

    /// Process input lines and sync ticks until `quit` or end of input
    pub fn run<W: Write>(
        &mut self,
        lines: &Receiver<String>,
        ticks: &Receiver<Instant>,
        out: &mut W,
    ) -> Result<()> {
        self.show_selection(out)?;
        writeln!(out, "Type 'help' for commands.")?;

        let mut ticks = ticks.clone();
        loop {
            select! {
                recv(lines) -> line => {
                    let Ok(line) = line else {
                        debug!("Input closed");
                        break;
                    };
                    match self.execute_line(&line, out) {
                        Ok(Flow::Continue) => {}
                        Ok(Flow::Quit) => break,
                        Err(e) => writeln!(out, "Error: {}", e.display_with_suggestions())?,
                    }
                }
                recv(ticks) -> tick => {
                    if tick.is_err() {
                        ticks = never();
                        continue;
                    }
                    self.periodic_sync(out)?;
                }
            }
        }

        out.flush()?;
        info!("Shell session ended");
        Ok(())
    }

    /// Show the first quote of the persisted selection
    fn show_selection<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let selected = self.store.selected_category()?;
        let matching = self.store.apply_filter(&selected)?;
        writeln!(out, "{}", format_filtered(&matching))?;
        Ok(())
    }

    fn periodic_sync<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match self.sync.run(&mut self.store) {
            Ok(report) if report.changed => {
                writeln!(out, "{}", format_sync_report(&report))?;
                self.show_selection(out)?;
            }
            Ok(_) => {}
            Err(e) => error!("Periodic sync failed: {}", e),
        }
        Ok(())
    }

    fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let Some(command) = ShellCommand::parse(line)? else {
            return Ok(Flow::Continue);
        };

        // One-shot commands may have written since the last line
        self.store.reload()?;

        match command {
            ShellCommand::Add { category, text } => {
                let remote: Option<&dyn RemoteSource> = if self.post_new_quotes {
                    Some(self.sync.remote())
                } else {
                    None
                };
                let quote = add_quote(&mut self.store, remote, &text, &category)?;
                writeln!(out, "{}", quote)?;
            }
            ShellCommand::Random => {
                let selected = self.store.selected_category()?;
                match self.store.random(&selected)? {
                    Some(quote) => writeln!(out, "{}", quote)?,
                    None => writeln!(out, "{}", NO_QUOTES_AVAILABLE)?,
                }
            }
            ShellCommand::Filter(filter) => {
                let matching = self.store.apply_filter(&filter)?;
                writeln!(out, "{}", format_filtered(&matching))?;
            }
            ShellCommand::Categories => {
                let selected = self.store.selected_category()?;
                let categories = self.store.quotes().categories();
                write!(out, "{}", format_category_list(&categories, &selected))?;
            }
            ShellCommand::List => {
                let selected = self.store.selected_category()?;
                let quotes: Vec<_> = selected
                    .filter(self.store.quotes())
                    .into_iter()
                    .cloned()
                    .collect();
                writeln!(out, "{}", format_quote_list(&quotes).trim_end())?;
            }
            ShellCommand::Last => {
                let last = self.store.last_shown()?;
                writeln!(out, "{}", format_last_quote(last.as_ref()))?;
            }
            ShellCommand::Sync => {
                let report = self.sync.run(&mut self.store)?;
                writeln!(out, "{}", format_sync_report(&report))?;
                if report.changed {
                    self.show_selection(out)?;
                }
            }
            ShellCommand::Export(path) => {
                let count = export_quotes(&self.store, &path)?;
                writeln!(out, "Exported {} quotes to {}", count, path.display())?;
            }
            ShellCommand::Import(path) => {
                import_quotes(&mut self.store, &path)?;
                writeln!(out, "Quotes imported successfully.")?;
                self.show_selection(out)?;
            }
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}

/// Forward stdin lines to a channel from a background thread.
///
/// The channel disconnects at end of input.
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = unbounded();

    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
        debug!("Stdin reader stopping");
    });

    rx
}
