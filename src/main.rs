use clap::Parser;
use crossbeam_channel::tick;
use quotebook::application::{
    add_quote, export_quotes, import_quotes, init::init, manage_config::ConfigService,
    QuoteStore, SyncService,
};
use quotebook::cli::output::{
    format_category_list, format_filtered, format_quote_list, format_sync_report,
    NO_QUOTES_AVAILABLE,
};
use quotebook::cli::{spawn_stdin_reader, Cli, Commands, ShellSession};
use quotebook::domain::CategoryFilter;
use quotebook::error::QuotebookError;
use quotebook::infrastructure::{
    Config, FileKeyValueStore, FileSystemRepository, HttpRemote, QuotebookRepository,
    RemoteSource, SessionStore,
};
use std::time::Duration;

fn main() {
    init_logger();
    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

struct Workspace {
    config: Config,
    store: QuoteStore<FileKeyValueStore>,
}

fn open_workspace() -> Result<Workspace, QuotebookError> {
    let repo = FileSystemRepository::discover()?;
    let config = repo.load_config()?;
    let store = QuoteStore::load(repo.data_store(), SessionStore::new())?;
    Ok(Workspace { config, store })
}

fn selection_or(
    store: &QuoteStore<FileKeyValueStore>,
    category: Option<String>,
) -> Result<CategoryFilter, QuotebookError> {
    match category {
        Some(c) => Ok(CategoryFilter::from(c.as_str())),
        None => store.selected_category(),
    }
}

fn run(cli: Cli) -> Result<(), QuotebookError> {
    let Some(command) = cli.command else {
        println!("quotebook - Terminal quote manager");
        println!("Use --help for usage information");
        return Ok(());
    };

    match command {
        Commands::Init { path, remote_url } => init(&path, remote_url.as_deref()),
        Commands::Add { text, category } => {
            let mut ws = open_workspace()?;
            let remote = HttpRemote::from_config(&ws.config);
            let remote: Option<&dyn RemoteSource> = if ws.config.post_new_quotes {
                Some(&remote)
            } else {
                None
            };
            let quote = add_quote(&mut ws.store, remote, &text, &category)?;
            println!("{}", quote);
            Ok(())
        }
        Commands::List { category } => {
            let ws = open_workspace()?;
            let filter = selection_or(&ws.store, category)?;
            let quotes: Vec<_> = filter
                .filter(ws.store.quotes())
                .into_iter()
                .cloned()
                .collect();
            println!("{}", format_quote_list(&quotes).trim_end());
            Ok(())
        }
        Commands::Categories => {
            let ws = open_workspace()?;
            let selected = ws.store.selected_category()?;
            print!(
                "{}",
                format_category_list(&ws.store.quotes().categories(), &selected)
            );
            Ok(())
        }
        Commands::Random { category } => {
            let mut ws = open_workspace()?;
            let filter = selection_or(&ws.store, category)?;
            match ws.store.random(&filter)? {
                Some(quote) => println!("{}", quote),
                None => println!("{}", NO_QUOTES_AVAILABLE),
            }
            Ok(())
        }
        Commands::Filter { category } => {
            let mut ws = open_workspace()?;
            let matching = ws.store.apply_filter(&CategoryFilter::from(category.as_str()))?;
            println!("{}", format_filtered(&matching));
            Ok(())
        }
        Commands::Export { path } => {
            let ws = open_workspace()?;
            let count = export_quotes(&ws.store, &path)?;
            println!("Exported {} quotes to {}", count, path.display());
            Ok(())
        }
        Commands::Import { path } => {
            let mut ws = open_workspace()?;
            let count = import_quotes(&mut ws.store, &path)?;
            println!("Quotes imported successfully. ({} added)", count);
            Ok(())
        }
        Commands::Sync => {
            let mut ws = open_workspace()?;
            let service = SyncService::new(HttpRemote::from_config(&ws.config));
            let report = service.run(&mut ws.store)?;
            println!("{}", format_sync_report(&report));
            Ok(())
        }
        Commands::Shell { interval } => {
            let ws = open_workspace()?;
            let secs = interval.unwrap_or(ws.config.sync_interval_secs).max(1);
            let remote = HttpRemote::from_config(&ws.config);
            log::info!("Syncing with {} every {}s", remote.url(), secs);

            let mut session = ShellSession::new(ws.store, remote, ws.config.post_new_quotes);
            let lines = spawn_stdin_reader();
            let ticks = tick(Duration::from_secs(secs));
            session.run(&lines, &ticks, &mut std::io::stdout())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("remote_url = {}", config.remote_url);
                println!("sync_interval_secs = {}", config.sync_interval_secs);
                println!("fetch_limit = {}", config.fetch_limit);
                println!("request_timeout_secs = {}", config.request_timeout_secs);
                println!("post_new_quotes = {}", config.post_new_quotes);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: quotebook config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: remote_url, sync_interval_secs, fetch_limit, \
                    request_timeout_secs, post_new_quotes, created"
                );
                Ok(())
            }
        }
    }
}
