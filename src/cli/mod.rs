//! CLI layer - Command-line interface

pub mod commands;
pub mod output;
pub mod shell;

pub use commands::{Cli, Commands};
pub use output::{format_category_list, format_quote_list};
pub use shell::{spawn_stdin_reader, ShellCommand, ShellSession};
