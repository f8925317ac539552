//! moviediary CLI
//!
//! Command-line interface for keeping a personal movie diary.

mod cli_types;
mod commands;
mod error;
mod settings;

use std::io::Write;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let db_path = settings::resolve_db_path(cli.db);
    log::debug!("Using catalog database {}", db_path.display());

    let result = match cli.command {
        Commands::Add(args) => commands::add::run_add(&db_path, args),
        Commands::Show { id, poster } => commands::show::run_show(&db_path, id, poster),
        Commands::Edit(args) => commands::edit::run_edit(&db_path, args),
        Commands::Delete { id } => commands::delete::run_delete(&db_path, id),
        Commands::List { json } => commands::list::run_list(&db_path, json),
        Commands::Query(args) => commands::list::run_query(&db_path, args),
        Commands::Search { text } => commands::list::run_search(&db_path, &text),
        Commands::Feed { genres, limit } => commands::list::run_feed(&db_path, &genres, limit),
        Commands::Posters { timeout } => commands::posters::run_posters(&db_path, timeout),
        Commands::Seed { path } => commands::seed::run_seed(&db_path, path),
        Commands::Stats => commands::stats::run_stats(&db_path),
        Commands::Reset { confirm } => commands::reset::run_reset(&db_path, confirm),
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Show => commands::config::run_config_show(&db_path),
            ConfigAction::SetDb { path, clear } => {
                commands::config::run_config_set_db(path, clear)
            }
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Route `log` output to stdout. Info lines are printed bare so they read as
/// normal command output; `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,moviediary=debug"
    } else {
        "warn,moviediary=info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            log::Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            log::Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            level => writeln!(
                buf,
                "{}",
                format!("[{} {}] {}", level, record.target(), record.args())
                    .if_supports_color(Stdout, |t| t.dimmed())
            ),
        })
        .init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
