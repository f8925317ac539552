use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings;

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings::settings_path().display());
    Ok(())
}

/// Show the settings file and where the database resolves to.
pub(crate) fn run_config_show(resolved_db: &Path) -> Result<(), CliError> {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "Movie Diary Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let source = match settings::load_db_path(&path) {
        Some(saved) if saved == resolved_db => "settings.toml",
        _ if resolved_db == settings::default_db_path() => "default",
        _ => "--db",
    };
    log::info!(
        "  Database:      {} {}",
        resolved_db.display().if_supports_color(Stdout, |t| t.cyan()),
        format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
    );

    if let Some(contents) = settings::load_settings_string(&path) {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("    {}", line);
        }
    }
    Ok(())
}

/// Save or clear the default database path.
pub(crate) fn run_config_set_db(path: Option<PathBuf>, clear: bool) -> Result<(), CliError> {
    let settings_file = settings::settings_path();

    if clear {
        settings::save_db_path(&settings_file, None)
            .map_err(|e| CliError::config(format!("Failed to write settings: {e}")))?;
        log::info!(
            "Cleared saved database path; using {}",
            settings::default_db_path().display()
        );
        return Ok(());
    }

    let path = path.ok_or_else(|| CliError::invalid_argument("a database path is required"))?;
    let path = std::path::absolute(&path).unwrap_or(path);
    settings::save_db_path(&settings_file, Some(&path))
        .map_err(|e| CliError::config(format!("Failed to write settings: {e}")))?;

    log::info!(
        "Default database set to {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Saved in {}", settings_file.display());
    Ok(())
}
