//! Persistent CLI settings (`~/.config/moviediary/settings.toml`).
//!
//! The only setting today is `database.path`, the catalog database used when
//! `--db` is not given.

use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "moviediary";
const DB_FILE: &str = "moviediary.db";
const DB_SECTION: &str = "database";
const DB_PATH_KEY: &str = "path";

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join(APP_DIR).join("settings.toml")
}

/// Database location used when nothing is configured.
pub(crate) fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join(APP_DIR).join(DB_FILE)
}

/// Resolve the catalog database path using a priority chain:
///
/// 1. `--db` override (if `Some`)
/// 2. Saved `database.path` in `settings.toml`
/// 3. [`default_db_path`]
pub(crate) fn resolve_db_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_db_path(&settings_path()) {
        return p;
    }
    default_db_path()
}

/// Read `database.path` from a settings file, if set.
pub(crate) fn load_db_path(settings: &Path) -> Option<PathBuf> {
    let doc = read_settings(settings)?;
    let path = doc.get(DB_SECTION)?.get(DB_PATH_KEY)?.as_str()?;
    (!path.is_empty()).then(|| PathBuf::from(path))
}

/// Save (or clear) `database.path`, preserving any other keys in the file.
pub(crate) fn save_db_path(settings: &Path, path: Option<&Path>) -> io::Result<()> {
    edit_settings(settings, |doc| {
        let database = section_mut(doc, DB_SECTION)?;
        match path {
            Some(p) => {
                database.insert(
                    DB_PATH_KEY.to_string(),
                    toml::Value::String(p.to_string_lossy().into_owned()),
                );
            }
            None => {
                database.remove(DB_PATH_KEY);
            }
        }
        Ok(())
    })
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub(crate) fn load_settings_string(settings: &Path) -> Option<String> {
    toml::to_string_pretty(&read_settings(settings)?).ok()
}

// ── File access ─────────────────────────────────────────────────────────────

/// Parsed settings, or `None` if the file is missing or not valid TOML.
fn read_settings(settings: &Path) -> Option<toml::Table> {
    std::fs::read_to_string(settings).ok()?.parse().ok()
}

/// Apply `edit` to the current settings and write the result back through a
/// temp file and rename. An unreadable file starts over as an empty table.
/// Nothing is written if `edit` fails.
fn edit_settings<F>(settings: &Path, edit: F) -> io::Result<()>
where
    F: FnOnce(&mut toml::Table) -> io::Result<()>,
{
    let mut doc = read_settings(settings).unwrap_or_default();
    edit(&mut doc)?;

    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, serialized)?;
    std::fs::rename(&tmp, settings)
}

/// The `[name]` table, created if absent.
fn section_mut<'a>(doc: &'a mut toml::Table, name: &str) -> io::Result<&'a mut toml::Table> {
    doc.entry(name)
        .or_insert_with(|| toml::Value::Table(toml::Table::new()))
        .as_table_mut()
        .ok_or_else(|| io::Error::other(format!("[{name}] in settings.toml is not a table")))
}
