use crate::error::{Result, StoreError};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "belcontact";
const DB_FILENAME: &str = "belcontact.sqlite3";

/// `$XDG_DATA_HOME/belcontact`, else `~/.local/share/belcontact`.
pub fn data_dir() -> Result<PathBuf> {
    data_dir_from(env::var_os("XDG_DATA_HOME"), dirs::home_dir())
}

fn data_dir_from(xdg_data_home: Option<OsString>, home: Option<PathBuf>) -> Result<PathBuf> {
    match xdg_data_home.map(PathBuf::from) {
        Some(path) if path.as_os_str().is_empty() => Err(StoreError::InvalidDataPath(path)),
        Some(path) => Ok(path.join(APP_DIR)),
        None => {
            let home = home.ok_or(StoreError::MissingHomeDir)?;
            Ok(home.join(".local").join("share").join(APP_DIR))
        }
    }
}

pub fn db_path_in(dir: &Path) -> PathBuf {
    dir.join(DB_FILENAME)
}

/// An explicit path wins and its parent directory is created when missing;
/// otherwise the private data directory is created and used.
pub fn resolve_db_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    let Some(path) = custom else {
        let dir = data_dir()?;
        fs::create_dir_all(&dir)?;
        restrict_dir_permissions(&dir)?;
        return Ok(db_path_in(&dir));
    };
    if path.as_os_str().is_empty() {
        return Err(StoreError::InvalidDataPath(path));
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)?,
        _ => {}
    }
    Ok(path)
}

#[cfg(unix)]
fn restrict_dir_permissions(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_dir_permissions(_dir: &Path) -> Result<()> {
    Ok(())
}
