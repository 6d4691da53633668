//! Where the territory editor keeps `config.json` and its `logs/` folder.
//!
//! A development run works out of the current directory. An installed build
//! splits settings from logs the way each platform expects:
//!
//! | platform | `config.json`                                       | `logs/`                                             |
//! |----------|-----------------------------------------------------|-----------------------------------------------------|
//! | Linux    | `~/.config/territory-editor/`                       | `~/.local/share/territory-editor/logs/`             |
//! | macOS    | `~/Library/Application Support/territory-editor/`   | `~/Library/Application Support/territory-editor/logs/` |
//! | Windows  | `%APPDATA%\territory-editor\`                       | `%APPDATA%\territory-editor\logs\`                  |

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "territory-editor";
const CONFIG_FILE_NAME: &str = "config.json";
const LOGS_DIR_NAME: &str = "logs";

/// `cargo run` or a debug build
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// The two roots the editor writes under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    settings_root: PathBuf,
    log_root: PathBuf,
}

impl StorageLayout {
    /// Everything next to the working directory
    pub fn local() -> Self {
        Self::under(PathBuf::from("."), PathBuf::from("."))
    }

    pub fn under(settings_root: PathBuf, log_root: PathBuf) -> Self {
        Self {
            settings_root,
            log_root,
        }
    }

    /// Pick the layout for this run. Falls back to the local layout when the
    /// platform has no home directory to offer.
    pub fn current() -> Self {
        if is_dev_mode() {
            return Self::local();
        }
        installed().unwrap_or_else(Self::local)
    }

    pub fn config_file(&self) -> PathBuf {
        self.settings_root.join(CONFIG_FILE_NAME)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.log_root.join(LOGS_DIR_NAME)
    }

    /// Create the settings folder and the logs folder if they are missing
    pub fn create(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.settings_root)?;
        std::fs::create_dir_all(self.logs_dir())
    }

    fn is_local(&self) -> bool {
        self.settings_root == Path::new(".") && self.log_root == Path::new(".")
    }
}

#[cfg(target_os = "linux")]
fn installed() -> Option<StorageLayout> {
    Some(StorageLayout::under(
        dirs::config_dir()?.join(APP_DIR_NAME),
        dirs::data_dir()?.join(APP_DIR_NAME),
    ))
}

#[cfg(not(target_os = "linux"))]
fn installed() -> Option<StorageLayout> {
    let root = dirs::data_dir()?.join(APP_DIR_NAME);
    Some(StorageLayout::under(root.clone(), root))
}

pub fn config_file() -> PathBuf {
    StorageLayout::current().config_file()
}

pub fn logs_dir() -> PathBuf {
    StorageLayout::current().logs_dir()
}

/// Make sure an installed build can write its settings and logs.
///
/// The local layout is left alone; logging creates `./logs` on its own.
pub fn ensure_directories() -> std::io::Result<()> {
    let layout = StorageLayout::current();
    if layout.is_local() {
        return Ok(());
    }
    layout.create()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_build_uses_working_directory() {
        assert!(is_dev_mode());
        assert_eq!(StorageLayout::current(), StorageLayout::local());
        assert_eq!(config_file(), PathBuf::from("./config.json"));
        assert_eq!(logs_dir(), PathBuf::from("./logs"));
    }

    #[test]
    fn test_split_layout_keeps_logs_apart_from_settings() {
        let layout = StorageLayout::under(
            PathBuf::from("/home/u/.config/territory-editor"),
            PathBuf::from("/home/u/.local/share/territory-editor"),
        );
        assert!(!layout.is_local());
        assert_eq!(
            layout.config_file(),
            PathBuf::from("/home/u/.config/territory-editor/config.json")
        );
        assert_eq!(
            layout.logs_dir(),
            PathBuf::from("/home/u/.local/share/territory-editor/logs")
        );
    }

    #[test]
    fn test_create_makes_settings_and_logs_folders() {
        let root = std::env::temp_dir().join(format!("territory-editor-{}", std::process::id()));
        let layout = StorageLayout::under(root.join("settings"), root.join("data"));

        layout.create().unwrap();
        assert!(root.join("settings").is_dir());
        assert!(root.join("data").join("logs").is_dir());

        std::fs::remove_dir_all(&root).unwrap();
    }
}
