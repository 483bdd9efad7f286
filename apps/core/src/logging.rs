use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;

use crate::config::Config;

const LOGS_DIR_NAME: &str = "logs";
const LOG_FILE_NAME: &str = "querycraft.log";
const ARCHIVE_PREFIX: &str = "querycraft-";
const MAX_LOG_BYTES: u64 = 1_000_000;
const MAX_ARCHIVES: usize = 5;

static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

/// `logs/` next to the config file, so an explicit `--config` keeps logs beside it.
pub fn logs_dir(cfg: &Config) -> PathBuf {
    cfg.config_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(crate::config::stable_app_data_dir)
        .join(LOGS_DIR_NAME)
}

/// Installs the global file subscriber. `RUST_LOG` takes precedence over `log_level`.
pub fn init(cfg: &Config) -> Result<PathBuf, std::io::Error> {
    init_in(&logs_dir(cfg), &cfg.log_level)
}

pub fn init_in(log_dir: &Path, level: &str) -> Result<PathBuf, std::io::Error> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    rotate_if_needed(&log_path, log_dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::AlreadyExists, error))?;

    install_panic_hook();
    Ok(log_path)
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn rotate_if_needed(log_path: &Path, log_dir: &Path) -> Result<(), std::io::Error> {
    let meta = match fs::metadata(log_path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    if meta.len() < MAX_LOG_BYTES {
        return Ok(());
    }

    let stamp = now_secs();
    let archived = log_dir.join(format!("{ARCHIVE_PREFIX}{stamp}.log"));
    fs::rename(log_path, archived)?;
    prune_old_archives(log_dir)?;
    Ok(())
}

fn prune_old_archives(log_dir: &Path) -> Result<(), std::io::Error> {
    let mut archives = fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(ARCHIVE_PREFIX) && n.ends_with(".log"))
                .unwrap_or(false)
        })
        .collect::<Vec<_>>();

    archives.sort();
    let excess = archives.len().saturating_sub(MAX_ARCHIVES);
    for oldest in archives.drain(..excess) {
        let _ = fs::remove_file(oldest);
    }
    Ok(())
}

fn install_panic_hook() {
    let _ = PANIC_HOOK_INSTALLED.get_or_init(|| {
        let prior = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = panic_info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic payload unavailable".to_string());
            tracing::error!(%location, "panic: {payload}");
            prior(panic_info);
        }));
    });
}
