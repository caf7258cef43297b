use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use env_logger::{Builder, Env, Target};

use crate::store::json_store::JsonStore;

pub const LOG_FILE: &str = "combicards.log";

fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder
}

pub fn default_log_path() -> PathBuf {
    JsonStore::default_dir().join(LOG_FILE)
}

/// Send records to `path`, appending. The terminal belongs to the UI while
/// it runs, so nothing goes to stderr.
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    builder()
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

pub fn init_stderr() {
    // A second init only happens in tests; keep the first logger.
    let _ = builder().target(Target::Stderr).try_init();
}
