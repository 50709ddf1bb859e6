// Runtime configuration. There are no CLI flags; the only knob is where the
// records file lives.

use std::path::PathBuf;

pub const DATA_FILE_ENV: &str = "HEALTHREC_DATA_FILE";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
}

impl Config {
    /// Read the records path from `HEALTHREC_DATA_FILE`, or fall back to
    /// `~/.healthrec/records.json` (current directory if there is no home).
    pub fn from_env() -> Self {
        let data_file = match std::env::var_os(DATA_FILE_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_data_file(),
        };
        Config { data_file }
    }
}

fn default_data_file() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(".healthrec").join("records.json")
}
