use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What to do when a PUT line names an identifier with a broken marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPolicy {
    /// Log the match but write the entry anyway. This is how the pool has
    /// always been rebuilt.
    #[default]
    AlwaysUpdate,
    /// Leave the entry for a broken identifier untouched.
    SkipBroken,
}

/// How the trailing line terminator is removed before a PUT line is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    /// Drop the final character, whatever it is.
    #[default]
    DropLastChar,
    /// Remove a trailing `\n` (and a `\r` before it) only if present.
    TrimNewline,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub pool_path: PathBuf,
    pub broken_dir: PathBuf,
    pub log_path: PathBuf,
    pub marker_policy: MarkerPolicy,
    pub line_ending: LineEnding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_path: "pool.json".into(),
            broken_dir: "./broken".into(),
            log_path: "server.log".into(),
            marker_policy: MarkerPolicy::default(),
            line_ending: LineEnding::default(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file_exact("rebuild.toml"))
            .merge(Json::file_exact("rebuild.json"))
            .merge(Env::prefixed("REBUILD_"))
    }

    pub fn load() -> anyhow::Result<Self> {
        Self::figment()
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
    }
}
