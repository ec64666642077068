//! Configuration management for dbrsettings using the prefer crate.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::repository::util::is_postgres_url;
use crate::repository::DbContext;
use crate::store::{ConfigRecordStore, JsonPolicy};

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "dbrsettings.db";

/// Default listing cache TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Default web console bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3040";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    pub database_url: Option<String>,
    /// How long the record listing may be served from memory.
    pub cache_ttl_secs: u64,
    /// What to do with JSON-bearing text that does not parse.
    pub json_policy: JsonPolicy,
    /// Web console bind address.
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        // Falls back gracefully: data dir -> home dir -> current dir
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dbrsettings");

        Self {
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            json_policy: JsonPolicy::default(),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        if let Some(ref url) = self.database_url {
            url.clone()
        } else {
            let path = self.data_dir.join(&self.database_filename);
            format!("sqlite:{}", path.display())
        }
    }

    /// Get the full path to the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Check if the database file appears to exist.
    pub fn database_exists(&self) -> bool {
        if self.database_url.is_some() {
            true
        } else {
            self.database_path().exists()
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        #[cfg(unix)]
        Self::log_directory_diagnostics(&self.data_dir);

        fs::create_dir_all(&self.data_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ),
            )
        })
    }

    /// Log ownership of the data directory, for permission issues in containers.
    #[cfg(unix)]
    fn log_directory_diagnostics(path: &Path) {
        use std::os::unix::fs::MetadataExt;
        let uid = unsafe { libc::getuid() };
        let gid = unsafe { libc::getgid() };
        tracing::debug!(
            "data_dir check: path={}, running as uid={} gid={}",
            path.display(),
            uid,
            gid
        );

        match fs::metadata(path) {
            Ok(meta) => tracing::debug!(
                "data_dir exists: owner={}:{}, mode={:o}, is_dir={}",
                meta.uid(),
                meta.gid(),
                meta.mode() & 0o7777,
                meta.is_dir()
            ),
            Err(_) => tracing::debug!("data_dir does not exist, will attempt to create"),
        }
    }

    /// Create a database context using the configured database URL or path.
    pub fn create_db_context(&self) -> Result<DbContext, diesel::result::Error> {
        DbContext::from_url(&self.database_url())
    }

    /// Create a database context and the record store on top of it.
    pub fn create_store(&self) -> Result<(DbContext, ConfigRecordStore), diesel::result::Error> {
        let ctx = self.create_db_context()?;
        let store = ConfigRecordStore::new(&ctx, self.cache_ttl(), self.json_policy);
        Ok((ctx, store))
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, prefer::FromValue)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Database filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Listing cache TTL in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,
    /// Invalid JSON policy: "wrap" or "reject".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_json: Option<String>,
    /// Web console bind address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    #[prefer(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers dbrsettings config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("dbrsettings").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
        }
        if let Some(ref database) = self.database {
            settings.database_filename = database.clone();
        }
        if let Some(ttl) = self.cache_ttl_secs {
            settings.cache_ttl_secs = ttl;
        }
        if let Some(ref policy) = self.invalid_json {
            match policy.parse::<JsonPolicy>() {
                Ok(policy) => settings.json_policy = policy,
                Err(e) => tracing::warn!("Ignoring invalid_json in config: {}", e),
            }
        }
        if let Some(ref bind) = self.bind {
            settings.bind = bind.clone();
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
    /// Data directory or database file (--data flag).
    /// Can be a directory containing dbrsettings.db or a .db file directly.
    pub data: Option<PathBuf>,
}

/// Resolved data path information for SQLite databases.
#[derive(Debug, Clone)]
pub struct ResolvedData {
    /// Directory holding the database.
    pub data_dir: PathBuf,
    /// The database filename.
    pub database_filename: String,
    /// Full path to the database.
    pub database_path: PathBuf,
}

fn is_db_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "db" || ext == "sqlite" || ext == "sqlite3")
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    }
}

impl ResolvedData {
    /// Resolve a data path to database directory, filename and path.
    /// - If path is a .db file, use it directly
    /// - If path is a directory, look for dbrsettings.db inside
    pub fn from_path(path: &Path) -> Self {
        let path = absolute(path);
        let is_db_file = is_db_extension(&path) || path.is_file();

        if is_db_file {
            let database_filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(DEFAULT_DATABASE_FILENAME)
                .to_string();
            Self {
                data_dir: path.parent().unwrap_or(Path::new(".")).to_path_buf(),
                database_filename,
                database_path: path,
            }
        } else {
            let database_filename = DEFAULT_DATABASE_FILENAME.to_string();
            Self {
                database_path: path.join(&database_filename),
                data_dir: path,
                database_filename,
            }
        }
    }
}

/// Look for a config file next to the database.
fn find_config_next_to_db(data_dir: &Path) -> Option<PathBuf> {
    let extensions = ["json", "yaml", "yml", "toml"];
    let basenames = ["dbrsettings", "config"];

    for basename in basenames {
        for ext in extensions {
            let path = data_dir.join(format!("{}.{}", basename, ext));
            if path.exists() {
                return Some(path);
            }
        }
    }
    None
}

/// Load config from file sources.
async fn load_file_config(options: &LoadOptions, data_dir_override: Option<&Path>) -> Config {
    // Priority 1: Explicit --config flag
    if let Some(ref config_path) = options.config_path {
        return match Config::load_from_path(config_path).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}", e);
                Config::default()
            }
        };
    }

    // Priority 2: Config next to data dir
    if let Some(data_dir) = data_dir_override {
        if let Some(config_path) = find_config_next_to_db(data_dir) {
            tracing::debug!("Found config next to data dir: {}", config_path.display());
            return Config::load_from_path(&config_path)
                .await
                .unwrap_or_default();
        }
    }

    // Priority 3: Auto-discover via prefer
    Config::load().await
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Apply environment variable overrides, which take precedence over the file.
fn apply_env_overrides(settings: &mut Settings) {
    if let Some(database_url) = env_var("DATABASE_URL") {
        if is_postgres_url(&database_url) {
            tracing::debug!("DATABASE_URL points at PostgreSQL; it will be rejected on connect");
        }
        settings.database_url = Some(database_url);
    }

    if let Some(ttl) = env_var("DBRSETTINGS_CACHE_TTL") {
        match ttl.parse::<u64>() {
            Ok(ttl) => settings.cache_ttl_secs = ttl,
            Err(_) => tracing::warn!("Ignoring DBRSETTINGS_CACHE_TTL={}: not a number", ttl),
        }
    }

    if let Some(policy) = env_var("DBRSETTINGS_INVALID_JSON") {
        match policy.parse::<JsonPolicy>() {
            Ok(policy) => settings.json_policy = policy,
            Err(e) => tracing::warn!("Ignoring DBRSETTINGS_INVALID_JSON: {}", e),
        }
    }
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let resolved_data = options.data.as_deref().map(ResolvedData::from_path);

    let config =
        load_file_config(&options, resolved_data.as_ref().map(|r| r.data_dir.as_path())).await;

    let mut settings = Settings::default();

    // Determine base directory for resolving relative paths
    let base_dir = if options.use_cwd {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    } else {
        config
            .base_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    };

    config.apply_to_settings(&mut settings, &base_dir);

    // --data takes precedence over the config file
    if let Some(resolved) = resolved_data {
        settings.data_dir = resolved.data_dir;
        settings.database_filename = resolved.database_filename;
    }

    apply_env_overrides(&mut settings);

    (settings, config)
}
