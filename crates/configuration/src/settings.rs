use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an absent `config.toml` yields a working setup that reads
/// `all_data.csv` from the current directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSettings,
    pub dashboard: DashboardConfig,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Where the order dataset lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Path of the CSV export, relative to the working directory.
    pub path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("all_data.csv"),
        }
    }
}

/// Parameters of the dashboard and raw-data pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of products in the best-seller ranking.
    pub top_products: usize,
    /// Number of categories in the category ranking.
    pub top_categories: usize,
    /// Prefix for revenue figures, e.g. "Rp".
    pub currency_symbol: String,
    /// Default number of rows shown on the raw-data page of the CLI.
    pub raw_row_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_products: 10,
            top_categories: 20,
            currency_symbol: "Rp".to_string(),
            raw_row_limit: 100,
        }
    }
}

/// Bind address of the JSON API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
        }
    }
}

/// Log output. Console logging is always on; file logging only when `directory` is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// Directory for daily-rotated log files.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "orderscope.log".to_string(),
        }
    }
}

/// Command-line overrides applied on top of the file and environment.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct DataOverrides {
    /// Path of the order CSV, overriding `[data] path`.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub data_path: Option<PathBuf>,
}

impl Config {
    pub fn apply(&mut self, overrides: &DataOverrides) {
        if let Some(path) = &overrides.data_path {
            self.data.path = path.clone();
        }
    }
}
