use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use tinyurl_telemetry::{LogFormat, LOG_FORMAT_ENV};

pub const LISTEN_ADDR_ENV: &str = "TINYURL_GATEWAY_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "TINYURL_STORAGE_BACKEND";
pub const SQLITE_PATH_ENV: &str = "TINYURL_SQLITE_PATH";
pub const SHORT_CODE_LENGTH_ENV: &str = "TINYURL_SHORT_CODE_LENGTH";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SQLITE_PATH: &str = "./storage/tinyurl.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "sqlite")]
    Sqlite,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
            StorageBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tinyurl-gateway", about = "JSON backend of the tinyurl shortener")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = SQLITE_PATH_ENV, default_value = DEFAULT_SQLITE_PATH)]
    pub sqlite_path: PathBuf,

    /// Number of hex characters kept from the URL digest.
    #[arg(
        long,
        env = SHORT_CODE_LENGTH_ENV,
        default_value_t = tinyurl_generator::DEFAULT_LENGTH,
        value_parser = clap::value_parser!(u8).range(3..=32).map(usize::from)
    )]
    pub short_code_length: usize,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
