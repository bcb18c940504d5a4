use clap::Parser;
use std::net::SocketAddr;
use tinyurl_telemetry::{LogFormat, LOG_FORMAT_ENV};

pub const LISTEN_ADDR_ENV: &str = "TINYURL_FRONTEND_LISTEN_ADDR";
pub const BACKEND_URL_ENV: &str = "TINYURL_BACKEND_URL";
pub const USERNAME_ENV: &str = "TINYURL_FRONTEND_USERNAME";
pub const PASSWORD_ENV: &str = "TINYURL_FRONTEND_PASSWORD";
pub const SESSION_TTL_ENV: &str = "TINYURL_SESSION_TTL_SECS";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8081";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 86_400;

#[derive(Debug, Parser)]
#[command(name = "tinyurl-frontend", about = "HTML front-end of the tinyurl shortener")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Base URL of the JSON backend.
    #[arg(long, env = BACKEND_URL_ENV, default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    #[arg(long, env = USERNAME_ENV)]
    pub username: String,

    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: String,

    /// Session lifetime in seconds, between one minute and thirty days.
    #[arg(
        long,
        env = SESSION_TTL_ENV,
        default_value_t = DEFAULT_SESSION_TTL_SECS,
        value_parser = clap::value_parser!(i64).range(60..=2_592_000)
    )]
    pub session_ttl_secs: i64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
