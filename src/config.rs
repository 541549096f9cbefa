//! Application configuration

use std::time::Duration;

/// Application configuration, read from the environment (a `.env` file is loaded first by the
/// binary).
#[derive(Debug, Clone)]
pub struct Config {
    /// Public URL of the ordering page, appended to share messages
    pub app_url: String,
    /// Base URL under which uploaded store images are served
    pub image_base_url: String,
    /// Deep link prefix of the messaging app used for sharing
    pub share_base_url: String,
    /// Admin sign-in email
    pub admin_email: String,
    /// Argon2 PHC string of the admin password. No admin can sign in without it.
    pub admin_password_hash: Option<String>,
    /// Request channel capacity of each table
    pub table_buffer: usize,
    /// How often the countdown is re-evaluated
    pub tick_interval: Duration,
    /// Offset from UTC, in minutes, that decides which calendar day is "today"
    pub utc_offset_minutes: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_url: "http://localhost:3000".to_string(),
            image_base_url: "http://localhost:3000/storage/menu-images".to_string(),
            share_base_url: "https://line.me/R/msg/text/?".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password_hash: None,
            table_buffer: 32,
            tick_interval: Duration::from_millis(1000),
            utc_offset_minutes: 0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to [`Config::default`].
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            app_url: std::env::var("APP_URL").unwrap_or(defaults.app_url),
            image_base_url: std::env::var("IMAGE_BASE_URL").unwrap_or(defaults.image_base_url),
            share_base_url: std::env::var("SHARE_BASE_URL").unwrap_or(defaults.share_base_url),
            admin_email: std::env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password_hash: std::env::var("ADMIN_PASSWORD_HASH")
                .ok()
                .filter(|s| !s.is_empty()),
            table_buffer: std::env::var("TABLE_BUFFER")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.table_buffer),
            tick_interval: std::env::var("TICK_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_interval),
            utc_offset_minutes: std::env::var("UTC_OFFSET_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.utc_offset_minutes),
        }
    }
}
