use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Email domain a submitter must belong to before they may propose new
    /// faculty entries (e.g. "college.edu").
    pub allowed_email_domain: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            allowed_email_domain: env::var("ALLOWED_EMAIL_DOMAIN")
                .context("ALLOWED_EMAIL_DOMAIN must be set")?,
        })
    }
}
