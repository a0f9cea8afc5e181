use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::screening::scoring::TargetSkills;
use crate::screening::ScreeningOptions;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Submissions file used for startup seeding; uploads are persisted here.
    pub data_path: PathBuf,
    /// Shortlist size for auto-selection.
    pub select_count: usize,
    /// Optional override of the target-skill vocabulary, comma separated.
    pub target_skills: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_path: PathBuf::from(
                std::env::var("DATA_PATH")
                    .unwrap_or_else(|_| "data/form-submissions.json".to_string()),
            ),
            select_count: std::env::var("SELECT_COUNT")
                .unwrap_or_else(|_| "5".to_string())
                .parse::<usize>()
                .ok()
                .filter(|k| *k > 0)
                .context("SELECT_COUNT must be a positive integer")?,
            target_skills: std::env::var("TARGET_SKILLS").ok().map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            }),
        })
    }

    /// Screening configuration derived from this config: the env-provided
    /// vocabulary and shortlist size over the default weights and policy.
    pub fn screening_options(&self) -> ScreeningOptions {
        ScreeningOptions {
            target_skills: self
                .target_skills
                .as_ref()
                .map(TargetSkills::new)
                .unwrap_or_default(),
            select_count: self.select_count,
            ..ScreeningOptions::default()
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
