//! Configuration management for lorry-hire
//!
//! Config stored at: ~/.config/lorry-hire/config.json

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lorry_hire_types::{ConfigError, EntityId, OutputFormat, Result, SessionContext};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backend REST API root
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub api_token: Option<String>,

    /// Active company
    #[serde(default)]
    pub company_id: Option<EntityId>,

    /// Active branch
    #[serde(default)]
    pub branch_id: Option<EntityId>,

    /// Active financial year
    #[serde(default)]
    pub financial_year_id: Option<EntityId>,

    /// Shorter consignment queries never reach the backend
    #[serde(default = "default_search_min_chars")]
    pub search_min_chars: usize,

    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_search_min_chars() -> usize {
    1
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_token: None,
            company_id: None,
            branch_id: None,
            financial_year_id: None,
            search_min_chars: default_search_min_chars(),
            search_debounce_ms: default_search_debounce_ms(),
            output_format: default_output_format(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("lorry-hire");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)).into())
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Company / branch / FY every query is scoped to
    pub fn session_context(&self) -> Result<SessionContext> {
        let company_id = self.company_id.ok_or(ConfigError::MissingContext("company"))?;
        let branch_id = self.branch_id.ok_or(ConfigError::MissingContext("branch"))?;
        let financial_year_id = self
            .financial_year_id
            .ok_or(ConfigError::MissingContext("financial year"))?;
        Ok(SessionContext::new(company_id, branch_id, financial_year_id))
    }
}

fn show_id(id: Option<EntityId>) -> String {
    id.map(|v| v.to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lorry Hire Configuration")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(f, "API base URL:     {}", self.api_base_url)?;
        writeln!(
            f,
            "API token:        {}",
            if self.api_token.is_some() { "(set)" } else { "(none)" }
        )?;
        writeln!(f, "Company:          {}", show_id(self.company_id))?;
        writeln!(f, "Branch:           {}", show_id(self.branch_id))?;
        writeln!(f, "Financial year:   {}", show_id(self.financial_year_id))?;
        writeln!(f, "Search min chars: {}", self.search_min_chars)?;
        writeln!(f, "Search debounce:  {} ms", self.search_debounce_ms)?;
        writeln!(f, "Request timeout:  {} s", self.request_timeout_secs)?;
        writeln!(f, "Output format:    {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:      {}", path.display())?;
        }

        Ok(())
    }
}
