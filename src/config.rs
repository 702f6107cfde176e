//! Configuration management for `SportSpot`
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::SportSpotError;
use crate::venues::terms::SPORT_SEARCH_TERMS;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Root configuration structure for the `SportSpot` library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportSpotConfig {
    /// Place-search provider configuration
    pub provider: ProviderConfig,
    /// Venue search tuning
    pub search: SearchConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Place-search provider configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for the place-search API
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u32,
    /// User agent sent with every request (Nominatim requires one)
    #[serde(default = "default_provider_user_agent")]
    pub user_agent: String,
    /// Maximum results requested per term query
    #[serde(default = "default_provider_page_size")]
    pub page_size: u32,
}

/// Venue search tuning settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of catalog terms queried concurrently per search
    #[serde(default = "default_term_fan_out")]
    pub term_fan_out: usize,
    /// Maximum venues in a published result
    #[serde(default = "default_max_venues")]
    pub max_venues: usize,
    /// Coordinate delta in degrees under which two hits count as one venue
    #[serde(default = "default_dedup_epsilon")]
    pub dedup_epsilon_deg: f64,
    /// Square viewport span for point searches, kilometers
    #[serde(default = "default_nearby_span")]
    pub nearby_span_km: f64,
    /// Square viewport span for the home-city search, kilometers
    #[serde(default = "default_home_span")]
    pub home_span_km: f64,
    /// Home-city latitude
    #[serde(default = "default_home_latitude")]
    pub home_latitude: f64,
    /// Home-city longitude
    #[serde(default = "default_home_longitude")]
    pub home_longitude: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_provider_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_provider_timeout() -> u32 {
    30
}

fn default_provider_user_agent() -> String {
    format!("sportspot/{}", env!("CARGO_PKG_VERSION"))
}

fn default_provider_page_size() -> u32 {
    20
}

fn default_term_fan_out() -> usize {
    8
}

fn default_max_venues() -> usize {
    50
}

fn default_dedup_epsilon() -> f64 {
    0.001
}

fn default_nearby_span() -> f64 {
    10.0
}

fn default_home_span() -> f64 {
    20.0
}

// Belgrade city center
fn default_home_latitude() -> f64 {
    44.7866
}

fn default_home_longitude() -> f64 {
    20.4489
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_base_url(),
            timeout_seconds: default_provider_timeout(),
            user_agent: default_provider_user_agent(),
            page_size: default_provider_page_size(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            term_fan_out: default_term_fan_out(),
            max_venues: default_max_venues(),
            dedup_epsilon_deg: default_dedup_epsilon(),
            nearby_span_km: default_nearby_span(),
            home_span_km: default_home_span(),
            home_latitude: default_home_latitude(),
            home_longitude: default_home_longitude(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SportSpotConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SportSpotConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with SPORTSPOT_ prefix
        builder = builder.add_source(
            Environment::with_prefix("SPORTSPOT")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SportSpotConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sportspot").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.provider.base_url.is_empty() {
            self.provider.base_url = default_provider_base_url();
        }
        if self.provider.timeout_seconds == 0 {
            self.provider.timeout_seconds = default_provider_timeout();
        }
        if self.provider.user_agent.is_empty() {
            self.provider.user_agent = default_provider_user_agent();
        }
        if self.provider.page_size == 0 {
            self.provider.page_size = default_provider_page_size();
        }
        if self.search.term_fan_out == 0 {
            self.search.term_fan_out = default_term_fan_out();
        }
        if self.search.max_venues == 0 {
            self.search.max_venues = default_max_venues();
        }
        if self.search.dedup_epsilon_deg <= 0.0 {
            self.search.dedup_epsilon_deg = default_dedup_epsilon();
        }
        if self.search.nearby_span_km <= 0.0 {
            self.search.nearby_span_km = default_nearby_span();
        }
        if self.search.home_span_km <= 0.0 {
            self.search.home_span_km = default_home_span();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.provider.timeout_seconds > 300 {
            return Err(SportSpotError::config(
                "Provider timeout cannot exceed 300 seconds",
            )
            .into());
        }

        if self.provider.page_size > 50 {
            return Err(SportSpotError::config(
                "Provider page size cannot exceed 50 results",
            )
            .into());
        }

        if self.search.term_fan_out > SPORT_SEARCH_TERMS.len() {
            return Err(SportSpotError::config(format!(
                "Term fan-out cannot exceed the {} catalog entries",
                SPORT_SEARCH_TERMS.len()
            ))
            .into());
        }

        if self.search.max_venues > 200 {
            return Err(SportSpotError::config(
                "Maximum venues cannot exceed 200",
            )
            .into());
        }

        if self.search.dedup_epsilon_deg >= 1.0 {
            return Err(SportSpotError::config(
                "Dedup epsilon must be below 1 degree",
            )
            .into());
        }

        if self.search.nearby_span_km > 500.0 || self.search.home_span_km > 500.0 {
            return Err(SportSpotError::config(
                "Search span cannot exceed 500 km",
            )
            .into());
        }

        if !(-90.0..=90.0).contains(&self.search.home_latitude) {
            return Err(SportSpotError::config(
                "Home latitude must be between -90 and 90 degrees",
            )
            .into());
        }

        if !(-180.0..=180.0).contains(&self.search.home_longitude) {
            return Err(SportSpotError::config(
                "Home longitude must be between -180 and 180 degrees",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SportSpotError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SportSpotError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(SportSpotError::config(
                "Provider base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

/// Initialize the global tracing subscriber from logging configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| SportSpotError::config(format!("Failed to initialize logging: {e}")).into())
}
