use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use crate::analyzer::{DEFAULT_MIN_SPENDING, DEFAULT_TOP_PRODUCTS};
use crate::utils::NumberFormatOptions;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub formatting: FormattingConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FormattingConfig {
    pub number_comma: bool,
    pub locale: String,
    pub decimal_places: usize,
}

/// Defaults for the full text report.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ReportConfig {
    pub top_products: usize,
    pub high_value_threshold: f64,
    pub filter_category: String,
    pub filter_start: String,
    pub filter_end: String,
    pub minimum_amount: f64,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            number_comma: true,
            locale: "en".to_string(),
            decimal_places: 2,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_products: DEFAULT_TOP_PRODUCTS,
            high_value_threshold: DEFAULT_MIN_SPENDING,
            filter_category: "Electronics".to_string(),
            filter_start: "2024-01-01".to_string(),
            filter_end: "2024-01-31".to_string(),
            minimum_amount: 500.0,
        }
    }
}

impl FormattingConfig {
    pub fn number_format_options(&self) -> NumberFormatOptions {
        NumberFormatOptions {
            use_comma: self.number_comma,
            locale: self.locale.clone(),
            decimal_places: self.decimal_places,
        }
    }
}

thread_local! {
    static TEST_CONFIG_PATH: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

#[cfg(test)]
pub fn set_test_config_path(path: PathBuf) {
    TEST_CONFIG_PATH.with(|p| *p.borrow_mut() = Some(path));
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(test)]
        {
            if let Some(path) = TEST_CONFIG_PATH.with(|p| p.borrow().clone()) {
                return Ok(path);
            }
        }

        Ok(dirs::home_dir()
            .context("Could not find home directory")?
            .join(".salesrail.toml"))
    }

    pub fn load() -> Result<Option<Config>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        Ok(Some(config))
    }

    pub fn save(&self, silent: bool) -> Result<()> {
        let config_path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, content).context("Failed to write config file")?;

        if !silent {
            println!("✅ Configuration saved to: {}", config_path.display());
        }

        Ok(())
    }
}

// CLI helper functions
pub fn create_default_config(overwrite: bool) -> Result<()> {
    let config = Config::default();
    if !std::fs::exists(Config::config_path()?)? || overwrite {
        config.save(true)?;

        println!("📝 Created default configuration file.");
        println!("📍 Adjust report defaults with:");
        println!("   salesrail config set top-products 10");
        println!("or edit");
        println!("   {}", Config::config_path()?.display());
    } else {
        println!("Configuration already exists.  Pass `--overwrite` to overwrite.");
    }

    Ok(())
}

pub fn show_config() -> Result<()> {
    match Config::load()? {
        Some(config) => {
            println!("🔧 Current configuration:");
            println!("   Number Comma: {}", config.formatting.number_comma);
            println!("   Locale: {}", config.formatting.locale);
            println!("   Decimal Places: {}", config.formatting.decimal_places);
            println!("   Top Products: {}", config.report.top_products);
            println!(
                "   High Value Threshold: {}",
                config.report.high_value_threshold
            );
            println!("   Filter Category: {}", config.report.filter_category);
            println!(
                "   Filter Dates: {} .. {}",
                config.report.filter_start, config.report.filter_end
            );
            println!("   Minimum Amount: {}", config.report.minimum_amount);
        }
        None => {
            println!("❌ No configuration file found.");
            println!("   Run 'salesrail config init' to create one.");
        }
    }
    Ok(())
}

fn parse_amount(value: &str) -> Result<f64> {
    let amount = value
        .parse::<f64>()
        .context("Invalid amount. Use a number such as 1000 or 249.99")?;
    if !amount.is_finite() || amount < 0.0 {
        anyhow::bail!("Invalid amount. Use a non-negative number");
    }
    Ok(amount)
}

fn parse_date(value: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(value, crate::types::DATE_FORMAT)
        .context("Invalid date. Use YYYY-MM-DD")?;
    Ok(value.to_string())
}

pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?.unwrap_or_default();

    match key {
        "number-comma" => {
            config.formatting.number_comma = value
                .parse::<bool>()
                .context("Invalid boolean value. Use 'true' or 'false'")?;
        }
        "locale" => {
            config.formatting.locale = value.to_string();
        }
        "decimal-places" => {
            config.formatting.decimal_places =
                value.parse::<usize>().context("Invalid number value")?;
        }
        "top-products" => {
            config.report.top_products = value.parse::<usize>().context("Invalid number value")?;
        }
        "high-value-threshold" => {
            config.report.high_value_threshold = parse_amount(value)?;
        }
        "filter-category" => {
            config.report.filter_category = value.to_string();
        }
        "filter-start" => {
            config.report.filter_start = parse_date(value)?;
        }
        "filter-end" => {
            config.report.filter_end = parse_date(value)?;
        }
        "minimum-amount" => {
            config.report.minimum_amount = parse_amount(value)?;
        }
        _ => anyhow::bail!("Unknown config key: {}", key),
    }

    config.save(false)?;
    Ok(())
}
