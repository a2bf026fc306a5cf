use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StocklistError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    #[serde(default = "default_company_name")]
    pub company_name: String,
    #[serde(default = "default_report_prefix")]
    pub report_prefix: String,
    #[serde(default = "default_price_hel_series")]
    pub price_hel_series: bool,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_out_dir() -> String {
    "pdf_reports".to_string()
}

fn default_company_name() -> String {
    "Smart Industrial Solution Ltd.".to_string()
}

fn default_report_prefix() -> String {
    "SISL_VFD_PL".to_string()
}

fn default_price_hel_series() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            out_dir: default_out_dir(),
            company_name: default_company_name(),
            report_prefix: default_report_prefix(),
            price_hel_series: default_price_hel_series(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("stocklist")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| StocklistError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
}

pub fn get_out_dir() -> PathBuf {
    PathBuf::from(&load_settings().out_dir)
}
