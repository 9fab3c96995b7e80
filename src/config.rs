use crate::error::{QuoteError, Result};
use quote_extract_common::types::DEFAULT_CURRENCY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CURRENCY_ENV: &str = "QUOTE_EXTRACT_CURRENCY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_currency: String,
    /// 読み込むワークシートの位置（0始まり）
    pub sheet_index: usize,
    pub use_cache: bool,
    /// 並列数（0 = CPU数）
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.into(),
            sheet_index: 0,
            use_cache: false,
            jobs: 0,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| QuoteError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("quote-extract").join("config.json"))
    }

    /// 通貨コード（環境変数を優先）
    pub fn currency(&self) -> String {
        match std::env::var(CURRENCY_ENV) {
            Ok(value) if !value.trim().is_empty() => value.trim().to_uppercase(),
            _ => self.default_currency.clone(),
        }
    }

    pub fn set_currency(&mut self, currency: &str) -> Result<()> {
        let code = currency.trim().to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(QuoteError::Config(format!("通貨コードは3文字の英字です: {}", currency)));
        }
        self.default_currency = code;
        self.save()
    }

    pub fn set_sheet_index(&mut self, index: usize) -> Result<()> {
        self.sheet_index = index;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.sheet_index, 0);
        assert!(!config.use_cache);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"sheet_index": 2}"#).unwrap();
        assert_eq!(config.sheet_index, 2);
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.jobs, 0);
    }
}
