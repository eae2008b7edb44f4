use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Import FetchConfig from teamvault_roster to avoid duplication
use teamvault_roster::FetchConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    /// Bot API token.
    pub token: String,
    /// Telegram user IDs allowed to run administrator commands.
    #[serde(default)]
    pub admins: Vec<u64>,
    /// When true anyone may /addteam; otherwise administrators only.
    #[serde(default)]
    pub open_submissions: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LibraryConfig {
    /// Required prefix for submitted team URLs.
    #[serde(default = "LibraryConfig::default_paste_prefix")]
    pub paste_prefix: String,
    /// Seconds a browse session stays navigable after the last input.
    #[serde(default = "LibraryConfig::default_nav_timeout_secs")]
    pub nav_timeout_secs: u64,
    /// Species dictionary file. Defaults to `pokedex.json` in the config
    /// directory.
    #[serde(default)]
    pub dex_file: Option<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            paste_prefix: Self::default_paste_prefix(),
            nav_timeout_secs: Self::default_nav_timeout_secs(),
            dex_file: None,
        }
    }
}

impl LibraryConfig {
    fn default_paste_prefix() -> String {
        "https://pokepast.es/".to_string()
    }

    const fn default_nav_timeout_secs() -> u64 {
        60
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DatabaseConfig {
    /// SQLite file. Defaults to `teams.db` in the config directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("teamvault");

        let config_path = config_dir.join("config.json");

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'teamvault init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("teamvault");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Path of the species dictionary file.
    pub fn species_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.library.dex_file {
            return Ok(path.clone());
        }
        Ok(Self::ensure_config_dir()?.join("pokedex.json"))
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }
        Ok(Self::ensure_config_dir()?.join("teams.db"))
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "telegram": {
    "token": "your-telegram-bot-token-here",
    "admins": [],
    "open_submissions": false
  },
  "library": {
    "paste_prefix": "https://pokepast.es/",
    "nav_timeout_secs": 60
  },
  "fetch": {
    "timeout": 10,
    "user_agent": "Mozilla/5.0 (compatible; teamvault/1.0)",
    "max_size": 1000000
  },
  "database": {}
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Telegram bot token");
        println!("   2. Add administrator user IDs to \"telegram.admins\"");
        println!(
            "   3. Put the species dictionary at {} (see 'teamvault help')",
            config_dir.join("pokedex.json").display()
        );
        println!("   4. Run 'teamvault serve' to start the bot");
        println!();
        println!("🔧 Configuration options:");
        println!("   - open_submissions: let anyone add teams (default: admins only)");
        println!("   - paste_prefix: accepted host prefix for team URLs");
        println!("   - nav_timeout_secs: how long result pages stay navigable");
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let Ok(config) = serde_json::from_str::<Config>(r#"{"telegram": {"token": "t"}}"#) else {
            panic!("minimal config should parse");
        };
        assert_eq!(config.telegram.token, "t");
        assert!(config.telegram.admins.is_empty());
        assert!(!config.telegram.open_submissions);
        assert_eq!(config.library.paste_prefix, "https://pokepast.es/");
        assert_eq!(config.library.nav_timeout_secs, 60);
        assert_eq!(config.fetch.timeout, 10);
        assert_eq!(config.database.path, None);
    }

    #[test]
    fn template_parses() {
        let template = r#"{
  "telegram": {
    "token": "your-telegram-bot-token-here",
    "admins": [],
    "open_submissions": false
  },
  "library": {
    "paste_prefix": "https://pokepast.es/",
    "nav_timeout_secs": 60
  },
  "fetch": {
    "timeout": 10,
    "user_agent": "Mozilla/5.0 (compatible; teamvault/1.0)",
    "max_size": 1000000
  },
  "database": {}
}"#;
        assert!(serde_json::from_str::<Config>(template).is_ok());
    }
}
