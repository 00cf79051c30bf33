use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads, validates and caches a config value. The first successful
/// `get_config` is cached; `set_config` validates before persisting.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Mutex::new(None),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }

    /// Applies `update` to the current config and persists the result.
    /// Nothing is written when the updated config fails validation.
    pub fn update_config<F>(&self, update: F) -> Result<TConfig, String>
    where
        F: FnOnce(&mut TConfig),
    {
        let mut config = self.get_config()?;
        update(&mut config);
        self.set_config(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InMemoryContentProvider;
    use crate::games::snake::{GameConfig, InfiniteRule};

    fn manager_with(content: Option<&str>) -> ConfigManager<InMemoryContentProvider, GameConfig> {
        ConfigManager::new(
            InMemoryContentProvider::new(content.map(str::to_string)),
            YamlConfigSerializer::new(),
        )
    }

    #[test]
    fn test_missing_content_returns_default_config() {
        let manager = manager_with(None);
        assert_eq!(manager.get_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let manager = manager_with(Some("speed_ms: 150\ninfinite_rule: Deflect\n"));
        let config = manager.get_config().unwrap();
        assert_eq!(config.speed_ms, 150);
        assert_eq!(config.infinite_rule, InfiniteRule::Deflect);
        assert_eq!(config.food_count, GameConfig::default().food_count);
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let manager = manager_with(Some("speed_ms: 10\n"));
        let result = manager.get_config();
        assert!(result.is_err());
        assert!(result.unwrap_err().starts_with("Config validation error"));
    }

    #[test]
    fn test_malformed_yaml_cant_be_read() {
        let manager = manager_with(Some("speed_ms: [not a number\n"));
        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_set_config_rejects_invalid_and_keeps_previous() {
        let manager = manager_with(None);
        let bad = GameConfig {
            food_count: 0,
            ..GameConfig::default()
        };
        assert!(manager.set_config(&bad).is_err());
        assert_eq!(manager.get_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_update_config_persists() {
        let manager = manager_with(None);
        let updated = manager.update_config(|c| c.speed_ms = 200).unwrap();
        assert_eq!(updated.speed_ms, 200);
        assert_eq!(manager.get_config().unwrap().speed_ms, 200);
    }

    #[test]
    fn test_config_file_round_trip() {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_duel_config_{}.yaml", random_number));

        let config = GameConfig {
            infinite_mode: true,
            revive_count: 1,
            ..GameConfig::default()
        };
        let manager = ConfigManager::from_yaml_file(path.clone());
        manager.set_config(&config).unwrap();

        let reloaded: ConfigManager<_, GameConfig, _> = ConfigManager::from_yaml_file(path.clone());
        assert_eq!(reloaded.get_config().unwrap(), config);
        let _ = std::fs::remove_file(path);
    }
}
