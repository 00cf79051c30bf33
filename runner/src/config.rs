use serde::{Deserialize, Serialize};
use snake_duel_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use snake_duel_engine::games::snake::GameConfig;

pub const CONFIG_FILE: &str = "snake_duel.yaml";

pub fn get_config_manager(path: &str) -> ConfigManager<FileContentConfigProvider, RunnerFileConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RunnerFileConfig {
    pub game: GameConfig,
    pub runner: RunnerConfig,
}

impl Validate for RunnerFileConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.runner.validate()?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RunnerConfig {
    pub frame_interval_ms: u64,
    pub max_ticks: Option<u64>,
    pub auto_revive: bool,
    pub continue_after_level: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            max_ticks: Some(2000),
            auto_revive: true,
            continue_after_level: false,
        }
    }
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.frame_interval_ms == 0 {
            return Err("frame_interval_ms must be greater than 0".to_string());
        }
        if self.frame_interval_ms > 1000 {
            return Err("frame_interval_ms must not exceed 1000".to_string());
        }
        if self.max_ticks == Some(0) {
            return Err("max_ticks must be greater than 0 when set".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_duel_engine::config::{ConfigContentProvider, ConfigSerializer};
    use snake_duel_engine::games::snake::InfiniteRule;

    fn get_temp_file_path() -> String {
        use std::env;
        let mut path = env::temp_dir();
        let random_number: u32 = rand::random();
        let file_name = format!("temp_snake_duel_runner_config_{}.yaml", random_number);
        path.push(file_name);
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = RunnerFileConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: RunnerFileConfig = serializer.deserialize(&serialized_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_manager() {
        let config = RunnerFileConfig {
            runner: RunnerConfig {
                max_ticks: None,
                continue_after_level: true,
                ..RunnerConfig::default()
            },
            ..RunnerFileConfig::default()
        };
        let file_path = get_temp_file_path();
        let manager = get_config_manager(&file_path);

        assert!(manager.set_config(&config).is_ok());
        assert_eq!(manager.get_config().unwrap(), config);

        let reloaded = get_config_manager(&file_path);
        assert_eq!(reloaded.get_config().unwrap(), config);
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager = get_config_manager("this_file_does_not_exist.yaml");
        assert_eq!(manager.get_config().unwrap(), RunnerFileConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());
        content_provider
            .set_config_content("game:\n  infinite_mode: true\n  infinite_rule: Deflect\n")
            .unwrap();

        let config = get_config_manager(&file_path).get_config().unwrap();
        assert!(config.game.infinite_mode);
        assert_eq!(config.game.infinite_rule, InfiniteRule::Deflect);
        assert_eq!(config.runner, RunnerConfig::default());
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let invalid_config_content = r#"
            game:
              speed_ms: 100
              canvas_width: 610
            runner:
              frame_interval_ms: 16
        "#;

        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());
        content_provider.set_config_content(invalid_config_content).unwrap();

        let get_result = get_config_manager(&file_path).get_config();
        assert!(get_result.is_err());
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_zero_frame_interval_is_rejected() {
        let config = RunnerConfig {
            frame_interval_ms: 0,
            ..RunnerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
