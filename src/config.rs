use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub draw: DrawConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 本地数据目录,各集合以 JSON 文件形式保存在这里
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    /// 抽奖滚动采样间隔(毫秒)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_tick_interval_ms() -> u64 {
    100
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件,不存在时退回环境变量与默认值
        match std::fs::read_to_string(&config_path) {
            Ok(config_str) => toml::from_str(&config_str).map_err(|e| {
                AppError::ConfigError(format!("Failed to parse {config_path}: {e}"))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                Ok(Config {
                    storage: StorageConfig {
                        data_dir: env::var("LOTTERY_DATA_DIR")
                            .unwrap_or_else(|_| default_data_dir()),
                    },
                    draw: DrawConfig {
                        tick_interval_ms: get_env_parse(
                            "LOTTERY_TICK_INTERVAL_MS",
                            default_tick_interval_ms(),
                        ),
                    },
                })
            }
            Err(e) => Err(AppError::ConfigError(format!(
                "Failed to read {config_path}: {e}"
            ))),
        }
    }
}
