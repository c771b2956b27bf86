use clap::Parser;
use lib_scale::feed::FeedConfig;
use lib_scale::ingestors::scale_wss::ScaleWssConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Deserialize, Serialize, Debug, Clone, Default)]
#[clap(about = "Cosmic scale telemetry feed", version)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[clap(long, env = "SCALE_WS_URL", help = "Scale sensor WebSocket endpoint.")]
    pub ws_url: Option<String>,

    #[clap(long, env = "SCALE_CONFIG_PATH", help = "Path to the JSON configuration file.")]
    pub config_path: Option<PathBuf>,

    #[clap(long, env = "SCALE_LOG_DIR", help = "Directory for log files.")]
    pub log_dir: Option<PathBuf>,

    #[clap(long, env = "SCALE_LOG_LEVEL", help = "Logging level (trace, debug, info, warn, error).")]
    pub log_level: Option<String>,

    #[clap(long, env = "SCALE_RECONNECT_DELAY_MS", help = "Fixed delay in milliseconds before a reconnect attempt.")]
    pub reconnect_delay_ms: Option<u64>,

    #[clap(long, env = "SCALE_TICK_INTERVAL_MS", help = "Aggregation tick period in milliseconds.")]
    pub tick_interval_ms: Option<u64>,

    #[clap(long, env = "SCALE_WINDOW_CAPACITY", help = "Number of raw samples held in the smoothing window.")]
    pub window_capacity: Option<usize>,

    #[clap(long, env = "SCALE_BODY", help = "Celestial body selected for display.")]
    pub body: Option<String>,

    #[clap(long, env = "SCALE_SIM_LISTEN_ADDR", help = "Listen address for the sensor simulator.")]
    pub sim_listen_addr: Option<String>,

    #[clap(long, env = "SCALE_SIM_EMIT_INTERVAL_MS", help = "Frame emission period of the sensor simulator in milliseconds.")]
    pub sim_emit_interval_ms: Option<u64>,
}

impl Config {
    // Merge two Config structs, where 'other' overrides 'self' for Some values
    fn merge(self, other: Config) -> Config {
        Config {
            ws_url: other.ws_url.or(self.ws_url),
            config_path: other.config_path.or(self.config_path),
            log_dir: other.log_dir.or(self.log_dir),
            log_level: other.log_level.or(self.log_level),
            reconnect_delay_ms: other.reconnect_delay_ms.or(self.reconnect_delay_ms),
            tick_interval_ms: other.tick_interval_ms.or(self.tick_interval_ms),
            window_capacity: other.window_capacity.or(self.window_capacity),
            body: other.body.or(self.body),
            sim_listen_addr: other.sim_listen_addr.or(self.sim_listen_addr),
            sim_emit_interval_ms: other.sim_emit_interval_ms.or(self.sim_emit_interval_ms),
        }
    }

    /// Pipeline settings for the library, with the same defaults the
    /// pipeline itself ships.
    pub fn feed_config(&self) -> FeedConfig {
        let defaults = FeedConfig::default();
        FeedConfig {
            stream: ScaleWssConfig {
                ws_url: self.ws_url.clone().unwrap_or(defaults.stream.ws_url),
                reconnect_delay: self
                    .reconnect_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.stream.reconnect_delay),
            },
            tick_interval: self
                .tick_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_interval),
            window_capacity: self.window_capacity.unwrap_or(defaults.window_capacity),
        }
    }
}

pub fn load_config() -> Config {
    // 1. Load defaults
    let default_config = Config {
        ws_url: Some("ws://localhost:8000/ws".to_string()),
        log_dir: Some(PathBuf::from("./logs")),
        log_level: Some("info".to_string()),
        reconnect_delay_ms: Some(3000),
        tick_interval_ms: Some(800),
        window_capacity: Some(5),
        body: Some("Earth".to_string()),
        sim_listen_addr: Some("127.0.0.1:8000".to_string()),
        sim_emit_interval_ms: Some(2000),
        ..Default::default()
    };

    // 2. Load from config file (kiosk_scale.conf) if present.
    //    Allow overriding the default config file path with a CLI arg.
    let cli_args_for_path = Config::parse();

    let config_file_path = cli_args_for_path
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("kiosk_scale.conf"));

    let mut current_config = default_config;

    if config_file_path.exists() {
        if let Ok(config_str) = fs::read_to_string(&config_file_path) {
            if let Ok(file_config) = serde_json::from_str::<Config>(&config_str) {
                current_config = current_config.merge(file_config);
            } else {
                log::warn!(
                    "Failed to parse config file: {}. Falling back to other sources.",
                    config_file_path.display()
                );
            }
        } else {
            log::warn!(
                "Failed to read config file: {}. Falling back to other sources.",
                config_file_path.display()
            );
        }
    }

    // 3. Override with environment variables and CLI arguments; clap handles
    //    both, and the merge puts them above the file config.
    let cli_args_final = Config::parse();
    current_config.merge(cli_args_final)
}
