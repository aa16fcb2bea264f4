use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub engine: EngineConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Commands that may queue for the engine task before senders wait.
    pub command_buffer: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsConfig {
    /// Prometheus scrape address; no exporter is started when unset.
    pub listen_addr: Option<String>,
}

impl Settings {
    /// Defaults, then the file at `path` if present, then `MATCHING__*`
    /// environment variables (e.g. `MATCHING__SERVER__LISTEN_ADDR`).
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .set_default("server.listen_addr", "0.0.0.0:8080")?
            .set_default("engine.command_buffer", 1024_i64)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("MATCHING")
                    .prefix_separator("__")
                    .separator("__"),
            );
        Ok(builder.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load("does/not/exist.yaml").unwrap();
        assert_eq!(settings.server.listen_addr, "0.0.0.0:8080");
        assert_eq!(settings.engine.command_buffer, 1024);
        assert!(settings.metrics.listen_addr.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let path = std::env::temp_dir().join(format!("matching-settings-{}.yaml", std::process::id()));
        std::fs::write(
            &path,
            "server:\n  listen_addr: 127.0.0.1:9000\nmetrics:\n  listen_addr: 127.0.0.1:9100\n",
        )
        .unwrap();
        let settings = Settings::load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.server.listen_addr, "127.0.0.1:9000");
        assert_eq!(settings.engine.command_buffer, 1024);
        assert_eq!(settings.metrics.listen_addr.as_deref(), Some("127.0.0.1:9100"));
    }
}
