use search::config::Config as SearchConfig;
use serde::Deserialize;
use std::fs::File;

#[derive(Debug, Deserialize)]
pub struct MetricsConfig {
    pub statsd_host: String,
    pub statsd_port: u16,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub sentry_dsn: String,
}

/// Top-level service configuration: the search section plus optional
/// metrics and error-reporting sections.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub metrics: Option<MetricsConfig>,
    pub logging: Option<LoggingConfig>,
    pub search: SearchConfig,
}

impl Config {
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config = serde_yaml::from_reader(file)?;

        Ok(config)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp_file(s: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        write!(tmp, "{}", s).expect("write yaml");

        tmp
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
            metrics:
                statsd_host: 127.0.0.1
                statsd_port: 8125
            logging:
                sentry_dsn: https://key@sentry.example.test/1
            search:
                listener:
                    host: 0.0.0.0
                    port: 3000
                deadline_ms: 950
                credentials:
                    username: demo
                    password: secret
                sources:
                    - name: source1
                      url: https://flights.example.test/source1
                    - name: source2
                      url: https://flights.example.test/source2
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");

        assert_eq!(config.metrics.expect("metrics config").statsd_port, 8125);
        assert_eq!(
            config.logging.expect("logging config").sentry_dsn,
            "https://key@sentry.example.test/1"
        );
        assert_eq!(config.search.listener.port, Some(3000));
        assert_eq!(config.search.sources.len(), 2);
        assert!(config.search.validate().is_ok());
    }

    #[test]
    fn test_minimal_config() {
        let yaml = r#"
            search:
                listener:
                    host: 127.0.0.1
                sources:
                    - name: source1
                      url: http://127.0.0.1:8080/flights
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");

        assert!(config.metrics.is_none());
        assert!(config.logging.is_none());
        // Port left to the PORT env override
        assert_eq!(config.search.listener.port, None);
        assert_eq!(config.search.deadline_ms, 950);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = Config::from_file(std::path::Path::new("/definitely/not/here.yaml"))
            .expect_err("missing file");
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let tmp = write_tmp_file("search: [not, a, mapping");
        let err = Config::from_file(tmp.path()).expect_err("bad yaml");
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
