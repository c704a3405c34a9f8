use crate::embed_url_resolver::youtube::DEFAULT_EMBED_URL_TEMPLATE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "PORTAL";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub storage_path: PathBuf,
    /// `{video_id}` is replaced with the id taken from the course link.
    #[serde(default = "default_embed_url_template")]
    pub embed_url_template: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_embed_url_template() -> String {
    DEFAULT_EMBED_URL_TEMPLATE.to_string()
}

/// Reads the config file at `path`, then applies `PORTAL_*` environment
/// overrides on top of it.
pub fn new(path: &Path) -> Result<Config, config::ConfigError> {
    load(path, None)
}

/// `env` replaces the process environment when given.
fn load(
    path: &Path,
    env: Option<config::Map<String, String>>,
) -> Result<Config, config::ConfigError> {
    let path_str = match path.to_str() {
        Some(str) => str,
        None => {
            return Err(config::ConfigError::Message(String::from(
                "cannot parse path parameter",
            )));
        }
    };

    config::Config::builder()
        .add_source(config::File::with_name(path_str).required(true))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).source(env))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn config_new_fn_applies_defaults() {
        let file = write_config(r#"{"storage_path": "portal_data"}"#);

        let result = new(file.path()).unwrap();

        assert_eq!(result.storage_path, PathBuf::from("portal_data"));
        assert_eq!(result.embed_url_template, DEFAULT_EMBED_URL_TEMPLATE);
        assert_eq!(result.log_format, LogFormat::Text);
    }

    #[test]
    fn config_new_fn_reads_every_field() {
        let file = write_config(
            r#"{
                "storage_path": "/var/lib/portal",
                "embed_url_template": "https://www.youtube-nocookie.com/embed/{video_id}",
                "log_format": "json"
            }"#,
        );

        let result = new(file.path()).unwrap();

        assert_eq!(result.storage_path, PathBuf::from("/var/lib/portal"));
        assert_eq!(
            result.embed_url_template,
            "https://www.youtube-nocookie.com/embed/{video_id}"
        );
        assert_eq!(result.log_format, LogFormat::Json);
    }

    #[test]
    fn config_new_fn_fails_without_storage_path() {
        let file = write_config(r#"{"log_format": "text"}"#);

        let result = new(file.path());

        assert!(result.is_err(), "result is ok: {result:#?}");
    }

    #[test]
    fn config_new_fn_fails_on_missing_file() {
        let result = new(Path::new("definitely_missing_config.json"));

        assert!(result.is_err(), "result is ok: {result:#?}");
    }

    #[test]
    fn config_load_fn_applies_env_overrides() {
        let file = write_config(r#"{"storage_path": "from_file", "log_format": "text"}"#);
        let env = [
            ("PORTAL_STORAGE_PATH", "from_env"),
            ("PORTAL_LOG_FORMAT", "json"),
            ("OTHER_STORAGE_PATH", "ignored"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let result = load(file.path(), Some(env)).unwrap();

        assert_eq!(result.storage_path, PathBuf::from("from_env"));
        assert_eq!(result.log_format, LogFormat::Json);
        assert_eq!(result.embed_url_template, DEFAULT_EMBED_URL_TEMPLATE);
    }
}
