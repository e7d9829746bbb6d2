use std::{env, path::PathBuf};

use config::{ConfigError, Environment, File, FileFormat, Source};
use dioxus::fullstack::Lazy;
use secrecy::SecretString;
use serde::Deserialize;
use types::Module;
use url::Url;

pub static CONFIG: Lazy<Config> = Lazy::new(|| async { Config::load() });

const ENV_PREFIX: &str = "DASHGATE";
const DEFAULT_CONFIG_PATH: &str = "dashgate.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub idp_url: Url,
    pub dashgate_url: Url,
    pub oauth_client_id: String,
    pub oauth_client_secret: SecretString,
    pub signing_secret: SecretString,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_admin_group")]
    pub admin_group: String,
    #[serde(default = "default_training_groups")]
    pub training_groups: Vec<String>,
    #[serde(default = "default_events_groups")]
    pub events_groups: Vec<String>,
}

impl Config {
    /// Load from `dashgate.toml` (or `$DASHGATE_CONFIG`) with `DASHGATE_*`
    /// environment variables layered on top.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("DASHGATE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

        Self::from_sources(
            File::new(&path, FileFormat::Toml).required(false),
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    fn from_sources<S>(file: S, env: Environment) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(file)
            .add_source(
                env.try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("training_groups")
                    .with_list_parse_key("events_groups"),
            )
            .build()?
            .try_deserialize()
    }

    /// Groups whose members may use `module`.
    pub fn module_groups(&self, module: Module) -> &[String] {
        match module {
            Module::Training => &self.training_groups,
            Module::Events => &self.events_groups,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("dashgate.sqlite")
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_admin_group() -> String {
    "dashgate_admin".into()
}

fn default_training_groups() -> Vec<String> {
    vec!["dashgate_training".into()]
}

fn default_events_groups() -> Vec<String> {
    vec!["dashgate_events".into()]
}
