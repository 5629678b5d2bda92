use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tscope_domain::config::{ApiConfig, non_blank};
use tscope_domain::constants::{
    CONFIG_ENV_PREFIX, GNEWS_API_KEY_ENV, NEWS_API_KEY_ENV, OPENAI_API_KEY_ENV,
};

const DEFAULT_CONFIG_FILE: &str = "server";
const LIST_KEYS: [&str; 3] =
    ["news.rss.trusted_feeds", "news.rss.fallback_feeds", "media.allowed_extensions"];

#[tscope_derive::tscope_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration into `T`.
///
/// Layers, lowest precedence first:
/// 1. A TOML/JSON/YAML file. An explicit `path` must exist; the default
///    `server.*` file in the working directory is optional.
/// 2. Environment variables prefixed with `TSCOPE__`, nested with `__`
///    (`TSCOPE__NEWS__RSS__REFRESH_INTERVAL_SECS=60`). Feed lists and the
///    upload extension list accept comma-separated values.
///
/// # Errors
/// Returns [`ConfigError::Config`] when the explicit file is missing, a
/// source is malformed, or the merged values do not match `T`.
///
/// # Example
/// ```rust
/// use tscope_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    layered(path, None)
}

fn layered<T>(
    path: Option<impl AsRef<Path>>,
    env_source: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (file, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let env = LIST_KEYS.iter().fold(
        Environment::with_prefix(CONFIG_ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .convert_case(config::Case::Snake)
            .try_parsing(true)
            .list_separator(",")
            .source(env_source),
        |env, key| env.with_list_parse_key(key),
    );

    info!(file = %file.display(), required, "Loading configuration");

    Config::builder()
        .add_source(File::from(file.as_path()).required(required))
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

/// Loads [`ApiConfig`] and fills provider keys from the conventional
/// `NEWS_API_KEY`, `GNEWS_API_KEY` and `OPENAI_API_KEY` variables.
///
/// # Errors
/// See [`load_config`].
pub fn load_api_config(path: Option<impl AsRef<Path>>) -> Result<ApiConfig, ConfigError> {
    let mut cfg: ApiConfig = load_config(path)?;
    apply_conventional_keys(&mut cfg, |name| std::env::var(name).ok());
    Ok(cfg)
}

/// Fills keys that are still unset (or blank) after layering.
pub fn apply_conventional_keys<F>(cfg: &mut ApiConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let fill = |slot: &mut Option<String>, name: &str| {
        if non_blank(slot.as_ref()).is_none()
            && let Some(value) = lookup(name).filter(|v| !v.trim().is_empty())
        {
            debug!(variable = name, "Using conventional environment key");
            *slot = Some(value);
        }
    };

    fill(&mut cfg.news.news_api_key, NEWS_API_KEY_ENV);
    fill(&mut cfg.news.gnews_api_key, GNEWS_API_KEY_ENV);
    fill(&mut cfg.llm.api_key, OPENAI_API_KEY_ENV);
}
