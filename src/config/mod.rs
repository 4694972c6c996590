use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use validator::Validate;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub app: AppConfig,
    #[validate(nested)]
    pub api: ApiConfig,
    #[validate(nested)]
    pub guest_list: GuestListConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppConfig {
    pub rust_log: String,
    /// "pretty" или "json"
    pub log_format: String,
}

// Настройки REST API платформы
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApiConfig {
    #[validate(url)]
    pub base_url: String,
    /// Bearer-токен организатора. Получение и обновление токена - вне этого клиента.
    pub token: String,
    /// Если не задан, действует таймаут по умолчанию HTTP-клиента.
    pub request_timeout_seconds: Option<u64>,
}

// Настройки списка гостей
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GuestListConfig {
    pub event_id: String,
    #[validate(range(min = 1, max = 100))]
    pub page_size: usize,
    #[validate(range(min = 1, max = 3600))]
    pub poll_interval_seconds: u64,
    pub export_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

// Плоские имена переменных, которые уже используются в .env организаторов
const LEGACY_ENV: &[(&str, &str)] = &[
    ("RUST_LOG", "app.rust_log"),
    ("LOG_FORMAT", "app.log_format"),
    ("API_BASE_URL", "api.base_url"),
    ("API_TOKEN", "api.token"),
    ("API_TIMEOUT_SECONDS", "api.request_timeout_seconds"),
    ("EVENT_ID", "guest_list.event_id"),
    ("PAGE_SIZE", "guest_list.page_size"),
    ("POLL_INTERVAL_SECONDS", "guest_list.poll_interval_seconds"),
    ("EXPORT_DIR", "guest_list.export_dir"),
];

impl Config {
    /// Загружает конфигурацию: значения по умолчанию, затем `GUEST_LIST__*`,
    /// затем плоские переменные окружения. Результат проверяется validator-ом.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("app.rust_log", "guest_list=debug,reqwest=info")?
            .set_default("app.log_format", "pretty")?
            .set_default("api.base_url", "http://localhost:5000")?
            .set_default("api.token", "")?
            .set_default("guest_list.event_id", "")?
            .set_default("guest_list.page_size", 10)?
            .set_default("guest_list.poll_interval_seconds", 5)?
            .set_default("guest_list.export_dir", ".")?
            .add_source(
                config::Environment::with_prefix("GUEST_LIST")
                    .separator("__")
                    .try_parsing(true),
            );

        for (var, key) in LEGACY_ENV {
            builder = builder.set_override_option(*key, env::var(var).ok())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
