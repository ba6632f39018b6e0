//! src/configuration.rs
use config::{Config, File};
use secrecy::Secret;
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub turnstile: TurnstileSettings,
    pub email: EmailSettings,
}

impl Settings {
    pub fn set_turnstile_url(&mut self, verify_url: String) {
        self.turnstile.verify_url = verify_url;
    }

    pub fn set_email_url(&mut self, api_url: String) {
        self.email.api_url = api_url;
    }

    /// Deployment secrets keep their historical variable names, so they are
    /// layered on top of the YAML files instead of going through the `APP_`
    /// prefix.
    fn apply_secrets(&mut self, secrets: Secrets) {
        if let Some(sender) = secrets.email_from {
            self.email.sender = Some(sender);
        }
        if let Some(recipient) = secrets.email_to {
            self.email.recipient = Some(recipient);
        }
        if let Some(api_key) = secrets.resend_api_key {
            self.email.api_key = api_key;
        }
        if let Some(secret_key) = secrets.turnstile_secret_key {
            self.turnstile.secret_key = secret_key;
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TurnstileSettings {
    pub verify_url: String,
    pub secret_key: Secret<String>,
    #[serde(default = "default_forward_client_ip")]
    pub forward_client_ip: bool,
    pub timeout_milliseconds: u64,
}

impl TurnstileSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

fn default_forward_client_ip() -> bool {
    true
}

#[derive(Deserialize, Clone, Debug)]
pub struct EmailSettings {
    pub api_url: String,
    pub api_key: Secret<String>,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    #[serde(default = "default_site_name")]
    pub site_name: String,
    pub timeout_milliseconds: u64,
}

impl EmailSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

fn default_site_name() -> String {
    "Portfolio".into()
}

#[derive(Deserialize, Debug, Default)]
struct Secrets {
    email_from: Option<String>,
    email_to: Option<String>,
    resend_api_key: Option<Secret<String>>,
    turnstile_secret_key: Option<Secret<String>>,
}

#[derive(Debug, PartialEq)]
pub enum Environment {
    Local,
    Production,
}
impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_ref() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            _ => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                s
            )),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("Failed to determine the current directory")]
    CurrentDirectory(#[source] std::io::Error),
    #[error("Failed to parse APP_ENVIRONMENT: {0}")]
    Environment(String),
    #[error(transparent)]
    Files(#[from] config::ConfigError),
    #[error("Failed to read secrets from the environment")]
    Secrets(#[from] envy::Error),
    #[error("Failed to read {1}")]
    DotEnv(#[source] dotenvy::Error, String),
}

pub fn get_configuration() -> Result<Settings, ConfigurationError> {
    let base_path = std::env::current_dir().map_err(ConfigurationError::CurrentDirectory)?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if not specified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigurationError::Environment)?;

    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base")).required(true))
        .add_source(File::from(configuration_directory.join(environment.as_str())).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let mut settings: Settings = settings.try_deserialize()?;

    if environment == Environment::Local {
        let dotenv_path = configuration_directory.join(".env");
        if dotenv_path.exists() {
            dotenvy::from_path(&dotenv_path).map_err(|e| {
                ConfigurationError::DotEnv(e, dotenv_path.display().to_string())
            })?;
        }
    }

    let secrets = envy::from_env::<Secrets>()?;
    settings.apply_secrets(secrets);

    Ok(settings)
}
