use std::time::Duration;

use ::url::Url;

pub const DEFAULT_LOGIN_URL: &str = "/account/login";

#[derive(Debug, ::thiserror::Error)]
#[error("`{name}` has invalid value `{value}`: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// archiver REST base; `None` runs without an archiver
    pub archiver_url: Option<Url>,
    pub archiver_timeout: Duration,
    pub login_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 2,
            archiver_url: None,
            archiver_timeout: Duration::from_secs(30),
            login_url: String::from(DEFAULT_LOGIN_URL),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Builds the config from `(name, value)` pairs; unknown names are ignored, empty values count as unset.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Config::default();

        for (name, value) in vars {
            if value.trim().is_empty() {
                continue;
            }

            match name.as_str() {
                "HTTP_HOST" => config.host = value,
                "HTTP_PORT" => config.port = parse("HTTP_PORT", &value)?,
                "HTTP_WORKERS" => {
                    config.workers = match parse("HTTP_WORKERS", &value)? {
                        0 => return Err(invalid("HTTP_WORKERS", &value, "must be at least 1")),
                        n => n,
                    }
                }
                "ARCHIVER_URL" => {
                    let url = Url::parse(&value)
                        .map_err(|e| invalid("ARCHIVER_URL", &value, e))?;
                    config.archiver_url = Some(url);
                }
                "ARCHIVER_TIMEOUT_SECS" => {
                    config.archiver_timeout =
                        Duration::from_secs(parse("ARCHIVER_TIMEOUT_SECS", &value)?)
                }
                "LOGIN_URL" => config.login_url = value,
                _ => {}
            }
        }

        Ok(config)
    }
}

fn invalid(name: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError {
        name,
        value: value.to_owned(),
        reason: reason.to_string(),
    }
}

fn parse<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: ToString,
{
    value.trim().parse().map_err(|e| invalid(name, value, e))
}
