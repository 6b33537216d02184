use crate::config::types::ClientConfig;
use crate::ConfigError;
use chrono_tz::Tz;
use url::Url;

/// Upper bound on retries; beyond this the backoff runs for hours
const MAX_RETRY_CEILING: u32 = 10;

/// Validates the entire configuration
pub fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
    validate_cookies(config.cookies.as_deref())?;
    validate_timezone(config.timezone.as_deref())?;
    validate_site_root(&config.site_root)?;

    if config.max_retries > MAX_RETRY_CEILING {
        return Err(ConfigError::Validation(format!(
            "max_retries must be at most {}, got {}",
            MAX_RETRY_CEILING, config.max_retries
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Cookies end up in a header; line breaks would split it
fn validate_cookies(cookies: Option<&str>) -> Result<(), ConfigError> {
    match cookies {
        Some(c) if c.contains('\r') || c.contains('\n') => Err(ConfigError::Validation(
            "cookies must not contain line breaks".to_string(),
        )),
        _ => Ok(()),
    }
}

fn validate_timezone(timezone: Option<&str>) -> Result<(), ConfigError> {
    if let Some(name) = timezone {
        name.parse::<Tz>().map_err(|_| {
            ConfigError::Validation(format!("Unknown timezone '{}'", name))
        })?;
    }
    Ok(())
}

fn validate_site_root(site_root: &str) -> Result<(), ConfigError> {
    let url = Url::parse(site_root)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid site_root: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "site_root '{}' must use http or https",
            site_root
        )));
    }

    Ok(())
}
