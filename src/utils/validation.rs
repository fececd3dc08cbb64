use crate::error::{InsightsError, Result};

/// Checks that `url` is an absolute http(s) URL.
pub fn validate_url(key: &str, url: &str) -> Result<()> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(InsightsError::Config(format!(
            "`{key}` must start with http:// or https://, got `{url}`"
        )));
    }
    Ok(())
}
