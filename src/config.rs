use reqwest::Url;

use crate::error::{QuiverError, Result};

/// Where the analysis service listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Immutable service configuration, built once at startup and shared by the
/// loader and the remote client.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Analysis service, e.g. `http://localhost:8000`.
    pub base_url: Url,
    /// Host serving the static `[{time, value}]` recordings.  When absent,
    /// bare dataset names are read from the local filesystem.
    pub static_root: Option<Url>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            static_root: None,
        }
    }
}

impl ServiceConfig {
    /// Build and validate a config from raw strings (CLI flags / env vars).
    pub fn new(base_url: &str, static_root: Option<&str>) -> Result<Self> {
        let config = Self {
            base_url: parse_url("base URL", base_url)?,
            static_root: static_root.map(|s| parse_url("static root", s)).transpose()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Both URLs must be http(s) and usable as a base for joins.
    pub fn validate(&self) -> Result<()> {
        check_base("base URL", &self.base_url)?;
        if let Some(root) = &self.static_root {
            check_base("static root", root)?;
        }
        Ok(())
    }
}

fn parse_url(what: &str, raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuiverError::Config(format!("{what} cannot be empty")));
    }
    // Url::join drops the last path segment unless it ends with '/'.
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|e| QuiverError::Config(format!("{what} '{raw}': {e}")))
}

fn check_base(what: &str, url: &Url) -> Result<()> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(QuiverError::Config(format!(
            "{what} must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(QuiverError::Config(format!("{what} '{url}' cannot be a base URL")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert!(config.static_root.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn keeps_path_prefix_of_base() {
        let config = ServiceConfig::new("http://host:9000/api", Some("http://cdn/data")).unwrap();
        assert_eq!(config.base_url.as_str(), "http://host:9000/api/");
        assert_eq!(config.static_root.unwrap().as_str(), "http://cdn/data/");
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(matches!(
            ServiceConfig::new("ftp://host", None),
            Err(QuiverError::Config(_))
        ));
        assert!(matches!(ServiceConfig::new("", None), Err(QuiverError::Config(_))));
        assert!(matches!(
            ServiceConfig::new("not a url", None),
            Err(QuiverError::Config(_))
        ));
    }
}
