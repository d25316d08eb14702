use crate::config::types::{OutputConfig, PathRestriction, ScopeConfig, ScraperConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &ScraperConfig) -> Result<(), ConfigError> {
    validate_scope_config(&config.scope)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scope configuration
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    if let Some(domains) = &config.allowed_domains {
        if domains.is_empty() {
            return Err(ConfigError::Validation(
                "allowed-domains cannot be empty; omit it to crawl any host".to_string(),
            ));
        }

        for domain in domains {
            validate_domain_string(domain)?;
        }
    }

    for restriction in &config.path_restrictions {
        validate_path_restriction(restriction)?;
    }

    Ok(())
}

/// Validates a single host/path-prefix restriction
fn validate_path_restriction(restriction: &PathRestriction) -> Result<(), ConfigError> {
    validate_domain_string(&restriction.host)?;

    if !restriction.prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "Path prefix for '{}' must start with '/', got '{}'",
            restriction.host, restriction.prefix
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.records_path.is_empty() {
        return Err(ConfigError::Validation(
            "records-path cannot be empty".to_string(),
        ));
    }

    if config.log_path.is_empty() {
        return Err(ConfigError::Validation(
            "log-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a domain string
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&ScraperConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_domain_string() {
        assert!(validate_domain_string("ics.uci.edu").is_ok());
        assert!(validate_domain_string("my-site.example.com").is_ok());

        assert!(validate_domain_string("").is_err());
        assert!(validate_domain_string("*.uci.edu").is_err());
        assert!(validate_domain_string("localhost").is_err());
        assert!(validate_domain_string(".uci.edu").is_err());
        assert!(validate_domain_string("uci.edu.").is_err());
        assert!(validate_domain_string("uci..edu").is_err());
    }

    #[test]
    fn test_empty_allow_list_rejected() {
        let config = ScopeConfig {
            allowed_domains: Some(vec![]),
            path_restrictions: vec![],
        };
        assert!(matches!(
            validate_scope_config(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_path_prefix_must_be_absolute() {
        let restriction = PathRestriction {
            host: "today.uci.edu".to_string(),
            prefix: "department".to_string(),
        };
        assert!(validate_path_restriction(&restriction).is_err());

        let restriction = PathRestriction {
            host: "today.uci.edu".to_string(),
            prefix: "/department".to_string(),
        };
        assert!(validate_path_restriction(&restriction).is_ok());
    }

    #[test]
    fn test_empty_output_paths_rejected() {
        let mut config = OutputConfig::default();
        config.records_path.clear();
        assert!(validate_output_config(&config).is_err());

        let mut config = OutputConfig::default();
        config.log_path.clear();
        assert!(validate_output_config(&config).is_err());
    }
}
