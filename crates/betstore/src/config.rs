use std::env;

use crate::store::{DEFAULT_MAX_CREATE_ATTEMPTS, DEFAULT_PAGE_SIZE};

/// Store configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the bet table (default: "bets_table")
    pub table_name: String,
    /// Bets returned per list page (default: 10)
    pub page_size: i32,
    /// Identifiers tried per create before giving up (default: 10)
    pub create_max_attempts: u32,
    /// DynamoDB endpoint override, e.g. a local DynamoDB (default: none)
    pub endpoint_override: Option<String>,
    /// AWS region (default: "us-east-1")
    pub region: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - Bet table name (default: "bets_table")
    /// - `PAGE_SIZE` - List page size (default: 10)
    /// - `CREATE_MAX_ATTEMPTS` - Create attempts before giving up (default: 10)
    /// - `ENDPOINT_OVERRIDE` - DynamoDB endpoint URL (default: none)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup. Unparsable
    /// numbers fall back to their defaults, as do empty strings.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            table_name: var("TABLE_NAME").unwrap_or_else(|| "bets_table".to_string()),
            page_size: var("PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|n: &i32| *n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            create_max_attempts: var("CREATE_MAX_ATTEMPTS")
                .and_then(|v| v.parse().ok())
                .filter(|n: &u32| *n > 0)
                .unwrap_or(DEFAULT_MAX_CREATE_ATTEMPTS),
            endpoint_override: var("ENDPOINT_OVERRIDE"),
            region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]);

        assert_eq!(config.table_name, "bets_table");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.create_max_attempts, 10);
        assert_eq!(config.endpoint_override, None);
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TABLE_NAME", "bets_test"),
            ("PAGE_SIZE", "25"),
            ("CREATE_MAX_ATTEMPTS", "3"),
            ("ENDPOINT_OVERRIDE", "http://localhost:8000"),
            ("AWS_REGION", "eu-west-1"),
        ]);

        assert_eq!(config.table_name, "bets_test");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.create_max_attempts, 3);
        assert_eq!(
            config.endpoint_override.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(config.region, "eu-west-1");
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = config_from(&[
            ("PAGE_SIZE", "many"),
            ("CREATE_MAX_ATTEMPTS", "0"),
            ("ENDPOINT_OVERRIDE", ""),
        ]);

        assert_eq!(config.page_size, 10);
        assert_eq!(config.create_max_attempts, 10);
        assert_eq!(config.endpoint_override, None);
    }
}
