use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use mail_ripple::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Page budget: {}", config.crawler.page_budget);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const VALID_CONFIG: &str = r#"
[crawler]
page-budget = 15
fetch-timeout-secs = 3

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[places]
api-key = "secret"
query = "avvocati"
zip-codes = ["22100", "22063"]

[output]
database-path = "./test.db"
sheet-name = "My Leads"
summary-path = "./leads.md"
"#;

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.page_budget, 15);
        assert_eq!(config.crawler.fetch_timeout_secs, 3);
        assert_eq!(config.user_agent.crawler_name, "TestCrawler");
        assert_eq!(config.places.api_key, "secret");
        assert_eq!(config.places.zip_codes, vec!["22100", "22063"]);
        assert_eq!(config.places.max_result_count, 20);
        assert_eq!(config.places.endpoint, "https://places.googleapis.com/v1");
        assert_eq!(config.output.sheet_name, "My Leads");
        assert_eq!(config.output.summary_path.as_deref(), Some("./leads.md"));
    }

    #[test]
    fn test_crawler_section_defaults() {
        let content = r#"
[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[places]
query = "dentisti"

[output]
database-path = "./test.db"
sheet-name = "Leads"
"#;
        let config = parse_config(content).unwrap();

        assert_eq!(config.crawler.page_budget, 10);
        assert_eq!(config.crawler.fetch_timeout_secs, 5);
        assert!(config.places.api_key.is_empty());
        assert_eq!(config.places.effective_zip_codes().len(), 91);
        assert_eq!(config.places.effective_zip_codes()[0], "22010");
        assert_eq!(config.places.effective_zip_codes()[90], "22100");
        assert!(config.output.summary_path.is_none());
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let content = VALID_CONFIG.replace("page-budget = 15", "page-budget = 0");
        let file = create_temp_config(&content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_empty_sheet_name_rejected() {
        let content = VALID_CONFIG.replace("sheet-name = \"My Leads\"", "sheet-name = \"  \"");
        assert!(matches!(
            parse_config(&content),
            Err(ConfigError::Validation(_))
        ));
    }
}
