//! CLI command implementations.

pub mod list;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;

const DEFAULT_DATABASE_URL: &str = "sqlite://database.db";

/// Resolve the database URL: explicit flag, then environment, then default.
pub fn database_url(flag: Option<String>) -> SecretString {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    let url = flag
        .or_else(|| std::env::var("DIRECTORY_DATABASE_URL").ok())
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    SecretString::from(url)
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_flag_wins() {
        let url = database_url(Some("sqlite::memory:".to_string()));
        assert_eq!(url.expose_secret(), "sqlite::memory:");
    }
}
