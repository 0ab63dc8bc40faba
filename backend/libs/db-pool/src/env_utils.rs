//! Typed lookups over environment variables.

use std::str::FromStr;

/// Value of `key` parsed as `T`, or `default` when unset or unparsable.
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    parse_env_optional(key).unwrap_or(default)
}

pub fn parse_env_optional<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn falls_back_when_missing_or_invalid() {
        std::env::remove_var("DB_POOL_TEST_VALUE");
        assert_eq!(parse_env_with_default("DB_POOL_TEST_VALUE", 7u32), 7);

        std::env::set_var("DB_POOL_TEST_VALUE", "seven");
        assert_eq!(parse_env_with_default("DB_POOL_TEST_VALUE", 7u32), 7);

        std::env::set_var("DB_POOL_TEST_VALUE", " 42 ");
        assert_eq!(parse_env_optional::<u32>("DB_POOL_TEST_VALUE"), Some(42));
        std::env::remove_var("DB_POOL_TEST_VALUE");
    }
}
