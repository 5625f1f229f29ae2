//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Bare `$VAR` is left alone. An unset variable without a default is an
/// error naming `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("WIKISNAP_TEST_HOST", "mirror.example");
        }
        let result = expand_env("https://${WIKISNAP_TEST_HOST}/", "snapshot.base_url").unwrap();
        assert_eq!(result, "https://mirror.example/");
        unsafe {
            std::env::remove_var("WIKISNAP_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("WIKISNAP_TEST_UNSET");
        }
        let result = expand_env("${WIKISNAP_TEST_UNSET:-http://a.net}", "snapshot.base_url").unwrap();
        assert_eq!(result, "http://a.net");
    }

    #[test]
    fn test_missing_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("WIKISNAP_TEST_MISSING");
        }
        let err = expand_env("${WIKISNAP_TEST_MISSING}", "snapshot.base_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("WIKISNAP_TEST_MISSING"));
        assert!(err.to_string().contains("snapshot.base_url"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("http://a.net", "f").unwrap(), "http://a.net");
        assert_eq!(expand_env("http://a.net/$x", "f").unwrap(), "http://a.net/$x");
    }
}
