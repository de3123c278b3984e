//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// An unset variable without a default is an error naming `field`. A value
/// with no `${` is returned untouched, bare `$` included. Once a value has a
/// `${` reference, bare `$VAR` references in it are expanded as well.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", err.cause.0),
    })
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FOLIO_TEST_HOST", "0.0.0.0");
        }
        let result = expand_env("${FOLIO_TEST_HOST}", "server.host").unwrap();
        assert_eq!(result, "0.0.0.0");
        unsafe {
            std::env::remove_var("FOLIO_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("FOLIO_TEST_UNSET");
        }
        let result = expand_env("${FOLIO_TEST_UNSET:-localhost}", "server.host").unwrap();
        assert_eq!(result, "localhost");
    }

    #[test]
    fn test_expand_embedded() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FOLIO_TEST_DOMAIN", "example.com");
        }
        let result = expand_env("blog.${FOLIO_TEST_DOMAIN}", "site.title").unwrap();
        assert_eq!(result, "blog.example.com");
        unsafe {
            std::env::remove_var("FOLIO_TEST_DOMAIN");
        }
    }

    #[test]
    fn test_missing_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("FOLIO_TEST_MISSING");
        }
        let err = expand_env("${FOLIO_TEST_MISSING}", "site.title").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("FOLIO_TEST_MISSING"));
        assert!(err.to_string().contains("site.title"));
    }

    #[test]
    fn test_literals_unchanged() {
        assert_eq!(expand_env("jackbliss.co.uk", "site.title").unwrap(), "jackbliss.co.uk");
        assert_eq!(expand_env("$5 deals", "site.title").unwrap(), "$5 deals");
    }

    #[test]
    fn test_bare_dollar_kept_without_braces() {
        let result = expand_env("costs $5", "site.title").unwrap();
        assert_eq!(result, "costs $5");
    }

    #[test]
    fn test_bare_var_expanded_alongside_braces() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("FOLIO_TEST_MIXED_A", "a");
            std::env::set_var("FOLIO_TEST_MIXED_B", "b");
        }
        let result =
            expand_env("${FOLIO_TEST_MIXED_A}-$FOLIO_TEST_MIXED_B", "site.title").unwrap();
        assert_eq!(result, "a-b");
        unsafe {
            std::env::remove_var("FOLIO_TEST_MIXED_A");
            std::env::remove_var("FOLIO_TEST_MIXED_B");
        }
    }
}
