use std::path::PathBuf;

#[must_use]
pub(super) fn read_non_empty_env(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

#[must_use]
pub(super) fn read_path_env(name: &str) -> Option<PathBuf> {
    read_non_empty_env(name).map(PathBuf::from)
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_reads_as_none() {
        assert_eq!(read_non_empty_env("SMARTVERIFY_TEST_UNSET_VARIABLE"), None);
        assert_eq!(read_path_env("SMARTVERIFY_TEST_UNSET_VARIABLE"), None);
    }

    #[test]
    fn blank_values_are_treated_as_unset() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some(" \t\n".to_string())), None);
        assert_eq!(
            non_empty(Some("  /tmp/smart.owl ".to_string())),
            Some("/tmp/smart.owl".to_string())
        );
    }
}
