//! `initializationOptions` → [`EditorConfig`].
//!
//! Recognised keys (all optional):
//!
//! ```json
//! { "maxSuggestions": 8, "textContextCompletions": true }
//! ```

use anyhow::{bail, Context};
use jellyfish_editor::EditorConfig;
use serde_json::Value;

pub fn from_init_options(options: Option<&Value>) -> anyhow::Result<EditorConfig> {
    let mut config = EditorConfig::default();
    let Some(options) = options else {
        return Ok(config);
    };
    if options.is_null() {
        return Ok(config);
    }
    let Some(map) = options.as_object() else {
        bail!("initializationOptions must be an object, got {}", options);
    };

    if let Some(v) = map.get("maxSuggestions") {
        let n = v
            .as_u64()
            .with_context(|| format!("maxSuggestions must be a non-negative integer, got {}", v))?;
        config = config.max_suggestions(usize::try_from(n).context("maxSuggestions is too large")?);
    }
    if let Some(v) = map.get("textContextCompletions") {
        let on = v
            .as_bool()
            .with_context(|| format!("textContextCompletions must be a boolean, got {}", v))?;
        config = config.text_context_completions(on);
    }
    for key in map.keys() {
        if !matches!(key.as_str(), "maxSuggestions" | "textContextCompletions") {
            log::warn!("ignoring unknown initialization option `{}`", key);
        }
    }

    config.validate().context("invalid initializationOptions")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_options_give_defaults() {
        assert_eq!(from_init_options(None).unwrap(), EditorConfig::default());
        assert_eq!(from_init_options(Some(&Value::Null)).unwrap(), EditorConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = from_init_options(Some(&json!({
            "maxSuggestions": 3,
            "textContextCompletions": false,
        })))
        .unwrap();
        assert_eq!(config.max_suggestions, 3);
        assert!(!config.text_context_completions);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(from_init_options(Some(&json!({ "maxSuggestions": "lots" }))).is_err());
        assert!(from_init_options(Some(&json!({ "maxSuggestions": 0 }))).is_err());
        assert!(from_init_options(Some(&json!([1, 2]))).is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = from_init_options(Some(&json!({ "theme": "light" }))).unwrap();
        assert_eq!(config, EditorConfig::default());
    }
}
