//! Model name resolution.

/// Model used when neither the CLI nor the config names one.
pub const DEFAULT_MODEL: &str = "nano-banana";

/// Short name aliases for image-capable Gemini models.
const ALIASES: &[(&str, &str)] = &[
    ("nano-banana", "gemini-2.5-flash-image-preview"),
    ("nano-banana-2", "gemini-3.1-flash-image-preview"),
    ("nano-banana-pro", "gemini-3-pro-image-preview"),
];

/// Resolve a model name (alias or exact) to the full model identifier.
///
/// # Errors
///
/// Returns an error if the resolved name is not a Gemini model.
pub fn resolve_model(name: &str) -> Result<String, String> {
    let resolved = ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, full)| *full);

    if resolved.starts_with("gemini") {
        Ok(resolved.to_string())
    } else {
        Err(format!("Unsupported model '{name}'. Expected a 'gemini-*' model or an alias."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_alias_resolves() {
        assert_eq!(resolve_model(DEFAULT_MODEL).unwrap(), "gemini-2.5-flash-image-preview");
    }

    #[test]
    fn other_aliases() {
        assert_eq!(resolve_model("nano-banana-pro").unwrap(), "gemini-3-pro-image-preview");
        assert_eq!(resolve_model("nano-banana-2").unwrap(), "gemini-3.1-flash-image-preview");
    }

    #[test]
    fn exact_gemini_name_passes_through() {
        assert_eq!(
            resolve_model("gemini-2.5-flash-image").unwrap(),
            "gemini-2.5-flash-image"
        );
    }

    #[test]
    fn non_gemini_rejected() {
        assert!(resolve_model("gpt-image-1").is_err());
        assert!(resolve_model("").is_err());
    }
}
