use serde::Serialize;

/// One entry of the supported-language registry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SupportedLanguage {
    /// English display name, used in the translation prompt.
    pub name: &'static str,
    /// BCP 47 locale tag for the speech recognizer (e.g. "kn-IN").
    /// Unique across the registry.
    pub locale_tag: &'static str,
    /// Name in the language's own script.
    pub native_name: &'static str,
    /// One-line description shown in the language picker.
    pub description: &'static str,
}

/// Supported spoken languages, in picker order.
///
/// Read-only; the selected entry changes only by explicit user choice.
pub static SUPPORTED_LANGUAGES: &[SupportedLanguage] = &[
    SupportedLanguage {
        name: "Kannada",
        locale_tag: "kn-IN",
        native_name: "ಕನ್ನಡ",
        description: "Spoken in Karnataka",
    },
    SupportedLanguage {
        name: "Hindi",
        locale_tag: "hi-IN",
        native_name: "हिन्दी",
        description: "Widely spoken across northern India",
    },
    SupportedLanguage {
        name: "Tamil",
        locale_tag: "ta-IN",
        native_name: "தமிழ்",
        description: "Spoken in Tamil Nadu",
    },
    SupportedLanguage {
        name: "Telugu",
        locale_tag: "te-IN",
        native_name: "తెలుగు",
        description: "Spoken in Andhra Pradesh and Telangana",
    },
    SupportedLanguage {
        name: "Malayalam",
        locale_tag: "ml-IN",
        native_name: "മലയാളം",
        description: "Spoken in Kerala",
    },
    SupportedLanguage {
        name: "Marathi",
        locale_tag: "mr-IN",
        native_name: "मराठी",
        description: "Spoken in Maharashtra",
    },
    SupportedLanguage {
        name: "Bengali",
        locale_tag: "bn-IN",
        native_name: "বাংলা",
        description: "Spoken in West Bengal",
    },
    SupportedLanguage {
        name: "Gujarati",
        locale_tag: "gu-IN",
        native_name: "ગુજરાતી",
        description: "Spoken in Gujarat",
    },
    SupportedLanguage {
        name: "Punjabi",
        locale_tag: "pa-IN",
        native_name: "ਪੰਜਾਬੀ",
        description: "Spoken in Punjab",
    },
    SupportedLanguage {
        name: "Urdu",
        locale_tag: "ur-IN",
        native_name: "اردو",
        description: "Spoken across northern India",
    },
];

/// The language selected at startup before any user choice.
pub fn default_language() -> &'static SupportedLanguage {
    &SUPPORTED_LANGUAGES[0]
}

/// Look up a language by its unique locale tag.
pub fn by_locale_tag(tag: &str) -> Option<&'static SupportedLanguage> {
    SUPPORTED_LANGUAGES.iter().find(|l| l.locale_tag == tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_locale_tags_pairwise_distinct() {
        let mut seen = HashSet::new();
        for language in SUPPORTED_LANGUAGES {
            assert!(
                seen.insert(language.locale_tag),
                "duplicate locale tag: {}",
                language.locale_tag
            );
        }
    }

    #[test]
    fn test_default_language_is_kannada() {
        let default = default_language();
        assert_eq!(default.name, "Kannada");
        assert_eq!(default.locale_tag, "kn-IN");
    }

    #[test]
    fn test_lookup_by_locale_tag() {
        let tamil = by_locale_tag("ta-IN").unwrap();
        assert_eq!(tamil.name, "Tamil");
        assert!(by_locale_tag("xx-XX").is_none());
    }

    #[test]
    fn test_registry_has_ten_entries() {
        assert_eq!(SUPPORTED_LANGUAGES.len(), 10);
    }

    #[test]
    fn test_entries_are_complete() {
        for language in SUPPORTED_LANGUAGES {
            assert!(!language.name.is_empty());
            assert!(!language.native_name.is_empty());
            assert!(!language.description.is_empty());
            assert!(language.locale_tag.ends_with("-IN"));
        }
    }
}
