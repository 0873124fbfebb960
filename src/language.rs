//! Host display languages

use serde::{Deserialize, Serialize};

use crate::probe::StateProbe;

/// Host field holding the display language tag
pub const LANGUAGE_PATH: &str = "system.language";

/// Display language reported by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    French,
    German,
    Spanish,
    Italian,
    Japanese,
    Korean,
    ChineseSimplified,
    ChineseTraditional,
}

impl Language {
    /// Parse a host language tag (`"en"`, `"ja-JP"`, `"zh-Hant"`, ...)
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase().replace('_', "-");
        let language = match tag.as_str() {
            "zh-hant" | "zh-tw" | "zh-hk" | "tchinese" | "tc" => Language::ChineseTraditional,
            "zh" | "zh-hans" | "zh-cn" | "schinese" | "sc" => Language::ChineseSimplified,
            _ => match tag.split('-').next().unwrap_or_default() {
                "en" | "english" => Language::English,
                "fr" | "french" => Language::French,
                "de" | "german" => Language::German,
                "es" | "spanish" => Language::Spanish,
                "it" | "italian" => Language::Italian,
                "ja" | "jp" | "japanese" => Language::Japanese,
                "ko" | "kr" | "korean" => Language::Korean,
                _ => return None,
            },
        };
        Some(language)
    }

    /// Host display language; unknown or missing tags read as the default
    pub fn from_probe(probe: &dyn StateProbe) -> Self {
        probe
            .read_text(LANGUAGE_PATH)
            .found()
            .and_then(|tag| Self::from_tag(&tag))
            .unwrap_or_default()
    }

    /// Languages set in full-width scripts
    pub fn is_cjk(self) -> bool {
        matches!(
            self,
            Language::Japanese
                | Language::Korean
                | Language::ChineseSimplified
                | Language::ChineseTraditional
        )
    }

    /// Number of dots in the connection puzzle for this language
    pub fn dot_count(self) -> usize {
        if self.is_cjk() {
            15
        } else {
            12
        }
    }
}
