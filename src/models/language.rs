//! Display language for bilingual content

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language a bilingual field pair is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default)
    #[default]
    En,
    /// French
    Fr,
}

impl Language {
    /// Resolve a UI language code such as `fr`, `FR` or `fr-BI`.
    ///
    /// Anything that is not French renders in English.
    pub fn from_code(code: &str) -> Self {
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("fr") {
            Self::Fr
        } else {
            Self::En
        }
    }

    /// Select the field for this language, verbatim.
    ///
    /// An empty selected field stays empty; there is no cross-language fallback.
    pub fn pick<'a>(self, en: &'a str, fr: &'a str) -> &'a str {
        match self {
            Self::En => en,
            Self::Fr => fr,
        }
    }

    /// Optional-field variant of [`Language::pick`]; a missing field renders as `""`.
    pub fn pick_opt<'a>(self, en: Option<&'a str>, fr: Option<&'a str>) -> &'a str {
        self.pick(en.unwrap_or_default(), fr.unwrap_or_default())
    }

    /// List-field variant of [`Language::pick`].
    pub fn pick_list<'a>(self, en: &'a [String], fr: &'a [String]) -> &'a [String] {
        match self {
            Self::En => en,
            Self::Fr => fr,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}
