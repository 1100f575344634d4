//! Partner institution model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Language;

/// Partner scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PartnerType {
    #[default]
    National,
    International,
}

impl fmt::Display for PartnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::National => write!(f, "national"),
            Self::International => write!(f, "international"),
        }
    }
}

impl FromStr for PartnerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "national" => Ok(Self::National),
            "international" => Ok(Self::International),
            _ => Err(anyhow::anyhow!("Invalid partner type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: i64,
    pub name_en: String,
    pub name_fr: String,
    #[serde(default)]
    pub country_en: String,
    #[serde(default)]
    pub country_fr: String,
    #[serde(rename = "type")]
    pub kind: PartnerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Partner {
    pub fn name(&self, lang: Language) -> &str {
        lang.pick(&self.name_en, &self.name_fr)
    }

    pub fn country(&self, lang: Language) -> &str {
        lang.pick(&self.country_en, &self.country_fr)
    }
}

/// Admin form for creating or editing a partner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerInput {
    pub name_en: String,
    pub name_fr: String,
    pub country_en: String,
    pub country_fr: String,
    #[serde(rename = "type", default)]
    pub kind: PartnerType,
}

impl From<&Partner> for PartnerInput {
    fn from(item: &Partner) -> Self {
        Self {
            name_en: item.name_en.clone(),
            name_fr: item.name_fr.clone(),
            country_en: item.country_en.clone(),
            country_fr: item.country_fr.clone(),
            kind: item.kind,
        }
    }
}
