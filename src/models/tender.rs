//! Tender (call for bids) model

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::Language;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    pub id: i64,
    pub title_en: String,
    pub title_fr: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub description_fr: String,
    /// Submission deadline, `YYYY-MM-DD`
    #[serde(default)]
    pub deadline: String,
    pub date_posted: String,
    /// URL of the tender document (PDF)
    #[serde(rename = "fileUrl", default)]
    pub file_url: String,
}

impl Tender {
    pub fn title(&self, lang: Language) -> &str {
        lang.pick(&self.title_en, &self.title_fr)
    }

    pub fn description(&self, lang: Language) -> &str {
        lang.pick(&self.description_en, &self.description_fr)
    }
}

/// Admin form for creating or editing a tender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderInput {
    pub title_en: String,
    pub title_fr: String,
    pub description_en: String,
    pub description_fr: String,
    pub deadline: String,
    pub date_posted: String,
}

impl Default for TenderInput {
    fn default() -> Self {
        Self {
            title_en: String::new(),
            title_fr: String::new(),
            description_en: String::new(),
            description_fr: String::new(),
            deadline: String::new(),
            date_posted: Local::now().date_naive().format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&Tender> for TenderInput {
    fn from(item: &Tender) -> Self {
        Self {
            title_en: item.title_en.clone(),
            title_fr: item.title_fr.clone(),
            description_en: item.description_en.clone(),
            description_fr: item.description_fr.clone(),
            deadline: item.deadline.clone(),
            date_posted: item.date_posted.clone(),
        }
    }
}
