//! News item model

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::Language;

/// Category given to new news items
pub const DEFAULT_NEWS_CATEGORY: &str = "General";

/// News or event entry shown on the public site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title_en: String,
    pub title_fr: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub description_fr: String,
    /// Publication date, `YYYY-MM-DD`
    pub date: String,
    pub category: String,
    /// URL of the uploaded image, as returned by the backend
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewsItem {
    pub fn title(&self, lang: Language) -> &str {
        lang.pick(&self.title_en, &self.title_fr)
    }

    pub fn description(&self, lang: Language) -> &str {
        lang.pick(&self.description_en, &self.description_fr)
    }
}

/// Admin form for creating or editing a news item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsInput {
    pub title_en: String,
    pub title_fr: String,
    pub description_en: String,
    pub description_fr: String,
    pub date: String,
    pub category: String,
}

impl Default for NewsInput {
    fn default() -> Self {
        Self {
            title_en: String::new(),
            title_fr: String::new(),
            description_en: String::new(),
            description_fr: String::new(),
            date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            category: DEFAULT_NEWS_CATEGORY.to_string(),
        }
    }
}

impl From<&NewsItem> for NewsInput {
    fn from(item: &NewsItem) -> Self {
        Self {
            title_en: item.title_en.clone(),
            title_fr: item.title_fr.clone(),
            description_en: item.description_en.clone(),
            description_fr: item.description_fr.clone(),
            date: item.date.clone(),
            category: item.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_image() {
        let item: NewsItem = serde_json::from_str(
            r#"{"id":3,"title_en":"Open House","title_fr":"Portes Ouvertes",
                "description_en":"","description_fr":"","date":"2024-05-01","category":"Event"}"#,
        )
        .unwrap();

        assert_eq!(item.image_url, None);
        assert_eq!(item.title(Language::Fr), "Portes Ouvertes");
        assert_eq!(item.description(Language::En), "");
    }

    #[test]
    fn test_image_url_uses_camel_case_key() {
        let item: NewsItem = serde_json::from_str(
            r#"{"id":1,"title_en":"a","title_fr":"b","date":"2024-01-15",
                "category":"Admissions","imageUrl":"/uploads/a.png"}"#,
        )
        .unwrap();

        assert_eq!(item.image_url.as_deref(), Some("/uploads/a.png"));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["imageUrl"], "/uploads/a.png");
    }

    #[test]
    fn test_default_input_uses_today_and_general() {
        let input = NewsInput::default();
        assert_eq!(input.category, "General");
        assert!(chrono::NaiveDate::parse_from_str(&input.date, "%Y-%m-%d").is_ok());
    }
}
