//! Academic program model (faculties and professional courses)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Language;

/// Program kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgramType {
    #[default]
    Faculty,
    ProfessionalCourse,
}

impl ProgramType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Faculty => "faculty",
            Self::ProfessionalCourse => "professional_course",
        }
    }
}

impl fmt::Display for ProgramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "faculty" => Ok(Self::Faculty),
            "professional_course" | "course" => Ok(Self::ProfessionalCourse),
            _ => Err(anyhow::anyhow!("Invalid program type: {}", s)),
        }
    }
}

/// Icon shown next to a program.
///
/// The backend stores a free-form name; [`ProgramIcon::lookup`] maps it onto
/// this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgramIcon {
    BookOpen,
    Briefcase,
    Cpu,
    #[default]
    Globe,
    Sprout,
    Wifi,
}

impl ProgramIcon {
    pub const ALL: [ProgramIcon; 6] = [
        Self::BookOpen,
        Self::Briefcase,
        Self::Cpu,
        Self::Globe,
        Self::Sprout,
        Self::Wifi,
    ];

    /// Total lookup: unknown names fall back to [`ProgramIcon::Globe`].
    pub fn lookup(name: &str) -> Self {
        match name.trim() {
            "BookOpen" => Self::BookOpen,
            "Briefcase" => Self::Briefcase,
            "Cpu" => Self::Cpu,
            "Globe" => Self::Globe,
            "Sprout" => Self::Sprout,
            "Wifi" => Self::Wifi,
            _ => Self::default(),
        }
    }

    /// Name stored by the backend
    pub fn name(self) -> &'static str {
        match self {
            Self::BookOpen => "BookOpen",
            Self::Briefcase => "Briefcase",
            Self::Cpu => "Cpu",
            Self::Globe => "Globe",
            Self::Sprout => "Sprout",
            Self::Wifi => "Wifi",
        }
    }

    /// Terminal glyph
    pub fn glyph(self) -> char {
        match self {
            Self::BookOpen => '📖',
            Self::Briefcase => '💼',
            Self::Cpu => '💻',
            Self::Globe => '🌍',
            Self::Sprout => '🌱',
            Self::Wifi => '📶',
        }
    }
}

impl fmt::Display for ProgramIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn default_icon_name() -> String {
    ProgramIcon::default().name().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub name_en: String,
    pub name_fr: String,
    #[serde(rename = "type", default)]
    pub kind: ProgramType,
    #[serde(default = "default_icon_name")]
    pub icon: String,
    #[serde(default)]
    pub options_en: Vec<String>,
    #[serde(default)]
    pub options_fr: Vec<String>,
}

impl Program {
    pub fn name(&self, lang: Language) -> &str {
        lang.pick(&self.name_en, &self.name_fr)
    }

    pub fn options(&self, lang: Language) -> &[String] {
        lang.pick_list(&self.options_en, &self.options_fr)
    }

    pub fn icon(&self) -> ProgramIcon {
        ProgramIcon::lookup(&self.icon)
    }
}

/// "Learn more" view of a program, fetched on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDetails {
    #[serde(flatten)]
    pub program: Program,
    #[serde(default)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub description_fr: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub degree_en: Option<String>,
    #[serde(default)]
    pub degree_fr: Option<String>,
    #[serde(default)]
    pub admission_requirements_en: Option<String>,
    #[serde(default)]
    pub admission_requirements_fr: Option<String>,
    #[serde(default)]
    pub career_opportunities_en: Option<String>,
    #[serde(default)]
    pub career_opportunities_fr: Option<String>,
    /// Banner image
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProgramDetails {
    pub fn description(&self, lang: Language) -> &str {
        lang.pick_opt(self.description_en.as_deref(), self.description_fr.as_deref())
    }

    pub fn degree(&self, lang: Language) -> &str {
        lang.pick_opt(self.degree_en.as_deref(), self.degree_fr.as_deref())
    }

    pub fn admission_requirements(&self, lang: Language) -> &str {
        lang.pick_opt(
            self.admission_requirements_en.as_deref(),
            self.admission_requirements_fr.as_deref(),
        )
    }

    pub fn career_opportunities(&self, lang: Language) -> &str {
        lang.pick_opt(
            self.career_opportunities_en.as_deref(),
            self.career_opportunities_fr.as_deref(),
        )
    }
}

/// Admin form for creating or editing a program.
///
/// Options are authored as comma-separated text and split on submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramInput {
    pub name_en: String,
    pub name_fr: String,
    #[serde(rename = "type", default)]
    pub kind: ProgramType,
    #[serde(default = "default_icon_name")]
    pub icon: String,
    #[serde(default)]
    pub options_en: String,
    #[serde(default)]
    pub options_fr: String,
}

impl Default for ProgramInput {
    fn default() -> Self {
        Self {
            name_en: String::new(),
            name_fr: String::new(),
            kind: ProgramType::Faculty,
            icon: default_icon_name(),
            options_en: String::new(),
            options_fr: String::new(),
        }
    }
}

impl From<&Program> for ProgramInput {
    fn from(item: &Program) -> Self {
        let icon = if item.icon.is_empty() {
            default_icon_name()
        } else {
            item.icon.clone()
        };
        Self {
            name_en: item.name_en.clone(),
            name_fr: item.name_fr.clone(),
            kind: item.kind,
            icon,
            options_en: join_options(&item.options_en),
            options_fr: join_options(&item.options_fr),
        }
    }
}

/// Split comma-separated option text, trimming values and dropping empty segments.
///
/// Lossy: an option containing a comma cannot be expressed.
pub fn split_options(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`split_options`] for pre-filling an edit form.
pub fn join_options(options: &[String]) -> String {
    options.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_options_drops_empty_segments() {
        assert_eq!(split_options("Law, Ethics, , Policy"), vec!["Law", "Ethics", "Policy"]);
        assert!(split_options("").is_empty());
        assert!(split_options(" , ,").is_empty());
    }

    #[test]
    fn test_join_options() {
        let options = vec!["Public Health".to_string(), "Human Nutrition".to_string()];
        assert_eq!(join_options(&options), "Public Health, Human Nutrition");
    }

    #[test]
    fn test_icon_lookup_is_total() {
        for icon in ProgramIcon::ALL {
            assert_eq!(ProgramIcon::lookup(icon.name()), icon);
        }
        assert_eq!(ProgramIcon::lookup("Rocket"), ProgramIcon::Globe);
        assert_eq!(ProgramIcon::lookup(""), ProgramIcon::Globe);
    }

    #[test]
    fn test_program_defaults_for_missing_fields() {
        let program: Program =
            serde_json::from_str(r#"{"id":2,"name_en":"ICT","name_fr":"TIC","type":"professional_course"}"#)
                .unwrap();

        assert_eq!(program.kind, ProgramType::ProfessionalCourse);
        assert!(program.options_en.is_empty());
        assert_eq!(program.icon(), ProgramIcon::Globe);
    }

    #[test]
    fn test_details_flatten_program() {
        let details: ProgramDetails = serde_json::from_str(
            r#"{"id":4,"name_en":"Health","name_fr":"Santé","type":"faculty","icon":"BookOpen",
                "options_en":["Public Health"],"options_fr":["Santé publique"],
                "duration":"3 years","degree_en":"Bachelor"}"#,
        )
        .unwrap();

        assert_eq!(details.program.icon(), ProgramIcon::BookOpen);
        assert_eq!(details.degree(Language::En), "Bachelor");
        assert_eq!(details.degree(Language::Fr), "");
        assert_eq!(details.duration.as_deref(), Some("3 years"));
    }

    #[test]
    fn test_input_from_program_joins_options() {
        let program = Program {
            id: 1,
            name_en: "Law".to_string(),
            name_fr: "Droit".to_string(),
            kind: ProgramType::Faculty,
            icon: String::new(),
            options_en: vec!["Law".to_string(), "Ethics".to_string()],
            options_fr: vec![],
        };

        let input = ProgramInput::from(&program);
        assert_eq!(input.options_en, "Law, Ethics");
        assert_eq!(input.options_fr, "");
        assert_eq!(input.icon, "Globe");
    }

    proptest! {
        #[test]
        fn prop_split_options_yields_trimmed_non_empty(text in "[a-zA-Z ,]{0,64}") {
            for option in split_options(&text) {
                prop_assert!(!option.is_empty());
                prop_assert_eq!(option.trim(), option.as_str());
                prop_assert!(!option.contains(','));
            }
        }
    }
}
