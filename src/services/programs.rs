//! Academic program administration

use serde::Serialize;

use crate::api::{ApiError, FileUpload, Payload};
use crate::models::{split_options, Program, ProgramIcon, ProgramInput, ProgramType};
use crate::services::resource::{require_fields, Resource, ResourceManager};

pub struct ProgramResource;

pub type ProgramManager = ResourceManager<ProgramResource>;

/// JSON body sent for a program, with options already split into lists
#[derive(Debug, Serialize)]
struct ProgramBody<'a> {
    name_en: &'a str,
    name_fr: &'a str,
    #[serde(rename = "type")]
    kind: ProgramType,
    icon: &'a str,
    options_en: Vec<String>,
    options_fr: Vec<String>,
}

impl Resource for ProgramResource {
    type Item = Program;
    type Input = ProgramInput;

    const COLLECTION: &'static str = "programs";
    const LABEL: &'static str = "program";

    fn id(item: &Program) -> i64 {
        item.id
    }

    fn edit_input(item: &Program) -> ProgramInput {
        ProgramInput::from(item)
    }

    fn validate(input: &ProgramInput) -> Result<(), ApiError> {
        require_fields(&[("name_en", input.name_en.as_str()), ("name_fr", input.name_fr.as_str())])
    }

    fn payload(input: &ProgramInput, _file: Option<&FileUpload>) -> Result<Payload, ApiError> {
        let icon = match input.icon.trim() {
            "" => ProgramIcon::default().name(),
            name => name,
        };
        Payload::json(&ProgramBody {
            name_en: &input.name_en,
            name_fr: &input.name_fr,
            kind: input.kind,
            icon,
            options_en: split_options(&input.options_en),
            options_fr: split_options(&input.options_fr),
        })
    }
}
