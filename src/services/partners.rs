//! Partner administration

use crate::api::{ApiError, FileUpload, Payload};
use crate::models::{Partner, PartnerInput};
use crate::services::resource::{require_fields, Resource, ResourceManager};

pub struct PartnerResource;

pub type PartnerManager = ResourceManager<PartnerResource>;

impl Resource for PartnerResource {
    type Item = Partner;
    type Input = PartnerInput;

    const COLLECTION: &'static str = "partners";
    const LABEL: &'static str = "partner";

    fn id(item: &Partner) -> i64 {
        item.id
    }

    fn edit_input(item: &Partner) -> PartnerInput {
        PartnerInput::from(item)
    }

    fn validate(input: &PartnerInput) -> Result<(), ApiError> {
        require_fields(&[
            ("name_en", input.name_en.as_str()),
            ("name_fr", input.name_fr.as_str()),
            ("country_en", input.country_en.as_str()),
            ("country_fr", input.country_fr.as_str()),
        ])
    }

    fn payload(input: &PartnerInput, _file: Option<&FileUpload>) -> Result<Payload, ApiError> {
        Payload::json(input)
    }
}
