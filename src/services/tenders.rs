//! Tender administration

use crate::api::{ApiError, FileUpload, FormData, Payload};
use crate::models::{Tender, TenderInput};
use crate::services::resource::{require_date, require_fields, Resource, ResourceManager};

pub struct TenderResource;

pub type TenderManager = ResourceManager<TenderResource>;

impl Resource for TenderResource {
    type Item = Tender;
    type Input = TenderInput;

    const COLLECTION: &'static str = "tenders";
    const LABEL: &'static str = "tender";
    const FILE_FIELD: Option<&'static str> = Some("file");

    fn id(item: &Tender) -> i64 {
        item.id
    }

    fn edit_input(item: &Tender) -> TenderInput {
        TenderInput::from(item)
    }

    fn validate(input: &TenderInput) -> Result<(), ApiError> {
        require_fields(&[
            ("title_en", input.title_en.as_str()),
            ("title_fr", input.title_fr.as_str()),
            ("description_en", input.description_en.as_str()),
            ("description_fr", input.description_fr.as_str()),
            ("deadline", input.deadline.as_str()),
            ("date_posted", input.date_posted.as_str()),
        ])?;
        require_date("deadline", input.deadline.as_str())?;
        require_date("date_posted", input.date_posted.as_str())
    }

    fn accepts(file: &FileUpload) -> bool {
        file.is_pdf()
    }

    fn payload(input: &TenderInput, file: Option<&FileUpload>) -> Result<Payload, ApiError> {
        let form = FormData::new()
            .text("title_en", input.title_en.as_str())
            .text("title_fr", input.title_fr.as_str())
            .text("description_en", input.description_en.as_str())
            .text("description_fr", input.description_fr.as_str())
            .text("deadline", input.deadline.as_str())
            .text("date_posted", input.date_posted.as_str())
            .file("file", file);
        Ok(Payload::Multipart(form))
    }

    fn current_file(item: &Tender) -> Option<&str> {
        Some(item.file_url.as_str()).filter(|url| !url.is_empty())
    }
}
