//! News administration

use crate::api::{ApiError, FileUpload, FormData, Payload};
use crate::models::{NewsInput, NewsItem};
use crate::services::resource::{require_date, require_fields, Resource, ResourceManager};

pub struct NewsResource;

pub type NewsManager = ResourceManager<NewsResource>;

impl Resource for NewsResource {
    type Item = NewsItem;
    type Input = NewsInput;

    const COLLECTION: &'static str = "news";
    const LABEL: &'static str = "news item";
    const FILE_FIELD: Option<&'static str> = Some("image");

    fn id(item: &NewsItem) -> i64 {
        item.id
    }

    fn edit_input(item: &NewsItem) -> NewsInput {
        NewsInput::from(item)
    }

    fn validate(input: &NewsInput) -> Result<(), ApiError> {
        require_fields(&[
            ("title_en", input.title_en.as_str()),
            ("title_fr", input.title_fr.as_str()),
            ("description_en", input.description_en.as_str()),
            ("description_fr", input.description_fr.as_str()),
            ("date", input.date.as_str()),
            ("category", input.category.as_str()),
        ])?;
        require_date("date", input.date.as_str())
    }

    fn accepts(file: &FileUpload) -> bool {
        file.is_image()
    }

    fn payload(input: &NewsInput, file: Option<&FileUpload>) -> Result<Payload, ApiError> {
        let form = FormData::new()
            .text("title_en", input.title_en.as_str())
            .text("title_fr", input.title_fr.as_str())
            .text("description_en", input.description_en.as_str())
            .text("description_fr", input.description_fr.as_str())
            .text("date", input.date.as_str())
            .text("category", input.category.as_str())
            .file("image", file);
        Ok(Payload::Multipart(form))
    }

    fn current_file(item: &NewsItem) -> Option<&str> {
        item.image_url.as_deref()
    }
}
