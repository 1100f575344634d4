//! Generic admin resource manager
//!
//! One controller drives the list/create/edit/delete cycle for every admin
//! resource (news, tenders, partners, programs). A [`Resource`] describes the
//! shape of one collection; [`ResourceManager`] owns the list, the modal form
//! and the synchronisation rules:
//!
//! - the whole collection is loaded at once, without paging or filtering;
//! - a successful create/update closes the form and reloads the full list;
//! - a failed create/update raises an alert and keeps the form open, untouched;
//! - a confirmed delete removes the item locally without reloading.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::api::{ApiClient, ApiError, FileUpload, Payload};

/// Description of one admin-managed collection
pub trait Resource: Send + Sync + 'static {
    /// Entity as listed by the backend
    type Item: DeserializeOwned + Clone + Send + Sync;
    /// Form state edited in the modal
    type Input: Clone + Default + Send + Sync;

    /// Collection path segment, e.g. `news`
    const COLLECTION: &'static str;
    /// Singular noun used in prompts and alerts
    const LABEL: &'static str;
    /// Multipart part name for an attached file, for resources that accept one
    const FILE_FIELD: Option<&'static str> = None;

    fn id(item: &Self::Item) -> i64;

    /// Pre-fill the form from an existing item
    fn edit_input(item: &Self::Item) -> Self::Input;

    /// Client-side checks run before anything is sent
    fn validate(_input: &Self::Input) -> Result<(), ApiError> {
        Ok(())
    }

    /// Whether `file` may be attached (only consulted when `FILE_FIELD` is set)
    fn accepts(_file: &FileUpload) -> bool {
        true
    }

    fn payload(input: &Self::Input, file: Option<&FileUpload>) -> Result<Payload, ApiError>;

    /// URL of the file currently stored on `item`, shown while editing
    fn current_file(_item: &Self::Item) -> Option<&str> {
        None
    }

    fn collection_path() -> String {
        format!("/{}", Self::COLLECTION)
    }

    fn item_path(id: i64) -> String {
        format!("/{}/{}", Self::COLLECTION, id)
    }
}

/// Blocking user interaction the manager needs
pub trait Notifier: Send + Sync {
    /// Ask the user to confirm a destructive action
    fn confirm(&self, message: &str) -> bool;
    /// Show a blocking error message
    fn alert(&self, message: &str);
}

/// Where the manager is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
    Creating,
    Editing(i64),
    Submitting,
}

/// Open create/edit form
#[derive(Debug, Clone)]
pub struct Modal<I> {
    editing: Option<i64>,
    input: I,
    file: Option<FileUpload>,
    current_file: Option<String>,
    submitting: bool,
}

impl<I> Modal<I> {
    /// Id of the item being edited; `None` when creating
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn file(&self) -> Option<&FileUpload> {
        self.file.as_ref()
    }

    /// File already stored on the edited item, while no replacement is attached
    pub fn current_file(&self) -> Option<&str> {
        match self.file {
            Some(_) => None,
            None => self.current_file.as_deref(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

pub struct ResourceManager<R: Resource> {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    items: Vec<R::Item>,
    loading: bool,
    modal: Option<Modal<R::Input>>,
}

impl<R: Resource> ResourceManager<R> {
    /// Create a manager in the loading state. Requires a signed-in session.
    pub fn open(client: ApiClient, notifier: Arc<dyn Notifier>) -> Result<Self, ApiError> {
        if !client.session().is_authenticated() {
            return Err(ApiError::Unauthenticated);
        }

        Ok(Self {
            client,
            notifier,
            items: Vec::new(),
            loading: true,
            modal: None,
        })
    }

    /// [`ResourceManager::open`] followed by the initial list fetch.
    ///
    /// A failed initial fetch leaves an empty list; the error has been logged.
    pub async fn mount(client: ApiClient, notifier: Arc<dyn Notifier>) -> Result<Self, ApiError> {
        let mut manager = Self::open(client, notifier)?;
        if let Err(e) = manager.refresh().await {
            tracing::debug!(collection = R::COLLECTION, error = %e, "Initial fetch failed");
        }
        Ok(manager)
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn find(&self, id: i64) -> Option<&R::Item> {
        self.items.iter().find(|item| R::id(item) == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn modal(&self) -> Option<&Modal<R::Input>> {
        self.modal.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            return Phase::Loading;
        }
        match &self.modal {
            None => Phase::Loaded,
            Some(modal) if modal.submitting => Phase::Submitting,
            Some(modal) => match modal.editing {
                Some(id) => Phase::Editing(id),
                None => Phase::Creating,
            },
        }
    }

    /// Reload the whole collection.
    ///
    /// On failure the current list is kept. Either way the manager leaves the
    /// loading state.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let result = self.client.get::<Vec<R::Item>>(&R::collection_path()).await;
        self.loading = false;

        match result {
            Ok(items) => {
                tracing::debug!(collection = R::COLLECTION, count = items.len(), "Loaded collection");
                self.items = items;
                Ok(())
            }
            Err(e) => {
                tracing::error!(collection = R::COLLECTION, error = %e, "Failed to fetch {}", R::COLLECTION);
                Err(e)
            }
        }
    }

    /// Open an empty form
    pub fn open_create(&mut self) {
        self.modal = Some(Modal {
            editing: None,
            input: R::Input::default(),
            file: None,
            current_file: None,
            submitting: false,
        });
    }

    /// Open the form pre-filled from the listed item `id`.
    ///
    /// Returns `false` when no such item is listed.
    pub fn open_edit(&mut self, id: i64) -> bool {
        let Some(item) = self.find(id) else {
            return false;
        };

        let modal = Modal {
            editing: Some(id),
            input: R::edit_input(item),
            file: None,
            current_file: R::current_file(item).map(str::to_string),
            submitting: false,
        };
        self.modal = Some(modal);
        true
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Mutable access to the open form's fields
    pub fn input_mut(&mut self) -> Option<&mut R::Input> {
        self.modal.as_mut().map(|modal| &mut modal.input)
    }

    /// Select (or clear) the file sent with the next submit.
    pub fn attach_file(&mut self, file: Option<FileUpload>) -> Result<(), ApiError> {
        let field = R::FILE_FIELD
            .ok_or_else(|| ApiError::validation(format!("A {} has no file attachment", R::LABEL)))?;
        if let Some(f) = &file {
            if !R::accepts(f) {
                return Err(ApiError::validation(format!(
                    "'{}' ({}) cannot be used as the {} {}",
                    f.file_name,
                    f.content_type,
                    R::LABEL,
                    field
                )));
            }
        }

        let modal = self
            .modal
            .as_mut()
            .ok_or_else(|| ApiError::validation("No form is open"))?;
        modal.file = file;
        Ok(())
    }

    /// Create or update from the open form.
    ///
    /// On success the form closes and the list is reloaded. On failure an
    /// alert is raised and the form stays open with its values intact.
    pub async fn submit(&mut self) -> Result<(), ApiError> {
        let Some(modal) = self.modal.as_mut() else {
            return Err(ApiError::validation("No form is open"));
        };

        let prepared = R::validate(&modal.input)
            .and_then(|_| R::payload(&modal.input, modal.file.as_ref()));
        let payload = match prepared {
            Ok(payload) => payload,
            Err(e) => {
                self.notifier.alert(&e.to_string());
                return Err(e);
            }
        };

        let (method, path) = match modal.editing {
            Some(id) => (Method::PUT, R::item_path(id)),
            None => (Method::POST, R::collection_path()),
        };

        modal.submitting = true;
        let result = self.client.send(method, &path, payload).await;

        match result {
            Ok(()) => {
                tracing::info!(collection = R::COLLECTION, %path, "Saved {}", R::LABEL);
                self.modal = None;
                if let Err(e) = self.refresh().await {
                    tracing::warn!(collection = R::COLLECTION, error = %e, "Saved but reload failed");
                }
                Ok(())
            }
            Err(e) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.submitting = false;
                }
                tracing::warn!(collection = R::COLLECTION, error = %e, "Failed to save {}", R::LABEL);
                self.notifier.alert(&format!("Failed to save {}", R::LABEL));
                Err(e)
            }
        }
    }

    /// Delete `id` after confirmation, removing it from the local list.
    ///
    /// Returns `Ok(false)` when the user declines. The list is not reloaded,
    /// so it may diverge from the server until the next refresh.
    pub async fn delete(&mut self, id: i64) -> Result<bool, ApiError> {
        let prompt = format!("Are you sure you want to delete this {}?", R::LABEL);
        if !self.notifier.confirm(&prompt) {
            return Ok(false);
        }

        match self.client.delete(&R::item_path(id)).await {
            Ok(()) => {
                tracing::info!(collection = R::COLLECTION, id, "Deleted {}", R::LABEL);
                self.items.retain(|item| R::id(item) != id);
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(collection = R::COLLECTION, id, error = %e, "Failed to delete {}", R::LABEL);
                self.notifier.alert(&format!("Failed to delete {}", R::LABEL));
                Err(e)
            }
        }
    }
}

/// Reject blank required fields, naming them in the message.
pub(crate) fn require_fields(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "Required field(s) missing: {}",
            missing.join(", ")
        )))
    }
}

/// Reject values that are not `YYYY-MM-DD` dates.
pub(crate) fn require_date(name: &str, value: &str) -> Result<(), ApiError> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ApiError::validation(format!("{} must be a date (YYYY-MM-DD), got '{}'", name, value)))
}
