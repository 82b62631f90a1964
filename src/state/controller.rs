//! Page-level CRUD controller
//!
//! One state machine shared by the events and members admin pages. The
//! collection is only ever replaced by a fresh `list()` result; mutations
//! never touch it directly.

use std::fmt;
use async_trait::async_trait;
use tracing::{debug, info, warn};
use crate::state::forms::FormData;
use crate::utils::errors::{ClubError, Result};
use crate::utils::logging;

/// A backend collection a CRUD page manages
#[async_trait]
pub trait CrudResource: Send + Sync {
    type Record: Clone + Send + Sync + fmt::Debug;
    type Form: FormData;

    /// Singular display name, e.g. `Event`
    const SINGULAR: &'static str;
    /// Plural lowercase name, e.g. `events`
    const PLURAL: &'static str;

    fn record_id(record: &Self::Record) -> Option<i64>;
    fn form_from(record: &Self::Record) -> Self::Form;

    async fn list(&self) -> Result<Vec<Self::Record>>;
    async fn create(&self, form: &Self::Form) -> Result<String>;
    async fn update(&self, id: i64, form: &Self::Form) -> Result<String>;
    async fn delete(&self, id: i64) -> Result<String>;
}

/// Page state
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<R> {
    Idle,
    Loading,
    Loaded,
    Error(String),
    FormOpen { editing: Option<R> },
    Submitting { editing: Option<R> },
}

impl<R> PageState<R> {
    pub fn name(&self) -> &'static str {
        match self {
            PageState::Idle => "idle",
            PageState::Loading => "loading",
            PageState::Loaded => "loaded",
            PageState::Error(_) => "error",
            PageState::FormOpen { .. } => "form_open",
            PageState::Submitting { .. } => "submitting",
        }
    }
}

/// What a submit or delete ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Backend accepted; carries its status string
    Applied(String),
    /// Validation or backend rejected; carries the message shown
    Rejected(String),
    /// The user declined the confirmation
    Cancelled,
}

/// CRUD controller for one resource page
pub struct CrudController<S: CrudResource> {
    resource: S,
    state: PageState<S::Record>,
    records: Vec<S::Record>,
    form: S::Form,
    success: Option<String>,
    error: Option<String>,
}

impl<S: CrudResource> CrudController<S> {
    pub fn new(resource: S) -> Self {
        Self {
            resource,
            state: PageState::Idle,
            records: Vec::new(),
            form: S::Form::default(),
            success: None,
            error: None,
        }
    }

    pub fn state(&self) -> &PageState<S::Record> {
        &self.state
    }

    pub fn records(&self) -> &[S::Record] {
        &self.records
    }

    pub fn form(&self) -> &S::Form {
        &self.form
    }

    /// Editable form, only while the form is open
    pub fn form_mut(&mut self) -> Option<&mut S::Form> {
        match self.state {
            PageState::FormOpen { .. } => Some(&mut self.form),
            _ => None,
        }
    }

    pub fn editing(&self) -> Option<&S::Record> {
        match &self.state {
            PageState::FormOpen { editing } | PageState::Submitting { editing } => editing.as_ref(),
            _ => None,
        }
    }

    pub fn success_notice(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn error_notice(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn resource(&self) -> &S {
        &self.resource
    }

    /// Initial fetch: `Idle -> Loading -> Loaded | Error`
    pub async fn mount(&mut self) -> Result<()> {
        if !matches!(self.state, PageState::Idle) {
            return Err(self.invalid("loading"));
        }
        self.load().await;
        Ok(())
    }

    /// Re-run the fetch from a settled page
    pub async fn reload(&mut self) -> Result<()> {
        if !matches!(self.state, PageState::Loaded | PageState::Error(_)) {
            return Err(self.invalid("loading"));
        }
        self.load().await;
        Ok(())
    }

    /// Open an empty form
    pub fn open_add(&mut self) -> Result<()> {
        self.require_loaded("form_open")?;
        self.form = S::Form::default();
        self.dismiss_notice();
        self.state = PageState::FormOpen { editing: None };
        Ok(())
    }

    /// Open the form pre-filled from the record with `id`
    pub fn open_edit(&mut self, id: i64) -> Result<()> {
        self.require_loaded("form_open")?;
        let record = self.find(id)?.clone();
        self.form = S::form_from(&record);
        self.dismiss_notice();
        self.state = PageState::FormOpen { editing: Some(record) };
        Ok(())
    }

    /// Replace the form contents
    pub fn set_form(&mut self, form: S::Form) -> Result<()> {
        match self.form_mut() {
            Some(current) => {
                *current = form;
                Ok(())
            }
            None => Err(self.invalid("form_open")),
        }
    }

    /// Close the form without saving
    pub fn cancel(&mut self) -> Result<()> {
        if !matches!(self.state, PageState::FormOpen { .. }) {
            return Err(self.invalid("loaded"));
        }
        self.close_form();
        self.dismiss_notice();
        Ok(())
    }

    /// Submit the open form: create without an id, update with one
    pub async fn submit(&mut self) -> Result<MutationOutcome> {
        let editing = match &self.state {
            PageState::FormOpen { editing } => editing.clone(),
            _ => return Err(self.invalid("submitting")),
        };
        self.dismiss_notice();

        if let Err(e) = self.form.validate() {
            let message = e.user_message("Operation failed");
            self.error = Some(message.clone());
            return Ok(MutationOutcome::Rejected(message));
        }

        let target_id = editing.as_ref().and_then(S::record_id);
        self.state = PageState::Submitting { editing: editing.clone() };

        let result = match target_id {
            Some(id) => self.resource.update(id, &self.form).await,
            None => self.resource.create(&self.form).await,
        };

        match result {
            Ok(status) => {
                let verb = if target_id.is_some() { "updated" } else { "created" };
                logging::log_record_action(S::PLURAL, verb, target_id);
                self.success = Some(format!("{} {} successfully!", S::SINGULAR, verb));
                self.refresh().await;
                self.close_form();
                Ok(MutationOutcome::Applied(status))
            }
            Err(e) => {
                logging::log_api_error(S::PLURAL, &e, Some("submit"));
                let message = e.user_message("Operation failed");
                self.error = Some(message.clone());
                self.state = PageState::FormOpen { editing };
                Ok(MutationOutcome::Rejected(message))
            }
        }
    }

    /// Delete after the user confirms
    pub async fn delete<F>(&mut self, id: i64, confirm: F) -> Result<MutationOutcome>
    where
        F: FnOnce(&S::Record) -> bool,
    {
        self.require_loaded("deleting")?;
        let record = self.find(id)?.clone();

        if !confirm(&record) {
            debug!(resource = S::PLURAL, id = id, "Delete not confirmed");
            return Ok(MutationOutcome::Cancelled);
        }

        self.dismiss_notice();
        match self.resource.delete(id).await {
            Ok(status) => {
                logging::log_record_action(S::PLURAL, "deleted", Some(id));
                self.success = Some(format!("{} deleted successfully!", S::SINGULAR));
                self.refresh().await;
                Ok(MutationOutcome::Applied(status))
            }
            Err(e) => {
                logging::log_api_error(S::PLURAL, &e, Some("delete"));
                let fallback = format!("Failed to delete {}", S::SINGULAR.to_lowercase());
                let message = e.user_message(&fallback);
                self.error = Some(message.clone());
                Ok(MutationOutcome::Rejected(message))
            }
        }
    }

    async fn load(&mut self) {
        self.state = PageState::Loading;
        match self.resource.list().await {
            Ok(records) => {
                info!(resource = S::PLURAL, count = records.len(), "Collection loaded");
                self.records = records;
                self.state = PageState::Loaded;
            }
            Err(e) => {
                logging::log_api_error(S::PLURAL, &e, Some("list"));
                let message = format!("Failed to fetch {}", S::PLURAL);
                self.records.clear();
                self.error = Some(message.clone());
                self.state = PageState::Error(message);
            }
        }
    }

    /// Re-fetch after a mutation. A failed refresh keeps the previous
    /// collection on screen.
    async fn refresh(&mut self) {
        match self.resource.list().await {
            Ok(records) => self.records = records,
            Err(e) => {
                warn!(resource = S::PLURAL, error = %e, "Refresh after mutation failed");
                self.error = Some(format!("Failed to fetch {}", S::PLURAL));
            }
        }
    }

    fn close_form(&mut self) {
        self.form = S::Form::default();
        self.state = PageState::Loaded;
    }

    fn find(&self, id: i64) -> Result<&S::Record> {
        self.records
            .iter()
            .find(|record| S::record_id(record) == Some(id))
            .ok_or(ClubError::NotFound { resource: S::SINGULAR, id })
    }

    fn require_loaded(&self, to: &str) -> Result<()> {
        if matches!(self.state, PageState::Loaded) {
            Ok(())
        } else {
            Err(self.invalid(to))
        }
    }

    fn invalid(&self, to: &str) -> ClubError {
        ClubError::InvalidStateTransition {
            from: self.state.name().to_string(),
            to: to.to_string(),
        }
    }
}
