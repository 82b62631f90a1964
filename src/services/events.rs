//! Event service
//!
//! Typed pass-throughs to `/events`. Create, update and delete return the
//! backend's status string and do not merge anything locally.

use async_trait::async_trait;
use crate::models::{CreateEventRequest, Event};
use crate::state::controller::CrudResource;
use crate::utils::errors::Result;
use super::api::ApiClient;

const EVENTS_PATH: &str = "/events";

#[derive(Clone, Debug)]
pub struct EventService {
    api: ApiClient,
}

impl EventService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Full collection, no pagination
    pub async fn list(&self) -> Result<Vec<Event>> {
        self.api.get_json(EVENTS_PATH).await
    }

    pub async fn get(&self, id: i64) -> Result<Event> {
        self.api.get_json(&format!("{}/{}", EVENTS_PATH, id)).await
    }

    pub async fn create(&self, event: &CreateEventRequest) -> Result<String> {
        self.api.post_text(EVENTS_PATH, event).await
    }

    pub async fn update(&self, id: i64, event: &CreateEventRequest) -> Result<String> {
        self.api.put_text(&format!("{}/{}", EVENTS_PATH, id), event).await
    }

    pub async fn delete(&self, id: i64) -> Result<String> {
        self.api.delete_text(&format!("{}/{}", EVENTS_PATH, id)).await
    }
}

#[async_trait]
impl CrudResource for EventService {
    type Record = Event;
    type Form = CreateEventRequest;
    const SINGULAR: &'static str = "Event";
    const PLURAL: &'static str = "events";

    fn record_id(record: &Event) -> Option<i64> {
        record.id
    }

    fn form_from(record: &Event) -> CreateEventRequest {
        CreateEventRequest::from(record)
    }

    async fn list(&self) -> Result<Vec<Event>> {
        EventService::list(self).await
    }

    async fn create(&self, form: &CreateEventRequest) -> Result<String> {
        EventService::create(self, form).await
    }

    async fn update(&self, id: i64, form: &CreateEventRequest) -> Result<String> {
        EventService::update(self, id, form).await
    }

    async fn delete(&self, id: i64) -> Result<String> {
        EventService::delete(self, id).await
    }
}
