//! Member service
//!
//! Typed pass-throughs to `/members`, same contract as the event service.

use async_trait::async_trait;
use crate::models::{CreateMemberRequest, Member};
use crate::state::controller::CrudResource;
use crate::utils::errors::Result;
use super::api::ApiClient;

const MEMBERS_PATH: &str = "/members";

#[derive(Clone, Debug)]
pub struct MemberService {
    api: ApiClient,
}

impl MemberService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Member>> {
        self.api.get_json(MEMBERS_PATH).await
    }

    pub async fn get(&self, id: i64) -> Result<Member> {
        self.api.get_json(&format!("{}/{}", MEMBERS_PATH, id)).await
    }

    pub async fn create(&self, member: &CreateMemberRequest) -> Result<String> {
        self.api.post_text(MEMBERS_PATH, member).await
    }

    pub async fn update(&self, id: i64, member: &CreateMemberRequest) -> Result<String> {
        self.api.put_text(&format!("{}/{}", MEMBERS_PATH, id), member).await
    }

    pub async fn delete(&self, id: i64) -> Result<String> {
        self.api.delete_text(&format!("{}/{}", MEMBERS_PATH, id)).await
    }
}

#[async_trait]
impl CrudResource for MemberService {
    type Record = Member;
    type Form = CreateMemberRequest;
    const SINGULAR: &'static str = "Member";
    const PLURAL: &'static str = "members";

    fn record_id(record: &Member) -> Option<i64> {
        record.id
    }

    fn form_from(record: &Member) -> CreateMemberRequest {
        CreateMemberRequest::from(record)
    }

    async fn list(&self) -> Result<Vec<Member>> {
        MemberService::list(self).await
    }

    async fn create(&self, form: &CreateMemberRequest) -> Result<String> {
        MemberService::create(self, form).await
    }

    async fn update(&self, id: i64, form: &CreateMemberRequest) -> Result<String> {
        MemberService::update(self, id, form).await
    }

    async fn delete(&self, id: i64) -> Result<String> {
        MemberService::delete(self, id).await
    }
}
