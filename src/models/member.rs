//! Member model

use serde::{Deserialize, Serialize};
use crate::utils::helpers::non_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub position: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub active: bool,
}

impl Member {
    /// Case-insensitive substring match of the position against any role keyword
    pub fn holds_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        let position = self.position.to_lowercase();
        roles
            .iter()
            .map(|role| role.as_ref().trim())
            .filter(|role| !role.is_empty())
            .any(|role| position.contains(&role.to_lowercase()))
    }

    pub fn has_photo(&self) -> bool {
        non_blank(self.image_url.as_deref()).is_some()
    }
}

/// Payload for creating or updating a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub name: String,
    pub position: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Default for CreateMemberRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: String::new(),
            email: String::new(),
            image_url: None,
            description: None,
            active: Some(true),
        }
    }
}

impl From<&Member> for CreateMemberRequest {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            position: member.position.clone(),
            email: member.email.clone(),
            image_url: member.image_url.clone(),
            description: member.description.clone(),
            active: Some(member.active),
        }
    }
}
