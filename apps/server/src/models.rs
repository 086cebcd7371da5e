//! Wire DTOs for the API surface.
//!
//! Domain models serialize straight to camelCase JSON; the types here cover
//! request bodies and the few responses that differ from a domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use teamline_core::users::UserProfile;
use teamline_core::workspaces::Role;

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
    #[serde(rename = "type")]
    pub purpose: String,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ResendCodeRequest {
    pub email: String,
    #[serde(rename = "type")]
    pub purpose: String,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeResponse {
    #[schema(value_type = Object)]
    pub user: UserProfile,
    pub redirect_to: String,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InviteMemberRequest {
    pub email: String,
    #[schema(value_type = String)]
    pub role: Role,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MemberRoleRequest {
    #[schema(value_type = String)]
    pub role: Role,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitationRequest {
    pub token: String,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberRequest {
    pub user_id: String,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TargetProgressRequest {
    pub current_value: f64,
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClockRequest {
    pub note: Option<String>,
}
