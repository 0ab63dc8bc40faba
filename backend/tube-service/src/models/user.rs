use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public projection of a user attached to read views.
///
/// Built in SQL with `json_build_object`, so the field names here match the
/// JSON keys produced by `db::owner_profile_json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfile {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
}
