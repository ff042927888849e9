use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{Class, User};

/// Enrollment record (collection: enrolled), written by checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrolled {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_email: String,
    pub classes_id: Vec<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// One row of the enrolled-classes pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrolledClass {
    pub classes: Class,
    #[serde(default)]
    pub instructor: Option<User>,
}

/// One row of the popular-instructors pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularInstructor {
    #[serde(default)]
    pub total_enrolled: i64,
    #[serde(default)]
    pub instructor: Option<User>,
}

/// Dashboard counters for `GET /admin-stats`. Each figure is read by its own
/// query, so the set is not a consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub approved_classes: u64,
    pub pending_classes: u64,
    pub instructors: u64,
    pub total_classes: u64,
    pub total_enrolled: u64,
}
