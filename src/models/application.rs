use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use super::serialize_object_id_hex;

/// Instructor application (collection: applied). Free-form apart from `email`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id_hex"
    )]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}
