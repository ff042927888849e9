use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::serialize_object_id_hex;
use crate::utils::parse_int;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    Pending,
    Approved,
    Denied,
}

impl ClassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Pending => "pending",
            ClassStatus::Approved => "approved",
            ClassStatus::Denied => "denied",
        }
    }
}

impl FromStr for ClassStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ClassStatus::Pending),
            "approved" => Ok(ClassStatus::Approved),
            "denied" => Ok(ClassStatus::Denied),
            other => Err(format!("unknown class status '{}'", other)),
        }
    }
}

impl fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class document (collection: classes). `status` stays a raw string so a
/// legacy value cannot break listings; use [`Class::status`] to interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id_hex"
    )]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stored exactly as submitted (the frontend sends either a number or a string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_seats: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "status")]
    pub status_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_enrolled: Option<i64>,
    #[serde(flatten)]
    pub extra: Document,
}

impl Class {
    pub fn status(&self) -> Option<ClassStatus> {
        self.status_name.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Body of `POST /new-class`. `availableSeats` arrives from a form field and
/// may be a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClassRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub instructor_name: Option<String>,
    pub instructor_email: Option<String>,
    pub description: Option<String>,
    pub price: Option<serde_json::Value>,
    pub available_seats: Option<serde_json::Value>,
    pub video_link: Option<String>,
    pub status: Option<ClassStatus>,
    pub total_enrolled: Option<i64>,
    #[serde(flatten)]
    pub extra: Document,
}

impl From<NewClassRequest> for Class {
    fn from(req: NewClassRequest) -> Self {
        Class {
            id: None,
            name: req.name,
            image: req.image,
            instructor_name: req.instructor_name,
            instructor_email: req.instructor_email,
            description: req.description,
            price: req.price,
            available_seats: req.available_seats.as_ref().and_then(parse_int),
            video_link: req.video_link,
            status_name: Some(req.status.unwrap_or(ClassStatus::Pending).as_str().to_string()),
            reason: None,
            total_enrolled: Some(req.total_enrolled.unwrap_or(0)),
            extra: req.extra,
        }
    }
}

/// Body of `PUT /update-class/{id}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<serde_json::Value>,
    pub available_seats: Option<serde_json::Value>,
    pub video_link: Option<String>,
}

/// Body of `PUT /change-status/{id}`
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ChangeStatusRequest {
    pub status: ClassStatus,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_seat_count_is_stored_as_integer() {
        let req: NewClassRequest = serde_json::from_value(json!({
            "name": "Yoga 101",
            "instructorEmail": "a@x.com",
            "availableSeats": "10",
            "status": "pending"
        }))
        .unwrap();

        let class = Class::from(req);
        assert_eq!(class.available_seats, Some(10));
        assert_eq!(class.status(), Some(ClassStatus::Pending));

        let stored = mongodb::bson::to_document(&class).unwrap();
        assert_eq!(stored.get_i64("availableSeats").unwrap(), 10);
        assert!(!stored.contains_key("_id"));
    }

    #[test]
    fn new_class_defaults_to_pending_with_no_enrollments() {
        let req: NewClassRequest = serde_json::from_value(json!({
            "name": "Pilates",
            "price": 25,
            "submitted": "2024-01-01"
        }))
        .unwrap();

        let class = Class::from(req);
        assert_eq!(class.status(), Some(ClassStatus::Pending));
        assert_eq!(class.total_enrolled, Some(0));
        assert_eq!(class.price, Some(json!(25)));
        assert_eq!(class.extra.get_str("submitted").unwrap(), "2024-01-01");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let parsed = serde_json::from_value::<ChangeStatusRequest>(json!({ "status": "archived" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn legacy_status_still_loads() {
        let class: Class = serde_json::from_value(json!({ "name": "Old", "status": "archived" })).unwrap();
        assert_eq!(class.status_name.as_deref(), Some("archived"));
        assert_eq!(class.status(), None);

        let out = serde_json::to_value(&class).unwrap();
        assert_eq!(out["status"], "archived");
    }
}
