use mongodb::bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};

use super::serialize_object_id_hex;

/// Pending-purchase intent (collection: cart). Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id_hex"
    )]
    pub id: Option<ObjectId>,
    #[serde(deserialize_with = "deserialize_class_id")]
    pub class_id: String,
    pub user_mail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Projection returned by `GET /cart-item/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRef {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id_hex"
    )]
    pub id: Option<ObjectId>,
    #[serde(deserialize_with = "deserialize_class_id")]
    pub class_id: String,
}

// Older records stored classId as an ObjectId rather than its hex string.
fn deserialize_class_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let bson_value = Bson::deserialize(deserializer)?;
    match bson_value {
        Bson::ObjectId(oid) => Ok(oid.to_hex()),
        Bson::String(s) => Ok(s),
        _ => Err(serde::de::Error::custom("Expected ObjectId or String")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn class_id_accepts_object_id_or_string() {
        let oid = ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60718").unwrap();
        let item: CartItemRef = mongodb::bson::from_document(doc! { "classId": oid }).unwrap();
        assert_eq!(item.class_id, "64b7f0c2a1b2c3d4e5f60718");

        let item: CartItem = mongodb::bson::from_document(doc! {
            "classId": "64b7f0c2a1b2c3d4e5f60718",
            "userMail": "s@x.com",
        })
        .unwrap();
        assert_eq!(item.class_id, "64b7f0c2a1b2c3d4e5f60718");
        assert_eq!(item.date, None);
    }

    #[test]
    fn numeric_class_id_is_rejected() {
        let parsed = mongodb::bson::from_document::<CartItemRef>(doc! { "classId": 12 });
        assert!(parsed.is_err());
    }
}
