use mongodb::bson::Bson;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::Serialize;

fn bson_id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Acknowledgment returned by every create route.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl From<InsertOneResult> for InsertAck {
    fn from(result: InsertOneResult) -> Self {
        InsertAck {
            acknowledged: true,
            inserted_id: bson_id_to_string(&result.inserted_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

impl From<UpdateResult> for UpdateAck {
    fn from(result: UpdateResult) -> Self {
        let upserted_id = result.upserted_id.as_ref().map(bson_id_to_string);
        UpdateAck {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteAck {
    fn from(result: DeleteResult) -> Self {
        DeleteAck {
            acknowledged: true,
            deleted_count: result.deleted_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn ids_render_as_hex() {
        let oid = ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60718").unwrap();
        assert_eq!(bson_id_to_string(&Bson::ObjectId(oid)), "64b7f0c2a1b2c3d4e5f60718");
        assert_eq!(bson_id_to_string(&Bson::String("abc".into())), "abc");
    }

    #[test]
    fn acks_serialize_camel_case() {
        let ack = UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some("64b7f0c2a1b2c3d4e5f60718".into()),
        };
        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(json["matchedCount"], 0);
        assert_eq!(json["upsertedCount"], 1);
        assert_eq!(json["upsertedId"], "64b7f0c2a1b2c3d4e5f60718");

        let json = serde_json::to_value(DeleteAck { acknowledged: true, deleted_count: 0 }).unwrap();
        assert_eq!(json, serde_json::json!({ "acknowledged": true, "deletedCount": 0 }));
    }
}
