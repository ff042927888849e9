use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use super::{serialize_object_id_hex, DeleteAck, InsertAck, UpdateAck};

/// Payment record (collection: payments)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id_hex"
    )]
    pub id: Option<ObjectId>,
    pub user_email: String,
    #[serde(default)]
    pub classes_id: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// RFC 3339, UTC; sorts lexically in time order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}

/// Body of `POST /payment-info`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub user_email: String,
    pub classes_id: Vec<String>,
    pub transaction_id: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}

/// Outcome of each checkout step, in the order they ran.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub updated_result: UpdateAck,
    pub enrolled_result: InsertAck,
    pub deleted_result: DeleteAck,
    pub payment_result: InsertAck,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct PaymentCount {
    pub total: u64,
}
