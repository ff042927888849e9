use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::database::MongoDB;
use crate::models::{CartItem, CartItemRef, Class, DeleteAck, InsertAck};
use crate::utils::AppError;

/// No de-duplication: adding the same class twice yields two cart documents.
pub async fn add_to_cart(db: &MongoDB, mut item: CartItem) -> Result<InsertAck, AppError> {
    item.id = None;
    if item.date.is_none() {
        item.date = Some(chrono::Utc::now().to_rfc3339());
    }
    let result = db.cart().await?.insert_one(&item).await?;
    Ok(result.into())
}

/// Lets the frontend check whether a class is already in the user's cart.
pub async fn find_cart_item(
    db: &MongoDB,
    class_id: &str,
    email: Option<&str>,
) -> Result<Option<CartItemRef>, AppError> {
    let mut filter = doc! { "classId": class_id };
    filter.insert("userMail", email);

    Ok(db
        .cart()
        .await?
        .clone_with_type::<CartItemRef>()
        .find_one(filter)
        .projection(doc! { "classId": 1 })
        .await?)
}

/// Classes referenced by the user's cart items.
pub async fn cart_classes(db: &MongoDB, email: &str) -> Result<Vec<Class>, AppError> {
    let cursor = db
        .cart()
        .await?
        .clone_with_type::<CartItemRef>()
        .find(doc! { "userMail": email })
        .projection(doc! { "classId": 1 })
        .await?;
    let items: Vec<CartItemRef> = cursor.try_collect().await?;

    let class_ids = class_object_ids(&items);
    let cursor = db.classes().await?.find(doc! { "_id": { "$in": class_ids } }).await?;
    Ok(cursor.try_collect().await?)
}

// Cart rows with a malformed classId cannot match any class and are skipped.
fn class_object_ids(items: &[CartItemRef]) -> Vec<ObjectId> {
    items
        .iter()
        .filter_map(|item| match ObjectId::parse_str(&item.class_id) {
            Ok(id) => Some(id),
            Err(_) => {
                log::warn!("⚠️  Skipping cart item with invalid classId '{}'", item.class_id);
                None
            }
        })
        .collect()
}

/// Deletes one cart row for the class. Without `email` the row may belong to
/// any user; with it the delete is scoped to that user's cart.
pub async fn delete_cart_item(
    db: &MongoDB,
    class_id: &str,
    email: Option<&str>,
) -> Result<DeleteAck, AppError> {
    let result = db.cart().await?.delete_one(delete_filter(class_id, email)).await?;
    Ok(result.into())
}

pub fn delete_filter(class_id: &str, email: Option<&str>) -> Document {
    let mut filter = doc! { "classId": class_id };
    if let Some(email) = email {
        filter.insert("userMail", email);
    }
    filter
}
