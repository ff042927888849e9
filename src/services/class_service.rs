use futures::TryStreamExt;
use mongodb::bson::{doc, Document};

use super::WriteMode;
use crate::database::MongoDB;
use crate::models::{
    ChangeStatusRequest, Class, ClassStatus, InsertAck, NewClassRequest, UpdateAck,
    UpdateClassRequest,
};
use crate::utils::{parse_int, parse_object_id, AppError};

const POPULAR_LIMIT: i64 = 6;

// ==================== CATALOGUE ====================

pub async fn create_class(db: &MongoDB, request: NewClassRequest) -> Result<InsertAck, AppError> {
    let class = Class::from(request);
    let result = db.classes().await?.insert_one(&class).await?;
    Ok(result.into())
}

pub async fn classes_by_instructor(db: &MongoDB, email: &str) -> Result<Vec<Class>, AppError> {
    find_classes(db, doc! { "instructorEmail": email }).await
}

/// Public catalogue: approved classes only.
pub async fn approved_classes(db: &MongoDB) -> Result<Vec<Class>, AppError> {
    find_classes(db, doc! { "status": ClassStatus::Approved.as_str() }).await
}

pub async fn all_classes(db: &MongoDB) -> Result<Vec<Class>, AppError> {
    find_classes(db, doc! {}).await
}

async fn find_classes(db: &MongoDB, filter: Document) -> Result<Vec<Class>, AppError> {
    let cursor = db.classes().await?.find(filter).await?;
    Ok(cursor.try_collect().await?)
}

pub async fn find_class(db: &MongoDB, id: &str) -> Result<Option<Class>, AppError> {
    let object_id = parse_object_id(id)?;
    Ok(db.classes().await?.find_one(doc! { "_id": object_id }).await?)
}

pub async fn popular_classes(db: &MongoDB) -> Result<Vec<Class>, AppError> {
    let cursor = db
        .classes()
        .await?
        .find(doc! {})
        .sort(doc! { "totalEnrolled": -1 })
        .limit(POPULAR_LIMIT)
        .await?;
    Ok(cursor.try_collect().await?)
}

// ==================== REVIEW WORKFLOW ====================

pub async fn change_status(
    db: &MongoDB,
    id: &str,
    request: ChangeStatusRequest,
    mode: WriteMode,
) -> Result<UpdateAck, AppError> {
    let object_id = parse_object_id(id)?;
    let result = db
        .classes()
        .await?
        .update_one(doc! { "_id": object_id }, doc! { "$set": status_update_doc(&request) })
        .upsert(mode.upsert())
        .await?;
    Ok(result.into())
}

pub fn status_update_doc(request: &ChangeStatusRequest) -> Document {
    doc! {
        "status": request.status.as_str(),
        "reason": request.reason.clone(),
    }
}

pub async fn update_class(
    db: &MongoDB,
    id: &str,
    request: UpdateClassRequest,
    mode: WriteMode,
) -> Result<UpdateAck, AppError> {
    let object_id = parse_object_id(id)?;
    let result = db
        .classes()
        .await?
        .update_one(doc! { "_id": object_id }, doc! { "$set": class_update_doc(request)? })
        .upsert(mode.upsert())
        .await?;
    Ok(result.into())
}

/// Any edit sends the class back to review. An unparseable seat count leaves
/// the stored value alone so later `$inc`s keep working.
pub fn class_update_doc(request: UpdateClassRequest) -> Result<Document, AppError> {
    let price = match request.price {
        Some(value) => mongodb::bson::to_bson(&value)?,
        None => mongodb::bson::Bson::Null,
    };

    let mut update = doc! {
        "name": request.name,
        "description": request.description,
        "price": price,
        "videoLink": request.video_link,
        "status": ClassStatus::Pending.as_str(),
    };

    if let Some(seats) = request.available_seats.as_ref().and_then(parse_int) {
        update.insert("availableSeats", seats);
    }

    Ok(update)
}
