use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};

use super::WriteMode;
use crate::database::MongoDB;
use crate::middleware::roles::UserDirectory;
use crate::models::{InsertAck, DeleteAck, Role, UpdateAck, UpdateUserRequest, User};
use crate::utils::{parse_object_id, AppError};

// ==================== USERS ====================

pub async fn create_user(db: &MongoDB, mut user: User) -> Result<InsertAck, AppError> {
    user.id = None;
    let result = db.users().await?.insert_one(&user).await?;
    Ok(result.into())
}

pub async fn list_users(db: &MongoDB) -> Result<Vec<User>, AppError> {
    let cursor = db.users().await?.find(doc! {}).await?;
    Ok(cursor.try_collect().await?)
}

pub async fn find_user_by_id(db: &MongoDB, id: &str) -> Result<Option<User>, AppError> {
    let object_id = parse_object_id(id)?;
    Ok(db.users().await?.find_one(doc! { "_id": object_id }).await?)
}

pub async fn find_user_by_email(db: &MongoDB, email: &str) -> Result<Option<User>, AppError> {
    Ok(db.users().await?.find_one(doc! { "email": email }).await?)
}

pub async fn delete_user(db: &MongoDB, id: &str) -> Result<DeleteAck, AppError> {
    let object_id = parse_object_id(id)?;
    let result = db.users().await?.delete_one(doc! { "_id": object_id }).await?;
    Ok(result.into())
}

pub async fn update_user(
    db: &MongoDB,
    id: &str,
    request: UpdateUserRequest,
    mode: WriteMode,
) -> Result<UpdateAck, AppError> {
    let object_id = parse_object_id(id)?;
    let result = db
        .users()
        .await?
        .update_one(doc! { "_id": object_id }, doc! { "$set": user_update_doc(request)? })
        .upsert(mode.upsert())
        .await?;
    Ok(result.into())
}

/// Every profile field is overwritten; absent ones become null.
pub fn user_update_doc(request: UpdateUserRequest) -> Result<Document, AppError> {
    let skills = match request.skills {
        Some(value) => mongodb::bson::to_bson(&value)?,
        None => Bson::Null,
    };

    Ok(doc! {
        "name": request.name,
        "email": request.email,
        "role": request.role,
        "address": request.address,
        "phone": request.phone,
        "about": request.about,
        "photoUrl": request.photo_url,
        "skills": skills,
    })
}

// ==================== INSTRUCTORS ====================

pub async fn list_instructors(db: &MongoDB) -> Result<Vec<User>, AppError> {
    let cursor = db
        .users()
        .await?
        .find(doc! { "role": Role::Instructor.as_str() })
        .await?;
    Ok(cursor.try_collect().await?)
}

#[async_trait]
impl UserDirectory for MongoDB {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        find_user_by_email(self, email).await
    }
}
