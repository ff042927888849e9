use mongodb::bson::doc;

use crate::database::MongoDB;
use crate::models::{AdminStats, ClassStatus, Role};
use crate::utils::AppError;

/// Five independent counts, read one after another. Concurrent writes can make
/// the figures disagree with each other (e.g. approved + pending > total).
pub async fn admin_stats(db: &MongoDB) -> Result<AdminStats, AppError> {
    let classes = db.classes().await?;

    let approved_classes = classes
        .count_documents(doc! { "status": ClassStatus::Approved.as_str() })
        .await?;
    let pending_classes = classes
        .count_documents(doc! { "status": ClassStatus::Pending.as_str() })
        .await?;
    let instructors = db
        .users()
        .await?
        .count_documents(doc! { "role": Role::Instructor.as_str() })
        .await?;
    let total_classes = classes.count_documents(doc! {}).await?;
    let total_enrolled = db.enrolled().await?.count_documents(doc! {}).await?;

    Ok(AdminStats {
        approved_classes,
        pending_classes,
        instructors,
        total_classes,
        total_enrolled,
    })
}
