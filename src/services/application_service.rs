use mongodb::bson::doc;

use crate::database::MongoDB;
use crate::models::{Application, InsertAck};
use crate::utils::AppError;

pub async fn apply_as_instructor(db: &MongoDB, mut application: Application) -> Result<InsertAck, AppError> {
    application.id = None;
    let result = db.applied().await?.insert_one(&application).await?;
    Ok(result.into())
}

pub async fn find_application(db: &MongoDB, email: &str) -> Result<Option<Application>, AppError> {
    Ok(db.applied().await?.find_one(doc! { "email": email }).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn application_is_found_by_email() {
        let db = testing::live("applications").await;
        let application: Application = serde_json::from_value(serde_json::json!({
            "name": "Lan",
            "email": "lan@x.com",
            "experience": "5 years"
        }))
        .unwrap();

        apply_as_instructor(&db, application).await.unwrap();

        let found = find_application(&db, "lan@x.com").await.unwrap().unwrap();
        assert_eq!(found.extra.get_str("experience").unwrap(), "5 years");
        assert!(find_application(&db, "nobody@x.com").await.unwrap().is_none());
    }
}
