use futures::TryStreamExt;
use mongodb::bson::{doc, Document};

use crate::database::{MongoDB, CLASSES, USERS};
use crate::models::{EnrolledClass, PopularInstructor, Role};
use crate::utils::AppError;

const POPULAR_LIMIT: i64 = 6;

/// Instructors ranked by the enrollments summed over their classes.
pub fn popular_instructors_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": "$instructorEmail",
                "totalEnrolled": { "$sum": "$totalEnrolled" },
            }
        },
        doc! {
            "$lookup": {
                "from": USERS,
                "localField": "_id",
                "foreignField": "email",
                "as": "instructor",
            }
        },
        doc! { "$match": { "instructor.role": Role::Instructor.as_str() } },
        doc! {
            "$project": {
                "_id": 0,
                "instructor": { "$arrayElemAt": ["$instructor", 0] },
                "totalEnrolled": 1,
            }
        },
        doc! { "$sort": { "totalEnrolled": -1 } },
        doc! { "$limit": POPULAR_LIMIT },
    ]
}

/// Every class the user is enrolled in, paired with its instructor.
pub fn enrolled_classes_pipeline(email: &str) -> Vec<Document> {
    vec![
        doc! { "$match": { "userEmail": email } },
        doc! {
            "$lookup": {
                "from": CLASSES,
                "localField": "classesId",
                "foreignField": "_id",
                "as": "classes",
            }
        },
        doc! { "$unwind": "$classes" },
        doc! {
            "$lookup": {
                "from": USERS,
                "localField": "classes.instructorEmail",
                "foreignField": "email",
                "as": "instructor",
            }
        },
        doc! {
            "$project": {
                "_id": 0,
                "classes": 1,
                "instructor": { "$arrayElemAt": ["$instructor", 0] },
            }
        },
    ]
}

pub async fn popular_instructors(db: &MongoDB) -> Result<Vec<PopularInstructor>, AppError> {
    let rows: Vec<Document> = db
        .classes()
        .await?
        .aggregate(popular_instructors_pipeline())
        .await?
        .try_collect()
        .await?;

    rows.into_iter()
        .map(|row| mongodb::bson::from_document(row).map_err(|e| AppError::Serialization(e.to_string())))
        .collect()
}

pub async fn enrolled_classes(db: &MongoDB, email: &str) -> Result<Vec<EnrolledClass>, AppError> {
    let rows: Vec<Document> = db
        .enrolled()
        .await?
        .aggregate(enrolled_classes_pipeline(email))
        .await?
        .try_collect()
        .await?;

    rows.into_iter()
        .map(|row| mongodb::bson::from_document(row).map_err(|e| AppError::Serialization(e.to_string())))
        .collect()
}
