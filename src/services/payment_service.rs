use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::database::MongoDB;
use crate::models::{CheckoutReceipt, CheckoutRequest, Enrolled, Payment, PaymentCount};
use crate::utils::{parse_object_id, AppError};

// ==================== CHECKOUT ====================

/// Turns a purchase into enrollments. The steps run in sequence without a
/// transaction: a failure part-way leaves the earlier steps applied.
pub async fn checkout(
    db: &MongoDB,
    request: CheckoutRequest,
    single_class_id: Option<&str>,
) -> Result<CheckoutReceipt, AppError> {
    let class_ids = request
        .classes_id
        .iter()
        .map(|id| parse_object_id(id))
        .collect::<Result<Vec<ObjectId>, AppError>>()?;

    log::info!(
        "💳 Checkout for {}: {} class(es)",
        request.user_email,
        class_ids.len()
    );

    // 1. Seat and enrollment counters (never creates a class)
    let updated = db
        .classes()
        .await?
        .update_many(
            doc! { "_id": { "$in": class_ids.clone() } },
            doc! { "$inc": { "totalEnrolled": 1, "availableSeats": -1 } },
        )
        .await
        .inspect_err(|e| log::error!("❌ Checkout step 1/4 (seat update) failed: {}", e))?;

    // 2. Enrollment record
    let enrolled = db
        .enrolled()
        .await?
        .insert_one(Enrolled {
            id: None,
            user_email: request.user_email.clone(),
            classes_id: class_ids,
            transaction_id: request.transaction_id.clone(),
        })
        .await
        .inspect_err(|e| log::error!("❌ Checkout step 2/4 (enrollment) failed: {}", e))?;

    // 3. Purchased rows leave the buyer's cart
    let deleted = db
        .cart()
        .await?
        .delete_many(purchased_cart_filter(&request, single_class_id))
        .await
        .inspect_err(|e| log::error!("❌ Checkout step 3/4 (cart cleanup) failed: {}", e))?;

    // 4. Payment record
    let payment = Payment {
        id: None,
        user_email: request.user_email,
        classes_id: request.classes_id,
        transaction_id: request.transaction_id,
        date: Some(chrono::Utc::now().to_rfc3339()),
        extra: request.extra,
    };
    let paid = db
        .payments()
        .await?
        .insert_one(&payment)
        .await
        .inspect_err(|e| log::error!("❌ Checkout step 4/4 (payment record) failed: {}", e))?;

    Ok(CheckoutReceipt {
        updated_result: updated.into(),
        enrolled_result: enrolled.into(),
        deleted_result: deleted.into(),
        payment_result: paid.into(),
    })
}

/// Cart rows removed by a checkout: the single class bought via "buy now", or
/// every purchased class. Always limited to the buyer's cart.
pub fn purchased_cart_filter(request: &CheckoutRequest, single_class_id: Option<&str>) -> Document {
    match single_class_id {
        Some(class_id) => doc! { "classId": class_id, "userMail": request.user_email.as_str() },
        None => doc! {
            "classId": { "$in": request.classes_id.clone() },
            "userMail": request.user_email.as_str(),
        },
    }
}

// ==================== HISTORY ====================

/// Newest first.
pub async fn payment_history(db: &MongoDB, email: &str) -> Result<Vec<Payment>, AppError> {
    let cursor = db
        .payments()
        .await?
        .find(doc! { "userEmail": email })
        .sort(doc! { "date": -1 })
        .await?;
    Ok(cursor.try_collect().await?)
}

pub async fn payment_count(db: &MongoDB, email: &str) -> Result<PaymentCount, AppError> {
    let total = db.payments().await?.count_documents(doc! { "userEmail": email }).await?;
    Ok(PaymentCount { total })
}
