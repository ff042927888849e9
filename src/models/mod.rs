pub mod ack;
pub mod application;
pub mod cart;
pub mod class;
pub mod enrolled;
pub mod payment;
pub mod user;

pub use ack::*;
pub use application::*;
pub use cart::*;
pub use class::*;
pub use enrolled::*;
pub use payment::*;
pub use user::*;

use mongodb::bson::oid::ObjectId;
use serde::Serializer;

/// Renders `_id` as a hex string in JSON responses. Documents are only ever
/// inserted with `id: None`, so the BSON write path never reaches this.
pub fn serialize_object_id_hex<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}
