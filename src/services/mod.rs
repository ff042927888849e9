pub mod application_service;
pub mod cart_service;
pub mod class_service;
pub mod enrollment_service;
pub mod payment_service;
pub mod stats_service;
pub mod token_service;
pub mod user_service;

pub use token_service::{Claims, Identity, TokenService};

/// Whether an update against a missing `_id` creates the document.
///
/// Updates have always upserted; callers opt out with `?upsert=false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Upsert,
    UpdateOnly,
}

impl WriteMode {
    pub fn from_flag(upsert: Option<bool>) -> Self {
        match upsert {
            Some(false) => WriteMode::UpdateOnly,
            _ => WriteMode::Upsert,
        }
    }

    pub fn upsert(self) -> bool {
        self == WriteMode::Upsert
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_unless_explicitly_disabled() {
        assert_eq!(WriteMode::from_flag(None), WriteMode::Upsert);
        assert_eq!(WriteMode::from_flag(Some(true)), WriteMode::Upsert);
        assert_eq!(WriteMode::from_flag(Some(false)), WriteMode::UpdateOnly);
        assert!(WriteMode::default().upsert());
        assert!(!WriteMode::UpdateOnly.upsert());
    }
}
