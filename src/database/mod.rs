use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::config::AppConfig;
use crate::models::{Application, CartItem, Class, Enrolled, Payment, User};
use crate::utils::AppError;

pub const USERS: &str = "users";
pub const CLASSES: &str = "classes";
pub const CART: &str = "cart";
pub const PAYMENTS: &str = "payments";
pub const ENROLLED: &str = "enrolled";
pub const APPLIED: &str = "applied";

#[derive(Debug)]
struct Settings {
    url: String,
    name: String,
    max_pool_size: u32,
}

/// Shared data-access context. Created once at startup and cloned into every
/// worker; the driver's pool is the only concurrency bound.
///
/// The client is opened on first use. Opening a `mongodb+srv://` URI needs a
/// DNS lookup; while that fails every store call returns
/// `AppError::Database` and the next call tries again.
#[derive(Clone)]
pub struct MongoDB {
    settings: Arc<Settings>,
    db: Arc<OnceCell<Database>>,
}

impl MongoDB {
    /// Never fails: an unreachable or unresolvable deployment is logged and
    /// the handle starts degraded.
    pub async fn connect(config: &AppConfig) -> Self {
        let handle = Self {
            settings: Arc::new(Settings {
                url: config.database_url.clone(),
                name: config.database_name.clone(),
                max_pool_size: config.max_pool_size,
            }),
            db: Arc::new(OnceCell::new()),
        };

        if let Err(e) = handle.database().await {
            log::error!("❌ MongoDB client could not be created, will retry on demand: {}", e);
        }

        handle
    }

    async fn open(settings: &Settings) -> Result<Database, AppError> {
        // Resolves SRV records for mongodb+srv:// URIs
        let mut client_options = ClientOptions::parse(settings.url.as_str()).await?;

        client_options.app_name = Some("course-marketplace".to_string());
        client_options.max_pool_size = Some(settings.max_pool_size);
        client_options.min_pool_size = Some(settings.max_pool_size.min(5));
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        log::info!("✅ MongoDB client created for database {}", settings.name);
        Ok(client.database(&settings.name))
    }

    pub async fn database(&self) -> Result<Database, AppError> {
        self.db
            .get_or_try_init(|| Self::open(&self.settings))
            .await
            .cloned()
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.database().await?.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Lookup indexes for the fields every route filters on. Uniqueness is not
    /// enforced anywhere.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        let indexes: [(&str, mongodb::bson::Document); 6] = [
            (USERS, doc! { "email": 1 }),
            (CLASSES, doc! { "status": 1 }),
            (CLASSES, doc! { "instructorEmail": 1 }),
            (CART, doc! { "userMail": 1, "classId": 1 }),
            (ENROLLED, doc! { "userEmail": 1 }),
            (PAYMENTS, doc! { "userEmail": 1, "date": -1 }),
        ];

        for (collection, keys) in indexes {
            let description = format!("{}({:?})", collection, keys.keys().collect::<Vec<_>>());
            let model = IndexModel::builder().keys(keys).build();

            match self
                .collection::<mongodb::bson::Document>(collection)
                .await?
                .create_index(model)
                .await
            {
                Ok(_) => log::info!("   ✅ Index created: {}", description),
                Err(e) => log::debug!("   ℹ️  Index not created {}: {}", description, e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    // ==================== COLLECTIONS ====================

    pub async fn collection<T: Send + Sync>(&self, name: &str) -> Result<Collection<T>, AppError> {
        Ok(self.database().await?.collection(name))
    }

    pub async fn users(&self) -> Result<Collection<User>, AppError> {
        self.collection(USERS).await
    }

    pub async fn classes(&self) -> Result<Collection<Class>, AppError> {
        self.collection(CLASSES).await
    }

    pub async fn cart(&self) -> Result<Collection<CartItem>, AppError> {
        self.collection(CART).await
    }

    pub async fn payments(&self) -> Result<Collection<Payment>, AppError> {
        self.collection(PAYMENTS).await
    }

    pub async fn enrolled(&self) -> Result<Collection<Enrolled>, AppError> {
        self.collection(ENROLLED).await
    }

    pub async fn applied(&self) -> Result<Collection<Application>, AppError> {
        self.collection(APPLIED).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_does_not_require_a_server() {
        let db = testing::offline().await;
        assert_eq!(db.database().await.unwrap().name(), "course-marketplace-offline");
        assert_eq!(db.classes().await.unwrap().name(), CLASSES);
        assert_eq!(db.cart().await.unwrap().name(), CART);
    }

    #[tokio::test]
    async fn unresolvable_srv_host_starts_degraded() {
        let config = AppConfig::from_lookup(|key| match key {
            "DB_USER" => Some("nam".to_string()),
            "DB_PASSWORD" => Some("pw".to_string()),
            "DB_HOST" => Some("cluster0.nonexistent.invalid".to_string()),
            "ACCESS_SECRET" => Some("test-secret".to_string()),
            _ => None,
        });
        assert!(config.database_url.starts_with("mongodb+srv://"));

        let db = MongoDB::connect(&config).await;

        assert!(matches!(db.ping().await, Err(AppError::Database(_))));
        assert!(matches!(db.users().await, Err(AppError::Database(_))));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        let db = testing::live("connection").await;
        assert!(db.ping().await.is_ok());
        assert!(db.ensure_indexes().await.is_ok());
    }
}
