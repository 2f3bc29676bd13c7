//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoOrderStore` and `MongoLabelStore` backed by a
//! `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! dashboard-rs = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! Orders live in the `orders` collection with the fields `orderId`,
//! `customer`, `date` (BSON date), `amount` (double), `status` (integer code)
//! and `region` (string). Labels live in the `labels` collection.
//!
//! # Query translation
//!
//! An [`OrderFilter`] is pushed down as a single `$match`-style document so the
//! database only returns matching orders. Grouping and the metric derivations
//! still run in-process on the returned orders.

use crate::core::{Order, OrderFilter, OrderStatus, OrderStore, Region, StorageError};
use crate::labels::{Label, LabelStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Database};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

const BACKEND: &str = "MongoDB";

/// Default database name when neither the config nor the URI names one
pub const DEFAULT_DATABASE: &str = "dashboard";

/// Connect to MongoDB and select a database
///
/// `database` wins over the database named in the URI path.
pub async fn connect(uri: &str, database: Option<&str>) -> Result<Database, StorageError> {
    let client = Client::with_uri_str(uri)
        .await
        .map_err(|e| StorageError::ConnectionError {
            backend: BACKEND.to_string(),
            message: e.to_string(),
        })?;

    let database = match database {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
    };

    Ok(database)
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn bson_datetime(date: DateTime<Utc>) -> mongodb::bson::DateTime {
    mongodb::bson::DateTime::from_millis(date.timestamp_millis())
}

fn integrity(message: impl Into<String>) -> StorageError {
    StorageError::IntegrityError {
        message: message.into(),
    }
}

/// Translate a filter into a MongoDB query document
///
/// Search text is escaped so it matches literally, case-insensitively.
pub fn filter_to_document(filter: &OrderFilter) -> Document {
    let mut conditions: Vec<Document> = Vec::new();

    if let Some(search) = &filter.search {
        let pattern = regex::escape(search.text());
        let mut any_of = vec![
            doc! { "orderId": { "$regex": &pattern, "$options": "i" } },
            doc! { "customer": { "$regex": &pattern, "$options": "i" } },
            doc! { "region": { "$regex": &pattern, "$options": "i" } },
        ];

        if search.is_numeric() {
            any_of.push(doc! {
                "$expr": {
                    "$regexMatch": {
                        "input": { "$toString": "$amount" },
                        "regex": &pattern,
                    }
                }
            });
        }

        conditions.push(doc! { "$or": any_of });
    }

    // Unknown regions are matched verbatim and so find nothing
    if let Some(region) = &filter.region {
        conditions.push(doc! { "region": region.as_str() });
    }

    if let Some(month) = filter.month {
        conditions.push(doc! { "$expr": { "$eq": [{ "$month": "$date" }, month] } });
    }

    if let Some(status) = filter.status {
        conditions.push(doc! { "status": status });
    }

    if let Some(from) = filter.date_from {
        conditions.push(doc! { "date": { "$gte": bson_datetime(from) } });
    }

    if let Some(before) = filter.date_before {
        conditions.push(doc! { "date": { "$lt": bson_datetime(before) } });
    }

    if conditions.is_empty() {
        doc! {}
    } else {
        doc! { "$and": conditions }
    }
}

/// Convert an order into a MongoDB document.
pub fn order_to_document(order: &Order) -> Document {
    doc! {
        "orderId": &order.order_id,
        "customer": &order.customer,
        "date": bson_datetime(order.date),
        "amount": order.amount.to_f64().unwrap_or_default(),
        "status": i32::from(order.status.code()),
        "region": order.region.as_str(),
    }
}

fn decimal_field(doc: &Document, field: &str) -> Result<Decimal, StorageError> {
    let value = match doc.get(field) {
        Some(Bson::Double(f)) => Decimal::from_f64(*f),
        Some(Bson::Int32(i)) => Some(Decimal::from(*i)),
        Some(Bson::Int64(i)) => Some(Decimal::from(*i)),
        Some(Bson::Decimal128(d)) => d.to_string().parse().ok(),
        _ => None,
    };
    value.ok_or_else(|| integrity(format!("field '{}' is not a number", field)))
}

fn integer_field(doc: &Document, field: &str) -> Result<i64, StorageError> {
    match doc.get(field) {
        Some(Bson::Int32(i)) => Ok(i64::from(*i)),
        Some(Bson::Int64(i)) => Ok(*i),
        Some(Bson::Double(f)) if f.fract() == 0.0 => Ok(*f as i64),
        _ => Err(integrity(format!("field '{}' is not an integer", field))),
    }
}

fn string_field<'a>(doc: &'a Document, field: &str) -> Result<&'a str, StorageError> {
    doc.get_str(field)
        .map_err(|e| integrity(format!("field '{}': {}", field, e)))
}

/// Convert a MongoDB document back into an order.
pub fn document_to_order(doc: &Document) -> Result<Order, StorageError> {
    let date = doc
        .get_datetime("date")
        .map_err(|e| integrity(format!("field 'date': {}", e)))?;
    let date = DateTime::<Utc>::from_timestamp_millis(date.timestamp_millis())
        .ok_or_else(|| integrity("field 'date' is out of range"))?;

    let status_code = integer_field(doc, "status")?;
    let status = OrderStatus::from_code(status_code)
        .ok_or_else(|| integrity(format!("unknown status code {}", status_code)))?;

    let region: Region = string_field(doc, "region")?.parse().map_err(integrity)?;

    Ok(Order {
        order_id: string_field(doc, "orderId")?.to_string(),
        customer: string_field(doc, "customer")?.to_string(),
        date,
        amount: decimal_field(doc, "amount")?,
        status,
        region,
    })
}

// ---------------------------------------------------------------------------
// MongoOrderStore
// ---------------------------------------------------------------------------

/// Order store backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use dashboard::storage::mongodb::{connect, MongoOrderStore};
///
/// let db = connect("mongodb://localhost:27017/testdel", None).await?;
/// let store = MongoOrderStore::new(db);
/// let completed = store.find(&OrderFilter::completed()).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoOrderStore {
    database: Database,
}

impl MongoOrderStore {
    /// Create a new `MongoOrderStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection("orders")
    }

    /// Create indexes on the fields reports filter by.
    ///
    /// This method is idempotent, safe to call on every startup.
    pub async fn ensure_indexes(&self) -> Result<(), StorageError> {
        use mongodb::IndexModel;

        let indexes = vec![
            IndexModel::builder().keys(doc! { "customer": 1 }).build(),
            IndexModel::builder().keys(doc! { "status": 1, "date": 1 }).build(),
            IndexModel::builder().keys(doc! { "region": 1 }).build(),
        ];

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| StorageError::query(BACKEND, e))?;

        Ok(())
    }

    /// Insert orders (used for seeding and tests).
    pub async fn insert(&self, orders: &[Order]) -> Result<(), StorageError> {
        if orders.is_empty() {
            return Ok(());
        }

        let docs: Vec<Document> = orders.iter().map(order_to_document).collect();
        self.collection()
            .insert_many(docs)
            .await
            .map_err(|e| StorageError::query(BACKEND, e))?;

        Ok(())
    }
}

#[async_trait]
impl OrderStore for MongoOrderStore {
    /// Orders matching the filter, in natural (insertion) order.
    async fn find(&self, filter: &OrderFilter) -> Result<Vec<Order>, StorageError> {
        let cursor = self
            .collection()
            .find(filter_to_document(filter))
            .sort(doc! { "$natural": 1 })
            .await
            .map_err(|e| StorageError::query(BACKEND, e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| StorageError::query(BACKEND, e))?;

        docs.iter().map(document_to_order).collect()
    }

    async fn count(&self, filter: &OrderFilter) -> Result<usize, StorageError> {
        let count = self
            .collection()
            .count_documents(filter_to_document(filter))
            .await
            .map_err(|e| StorageError::query(BACKEND, e))?;

        usize::try_from(count).map_err(|e| integrity(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// MongoLabelStore
// ---------------------------------------------------------------------------

/// Label store backed by the `labels` collection.
#[derive(Clone, Debug)]
pub struct MongoLabelStore {
    database: Database,
}

impl MongoLabelStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Label> {
        self.database.collection("labels")
    }
}

#[async_trait]
impl LabelStore for MongoLabelStore {
    async fn list(&self) -> Result<Vec<Label>, StorageError> {
        let cursor = self
            .collection()
            .find(doc! {})
            .await
            .map_err(|e| StorageError::query(BACKEND, e))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| StorageError::query(BACKEND, e))
    }

    async fn get(&self, key: &str) -> Result<Option<Label>, StorageError> {
        self.collection()
            .find_one(doc! { "key": key })
            .await
            .map_err(|e| StorageError::query(BACKEND, e))
    }

    async fn update(&self, key: &str, value: &str) -> Result<Option<Label>, StorageError> {
        self.collection()
            .find_one_and_update(doc! { "key": key }, doc! { "$set": { "value": value } })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| StorageError::query(BACKEND, e))
    }

    async fn seed(&self, labels: Vec<Label>) -> Result<usize, StorageError> {
        let existing = self
            .collection()
            .count_documents(doc! {})
            .await
            .map_err(|e| StorageError::query(BACKEND, e))?;
        if existing > 0 || labels.is_empty() {
            return Ok(0);
        }

        let result = self
            .collection()
            .insert_many(&labels)
            .await
            .map_err(|e| StorageError::query(BACKEND, e))?;

        Ok(result.inserted_ids.len())
    }
}
