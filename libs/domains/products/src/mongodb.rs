//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductChanges, ProductPage, ProductQuery};
use crate::repository::ProductRepository;

const COLLECTION: &str = "products";

/// Stored shape: native ObjectIds and BSON datetimes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    #[serde(default)]
    description: String,
    price: f64,
    category: ObjectId,
    #[serde(default)]
    images: Vec<String>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

fn to_utc(value: bson::DateTime) -> ProductResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| ProductError::Database(format!("timestamp out of range: {:?}", value)))
}

impl TryFrom<ProductDocument> for Product {
    type Error = ProductError;

    fn try_from(doc: ProductDocument) -> Result<Self, Self::Error> {
        Ok(Product {
            id: doc.id.to_hex(),
            title: doc.title,
            description: doc.description,
            price: doc.price,
            category: doc.category.to_hex(),
            images: doc.images,
            created_at: to_utc(doc.created_at)?,
            updated_at: to_utc(doc.updated_at)?,
        })
    }
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Initialize indexes used by the listing filters
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            // Category-scoped listing, oldest first
            IndexModel::builder()
                .keys(doc! { "category": 1, "createdAt": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_created".to_string())
                        .build(),
                )
                .build(),
            // Price range queries
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(IndexOptions::builder().name("idx_price".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "title": 1 })
                .options(IndexOptions::builder().name("idx_title".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Build a MongoDB filter document from a ProductQuery
    fn build_filter(query: &ProductQuery) -> Document {
        let mut filter = doc! {};

        if let Some(category) = query.category {
            filter.insert("category", category);
        }

        if query.min_price.is_some() || query.max_price.is_some() {
            let mut price = doc! {};
            if let Some(min) = query.min_price {
                price.insert("$gte", min);
            }
            if let Some(max) = query.max_price {
                price.insert("$lte", max);
            }
            filter.insert("price", price);
        }

        // User text is matched literally
        if let Some(search) = &query.search {
            filter.insert(
                "title",
                doc! { "$regex": regex::escape(search), "$options": "i" },
            );
        }

        filter
    }

    fn build_update(changes: ProductChanges) -> Document {
        let mut set = doc! { "updatedAt": bson::DateTime::now() };

        if let Some(title) = changes.title {
            set.insert("title", title);
        }
        if let Some(description) = changes.description {
            set.insert("description", description);
        }
        if let Some(price) = changes.price {
            set.insert("price", price);
        }
        if let Some(category) = changes.category {
            set.insert("category", category);
        }
        if let Some(images) = changes.images {
            set.insert("images", images);
        }

        doc! { "$set": set }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(title = %input.title))]
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let now = bson::DateTime::now();
        let document = ProductDocument {
            id: ObjectId::new(),
            title: input.title,
            description: input.description,
            price: input.price,
            category: input.category,
            images: input.images,
            created_at: now,
            updated_at: now,
        };

        self.collection.insert_one(&document).await?;

        tracing::info!(product_id = %document.id, "Product created successfully");
        Product::try_from(document)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .map(Product::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: ProductQuery) -> ProductResult<ProductPage> {
        let filter = Self::build_filter(&query);
        let total_product = self.collection.count_documents(filter.clone()).await?;

        // The server reads limit 0 as "no limit"
        if query.limit == Some(0) {
            return Ok(ProductPage {
                total_product,
                products: Vec::new(),
            });
        }

        let mut find = self
            .collection
            .find(filter)
            .sort(doc! { "createdAt": 1, "_id": 1 })
            .skip(query.offset);
        if let Some(limit) = query.limit {
            find = find.limit(saturating_i64(limit));
        }

        let documents: Vec<ProductDocument> = find.await?.try_collect().await?;
        let products = documents
            .into_iter()
            .map(Product::try_from)
            .collect::<ProductResult<Vec<_>>>()?;

        Ok(ProductPage {
            total_product,
            products,
        })
    }

    #[instrument(skip(self, changes))]
    async fn update(
        &self,
        id: ObjectId,
        changes: ProductChanges,
    ) -> ProductResult<Option<Product>> {
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, Self::build_update(changes))
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        updated.map(Product::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let filter = MongoProductRepository::build_filter(&ProductQuery::default());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_build_filter_with_category() {
        let category = ObjectId::new();
        let filter = MongoProductRepository::build_filter(&ProductQuery {
            category: Some(category),
            ..Default::default()
        });
        assert_eq!(filter.get_object_id("category").unwrap(), category);
    }

    #[test]
    fn test_build_filter_with_price_range() {
        let filter = MongoProductRepository::build_filter(&ProductQuery {
            min_price: Some(10.0),
            max_price: Some(20.0),
            ..Default::default()
        });
        let price = filter.get_document("price").unwrap();
        assert_eq!(price.get_f64("$gte").unwrap(), 10.0);
        assert_eq!(price.get_f64("$lte").unwrap(), 20.0);
    }

    #[test]
    fn test_build_filter_with_only_upper_bound() {
        let filter = MongoProductRepository::build_filter(&ProductQuery {
            max_price: Some(5.0),
            ..Default::default()
        });
        let price = filter.get_document("price").unwrap();
        assert!(!price.contains_key("$gte"));
        assert!(price.contains_key("$lte"));
    }

    #[test]
    fn test_build_filter_escapes_search() {
        let filter = MongoProductRepository::build_filter(&ProductQuery {
            search: Some("c++ (new)".to_string()),
            ..Default::default()
        });
        let title = filter.get_document("title").unwrap();
        assert_eq!(title.get_str("$regex").unwrap(), r"c\+\+ \(new\)");
        assert_eq!(title.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_build_update_sets_only_present_fields() {
        let update = MongoProductRepository::build_update(ProductChanges {
            title: Some("Renamed".to_string()),
            ..Default::default()
        });
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("title").unwrap(), "Renamed");
        assert!(set.contains_key("updatedAt"));
        assert!(!set.contains_key("price"));
        assert!(!set.contains_key("createdAt"));
    }

    #[test]
    fn test_document_to_product() {
        let id = ObjectId::new();
        let category = ObjectId::new();
        let at = bson::DateTime::from_millis(1_700_000_000_000);
        let product = Product::try_from(ProductDocument {
            id,
            title: "Kettle".to_string(),
            description: String::new(),
            price: 30.0,
            category,
            images: vec!["kettle.png".to_string()],
            created_at: at,
            updated_at: at,
        })
        .unwrap();

        assert_eq!(product.id, id.to_hex());
        assert_eq!(product.category, category.to_hex());
        assert_eq!(product.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_saturating_i64() {
        assert_eq!(saturating_i64(5), 5);
        assert_eq!(saturating_i64(u64::MAX), i64::MAX);
    }
}
