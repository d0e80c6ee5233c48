use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductChanges, ProductPage, ProductQuery};

/// Repository trait for Product persistence
///
/// Lookups by id return `None`/`false` when no document matches; turning that
/// into a not-found error is the service's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product; the identifier is generated here
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Matching products ordered oldest first, windowed by the query's
    /// offset/limit, with the unwindowed match count
    async fn list(&self, query: ProductQuery) -> ProductResult<ProductPage>;

    /// Merge `changes` into the stored product and refresh `updated_at`
    async fn update(&self, id: ObjectId, changes: ProductChanges)
        -> ProductResult<Option<Product>>;

    /// `true` if a document was removed
    async fn delete(&self, id: ObjectId) -> ProductResult<bool>;
}

/// In-memory implementation for tests and local runs without MongoDB
#[derive(Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ObjectId, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let id = ObjectId::new();
        let now = Utc::now();
        let product = Product {
            id: id.to_hex(),
            title: input.title,
            description: input.description,
            price: input.price,
            category: input.category.to_hex(),
            images: input.images,
            created_at: now,
            updated_at: now,
        };

        self.products.write().await.insert(id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, query: ProductQuery) -> ProductResult<ProductPage> {
        let products = self.products.read().await;

        let mut matched: Vec<&Product> = products.values().filter(|p| query.matches(p)).collect();
        matched.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let total_product = matched.len() as u64;
        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        let products = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(ProductPage {
            total_product,
            products,
        })
    }

    async fn update(
        &self,
        id: ObjectId,
        changes: ProductChanges,
    ) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(product) = products.get_mut(&id) else {
            return Ok(None);
        };

        changes.apply_to(product);
        product.updated_at = Utc::now();

        tracing::info!(product_id = %id, "Updated product");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: ObjectId) -> ProductResult<bool> {
        let removed = self.products.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }
}
