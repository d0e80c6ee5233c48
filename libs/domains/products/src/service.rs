//! Product Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, ListProductsParams, NewProduct, PageParams, Product, ProductChanges,
    ProductPage, ProductQuery, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Parse a path identifier, rejecting anything that is not an ObjectId.
fn parse_id(raw: &str) -> ProductResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| ProductError::MalformedId(raw.to_string()))
}

/// Product service providing business logic operations
///
/// Parses identifiers, normalizes query parameters and maps missing
/// documents to [`ProductError::NotFound`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all products matching the filter
    #[instrument(skip(self))]
    pub async fn list_products(&self, params: ListProductsParams) -> ProductResult<ProductPage> {
        self.repository
            .list(ProductQuery::from_params(params, None))
            .await
    }

    /// List products of one category
    #[instrument(skip(self))]
    pub async fn list_category_products(
        &self,
        category_id: &str,
        params: ListProductsParams,
    ) -> ProductResult<ProductPage> {
        let category = parse_id(category_id)?;
        self.repository
            .list(ProductQuery::from_params(params, Some(category)))
            .await
    }

    /// Products whose title contains `keyword`, ignoring case
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        keyword: &str,
        page: PageParams,
    ) -> ProductResult<ProductPage> {
        self.repository
            .list(ProductQuery::keyword(keyword, page))
            .await
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let input = NewProduct::try_from(input)?;
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        let oid = parse_id(id)?;
        self.repository
            .get_by_id(oid)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Merge `input` into the stored product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        let oid = parse_id(id)?;
        let changes = match ProductChanges::try_from(input) {
            Ok(changes) => changes,
            // An unknown product is reported before a bad body
            Err(err) => {
                return match self.repository.get_by_id(oid).await? {
                    Some(_) => Err(err),
                    None => Err(ProductError::NotFound(id.to_string())),
                };
            }
        };
        if changes.is_empty() {
            tracing::debug!(product_id = %id, "Update carries no field changes");
        }

        self.repository
            .update(oid, changes)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        let oid = parse_id(id)?;
        if self.repository.delete(oid).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id.to_string()))
        }
    }
}
