use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ProductError;

/// Product entity as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (ObjectId hex, stored as _id)
    #[serde(rename = "_id", alias = "id")]
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Category identifier (ObjectId hex)
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e500")]
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProduct {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Category identifier (ObjectId hex)
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// DTO for updating an existing product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
}

/// Validated create payload handed to the repository
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: ObjectId,
    pub images: Vec<String>,
}

/// Validated partial update handed to the repository
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<ObjectId>,
    pub images: Option<Vec<String>>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.images.is_none()
    }

    /// Merge into an existing product; absent fields keep their value.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(title) = self.title {
            product.title = title;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = category.to_hex();
        }
        if let Some(images) = self.images {
            product.images = images;
        }
    }
}

fn parse_category(raw: &str) -> Result<ObjectId, ProductError> {
    ObjectId::parse_str(raw)
        .map_err(|_| ProductError::InvalidInput(format!("invalid category id '{}'", raw)))
}

impl TryFrom<CreateProduct> for NewProduct {
    type Error = ProductError;

    fn try_from(input: CreateProduct) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_category(&input.category)?,
            title: input.title,
            description: input.description,
            price: input.price,
            images: input.images,
        })
    }
}

impl TryFrom<UpdateProduct> for ProductChanges {
    type Error = ProductError;

    fn try_from(input: UpdateProduct) -> Result<Self, Self::Error> {
        Ok(Self {
            category: input.category.as_deref().map(parse_category).transpose()?,
            title: input.title,
            description: input.description,
            price: input.price,
            images: input.images,
        })
    }
}

/// Query parameters for the listing endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// Maximum number of products to return (absent = all)
    pub limit: Option<u64>,
    /// Number of matching products to skip (absent = 0)
    pub offset: Option<u64>,
    /// Case-insensitive substring of the title
    pub search_query: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
}

/// Optional pagination for keyword search
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Maximum number of products to return (absent = all)
    pub limit: Option<u64>,
    /// Number of matching products to skip (absent = 0)
    pub offset: Option<u64>,
}

/// Normalized filter and window for a repository listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub category: Option<ObjectId>,
    /// Literal text; never empty
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: Option<u64>,
    pub offset: u64,
}

impl ProductQuery {
    pub fn from_params(params: ListProductsParams, category: Option<ObjectId>) -> Self {
        Self {
            category,
            search: params.search_query.filter(|s| !s.is_empty()),
            min_price: Some(params.min_price.unwrap_or(0.0)),
            max_price: params.max_price,
            limit: params.limit,
            offset: params.offset.unwrap_or(0),
        }
    }

    pub fn keyword(keyword: &str, page: PageParams) -> Self {
        Self {
            search: Some(keyword.to_string()).filter(|s| !s.is_empty()),
            limit: page.limit,
            offset: page.offset.unwrap_or(0),
            ..Self::default()
        }
    }

    /// Whether `product` passes the filter. Pagination is not considered.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if product.category != category.to_hex() {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !product
                .title
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        true
    }
}

/// One page of a listing plus the count of every match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Number of matching products before pagination
    pub total_product: u64,
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, price: f64, category: &ObjectId) -> Product {
        let now = Utc::now();
        Product {
            id: ObjectId::new().to_hex(),
            title: title.to_string(),
            description: String::new(),
            price,
            category: category.to_hex(),
            images: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_product_serializes_camel_case_with_mongo_id() {
        let p = product("Lamp", 12.5, &ObjectId::new());
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_page_uses_total_product_key() {
        let page = ProductPage {
            total_product: 3,
            products: vec![],
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalProduct"], 3);
    }

    #[test]
    fn test_create_payload_defaults() {
        let input: CreateProduct = serde_json::from_str(
            r#"{"title":"Mug","price":4.0,"category":"65a1f0c2e4b0a1b2c3d4e500"}"#,
        )
        .unwrap();
        assert!(input.description.is_empty());
        assert!(input.images.is_empty());

        let new = NewProduct::try_from(input).unwrap();
        assert_eq!(new.category.to_hex(), "65a1f0c2e4b0a1b2c3d4e500");
    }

    #[test]
    fn test_create_with_malformed_category_is_invalid_input() {
        let input = CreateProduct {
            title: "Mug".to_string(),
            description: String::new(),
            price: 4.0,
            category: "kitchen".to_string(),
            images: vec![],
        };
        assert!(matches!(
            NewProduct::try_from(input),
            Err(ProductError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_changes_merge_keeps_absent_fields() {
        let mut p = product("Lamp", 12.5, &ObjectId::new());
        let changes = ProductChanges {
            price: Some(9.0),
            ..Default::default()
        };
        assert!(!changes.is_empty());
        changes.apply_to(&mut p);
        assert_eq!(p.title, "Lamp");
        assert_eq!(p.price, 9.0);
    }

    #[test]
    fn test_params_are_camel_case() {
        let params: ListProductsParams = serde_json::from_str(
            r#"{"limit":2,"offset":1,"searchQuery":"shoe","minPrice":10,"maxPrice":20}"#,
        )
        .unwrap();
        let query = ProductQuery::from_params(params, None);
        assert_eq!(query.limit, Some(2));
        assert_eq!(query.offset, 1);
        assert_eq!(query.search.as_deref(), Some("shoe"));
        assert_eq!(query.min_price, Some(10.0));
        assert_eq!(query.max_price, Some(20.0));
    }

    #[test]
    fn test_empty_search_matches_all() {
        let params = ListProductsParams {
            search_query: Some(String::new()),
            ..Default::default()
        };
        let query = ProductQuery::from_params(params, None);
        assert!(query.search.is_none());
        assert_eq!(query.offset, 0);
        assert_eq!(query.min_price, Some(0.0));
        assert!(query.matches(&product("anything", 1.0, &ObjectId::new())));
    }

    #[test]
    fn test_title_match_is_case_insensitive_substring() {
        let p = product("Blue Shirt", 15.0, &ObjectId::new());
        for needle in ["blue", "SHIRT", "ue sh"] {
            let query = ProductQuery::keyword(needle, PageParams::default());
            assert!(query.matches(&p), "{needle} should match");
        }
        assert!(!ProductQuery::keyword("red", PageParams::default()).matches(&p));
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let query = ProductQuery {
            min_price: Some(10.0),
            max_price: Some(20.0),
            ..Default::default()
        };
        let category = ObjectId::new();
        assert!(query.matches(&product("a", 10.0, &category)));
        assert!(query.matches(&product("b", 20.0, &category)));
        assert!(!query.matches(&product("c", 9.99, &category)));
        assert!(!query.matches(&product("d", 20.01, &category)));
    }

    #[test]
    fn test_category_filter() {
        let category = ObjectId::new();
        let query = ProductQuery {
            category: Some(category),
            ..Default::default()
        };
        assert!(query.matches(&product("a", 1.0, &category)));
        assert!(!query.matches(&product("b", 1.0, &ObjectId::new())));
    }
}
