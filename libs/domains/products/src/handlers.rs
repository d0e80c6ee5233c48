//! HTTP handlers for Products API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, InvalidIdResponse, NotFoundResponse,
    },
    AppJson, AppQuery,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, ListProductsParams, PageParams, Product, ProductPage, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        list_category_products,
        search_products,
        create_product,
        get_product,
        update_product,
        patch_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductPage, CreateProduct, UpdateProduct),
        responses(
            NotFoundResponse,
            InvalidIdResponse,
            BadRequestResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/category/{category_id}", get(list_category_products))
        .route("/search/{keyword}", get(search_products))
        .route(
            "/{product_id}",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products with optional pagination, title search and price bounds
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "Page of products", body = ProductPage),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AppQuery(params): AppQuery<ListProductsParams>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.list_products(params).await?;
    Ok(Json(page))
}

/// List products of one category
#[utoipa::path(
    get,
    path = "/category/{category_id}",
    tag = "Products",
    params(
        ("category_id" = String, Path, description = "Category ObjectId"),
        ListProductsParams
    ),
    responses(
        (status = 200, description = "Page of products in the category", body = ProductPage),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = InvalidIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_category_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category_id): Path<String>,
    AppQuery(params): AppQuery<ListProductsParams>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.list_category_products(&category_id, params).await?;
    Ok(Json(page))
}

/// Search products by a case-insensitive title substring
#[utoipa::path(
    get,
    path = "/search/{keyword}",
    tag = "Products",
    params(
        ("keyword" = String, Path, description = "Text the title must contain"),
        PageParams
    ),
    responses(
        (status = 200, description = "Matching products", body = ProductPage),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(keyword): Path<String>,
    AppQuery(page): AppQuery<PageParams>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.search_products(&keyword, page).await?;
    Ok(Json(page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AppJson(input): AppJson<CreateProduct>,
) -> ProductResult<(StatusCode, Json<Product>)> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{product_id}",
    tag = "Products",
    params(("product_id" = String, Path, description = "Product ObjectId")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(product_id): Path<String>,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(&product_id).await?;
    Ok(Json(product))
}

/// Update a product; fields absent from the body are kept
#[utoipa::path(
    put,
    path = "/{product_id}",
    tag = "Products",
    params(("product_id" = String, Path, description = "Product ObjectId")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(product_id): Path<String>,
    AppJson(input): AppJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(&product_id, input).await?;
    Ok(Json(product))
}

/// Same merge semantics as `PUT`
#[utoipa::path(
    patch,
    path = "/{product_id}",
    tag = "Products",
    params(("product_id" = String, Path, description = "Product ObjectId")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_product<R: ProductRepository>(
    state: State<Arc<ProductService<R>>>,
    path: Path<String>,
    input: AppJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    update_product(state, path, input).await
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{product_id}",
    tag = "Products",
    params(("product_id" = String, Path, description = "Product ObjectId")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(product_id): Path<String>,
) -> ProductResult<StatusCode> {
    service.delete_product(&product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
