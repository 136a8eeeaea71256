//! Axum route handlers for the trove API.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use trove_core::{
    FilterEcho, Product, ProductDraft, RawProductQuery, User, UserDraft, UserPatch,
};

use crate::error::{ApiError, ALLOWED_USER_FIELDS};
use crate::state::SharedState;

// ── Response types ────────────────────────────────────────────────────────────

/// Body of `GET /products`: the filtered records plus query metadata.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub metadata: ListMetadata,
}

#[derive(Debug, Serialize)]
pub struct ListMetadata {
    /// Collection size before filtering.
    pub total: usize,
    /// Number of records passing the filters.
    pub filtered: usize,
    /// The normalized filter values that were applied.
    pub filters: FilterEcho,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDeletionResponse {
    pub message: String,
    pub deleted_product: Product,
    pub remaining_products: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDeletionResponse {
    pub message: String,
    pub deleted_user: User,
    pub remaining_users: usize,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over the given shared state.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product)
                .delete(delete_product)
                .fallback(product_method_not_allowed),
        )
        .route(
            "/users",
            get(list_users)
                .post(create_user)
                .put(update_user)
                .delete(delete_user),
        )
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /products` — list products, optionally filtered and sorted.
///
/// Unparsable numeric bounds and unknown sort keys are ignored, never
/// rejected; the metadata echoes the filters that actually applied.
pub async fn list_products(
    State(state): State<SharedState>,
    Query(raw): Query<RawProductQuery>,
) -> impl IntoResponse {
    let query = raw.normalize();
    let listing = state.products.list(&query);
    let filtered = listing.products.len();
    Json(ProductListResponse {
        products: listing.products,
        metadata: ListMetadata { total: listing.total, filtered, filters: query.echo() },
    })
}

/// `POST /products` — create a product.
///
/// # Errors
/// 400 for a malformed body, missing fields, wrong types, or a
/// non-positive price; 409 for a case-insensitive duplicate name.
pub async fn create_product(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let draft = parse_product_draft(&body)?;
    let product = state
        .products
        .create(draft)
        .map_err(|e| ApiError::from_store(e, "product"))?;
    tracing::info!(id = product.id, name = %product.name, "product created");
    let location = format!("/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

/// `GET /products/{id}` — fetch one product.
///
/// # Errors
/// 400 if the path segment is not an integer, 404 for an unknown id.
pub async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_path_id(&id)?;
    let product = state
        .products
        .get(id)
        .map_err(|e| ApiError::from_store(e, "product"))?;
    Ok(Json(product))
}

/// `DELETE /products/{id}` — remove one product.
///
/// # Errors
/// 400 if the path segment is not an integer, 404 for an unknown id (the
/// collection is left unchanged).
pub async fn delete_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_path_id(&id)?;
    let removal = state
        .products
        .remove(id)
        .map_err(|e| ApiError::from_store(e, "product"))?;
    tracing::info!(id, remaining = removal.remaining, "product deleted");
    Ok(Json(ProductDeletionResponse {
        message: "product deleted successfully".to_owned(),
        deleted_product: removal.record,
        remaining_products: removal.remaining,
    }))
}

/// Fallback for `/products/{id}`: every method besides GET and DELETE gets
/// a 405 with an `Allow` header.
pub async fn product_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// `GET /users` — the full collection in insertion order.
pub async fn list_users(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.users.list())
}

/// `POST /users` — create a user.
///
/// # Errors
/// 400 for a malformed body, missing fields, a malformed email, an
/// out-of-range age, or a blank name; 409 for a duplicate email.
pub async fn create_user(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let draft = parse_user_draft(&body)?;
    let user = state
        .users
        .create(draft)
        .map_err(|e| ApiError::from_store(e, "user"))?;
    tracing::info!(id = user.id, "user created");
    let location = format!("/users/{}", user.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

/// `PUT /users` — partial update addressed by the `id` field of the body.
///
/// Unknown body fields are rejected before any lookup or mutation.
///
/// # Errors
/// 400 for a missing/invalid id, unknown fields, or invalid field values;
/// 404 for an unknown id; 409 if the new email belongs to another user.
pub async fn update_user(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let (id, patch) = parse_user_update(&body)?;
    let user = state
        .users
        .update(id, patch)
        .map_err(|e| ApiError::from_store(e, "user"))?;
    tracing::info!(id, "user updated");
    Ok(Json(user))
}

/// `DELETE /users` — remove the user addressed by the `id` field of the body.
///
/// # Errors
/// 400 for a missing/invalid id, 404 for an unknown id (idempotent
/// failure; the collection is left unchanged).
pub async fn delete_user(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let id = parse_body_id(&body, "the user id is required to delete")?;
    let removal = state
        .users
        .remove(id)
        .map_err(|e| ApiError::from_store(e, "user"))?;
    tracing::info!(id, remaining = removal.remaining, "user deleted");
    Ok(Json(UserDeletionResponse {
        message: "user deleted successfully".to_owned(),
        deleted_user: removal.record,
        remaining_users: removal.remaining,
    }))
}

// ── Body parsing helpers ──────────────────────────────────────────────────────

/// Parse a by-id path segment; anything that is not a plain integer is a 400.
fn parse_path_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .map_err(|_| ApiError::invalid("invalid id", "the id must be a valid integer"))
}

fn as_object(body: &Value) -> Result<&serde_json::Map<String, Value>, ApiError> {
    body.as_object()
        .ok_or_else(|| ApiError::invalid("invalid body", "the request body must be a JSON object"))
}

/// A field counts as present only when it exists and is not `null`.
fn present<'a>(obj: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn parse_product_draft(body: &Value) -> Result<ProductDraft, ApiError> {
    let obj = as_object(body)?;
    let (Some(name), Some(price)) = (present(obj, "name"), present(obj, "price")) else {
        return Err(ApiError::missing("name and price are required", &["name", "price"]));
    };
    let name = name.as_str().ok_or_else(|| {
        ApiError::invalid("invalid types", "name must be a string and price must be a number")
    })?;
    let price = price.as_f64().ok_or_else(|| {
        ApiError::invalid("invalid types", "name must be a string and price must be a number")
    })?;
    Ok(ProductDraft { name: name.to_owned(), price })
}

fn parse_user_draft(body: &Value) -> Result<UserDraft, ApiError> {
    let obj = as_object(body)?;
    let (Some(name), Some(email), Some(age)) =
        (present(obj, "name"), present(obj, "email"), present(obj, "age"))
    else {
        return Err(ApiError::missing(
            "name, email and age are required",
            &["name", "email", "age"],
        ));
    };
    let name = name
        .as_str()
        .ok_or_else(|| ApiError::invalid("invalid types", "name must be a string"))?;
    let email = email
        .as_str()
        .ok_or_else(|| ApiError::invalid("invalid types", "email must be a string"))?;
    let age = age
        .as_i64()
        .ok_or_else(|| ApiError::invalid("invalid age", "age must be an integer between 0 and 120"))?;
    Ok(UserDraft { name: name.to_owned(), email: email.to_owned(), age })
}

/// Extract the record id from a request body. Accepts a JSON integer or a
/// decimal string.
fn parse_body_id(body: &Value, missing_message: &str) -> Result<u64, ApiError> {
    let obj = as_object(body)?;
    let Some(id) = present(obj, "id") else {
        return Err(ApiError::missing(missing_message, &["id"]));
    };
    id.as_u64()
        .or_else(|| id.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| ApiError::invalid("invalid id", "the id must be a positive integer"))
}

fn parse_user_update(body: &Value) -> Result<(u64, UserPatch), ApiError> {
    let obj = as_object(body)?;

    // Unknown fields fail the whole request before anything is looked up.
    let invalid: Vec<String> = obj
        .keys()
        .filter(|k| k.as_str() != "id" && !ALLOWED_USER_FIELDS.contains(&k.as_str()))
        .cloned()
        .collect();
    if !invalid.is_empty() {
        return Err(ApiError::UnknownFields { invalid });
    }

    let id = parse_body_id(body, "the user id is required to update")?;

    let name = present(obj, "name")
        .map(|v| {
            v.as_str()
                .map(str::to_owned)
                .ok_or_else(|| ApiError::invalid("invalid types", "name must be a string"))
        })
        .transpose()?;
    let email = present(obj, "email")
        .map(|v| {
            v.as_str()
                .map(str::to_owned)
                .ok_or_else(|| ApiError::invalid("invalid types", "email must be a string"))
        })
        .transpose()?;
    let age = present(obj, "age")
        .map(|v| {
            v.as_i64().ok_or_else(|| {
                ApiError::invalid("invalid age", "age must be an integer between 0 and 120")
            })
        })
        .transpose()?;

    Ok((id, UserPatch { name, email, age }))
}
