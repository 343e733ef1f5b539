use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::controller::api_error::ApiError;
use crate::helpers::haversine::haversine_distance;
use crate::repositories::restaurant_repo::RestaurantRepo;

pub fn router(pool: SqlitePool) -> Router {
    let restaurant_repo = Arc::new(RestaurantRepo::new(pool));

    Router::new()
        .route("/", get(list_restaurants))
        .route("/search", get(search_restaurants_by_radius))
        .route("/:id", get(retrieve_restaurant))
        .route_layer(Extension(restaurant_repo))
}

pub async fn list_restaurants(
    Extension(restaurant_repo): Extension<Arc<RestaurantRepo>>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurants = restaurant_repo.list_restaurants().await?;
    Ok(Json(restaurants))
}

pub async fn retrieve_restaurant(
    Extension(restaurant_repo): Extension<Arc<RestaurantRepo>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant = restaurant_repo
        .find_restaurant(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Restaurant with id {} not found", id)))?;

    Ok(Json(restaurant))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchRestaurantParams {
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default = "default_radius_km")]
    pub radius: f64,
}

fn default_radius_km() -> f64 {
    3.0
}

/// Full scan over the table; fine at this dataset's size.
pub async fn search_restaurants_by_radius(
    Extension(restaurant_repo): Extension<Arc<RestaurantRepo>>,
    Query(params): Query<SearchRestaurantParams>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurants = restaurant_repo.list_restaurants().await?;

    let within_radius: Vec<_> = restaurants
        .into_iter()
        .filter(|r| {
            haversine_distance(params.lat, params.lng, r.latitude, r.longitude) <= params.radius
        })
        .collect();

    Ok(Json(within_radius))
}
