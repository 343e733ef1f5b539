use std::sync::Arc;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use serde_json::json;

use crate::classifier::cuisine::match_cuisine;
use crate::classifier::ImageClassifier;
use crate::controller::api_error::ApiError;
use crate::controller::AppState;
use crate::repositories::restaurant_repo::RestaurantRepo;

/// Everything the classify endpoint needs, bundled so one Extension covers
/// the handler.
pub struct ClassifyContext {
    pub restaurant_repo: RestaurantRepo,
    pub classifier: Arc<ImageClassifier>,
    pub labels: Arc<Vec<String>>,
}

pub fn router(app_state: AppState) -> Router {
    let context = Arc::new(ClassifyContext {
        restaurant_repo: RestaurantRepo::new(app_state.pool),
        classifier: app_state.classifier,
        labels: app_state.labels,
    });

    Router::new()
        .route("/classify-image", post(classify_image))
        .route_layer(Extension(context))
}

/// Classify the uploaded food photo, map the predicted label to a cuisine
/// and return the restaurants serving it.
pub async fn classify_image(
    Extension(context): Extension<Arc<ClassifyContext>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let image_bytes = read_image_field(&mut multipart).await?;

    let class_index = context
        .classifier
        .classify(&image_bytes)
        .context("Error processing image")?;
    let label = context
        .labels
        .get(class_index)
        .ok_or_else(|| anyhow::anyhow!("Predicted class {} has no label", class_index))
        .context("Error processing image")?;

    let Some(cuisine) = match_cuisine(label) else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("Could not determine cuisine from: {}", label),
                "detected_label": label,
            })),
        )
            .into_response());
    };

    let restaurants = context
        .restaurant_repo
        .search_by_cuisine(cuisine)
        .await
        .context("Error processing image")?;

    Ok(Json(json!({
        "cuisine": cuisine,
        "detected_label": label,
        "restaurants": restaurants,
    }))
    .into_response())
}

/// Walk the multipart fields until the `image` file shows up.
async fn read_image_field(multipart: &mut Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart upload: {}", e)))?
    {
        if field.name() == Some("image") {
            return field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Malformed multipart upload: {}", e)));
        }
    }

    Err(ApiError::BadRequest("No image uploaded".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;

    const BOUNDARY: &str = "test-boundary";

    async fn multipart_from(body: String) -> Multipart {
        let request = Request::builder()
            .method("POST")
            .uri("/classify-image")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn image_field_bytes_are_extracted() {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"image\"; filename=\"food.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             fake image bytes\r\n\
             --{BOUNDARY}--\r\n"
        );

        let mut multipart = multipart_from(body).await;
        let bytes = read_image_field(&mut multipart).await.unwrap();
        assert_eq!(&bytes[..], b"fake image bytes");
    }

    #[tokio::test]
    async fn image_field_is_found_after_other_fields() {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"caption\"\r\n\r\n\
             lunch\r\n\
             --{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"image\"; filename=\"food.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             payload\r\n\
             --{BOUNDARY}--\r\n"
        );

        let mut multipart = multipart_from(body).await;
        let bytes = read_image_field(&mut multipart).await.unwrap();
        assert_eq!(&bytes[..], b"payload");
    }

    #[tokio::test]
    async fn missing_image_field_is_a_bad_request() {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"avatar\"\r\n\r\n\
             nope\r\n\
             --{BOUNDARY}--\r\n"
        );

        let mut multipart = multipart_from(body).await;
        let err = read_image_field(&mut multipart).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(err.to_string(), "No image uploaded");
    }
}
