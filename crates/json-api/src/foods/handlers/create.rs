//! Create Food Handler

use std::{str::FromStr, sync::Arc};

use rust_decimal::Decimal;
use salvo::prelude::*;

use reelbite_app::{
    domain::foods::{data::NewFood, records::FoodUuid},
    media::MediaUpload,
};

use crate::{
    errors::ApiError,
    extensions::*,
    foods::{errors::into_api_error, models::FoodMessageResponse},
    state::State,
};

/// Multipart field carrying the video file.
const VIDEO_FIELD: &str = "video";

fn parse_price(price: Option<&str>) -> Result<Option<Decimal>, ApiError> {
    match price.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Decimal::from_str(value)
            .map(Some)
            .map_err(|_ignored| ApiError::bad_request("Invalid price")),
    }
}

/// Create Food Handler
///
/// Accepts `multipart/form-data` with a `video` file and `name`,
/// `description` and `price` fields. The video is uploaded to the media host
/// before the food is stored.
#[endpoint(
    tags("food"),
    summary = "Create Food",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Food created"),
        (status_code = StatusCode::BAD_REQUEST, description = "No file uploaded or invalid fields"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a food partner"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "food.create",
    skip(req, depot, res),
    fields(
        partner_uuid = tracing::field::Empty,
        food_uuid = tracing::field::Empty,
        video_bytes = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<FoodMessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let partner = depot.partner_or_403()?;

    let Some(video_path) = req.file(VIDEO_FIELD).await.map(|file| file.path().clone()) else {
        return Err(ApiError::bad_request("No file uploaded"));
    };

    let name = req
        .form::<String>("name")
        .await
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::bad_request("Name is required"))?;

    let description = req.form::<String>("description").await.unwrap_or_default();
    let price = parse_price(req.form::<String>("price").await.as_deref())?;

    let bytes = tokio::fs::read(&video_path)
        .await
        .or_500("failed to read uploaded video")?;

    let uuid = FoodUuid::new();

    let span = tracing::Span::current();

    span.record("partner_uuid", tracing::field::display(partner.uuid));
    span.record("food_uuid", tracing::field::display(uuid));
    span.record("video_bytes", bytes.len());

    let food = state
        .app
        .foods
        .create_food(
            partner.uuid,
            NewFood {
                uuid,
                name,
                description,
                price,
            },
            MediaUpload {
                file_name: uuid.to_string(),
                bytes,
            },
        )
        .await
        .map_err(into_api_error)?;

    tracing::info!(food_uuid = %food.uuid, "created food");

    res.status_code(StatusCode::CREATED);

    Ok(Json(FoodMessageResponse::new(
        "Food created successfully",
        food,
    )))
}

#[cfg(test)]
mod tests {
    use reelbite_app::{
        domain::foods::{FoodsServiceError, MockFoodsService},
        media::MediaStorageError,
    };
    use salvo::{
        http::header::CONTENT_TYPE,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::test_helpers::{
        TEST_PARTNER, foods_services, make_food, partner_service, user_service,
    };

    use super::*;

    const BOUNDARY: &str = "reelbite-test-boundary";

    fn route() -> Router {
        Router::with_path("food").post(handler)
    }

    fn multipart_body(fields: &[(&str, &str)], video: Option<&[u8]>) -> Vec<u8> {
        let mut body = Vec::new();

        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }

        if let Some(video) = video {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"video\"; filename=\"clip.mp4\"\r\nContent-Type: video/mp4\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(video);
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        body
    }

    fn upload(body: Vec<u8>) -> salvo::test::RequestBuilder {
        TestClient::post("http://example.com/food")
            .add_header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
                true,
            )
            .body(body)
    }

    #[test]
    fn prices_must_be_decimal() {
        assert_eq!(parse_price(Some("249.50")).ok(), Some(Some(Decimal::new(24_950, 2))));
        assert_eq!(parse_price(None).ok(), Some(None));
        assert!(parse_price(Some("twelve")).is_err());
    }

    #[tokio::test]
    async fn test_create_food_uploads_video_and_returns_201() -> TestResult {
        let mut foods = MockFoodsService::new();

        foods
            .expect_create_food()
            .once()
            .withf(|partner, food, video| {
                *partner == TEST_PARTNER.uuid
                    && food.name == "Paneer Tikka"
                    && food.description == "Smoky"
                    && food.price == Some(Decimal::new(24_950, 2))
                    && video.bytes == b"fake-mp4-bytes"
                    && video.file_name == food.uuid.to_string()
            })
            .return_once(|partner, food, _| {
                let mut record = make_food(food.uuid, partner);

                record.price = food.price;

                Ok(record)
            });

        let body = multipart_body(
            &[
                ("name", "Paneer Tikka"),
                ("description", "Smoky"),
                ("price", "249.50"),
            ],
            Some(b"fake-mp4-bytes"),
        );

        let mut res = upload(body)
            .send(&partner_service(foods_services(foods), route()))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body["message"], json!("Food created successfully"));
        assert_eq!(body["food"]["price"], json!(249.5));
        assert_eq!(
            body["food"]["foodPartner"],
            json!(TEST_PARTNER.uuid.to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_video_returns_400() -> TestResult {
        let mut foods = MockFoodsService::new();

        foods.expect_create_food().never();

        let mut res = upload(multipart_body(&[("name", "Paneer Tikka")], None))
            .send(&partner_service(foods_services(foods), route()))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body, json!({ "success": false, "message": "No file uploaded" }));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_price_returns_400() -> TestResult {
        let mut foods = MockFoodsService::new();

        foods.expect_create_food().never();

        let body = multipart_body(
            &[("name", "Paneer Tikka"), ("price", "cheap")],
            Some(b"fake-mp4-bytes"),
        );

        let res = upload(body)
            .send(&partner_service(foods_services(foods), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_regular_user_cannot_create_food() -> TestResult {
        let mut foods = MockFoodsService::new();

        foods.expect_create_food().never();

        let body = multipart_body(&[("name", "Paneer Tikka")], Some(b"fake-mp4-bytes"));

        let res = upload(body)
            .send(&user_service(foods_services(foods), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_upload_failure_returns_500() -> TestResult {
        let mut foods = MockFoodsService::new();

        foods.expect_create_food().once().return_once(|_, _, _| {
            Err(FoodsServiceError::Media(MediaStorageError::UnexpectedResponse(
                "503".to_string(),
            )))
        });

        let body = multipart_body(&[("name", "Paneer Tikka")], Some(b"fake-mp4-bytes"));

        let mut res = upload(body)
            .send(&partner_service(foods_services(foods), route()))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body["message"], json!("Internal server error"));

        Ok(())
    }
}
