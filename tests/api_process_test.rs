//! Integration tests for the JPEG processing endpoints.
//!
//! Covers:
//! - POST /process (half-size preview)
//! - POST /process-original (full size, attachment)
//! - Error responses for missing images, bad parameters and bad uploads

mod common;

use axum::http::StatusCode;
use common::fixtures::{solid_png, split_png, MultipartBody};
use common::{assert_jpeg, assert_json_error, TestApp};
use image::GenericImageView;

// ============================================================================
// /process
// ============================================================================

#[tokio::test]
async fn test_process_returns_half_size_jpeg() {
    let app = TestApp::new();

    let body = MultipartBody::new().image(&solid_png(8, 6, [200, 40, 40]));
    let response = app.post_multipart("/process", body).await;

    assert_jpeg(&response);
    assert_eq!(response.image().dimensions(), (4, 3));
}

#[tokio::test]
async fn test_process_odd_dimensions_floor() {
    let app = TestApp::new();

    let body = MultipartBody::new().image(&solid_png(9, 7, [10, 120, 200]));
    let response = app.post_multipart("/process", body).await;

    assert_jpeg(&response);
    assert_eq!(response.image().dimensions(), (4, 3));
}

#[tokio::test]
async fn test_process_with_adjustments() {
    let app = TestApp::new();

    let body = MultipartBody::new()
        .image(&solid_png(16, 16, [120, 90, 60]))
        .field("brightness", "1.2")
        .field("contrast", "1.1")
        .field("hue", "30")
        .field("blur", "1");
    let response = app.post_multipart("/process", body).await;

    assert_jpeg(&response);
    assert_eq!(response.image().dimensions(), (8, 8));
}

#[tokio::test]
async fn test_process_grayscale_output_is_neutral() {
    let app = TestApp::new();

    let body = MultipartBody::new()
        .image(&solid_png(16, 16, [200, 40, 40]))
        .field("grayscale", "on");
    let response = app.post_multipart("/process", body).await;

    assert_jpeg(&response);
    let rgb = response.image().to_rgb8();
    let [r, g, b] = rgb.get_pixel(4, 4).0;
    assert!(r.abs_diff(g) <= 3 && g.abs_diff(b) <= 3, "not gray: {r},{g},{b}");
}

#[tokio::test]
async fn test_process_threshold_returns_mask() {
    let app = TestApp::new();

    let body = MultipartBody::new()
        .image(&split_png(32, 8))
        .field("otsu_threshold", "on");
    let response = app.post_multipart("/process", body).await;

    assert_jpeg(&response);
    let mask = response.image().to_luma8();
    assert_eq!(mask.dimensions(), (16, 4));
    assert!(mask.get_pixel(1, 2).0[0] < 40);
    assert!(mask.get_pixel(14, 2).0[0] > 215);
}

#[tokio::test]
async fn test_process_ignores_unknown_fields() {
    let app = TestApp::new();

    let body = MultipartBody::new()
        .image(&solid_png(4, 4, [50, 60, 70]))
        .field("sepia", "on");
    let response = app.post_multipart("/process", body).await;

    assert_jpeg(&response);
}

// ============================================================================
// /process-original
// ============================================================================

#[tokio::test]
async fn test_process_original_keeps_size() {
    let app = TestApp::new();

    let body = MultipartBody::new()
        .image(&solid_png(9, 7, [10, 120, 200]))
        .field("saturation", "1.5");
    let response = app.post_multipart("/process-original", body).await;

    assert_jpeg(&response);
    assert_eq!(response.image().dimensions(), (9, 7));
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"processed-original.jpg\"")
    );
}

#[tokio::test]
async fn test_process_original_accepts_single_pixel() {
    let app = TestApp::new();

    let body = MultipartBody::new().image(&solid_png(1, 1, [255, 0, 0]));
    let response = app.post_multipart("/process-original", body).await;

    assert_jpeg(&response);
    assert_eq!(response.image().dimensions(), (1, 1));
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_missing_image_rejected() {
    let app = TestApp::new();

    let body = MultipartBody::new().field("brightness", "1.2");
    let response = app.post_multipart("/process", body).await;

    assert_json_error(&response, StatusCode::BAD_REQUEST, "No image file provided.");
}

#[tokio::test]
async fn test_empty_image_rejected() {
    let app = TestApp::new();

    let body = MultipartBody::new().image(&[]);
    let response = app.post_multipart("/process-original", body).await;

    assert_json_error(&response, StatusCode::BAD_REQUEST, "No image file provided.");
}

#[tokio::test]
async fn test_undecodable_image_rejected() {
    let app = TestApp::new();

    let body = MultipartBody::new().image(b"definitely not an image");
    let response = app.post_multipart("/process", body).await;

    assert_json_error(&response, StatusCode::BAD_REQUEST, "Could not decode image");
}

#[tokio::test]
async fn test_invalid_parameter_rejected() {
    let app = TestApp::new();

    let body = MultipartBody::new()
        .image(&solid_png(4, 4, [1, 2, 3]))
        .field("contrast", "lots");
    let response = app.post_multipart("/process", body).await;

    assert_json_error(&response, StatusCode::BAD_REQUEST, "contrast");
}

#[tokio::test]
async fn test_non_positive_brightness_rejected() {
    let app = TestApp::new();

    let body = MultipartBody::new()
        .image(&solid_png(4, 4, [1, 2, 3]))
        .field("brightness", "0");
    let response = app.post_multipart("/process-original", body).await;

    assert_json_error(&response, StatusCode::BAD_REQUEST, "brightness");
}

#[tokio::test]
async fn test_oversized_blur_rejected() {
    let app = TestApp::new();

    let body = MultipartBody::new()
        .image(&solid_png(8, 8, [1, 2, 3]))
        .field("blur", "2000000000");
    let response = app.post_multipart("/process", body).await;

    assert_json_error(&response, StatusCode::BAD_REQUEST, "blur");
}

#[tokio::test]
async fn test_extreme_hue_accepted() {
    let app = TestApp::new();

    let body = MultipartBody::new()
        .image(&solid_png(8, 8, [0, 255, 0]))
        .field("hue", "-2147483648");
    let response = app.post_multipart("/process", body).await;

    assert_jpeg(&response);
}

#[tokio::test]
async fn test_hue_mask_after_threshold_rejected() {
    let app = TestApp::new();

    let body = MultipartBody::new()
        .image(&solid_png(4, 4, [200, 10, 10]))
        .field("otsu_threshold", "on")
        .field("apply_hsv", "on");
    let response = app.post_multipart("/process", body).await;

    assert_json_error(&response, StatusCode::BAD_REQUEST, "hue mask");
}

#[tokio::test]
async fn test_single_pixel_preview_rejected() {
    let app = TestApp::new();

    let body = MultipartBody::new().image(&solid_png(1, 1, [255, 0, 0]));
    let response = app.post_multipart("/process", body).await;

    assert_json_error(&response, StatusCode::BAD_REQUEST, "unsupported input");
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let app = TestApp::with_config(imgg::models::ServerConfig {
        max_upload_bytes: 1024,
        ..TestApp::test_config()
    });

    let body = MultipartBody::new().image(&vec![0u8; 8 * 1024]);
    let response = app.post_multipart("/process", body).await;

    assert!(
        response.status == StatusCode::BAD_REQUEST
            || response.status == StatusCode::PAYLOAD_TOO_LARGE,
        "got {}",
        response.status
    );
}

#[tokio::test]
async fn test_unknown_route_not_found() {
    let app = TestApp::new();

    let response = app.get("/nonexistent").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.get("/health").await;
    common::assert_ok(&response);
    assert_eq!(response.text(), "OK");
}
