//! tests/api/health_check.rs

use crate::helpers::setup;

#[tokio::test]
async fn health_check_works() {
    let test = setup().await;

    let response = test.get("/health_check").await;

    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn contact_only_accepts_posts() {
    let test = setup().await;

    let response = test.get("/contact").await;

    assert!(response.status().is_client_error());
}
