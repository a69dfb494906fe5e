use reqwest::StatusCode;
use serde_json::Value;

use crate::helpers::{TestApp, EMPLOYEE_PASSWORD};

#[actix_web::test]
async fn admin_login_returns_tokens_and_user(){
    let app = TestApp::spawn_app().await;

    let response = app.login("admin", &app.admin_email, &app.admin_password).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("restaurant_id").is_none());
}

#[actix_web::test]
async fn login_without_password_is_a_bad_request(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(format!("{}/auth/admin/login", app.get_app_url()))
        .json(&serde_json::json!({ "email": app.admin_email }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Email and password are required");
}

#[actix_web::test]
async fn wrong_password_is_unauthorized(){
    let app = TestApp::spawn_app().await;

    let response = app.login("admin", &app.admin_email, "not-the-password").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn owner_cannot_use_the_staff_portal(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let owner = app.create_employee(&admin, "owner", restaurant_id).await;

    let response = app.login("staff", &owner.email, EMPLOYEE_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn owner_login_names_its_restaurant(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let owner = app.create_employee(&admin, "owner", restaurant_id).await;

    let body: Value = app.login("owner", &owner.email, EMPLOYEE_PASSWORD).await.json().await.unwrap();

    assert_eq!(body["user"]["restaurant_id"], restaurant_id.to_string());
    assert_eq!(body["user"]["restaurants"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn refresh_token_is_exchanged_for_a_new_pair(){
    let app = TestApp::spawn_app().await;
    let body: Value = app.login("admin", &app.admin_email, &app.admin_password).await.json().await.unwrap();
    let refresh_token = body["refresh_token"].as_str().unwrap();

    let response = app.api_client.post(format!("{}/auth/refresh", app.get_app_url()))
        .json(&serde_json::json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let pair: Value = response.json().await.unwrap();
    assert!(pair["access_token"].is_string());
}

#[actix_web::test]
async fn refresh_token_does_not_authenticate_api_calls(){
    let app = TestApp::spawn_app().await;
    let body: Value = app.login("admin", &app.admin_email, &app.admin_password).await.json().await.unwrap();
    let refresh_token = body["refresh_token"].as_str().unwrap();

    let response = app.get("/auth/verify", refresh_token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn verify_returns_the_caller(){
    let app = TestApp::spawn_app().await;
    let token = app.admin_token().await;

    let response = app.get("/auth/verify", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["valid"], true);
    assert_eq!(body["user"]["email"], app.admin_email.to_lowercase());
}

#[actix_web::test]
async fn missing_token_is_unauthorized(){
    let app = TestApp::spawn_app().await;

    let response = reqwest::get(format!("{}/api/restaurants/", app.get_app_url()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
