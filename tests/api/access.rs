use reqwest::StatusCode;
use serde_json::Value;

use crate::helpers::TestApp;

#[actix_web::test]
async fn owner_cannot_read_another_restaurant(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let own = app.create_restaurant(&admin).await;
    let other = app.create_restaurant(&admin).await;
    let owner = app.create_employee(&admin, "owner", own).await;

    let response = app.get(&format!("/dashboard/owner/{}/", other), &owner.token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Access denied to this restaurant");
}

#[actix_web::test]
async fn waiter_cannot_open_the_kitchen_dashboard(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let waiter = app.create_employee(&admin, "waiter", restaurant_id).await;
    let cook = app.create_employee(&admin, "kitchen", restaurant_id).await;
    let path = format!("/dashboard/kitchen/{}/", restaurant_id);

    assert_eq!(app.get(&path, &waiter.token).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.get(&path, &cook.token).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn listings_are_scoped_to_own_restaurants(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let own = app.create_restaurant(&admin).await;
    let other = app.create_restaurant(&admin).await;
    let manager = app.create_employee(&admin, "manager", own).await;

    app.create_menu_item(&admin, own, "Soup", 4.5).await;
    app.create_menu_item(&admin, other, "Curry", 9.0).await;

    let body: Value = app.get("/api/menu/items/", &manager.token).await.json().await.unwrap();
    let names: Vec<&str> = body["results"].as_array().unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Soup"]);

    let response = app.get(&format!("/api/menu/items/?restaurant_id={}", other), &manager.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn manager_cannot_grant_the_owner_role(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let manager = app.create_employee(&admin, "manager", restaurant_id).await;

    let response = app.post("/api/employees/", &manager.token, &serde_json::json!({
        "name": "New Owner",
        "email": "new.owner@example.com",
        "phone": "9876543210",
        "role": "owner",
        "password": "owner-pass-123",
        "restaurants": [restaurant_id]
    }))
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn only_admins_create_restaurants(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let owner = app.create_employee(&admin, "owner", restaurant_id).await;

    let response = app.post("/api/restaurants/", &owner.token, &serde_json::json!({
        "name": "Second Place",
        "email": "second@example.com",
        "phone": "9876543210"
    }))
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
