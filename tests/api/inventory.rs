use reqwest::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use crate::helpers::TestApp;

async fn create_item(app: &TestApp, token: &str, restaurant_id: Uuid, current: f64, min: f64) -> Value{
    app.post_ok("/api/inventory/items/", token, &serde_json::json!({
        "restaurant_id": restaurant_id,
        "name": "Flour",
        "current_stock": current,
        "min_stock": min,
        "max_stock": 100.0,
        "unit": "kg",
        "cost_per_unit": 1.2
    }))
    .await
}

#[actix_web::test]
async fn new_item_below_minimum_is_low_stock(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;

    let item = create_item(&app, &admin, restaurant_id, 4.0, 5.0).await;

    assert_eq!(item["status"], "low-stock");
}

#[actix_web::test]
async fn stock_updates_recompute_status(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let manager = app.create_employee(&admin, "manager", restaurant_id).await;
    let item = create_item(&app, &admin, restaurant_id, 10.0, 5.0).await;
    let path = format!("/api/inventory/items/{}/update-stock/", item["item_id"].as_str().unwrap());

    let drained = app.post_ok(&path, &manager.token, &serde_json::json!({
        "action": "subtract",
        "quantity": 25.0
    }))
    .await;
    assert_eq!(drained["current_stock"].as_f64().unwrap(), 0.0);
    assert_eq!(drained["status"], "out-of-stock");

    let restocked = app.post_ok(&path, &manager.token, &serde_json::json!({
        "action": "add",
        "quantity": 20.0
    }))
    .await;
    assert_eq!(restocked["current_stock"].as_f64().unwrap(), 20.0);
    assert_eq!(restocked["status"], "in-stock");
    assert!(restocked["last_restocked"].is_string());
}

#[actix_web::test]
async fn unknown_stock_action_is_a_bad_request(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let item = create_item(&app, &admin, restaurant_id, 10.0, 5.0).await;

    let response = app.post(
        &format!("/api/inventory/items/{}/update-stock/", item["item_id"].as_str().unwrap()),
        &admin,
        &serde_json::json!({ "action": "multiply", "quantity": 2.0 })
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn inventory_alerts_list_low_stock_items(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    create_item(&app, &admin, restaurant_id, 1.0, 5.0).await;
    create_item(&app, &admin, restaurant_id, 50.0, 5.0).await;

    let response = app.get(&format!("/api/analytics/inventory-alerts/{}/", restaurant_id), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["low_stock"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn category_of_another_restaurant_is_rejected(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let own = app.create_restaurant(&admin).await;
    let other = app.create_restaurant(&admin).await;
    let manager = app.create_employee(&admin, "manager", own).await;

    let foreign = app.post_ok("/api/inventory/categories/", &admin, &serde_json::json!({
        "restaurant_id": other,
        "name": "Dairy"
    }))
    .await;

    let response = app.post("/api/inventory/items/", &manager.token, &serde_json::json!({
        "restaurant_id": own,
        "category_id": foreign["category_id"],
        "name": "Butter",
        "current_stock": 5.0,
        "min_stock": 1.0,
        "unit": "kg"
    }))
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Inventory category"));

    let item = create_item(&app, &manager.token, own, 10.0, 2.0).await;
    let response = app.put(
        &format!("/api/inventory/items/{}/", item["item_id"].as_str().unwrap()),
        &manager.token,
        &serde_json::json!({ "category_id": foreign["category_id"] })
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn menu_item_cannot_join_a_foreign_category(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let own = app.create_restaurant(&admin).await;
    let other = app.create_restaurant(&admin).await;
    let manager = app.create_employee(&admin, "manager", own).await;

    let foreign = app.post_ok("/api/menu/categories/", &admin, &serde_json::json!({
        "restaurant_id": other,
        "name": "Desserts"
    }))
    .await;
    let own_category = app.post_ok("/api/menu/categories/", &manager.token, &serde_json::json!({
        "restaurant_id": own,
        "name": "Desserts"
    }))
    .await;

    let rejected = app.post("/api/menu/items/", &manager.token, &serde_json::json!({
        "restaurant_id": own,
        "category_id": foreign["category_id"],
        "name": "Kulfi",
        "price": 3.0
    }))
    .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let accepted = app.post("/api/menu/items/", &manager.token, &serde_json::json!({
        "restaurant_id": own,
        "category_id": own_category["category_id"],
        "name": "Kulfi",
        "price": 3.0
    }))
    .await;
    assert_eq!(accepted.status(), StatusCode::CREATED);
}
