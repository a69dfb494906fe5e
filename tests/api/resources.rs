use reqwest::StatusCode;
use serde_json::Value;

use crate::helpers::TestApp;

// Creates through `collection`, expects the record in the listing, then deletes it
async fn create_list_delete(app: &TestApp, token: &str, collection: &str, key: &str, body: Value) -> Value{
    let created = app.post(collection, token, &body).await;
    assert_eq!(created.status(), StatusCode::CREATED, "POST {}", collection);
    let record: Value = created.json().await.unwrap();
    let id = record[key].as_str().unwrap().to_string();

    let listing: Value = app.get(collection, token).await.json().await.unwrap();
    assert!(
        listing["results"].as_array().unwrap().iter().any(|row| row[key] == id.as_str()),
        "{} missing from {}", id, collection
    );

    let item = format!("{}{}/", collection, id);
    assert_eq!(app.get(&item, token).await.status(), StatusCode::OK);
    assert_eq!(app.delete(&item, token).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.get(&item, token).await.status(), StatusCode::NOT_FOUND);

    record
}

#[actix_web::test]
async fn menu_category_lifecycle(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let manager = app.create_employee(&admin, "manager", restaurant_id).await;

    let category = create_list_delete(&app, &manager.token, "/api/menu/categories/", "category_id", serde_json::json!({
        "restaurant_id": restaurant_id,
        "name": "Starters",
        "sort_order": 1
    }))
    .await;

    assert_eq!(category["is_active"], true);
}

#[actix_web::test]
async fn menu_item_lifecycle(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let manager = app.create_employee(&admin, "manager", restaurant_id).await;

    let item = create_list_delete(&app, &manager.token, "/api/menu/items/", "menu_item_id", serde_json::json!({
        "restaurant_id": restaurant_id,
        "name": "Paneer Tikka",
        "price": 8.5,
        "is_vegan": false
    }))
    .await;

    assert_eq!(item["price"].as_f64().unwrap(), 8.5);
    assert_eq!(item["available"], true);
}

#[actix_web::test]
async fn table_lifecycle(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let manager = app.create_employee(&admin, "manager", restaurant_id).await;

    let table = create_list_delete(&app, &manager.token, "/api/tables/", "table_id", serde_json::json!({
        "restaurant_id": restaurant_id,
        "number": "T9",
        "capacity": 6,
        "section": "patio"
    }))
    .await;

    assert_eq!(table["status"], "available");
}

#[actix_web::test]
async fn chairs_are_listed_under_their_table(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let waiter = app.create_employee(&admin, "waiter", restaurant_id).await;

    let table = app.post_ok("/api/tables/", &admin, &serde_json::json!({
        "restaurant_id": restaurant_id,
        "number": "T2",
        "capacity": 2
    }))
    .await;
    let chairs_path = format!("/api/tables/{}/chairs/", table["table_id"].as_str().unwrap());

    let response = app.post(&chairs_path, &waiter.token, &serde_json::json!({ "number": "C1" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    app.post_ok(&chairs_path, &waiter.token, &serde_json::json!({ "number": "C2" })).await;

    let chairs: Value = app.get(&chairs_path, &waiter.token).await.json().await.unwrap();
    assert_eq!(chairs.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn customer_lifecycle(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let waiter = app.create_employee(&admin, "waiter", restaurant_id).await;

    let customer = create_list_delete(&app, &waiter.token, "/api/customers/", "customer_id", serde_json::json!({
        "restaurant_id": restaurant_id,
        "name": "Asha Rao",
        "phone": "9876543210",
        "membership_tier": "gold"
    }))
    .await;

    assert_eq!(customer["membership_tier"], "gold");
    assert_eq!(customer["total_orders"].as_i64().unwrap(), 0);
}

#[actix_web::test]
async fn vendor_lifecycle_is_run_by_admins(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;

    let vendor = create_list_delete(&app, &admin, "/api/vendors/", "vendor_id", serde_json::json!({
        "name": "Fresh Farms",
        "vendor_type": "cafe",
        "email": "orders@freshfarms.test",
        "phone": "9876543210",
        "rating": 4.5,
        "commission": 10.0
    }))
    .await;

    assert_eq!(vendor["status"], "pending-approval");
}

#[actix_web::test]
async fn only_admins_create_vendors(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let owner = app.create_employee(&admin, "owner", restaurant_id).await;

    let response = app.post("/api/vendors/", &owner.token, &serde_json::json!({
        "name": "Spice Route",
        "vendor_type": "restaurant",
        "email": "hello@spiceroute.test",
        "phone": "9876543210"
    }))
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.get("/api/vendors/", &owner.token).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn expense_lifecycle(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let owner = app.create_employee(&admin, "owner", restaurant_id).await;

    let expense = create_list_delete(&app, &owner.token, "/api/expenses/", "expense_id", serde_json::json!({
        "restaurant_id": restaurant_id,
        "description": "Gas cylinder refill",
        "amount": 42.0,
        "category": "utilities",
        "date": "2025-07-01"
    }))
    .await;

    assert_eq!(expense["approved"], false);
    assert_eq!(expense["added_by"], owner.employee_id.to_string());
}

#[actix_web::test]
async fn waste_lifecycle(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let cook = app.create_employee(&admin, "kitchen", restaurant_id).await;

    let waste = create_list_delete(&app, &cook.token, "/api/waste/", "waste_id", serde_json::json!({
        "restaurant_id": restaurant_id,
        "item_name": "Milk",
        "quantity": 2.0,
        "unit": "l",
        "reason": "expired",
        "estimated_cost": 3.0
    }))
    .await;

    assert_eq!(waste["reason"], "expired");
}

#[actix_web::test]
async fn records_of_another_restaurant_cannot_be_deleted(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let own = app.create_restaurant(&admin).await;
    let other = app.create_restaurant(&admin).await;
    let manager = app.create_employee(&admin, "manager", own).await;

    let customer = app.post_ok("/api/customers/", &admin, &serde_json::json!({
        "restaurant_id": other,
        "name": "Vikram Shah"
    }))
    .await;
    let path = format!("/api/customers/{}/", customer["customer_id"].as_str().unwrap());

    assert_eq!(app.delete(&path, &manager.token).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.get(&path, &admin).await.status(), StatusCode::OK);
}
