use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use reqwest::StatusCode;
use restaurant::schema::{dining_tables, notifications};
use serde_json::Value;
use uuid::Uuid;

use crate::helpers::TestApp;

#[actix_web::test]
async fn order_total_is_the_sum_of_its_lines(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let waiter = app.create_employee(&admin, "waiter", restaurant_id).await;
    let burger = app.create_menu_item(&admin, restaurant_id, "Burger", 10.0).await;
    let fries = app.create_menu_item(&admin, restaurant_id, "Fries", 5.0).await;

    let response = app.post("/api/orders/", &waiter.token, &serde_json::json!({
        "restaurant_id": restaurant_id,
        "order_type": "takeaway",
        "tax": 0.0,
        "discount": 0.0,
        "items": [
            { "menu_item_id": burger, "quantity": 1 },
            { "menu_item_id": fries, "quantity": 1 }
        ]
    }))
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let order: Value = response.json().await.unwrap();
    assert_eq!(order["subtotal"].as_f64().unwrap(), 15.0);
    assert_eq!(order["total"].as_f64().unwrap(), 15.0);
    assert_eq!(order["items"].as_array().unwrap().len(), 2);

    let recalculated = app.post_ok(
        &format!("/api/orders/{}/recalculate/", order["order_id"].as_str().unwrap()),
        &waiter.token,
        &serde_json::json!({})
    )
    .await;
    assert_eq!(recalculated["total"].as_f64().unwrap(), 15.0);
}

#[actix_web::test]
async fn menu_item_of_another_restaurant_is_rejected(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let other = app.create_restaurant(&admin).await;
    let foreign_item = app.create_menu_item(&admin, other, "Tea", 2.0).await;

    let response = app.post("/api/orders/", &admin, &serde_json::json!({
        "restaurant_id": restaurant_id,
        "items": [{ "menu_item_id": foreign_item }]
    }))
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn marking_an_item_ready_notifies_the_restaurant_once(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let cook = app.create_employee(&admin, "kitchen", restaurant_id).await;
    let soup = app.create_menu_item(&admin, restaurant_id, "Soup", 6.0).await;

    let table = app.post_ok("/api/tables/", &admin, &serde_json::json!({
        "restaurant_id": restaurant_id,
        "number": "T4",
        "capacity": 4
    }))
    .await;
    let order = app.post_ok("/api/orders/", &admin, &serde_json::json!({
        "restaurant_id": restaurant_id,
        "table_id": table["table_id"],
        "items": [{ "menu_item_id": soup, "quantity": 2 }]
    }))
    .await;
    let order_item_id = order["items"][0]["order_item_id"].as_str().unwrap().to_string();
    let path = format!("/dashboard/kitchen/items/{}/update-status/", order_item_id);

    let first: Value = app.post(&path, &cook.token, &serde_json::json!({ "status": "ready" }))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(first["notification"]["title"], "Order Ready - Table T4");

    let second = app.post(&path, &cook.token, &serde_json::json!({ "status": "ready" })).await;
    assert_eq!(second.status(), StatusCode::OK);

    let mut conn = app.pool.get().unwrap();
    let count: i64 = notifications::table
        .filter(notifications::restaurant_id.eq(restaurant_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count, 1);
}

#[actix_web::test]
async fn completing_an_order_sends_its_table_to_cleaning(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let waiter = app.create_employee(&admin, "waiter", restaurant_id).await;
    let rice = app.create_menu_item(&admin, restaurant_id, "Rice", 3.0).await;

    let table = app.post_ok("/api/tables/", &admin, &serde_json::json!({
        "restaurant_id": restaurant_id,
        "number": "T1",
        "capacity": 2,
        "status": "occupied"
    }))
    .await;
    let table_id: Uuid = serde_json::from_value(table["table_id"].clone()).unwrap();
    let order = app.post_ok("/api/orders/", &waiter.token, &serde_json::json!({
        "restaurant_id": restaurant_id,
        "table_id": table_id,
        "items": [{ "menu_item_id": rice }]
    }))
    .await;

    let completed = app.post_ok(
        &format!("/api/orders/{}/update-status/", order["order_id"].as_str().unwrap()),
        &waiter.token,
        &serde_json::json!({ "status": "completed", "payment_method": "card" })
    )
    .await;
    assert_eq!(completed["status"], "completed");
    assert_eq!(completed["payment_method"], "card");

    let mut conn = app.pool.get().unwrap();
    let status: String = dining_tables::table
        .find(table_id)
        .select(dining_tables::status)
        .first(&mut conn)
        .unwrap();
    assert_eq!(status, "cleaning");
}

#[actix_web::test]
async fn unknown_order_status_is_a_bad_request(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;

    let response = app.post(
        &format!("/api/orders/{}/update-status/", Uuid::new_v4()),
        &admin,
        &serde_json::json!({ "status": "teleported" })
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn order_cannot_seat_guests_at_another_restaurants_table(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let own = app.create_restaurant(&admin).await;
    let other = app.create_restaurant(&admin).await;
    let waiter = app.create_employee(&admin, "waiter", own).await;
    let naan = app.create_menu_item(&admin, own, "Naan", 2.0).await;

    let foreign_table = app.post_ok("/api/tables/", &admin, &serde_json::json!({
        "restaurant_id": other,
        "number": "T1",
        "capacity": 2,
        "status": "occupied"
    }))
    .await;
    let foreign_table_id: Uuid = serde_json::from_value(foreign_table["table_id"].clone()).unwrap();

    let response = app.post("/api/orders/", &waiter.token, &serde_json::json!({
        "restaurant_id": own,
        "table_id": foreign_table_id,
        "items": [{ "menu_item_id": naan }]
    }))
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        format!("Table {} does not belong to this restaurant", foreign_table_id)
    );

    // Moving an existing order onto the foreign table is refused too
    let order = app.post_ok("/api/orders/", &waiter.token, &serde_json::json!({
        "restaurant_id": own,
        "order_type": "takeaway",
        "items": [{ "menu_item_id": naan }]
    }))
    .await;
    let order_path = format!("/api/orders/{}/", order["order_id"].as_str().unwrap());
    let moved = app.put(&order_path, &waiter.token, &serde_json::json!({ "table_id": foreign_table_id })).await;
    assert_eq!(moved.status(), StatusCode::BAD_REQUEST);

    app.post_ok(
        &format!("/api/orders/{}/update-status/", order["order_id"].as_str().unwrap()),
        &waiter.token,
        &serde_json::json!({ "status": "completed" })
    )
    .await;

    let mut conn = app.pool.get().unwrap();
    let status: String = dining_tables::table
        .find(foreign_table_id)
        .select(dining_tables::status)
        .first(&mut conn)
        .unwrap();
    assert_eq!(status, "occupied");
}

#[actix_web::test]
async fn order_customer_and_waiter_must_belong_to_the_restaurant(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let own = app.create_restaurant(&admin).await;
    let other = app.create_restaurant(&admin).await;
    let outsider = app.create_employee(&admin, "waiter", other).await;
    let lassi = app.create_menu_item(&admin, own, "Lassi", 2.5).await;

    let foreign_customer = app.post_ok("/api/customers/", &admin, &serde_json::json!({
        "restaurant_id": other,
        "name": "Meera Iyer"
    }))
    .await;

    let with_customer = app.post("/api/orders/", &admin, &serde_json::json!({
        "restaurant_id": own,
        "customer_id": foreign_customer["customer_id"],
        "items": [{ "menu_item_id": lassi }]
    }))
    .await;
    assert_eq!(with_customer.status(), StatusCode::BAD_REQUEST);

    let with_waiter = app.post("/api/orders/", &admin, &serde_json::json!({
        "restaurant_id": own,
        "waiter_assigned": outsider.employee_id,
        "items": [{ "menu_item_id": lassi }]
    }))
    .await;
    assert_eq!(with_waiter.status(), StatusCode::BAD_REQUEST);
}
