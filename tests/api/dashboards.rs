use reqwest::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use crate::helpers::TestApp;

#[actix_web::test]
async fn fresh_tenant_owner_dashboard_starts_empty(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let owner = app.create_employee(&admin, "owner", restaurant_id).await;

    let response = app.get(&format!("/dashboard/owner/{}/", restaurant_id), &owner.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["today_revenue"].as_f64().unwrap(), 0.0);
    assert_eq!(body["active_orders"].as_i64().unwrap(), 0);
    assert_eq!(body["revenue_trend"].as_array().unwrap().len(), 7);
}

#[actix_web::test]
async fn completed_orders_count_towards_today_revenue(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let owner = app.create_employee(&admin, "owner", restaurant_id).await;
    let pasta = app.create_menu_item(&owner.token, restaurant_id, "Pasta", 12.5).await;

    let order = app.post_ok("/api/orders/", &owner.token, &serde_json::json!({
        "restaurant_id": restaurant_id,
        "order_type": "takeaway",
        "items": [{ "menu_item_id": pasta, "quantity": 2 }]
    }))
    .await;
    app.post_ok(
        &format!("/api/orders/{}/update-status/", order["order_id"].as_str().unwrap()),
        &owner.token,
        &serde_json::json!({ "status": "completed" })
    )
    .await;

    let body: Value = app.get(&format!("/dashboard/owner/{}/", restaurant_id), &owner.token)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["today_revenue"].as_f64().unwrap(), 25.0);
    assert_eq!(body["today_orders"].as_i64().unwrap(), 1);
    assert_eq!(body["top_items"][0]["name"], "Pasta");
}

#[actix_web::test]
async fn admin_dashboard_counts_tenants(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    app.create_restaurant(&admin).await;
    app.create_restaurant(&admin).await;

    let response = app.get("/dashboard/admin/", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["totals"]["restaurants"].as_i64().unwrap(), 2);
    assert_eq!(body["changes"]["restaurants"], "0%");
}

#[actix_web::test]
async fn admin_dashboard_is_admin_only(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let owner = app.create_employee(&admin, "owner", restaurant_id).await;

    let response = app.get("/dashboard/admin/", &owner.token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn snapshot_upserts_todays_row(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    app.create_restaurant(&admin).await;

    let first = app.post_ok("/dashboard/admin/snapshot/", &admin, &serde_json::json!({})).await;
    app.create_restaurant(&admin).await;
    let second = app.post_ok("/dashboard/admin/snapshot/", &admin, &serde_json::json!({})).await;

    assert_eq!(first["stat_date"], second["stat_date"]);
    assert_eq!(first["total_restaurants"].as_i64().unwrap(), 1);
    assert_eq!(second["total_restaurants"].as_i64().unwrap(), 2);
}

#[actix_web::test]
async fn system_health_is_recorded(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;

    let body: Value = app.get("/dashboard/admin/system-health/", &admin).await.json().await.unwrap();
    assert_eq!(body["readings"]["database_up"], true);

    let score = body["health"]["current"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&score));

    let dashboard: Value = app.get("/dashboard/admin/", &admin).await.json().await.unwrap();
    assert_eq!(dashboard["system_health"]["current"].as_f64().unwrap(), score);
}

#[actix_web::test]
async fn analytics_window_is_clamped(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let owner = app.create_employee(&admin, "owner", restaurant_id).await;

    let body: Value = app.get(
        &format!("/dashboard/owner/{}/analytics/?days=1000", restaurant_id),
        &owner.token
    )
    .await
    .json()
    .await
    .unwrap();

    assert_eq!(body["period"]["days"].as_i64().unwrap(), 365);
    assert_eq!(body["monthly"].as_array().unwrap().len(), 12);
}

#[actix_web::test]
async fn staff_schedule_groups_by_shift(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let waiter = app.create_employee(&admin, "waiter", restaurant_id).await;

    app.post_ok("/api/staff/", &admin, &serde_json::json!({
        "employee_id": waiter.employee_id,
        "salary": 1800.0,
        "shift": "night",
        "hire_date": "2025-01-15"
    }))
    .await;

    let body: Value = app.get(&format!("/dashboard/staff/{}/schedule/", restaurant_id), &waiter.token)
        .await
        .json()
        .await
        .unwrap();
    let night = body["shifts"].as_array().unwrap()
        .iter()
        .find(|group| group["shift"] == "night")
        .unwrap();
    assert_eq!(night["count"].as_i64().unwrap(), 1);
}

#[actix_web::test]
async fn caller_notifications_can_be_marked_read(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let manager = app.create_employee(&admin, "manager", restaurant_id).await;

    let created = app.post(
        &format!("/dashboard/notifications/{}/", restaurant_id),
        &manager.token,
        &serde_json::json!({ "title": "Delivery", "message": "Produce arrives at 9", "type": "info" })
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let body: Value = app.get("/dashboard/notifications/me/?mark_read=true", &manager.token)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["notifications"].as_array().unwrap().len(), 1);

    let after: Value = app.get("/api/notifications/?read=true", &manager.token)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(after["count"].as_i64().unwrap(), 1);
}

// One open takeaway order with a single pending line
async fn restaurant_with_open_order(app: &TestApp, admin: &str) -> Uuid{
    let restaurant_id = app.create_restaurant(admin).await;
    let dal = app.create_menu_item(admin, restaurant_id, "Dal", 4.0).await;

    app.post_ok("/api/orders/", admin, &serde_json::json!({
        "restaurant_id": restaurant_id,
        "order_type": "takeaway",
        "items": [{ "menu_item_id": dal, "quantity": 1 }]
    }))
    .await;

    restaurant_id
}

#[actix_web::test]
async fn manager_dashboard_shows_open_work(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = restaurant_with_open_order(&app, &admin).await;
    let manager = app.create_employee(&admin, "manager", restaurant_id).await;

    let response = app.get(&format!("/dashboard/manager/{}/", restaurant_id), &manager.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["restaurant"]["restaurant_id"], restaurant_id.to_string());
    assert_eq!(body["active_orders"].as_i64().unwrap(), 1);
    assert_eq!(body["kitchen"]["pending"].as_i64().unwrap(), 1);
}

#[actix_web::test]
async fn manager_dashboard_is_closed_to_waiters(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let waiter = app.create_employee(&admin, "waiter", restaurant_id).await;

    let response = app.get(&format!("/dashboard/manager/{}/", restaurant_id), &waiter.token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn kitchen_dashboard_queues_pending_lines(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = restaurant_with_open_order(&app, &admin).await;
    let cook = app.create_employee(&admin, "kitchen", restaurant_id).await;

    let response = app.get(&format!("/dashboard/kitchen/{}/", restaurant_id), &cook.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["queue_summary"]["pending"].as_i64().unwrap(), 1);
    assert_eq!(body["pending_queue"][0]["menu_item_name"], "Dal");
    assert_eq!(body["pending_queue"][0]["table_number"], Value::Null);
}

#[actix_web::test]
async fn kitchen_dashboard_of_another_restaurant_is_forbidden(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let own = app.create_restaurant(&admin).await;
    let other = app.create_restaurant(&admin).await;
    let cook = app.create_employee(&admin, "kitchen", own).await;

    let response = app.get(&format!("/dashboard/kitchen/{}/", other), &cook.token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn staff_dashboard_lists_assigned_tables_and_orders(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let waiter = app.create_employee(&admin, "waiter", restaurant_id).await;
    let chai = app.create_menu_item(&admin, restaurant_id, "Chai", 1.5).await;

    let table = app.post_ok("/api/tables/", &admin, &serde_json::json!({
        "restaurant_id": restaurant_id,
        "number": "T7",
        "capacity": 4,
        "waiter_assigned": waiter.employee_id
    }))
    .await;
    app.post_ok("/api/orders/", &waiter.token, &serde_json::json!({
        "restaurant_id": restaurant_id,
        "table_id": table["table_id"],
        "waiter_assigned": waiter.employee_id,
        "items": [{ "menu_item_id": chai, "quantity": 2 }]
    }))
    .await;

    let response = app.get(&format!("/dashboard/staff/{}/", restaurant_id), &waiter.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["profile"]["employee_id"], waiter.employee_id.to_string());
    assert_eq!(body["assigned_tables"][0]["number"], "T7");
    assert_eq!(body["today"]["orders_handled"].as_i64().unwrap(), 1);
}

#[actix_web::test]
async fn staff_dashboard_is_closed_to_the_kitchen(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let cook = app.create_employee(&admin, "kitchen", restaurant_id).await;

    let response = app.get(&format!("/dashboard/staff/{}/", restaurant_id), &cook.token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn realtime_status_counts_live_orders(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = restaurant_with_open_order(&app, &admin).await;
    let waiter = app.create_employee(&admin, "waiter", restaurant_id).await;

    let response = app.get(&format!("/dashboard/realtime/{}/", restaurant_id), &waiter.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["active_orders"].as_i64().unwrap(), 1);
    assert_eq!(body["kitchen_queue"]["pending"].as_i64().unwrap(), 1);
    assert_eq!(body["alerts"]["low_stock"].as_i64().unwrap(), 0);
}

#[actix_web::test]
async fn realtime_status_of_another_restaurant_is_forbidden(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let own = app.create_restaurant(&admin).await;
    let other = app.create_restaurant(&admin).await;
    let waiter = app.create_employee(&admin, "waiter", own).await;

    let response = app.get(&format!("/dashboard/realtime/{}/", other), &waiter.token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

async fn create_vendor(app: &TestApp, admin: &str, name: &str, status: &str, rating: f64) -> Value{
    app.post_ok("/api/vendors/", admin, &serde_json::json!({
        "name": name,
        "vendor_type": "cafe",
        "email": "desk@vendor.test",
        "phone": "9876543210",
        "status": status,
        "rating": rating,
        "commission": 12.0
    }))
    .await
}

#[actix_web::test]
async fn restaurant_vendor_overview_lists_active_vendors(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let owner = app.create_employee(&admin, "owner", restaurant_id).await;
    create_vendor(&app, &admin, "Bean House", "active", 4.6).await;
    create_vendor(&app, &admin, "Slow Brew", "pending-approval", 4.9).await;

    let response = app.get(&format!("/dashboard/restaurant/{}/vendors/", restaurant_id), &owner.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total_active"].as_i64().unwrap(), 1);
    assert_eq!(body["by_type"]["cafe"].as_i64().unwrap(), 1);
    assert_eq!(body["top_rated"][0]["name"], "Bean House");
}

#[actix_web::test]
async fn restaurant_vendor_overview_of_another_restaurant_is_forbidden(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let own = app.create_restaurant(&admin).await;
    let other = app.create_restaurant(&admin).await;
    let owner = app.create_employee(&admin, "owner", own).await;

    let response = app.get(&format!("/dashboard/restaurant/{}/vendors/", other), &owner.token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn vendor_dashboard_reports_commission(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let restaurant_id = app.create_restaurant(&admin).await;
    let waiter = app.create_employee(&admin, "waiter", restaurant_id).await;
    let vendor = create_vendor(&app, &admin, "Bean House", "active", 4.6).await;

    let response = app.get(
        &format!("/dashboard/vendor/{}/", vendor["vendor_id"].as_str().unwrap()),
        &waiter.token
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["overview"]["commission_rate"].as_f64().unwrap(), 12.0);
    assert_eq!(body["overview"]["total_orders"].as_i64().unwrap(), 0);
    assert_eq!(body["vendor"]["name"], "Bean House");
}

#[actix_web::test]
async fn vendor_dashboard_needs_a_token_and_a_known_vendor(){
    let app = TestApp::spawn_app().await;
    let admin = app.admin_token().await;
    let path = format!("/dashboard/vendor/{}/", Uuid::new_v4());

    let anonymous = app.api_client.get(format!("{}{}", app.get_app_url(), path))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(app.get(&path, &admin).await.status(), StatusCode::NOT_FOUND);
}
