use std::net::TcpListener;

use actix_web::{dev::Server, error::{JsonPayloadError, PathError, QueryPayloadError}, web, App, HttpRequest, HttpServer};
use anyhow::Context;
use chrono::Utc;
use diesel::{r2d2::ConnectionManager, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use r2d2::Pool;
use secrecy::ExposeSecret;
use tracing_actix_web::TracingLogger;
use uuid::Uuid;

use crate::{
    auth::jwt::Tokenizer,
    configuration::{BootstrapAdminSettings, DatabaseSettings, Settings},
    db_interaction::employees::{admin_exists, insert_employee},
    domain::{employee_email::EmployeeEmail, phone_number::PhoneNumberDomain, role::Role, status::EmployeeStatus},
    error::ApiError,
    health::HealthHistory,
    models::Employee,
    password::hash_password,
    routes::{
        authentication, customers, dashboards, employees, finance, health_check, inventory, menu,
        notifications, orders, restaurants, staff, tables, vendors
    },
    telemetry::spawn_blocking_with_tracing,
    utils::{get_pooled_connection, DbPool}
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    pub async fn new(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = build_pool(&settings.database)?;
        run_migrations(&pool).await?;

        if let Some(admin) = &settings.application.bootstrap_admin {
            bootstrap_admin(&pool, admin).await?;
        }

        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))?;
        let port = listener.local_addr()?.port();

        let tokenizer = Tokenizer::new(&settings.jwt);
        let history = HealthHistory::new(settings.health.history_capacity);
        let server = run(listener, pool, tokenizer, history)?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }
}

pub fn build_pool(settings: &DatabaseSettings) -> Result<DbPool, anyhow::Error>{
    let manager = ConnectionManager::<PgConnection>::new(settings.get_database_table_url());

    Pool::builder()
        .max_size(settings.max_pool_size)
        .build(manager)
        .context("Failed to build connection pool")
}

#[tracing::instrument(
    "Running pending migrations",
    skip(pool)
)]
async fn run_migrations(pool: &DbPool) -> Result<(), anyhow::Error>{
    let mut conn = get_pooled_connection(pool).await?;

    spawn_blocking_with_tracing(move || {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|applied| tracing::info!(count = applied.len(), "Migrations applied"))
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))
    })
    .await?
}

// First start of an empty database: create the configured admin account
#[tracing::instrument(
    "Bootstrapping admin account",
    skip(pool, settings),
    fields(email = %settings.email)
)]
async fn bootstrap_admin(pool: &DbPool, settings: &BootstrapAdminSettings) -> Result<(), anyhow::Error>{
    if admin_exists(pool).await? {
        return Ok(());
    }

    let email = EmployeeEmail::parse(settings.email.clone()).map_err(anyhow::Error::msg)?;
    let phone = PhoneNumberDomain::parse(settings.phone.clone()).map_err(anyhow::Error::msg)?;
    let password_hash = hash_password(settings.password.clone()).await?;

    let now = Utc::now();
    let admin = Employee{
        employee_id: Uuid::new_v4(),
        name: settings.name.clone(),
        email: email.inner(),
        phone: phone.inner(),
        role: Role::Admin.to_string(),
        password: password_hash.expose_secret().to_string(),
        status: EmployeeStatus::Active.to_string(),
        created_at: now,
        updated_at: now
    };

    insert_employee(pool, admin, Vec::new()).await?;
    tracing::info!("Admin account created");

    Ok(())
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error{
    ApiError::Validation(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error{
    ApiError::Validation(err.to_string()).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error{
    ApiError::Validation(err.to_string()).into()
}

pub fn run(
    listener: TcpListener,
    pool: DbPool,
    tokenizer: Tokenizer,
    history: HealthHistory
) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);
    let tokenizer = web::Data::new(tokenizer);
    let history = web::Data::new(history);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(pool.clone())
            .app_data(tokenizer.clone())
            .app_data(history.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/auth")
                    .route("/admin/login", web::post().to(authentication::admin_login))
                    .route("/owner/login", web::post().to(authentication::owner_login))
                    .route("/staff/login", web::post().to(authentication::staff_login))
                    .route("/refresh", web::post().to(authentication::refresh))
                    .route("/verify", web::get().to(authentication::verify))
                    .route("/logout", web::post().to(authentication::logout))
            )
            .service(
                web::scope("/api")
                    .route("/restaurants/", web::get().to(restaurants::list_restaurants))
                    .route("/restaurants/", web::post().to(restaurants::post_restaurant))
                    .route("/restaurants/{id}/", web::get().to(restaurants::get_restaurant))
                    .route("/restaurants/{id}/", web::put().to(restaurants::update_restaurant))
                    .route("/restaurants/{id}/", web::delete().to(restaurants::delete_restaurant))
                    .route("/employees/", web::get().to(employees::list_employees))
                    .route("/employees/", web::post().to(employees::post_employee))
                    .route("/employees/{id}/", web::get().to(employees::get_employee))
                    .route("/employees/{id}/", web::put().to(employees::update_employee))
                    .route("/employees/{id}/", web::delete().to(employees::delete_employee))
                    .route("/staff/", web::get().to(staff::list_staff))
                    .route("/staff/", web::post().to(staff::post_staff))
                    .route("/staff/{id}/", web::get().to(staff::get_staff))
                    .route("/staff/{id}/", web::put().to(staff::update_staff))
                    .route("/staff/{id}/", web::delete().to(staff::delete_staff))
                    .route("/menu/categories/", web::get().to(menu::list_menu_categories))
                    .route("/menu/categories/", web::post().to(menu::post_menu_category))
                    .route("/menu/categories/{id}/", web::get().to(menu::get_menu_category))
                    .route("/menu/categories/{id}/", web::put().to(menu::update_menu_category))
                    .route("/menu/categories/{id}/", web::delete().to(menu::delete_menu_category))
                    .route("/menu/items/", web::get().to(menu::list_menu_items))
                    .route("/menu/items/", web::post().to(menu::post_menu_item))
                    .route("/menu/items/{id}/", web::get().to(menu::get_menu_item))
                    .route("/menu/items/{id}/", web::put().to(menu::update_menu_item))
                    .route("/menu/items/{id}/", web::delete().to(menu::delete_menu_item))
                    .route("/inventory/categories/", web::get().to(inventory::list_inventory_categories))
                    .route("/inventory/categories/", web::post().to(inventory::post_inventory_category))
                    .route("/inventory/items/", web::get().to(inventory::list_inventory_items))
                    .route("/inventory/items/", web::post().to(inventory::post_inventory_item))
                    .route("/inventory/items/{id}/", web::get().to(inventory::get_inventory_item))
                    .route("/inventory/items/{id}/", web::put().to(inventory::update_inventory_item))
                    .route("/inventory/items/{id}/", web::delete().to(inventory::delete_inventory_item))
                    .route("/inventory/items/{id}/update-stock/", web::post().to(inventory::update_stock))
                    .route("/tables/", web::get().to(tables::list_tables))
                    .route("/tables/", web::post().to(tables::post_table))
                    .route("/tables/{id}/", web::get().to(tables::get_table))
                    .route("/tables/{id}/", web::put().to(tables::update_table))
                    .route("/tables/{id}/", web::delete().to(tables::delete_table))
                    .route("/tables/{id}/update-status/", web::post().to(tables::update_table_status))
                    .route("/tables/{id}/chairs/", web::get().to(tables::list_chairs))
                    .route("/tables/{id}/chairs/", web::post().to(tables::post_chair))
                    .route("/customers/", web::get().to(customers::list_customers))
                    .route("/customers/", web::post().to(customers::post_customer))
                    .route("/customers/{id}/", web::get().to(customers::get_customer))
                    .route("/customers/{id}/", web::put().to(customers::update_customer))
                    .route("/customers/{id}/", web::delete().to(customers::delete_customer))
                    .route("/orders/", web::get().to(orders::list_orders))
                    .route("/orders/", web::post().to(orders::post_order))
                    .route("/orders/{id}/", web::get().to(orders::get_order_details))
                    .route("/orders/{id}/", web::put().to(orders::update_order))
                    .route("/orders/{id}/", web::delete().to(orders::delete_order))
                    .route("/orders/{id}/update-status/", web::post().to(orders::update_order_status))
                    .route("/orders/{id}/items/", web::post().to(orders::add_order_items))
                    .route("/orders/{id}/recalculate/", web::post().to(orders::recalculate_order))
                    .route("/vendors/", web::get().to(vendors::list_vendors))
                    .route("/vendors/", web::post().to(vendors::post_vendor))
                    .route("/vendors/{id}/", web::get().to(vendors::get_vendor))
                    .route("/vendors/{id}/", web::put().to(vendors::update_vendor))
                    .route("/vendors/{id}/", web::delete().to(vendors::delete_vendor))
                    .route("/notifications/", web::get().to(notifications::list_notifications))
                    .route("/notifications/{id}/mark-read/", web::post().to(notifications::mark_notification_read))
                    .route("/expenses/", web::get().to(finance::list_expenses))
                    .route("/expenses/", web::post().to(finance::post_expense))
                    .route("/expenses/{id}/", web::get().to(finance::get_expense))
                    .route("/expenses/{id}/", web::put().to(finance::update_expense))
                    .route("/expenses/{id}/", web::delete().to(finance::delete_expense))
                    .route("/waste/", web::get().to(finance::list_waste))
                    .route("/waste/", web::post().to(finance::post_waste))
                    .route("/waste/{id}/", web::get().to(finance::get_waste))
                    .route("/waste/{id}/", web::put().to(finance::update_waste))
                    .route("/waste/{id}/", web::delete().to(finance::delete_waste))
                    .route("/analytics/inventory-alerts/{id}/", web::get().to(dashboards::inventory_alerts))
            )
            .service(
                web::scope("/dashboard")
                    .route("/admin/", web::get().to(dashboards::admin_dashboard))
                    .route("/admin/snapshot/", web::post().to(dashboards::record_snapshot))
                    .route("/admin/system-health/", web::get().to(dashboards::system_health))
                    .route("/owner/{id}/", web::get().to(dashboards::owner_dashboard))
                    .route("/owner/{id}/analytics/", web::get().to(dashboards::owner_analytics))
                    .route("/manager/{id}/", web::get().to(dashboards::manager_dashboard))
                    .route("/kitchen/{id}/", web::get().to(dashboards::kitchen_dashboard))
                    .route("/kitchen/items/{id}/update-status/", web::post().to(dashboards::update_kitchen_item))
                    .route("/staff/{id}/", web::get().to(dashboards::staff_dashboard))
                    .route("/staff/{id}/schedule/", web::get().to(dashboards::staff_schedule))
                    .route("/realtime/{id}/", web::get().to(dashboards::realtime_status))
                    .route("/vendor/{id}/", web::get().to(dashboards::vendor_dashboard))
                    .route("/restaurant/{id}/vendors/", web::get().to(dashboards::restaurant_vendors))
                    .route("/notifications/me/", web::get().to(notifications::my_notifications))
                    .route("/notifications/{id}/", web::post().to(notifications::post_notification))
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
