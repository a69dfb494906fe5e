use diesel::{Connection, PgConnection, RunQueryDsl};
use fake::{faker::{internet::en::SafeEmail, name::en::Name}, Fake};
use once_cell::sync::Lazy;
use reqwest::{Response, StatusCode};
use restaurant::{
    configuration::{DatabaseSettings, Settings},
    startup::{build_pool, Application},
    telemetry::{get_subscriber, init_subscriber},
    utils::DbPool
};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "restaurant-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const EMPLOYEE_PASSWORD: &str = "kitchen-pass-123";

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub api_client: reqwest::Client,
    pub admin_email: String,
    pub admin_password: String
}

// An employee created through the API, already logged in
pub struct TestEmployee{
    pub employee_id: Uuid,
    pub email: String,
    pub token: String
}

impl TestApp {
    fn create_db(settings: &DatabaseSettings) -> DbPool{
        let mut connection = PgConnection::establish(&settings.get_database_url())
                                .expect("Failed to connect to postgres database");

        let query = format!(r#"CREATE DATABASE "{}";"#, settings.name);
        diesel::sql_query(query)
            .execute(&mut connection)
            .expect("Failed to create test database");

        build_pool(settings).expect("Failed to build connection pool to test database")
    }

    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    pub async fn spawn_app() -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let mut settings = Settings::get();
        settings.application.port = 0;
        settings.database.name = Uuid::new_v4().to_string();

        let admin = settings.application.bootstrap_admin.clone()
                        .expect("Test configuration needs a bootstrap admin");
        let pool = TestApp::create_db(&settings.database);

        let application = Application::new(settings)
                            .await
                            .expect("Failed to build application");

        let host = application.host.clone();
        let port = application.port;
        tokio::task::spawn(application.server);

        TestApp{
            host,
            port,
            pool,
            api_client: reqwest::Client::new(),
            admin_email: admin.email,
            admin_password: admin.password.expose_secret().to_string()
        }
    }

    pub async fn login(&self, portal: &str, email: &str, password: &str) -> Response{
        self.api_client.post(format!("{}/auth/{}/login", self.get_app_url(), portal))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to send login request")
    }

    pub async fn token_for(&self, portal: &str, email: &str, password: &str) -> String{
        let response = self.login(portal, email, password).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String{
        self.token_for("admin", &self.admin_email, &self.admin_password).await
    }

    pub async fn get(&self, path: &str, token: &str) -> Response{
        self.api_client.get(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn post<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Response{
        self.api_client.post(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn put<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Response{
        self.api_client.put(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn delete(&self, path: &str, token: &str) -> Response{
        self.api_client.delete(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to send request")
    }

    // POST that must succeed, returning the parsed body
    pub async fn post_ok<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Value{
        let response = self.post(path, token, body).await;
        let status = response.status();
        let body: Value = response.json().await.unwrap();
        assert!(status.is_success(), "POST {} failed with {}: {}", path, status, body);
        body
    }

    pub async fn create_restaurant(&self, admin_token: &str) -> Uuid{
        let name: String = Name().fake();
        let body = self.post_ok("/api/restaurants/", admin_token, &serde_json::json!({
            "name": format!("{} Bistro", name),
            "email": SafeEmail().fake::<String>(),
            "phone": "9876543210",
            "address": "12 Market Street"
        }))
        .await;

        serde_json::from_value(body["restaurant_id"].clone()).unwrap()
    }

    pub async fn create_employee(
        &self,
        creator_token: &str,
        role: &str,
        restaurant_id: Uuid
    ) -> TestEmployee{
        let email: String = SafeEmail().fake();
        let body = self.post_ok("/api/employees/", creator_token, &serde_json::json!({
            "name": Name().fake::<String>(),
            "email": email,
            "phone": "9876543210",
            "role": role,
            "password": EMPLOYEE_PASSWORD,
            "restaurants": [restaurant_id]
        }))
        .await;

        let portal = match role {
            "admin" => "admin",
            "owner" => "owner",
            _ => "staff"
        };
        let token = self.token_for(portal, &email, EMPLOYEE_PASSWORD).await;

        TestEmployee{
            employee_id: serde_json::from_value(body["employee_id"].clone()).unwrap(),
            email: email.to_lowercase(),
            token
        }
    }

    pub async fn create_menu_item(&self, token: &str, restaurant_id: Uuid, name: &str, price: f64) -> Uuid{
        let body = self.post_ok("/api/menu/items/", token, &serde_json::json!({
            "restaurant_id": restaurant_id,
            "name": name,
            "price": price
        }))
        .await;

        serde_json::from_value(body["menu_item_id"].clone()).unwrap()
    }
}
