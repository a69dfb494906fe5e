use config::{Config, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub jwt: JWTSettings,
    pub health: HealthSettings
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16,
    pub bootstrap_admin: Option<BootstrapAdminSettings>
}

// Account created at startup when no admin exists yet
#[derive(Deserialize, Debug, Clone)]
pub struct BootstrapAdminSettings{
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: SecretString
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings{
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub name: String,
    pub max_pool_size: u32
}

impl DatabaseSettings {
    // Url of the postgres server, without a database name
    pub fn get_database_url(&self) -> String{
        format!(
            "postgres://{}:{}@{}:{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port
        )
    }

    pub fn get_database_table_url(&self) -> String{
        format!("{}/{}", self.get_database_url(), self.name)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct JWTSettings{
    pub secret: String,
    pub expiry_hours: u64,
    pub refresh_expiry_hours: u64
}

#[derive(Deserialize, Debug, Clone)]
pub struct HealthSettings{
    pub history_capacity: usize
}

impl Settings{
    pub fn get() -> Self{
        Self::try_get().expect("Failed to read configuration")
    }

    pub fn try_get() -> Result<Self, config::ConfigError>{
        Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}
