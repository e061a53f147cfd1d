mod auth;

pub mod utils;

use ::surrealdb::{Surreal, engine::remote::ws::Client};

use crate::tests::utils::crypto::generate_keypair;
use std::sync::Arc;

use serde::Deserialize;
use surrealdb_migrations::MigrationRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::{
    surrealdb::{SURREALDB_PORT, SurrealDb},
    testcontainers::runners::AsyncRunner,
};

use crate::{MIGRATIONS_DIR, infrastructure::databases::surrealdb};
use crate::{config::AppConfig, container::Container};

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    test::{self, TestRequest},
};

use serde_json::{Value, json};

use rstest::*;

struct Database {
    pub connection: Surreal<Client>,
    pub container: ContainerAsync<SurrealDb>,
}

pub struct TestContext {
    pub db: Database,
    pub container: Arc<Container>,
}

#[fixture]
async fn context() -> TestContext {
    let db_container = SurrealDb::default()
        .with_tag("latest")
        .start()
        .await
        .unwrap();

    let mut config = AppConfig::load().unwrap();

    config.surrealdb.port = db_container
        .get_host_port_ipv4(SURREALDB_PORT)
        .await
        .unwrap();

    let db_connection = surrealdb::connect(&config.surrealdb).await.unwrap();

    MigrationRunner::new(&db_connection)
        .load_files(&MIGRATIONS_DIR)
        .up()
        .await
        .unwrap();

    let keys = generate_keypair();

    let db = Database {
        connection: db_connection.clone(),
        container: db_container,
    };

    let container = Arc::new(Container::new(db_connection, keys, &config));

    TestContext { db, container }
}

/// Logs in through the API and returns the access token.
async fn access_token<S, B>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "userEmail": email,
            "password": password,
        }))
        .send_request(app)
        .await;

    let body: Value = test::read_body_json(res).await;

    body["accessToken"].as_str().unwrap().to_string()
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct Error {
    code: u16,
    message: String,
}
