use ::surrealdb::{Surreal, engine::remote::ws::Client, sql::Thing};
use serde_json::{Value, json};

pub struct SeededUser {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

pub const SENDER: &str = "sender@gmail.com";

/// Creates a user with one linked sending account and returns the plain
/// password alongside the record id.
pub async fn seed_user(conn: &Surreal<Client>) -> SeededUser {
    let full_name = "Test User";
    let email = "test_user@mailer.com";
    let password = "stR0ngP4ssw0rd!";

    let thing: Option<Thing> = conn
        .query(
            r#"
            LET $user = (CREATE user CONTENT {
                full_name: $full_name,
                email: $email,
                password: crypto::argon2::generate($password),
                email_accounts: [{ email: $sender, app_password: 'abcd efgh ijkl mnop' }]
            });
            RETURN $user[0].id;
            "#,
        )
        .bind(("full_name", full_name))
        .bind(("email", email))
        .bind(("password", password))
        .bind(("sender", SENDER))
        .await
        .unwrap()
        .take(1)
        .unwrap();

    SeededUser {
        id: thing.unwrap().id.to_raw(),
        full_name: full_name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub fn addresses(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}@mail.com")).collect()
}

/// Overwrites the user's group document with `groups`, given as
/// `(name, emails)` pairs.
pub async fn seed_groups(conn: &Surreal<Client>, user_id: &str, groups: Vec<(&str, Vec<String>)>) {
    let groups: Vec<Value> = groups
        .into_iter()
        .map(|(name, emails)| json!({ "name": name, "emails": emails }))
        .collect();

    conn.query("UPSERT type::thing('subemails', $id) CONTENT { groups: $groups }")
        .bind(("id", user_id.to_string()))
        .bind(("groups", groups))
        .await
        .unwrap()
        .check()
        .unwrap();
}
