use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use rstest::*;
use serde::Deserialize;
use serde_json::json;

use crate::api::controllers::auth::REFRESH_COOKIE;
use crate::tests::utils::seed::{SENDER, seed_user};
use crate::tests::{Error, TestContext, access_token, context};

use crate::app;
use actix_web::test;
use actix_web::test::TestRequest;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct User {
    #[allow(dead_code)]
    id: String,
    full_name: String,
    user_email: String,
    email_accounts: Vec<SendingAccount>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SendingAccount {
    email: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    user_exist: User,
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
    user: User,
}

#[rstest]
#[awt]
#[actix_web::test]
async fn test_success_register(#[future] context: TestContext) {
    let app = test::init_service(app::create(context.container)).await;

    let res = TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "fullName": "New User",
            "userEmail": "New_User@Mailer.com",
            "password": "stR0ngP4ssw0rd!",
        }))
        .send_request(&app)
        .await;

    assert_eq!(res.status(), StatusCode::CREATED);

    let body: UserResponse = test::read_body_json(res).await;

    assert_eq!(body.user.full_name, "New User");
    assert_eq!(body.user.user_email, "new_user@mailer.com");
    assert!(body.user.email_accounts.is_empty());

    let _ = context.db.container.stop().await;
}

#[rstest]
#[awt]
#[actix_web::test]
async fn test_register_twice(#[future] context: TestContext) {
    let app = test::init_service(app::create(context.container)).await;

    let user = seed_user(&context.db.connection).await;

    let res = TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "fullName": user.full_name,
            "userEmail": user.email,
            "password": user.password,
        }))
        .send_request(&app)
        .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);

    let err: Error = test::read_body_json(res).await;

    assert_eq!(err.code, 409);
    assert_eq!(err.message, "User Already exists");

    let _ = context.db.container.stop().await;
}

#[rstest]
#[awt]
#[actix_web::test]
async fn test_success_login(#[future] context: TestContext) {
    let app = test::init_service(app::create(context.container)).await;

    let user = seed_user(&context.db.connection).await;

    let res = TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "userEmail": user.email,
            "password": user.password,
        }))
        .send_request(&app)
        .await;

    assert_eq!(res.status(), StatusCode::OK);

    let headers = res.headers().clone();
    let header = headers.get("set-cookie").unwrap();
    let cookie = Cookie::parse_encoded(header.to_str().unwrap().to_owned()).unwrap();

    let body: LoginResponse = test::read_body_json(res).await;

    assert_eq!(cookie.name(), REFRESH_COOKIE);
    assert_eq!(cookie.http_only(), Some(true));
    assert_ne!(cookie.value(), body.access_token);
    assert_eq!(body.user_exist.user_email, user.email);
    assert_eq!(body.user_exist.email_accounts[0].email, SENDER);

    let _ = context.db.container.stop().await;
}

#[rstest]
#[case::unknown_email("unknown_user@mailer.com", "stR0ngP4ssw0rd!")]
#[case::wrong_password("test_user@mailer.com", "p4ssw0rD!x")]
#[awt]
#[actix_web::test]
async fn test_invalid_login(
    #[future] context: TestContext,
    #[case] email: String,
    #[case] password: String,
) {
    let app = test::init_service(app::create(context.container)).await;

    seed_user(&context.db.connection).await;

    let res = TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "userEmail": email,
            "password": password,
        }))
        .send_request(&app)
        .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let err: Error = test::read_body_json(res).await;

    assert_eq!(err.code, 401);

    let _ = context.db.container.stop().await;
}

#[rstest]
#[awt]
#[actix_web::test]
async fn test_refresh_with_login_cookie(#[future] context: TestContext) {
    let app = test::init_service(app::create(context.container)).await;

    let user = seed_user(&context.db.connection).await;

    let res = TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "userEmail": user.email,
            "password": user.password,
        }))
        .send_request(&app)
        .await;

    let headers = res.headers().clone();
    let header = headers.get("set-cookie").unwrap();
    let cookie = Cookie::parse_encoded(header.to_str().unwrap().to_owned()).unwrap();

    let res = TestRequest::post()
        .uri("/api/auth/refresh")
        .cookie(cookie)
        .send_request(&app)
        .await;

    assert_eq!(res.status(), StatusCode::OK);

    let body: RefreshResponse = test::read_body_json(res).await;

    assert_eq!(body.user.full_name, user.full_name);

    let res = TestRequest::get()
        .uri("/api/auth/profile")
        .insert_header(("Authorization", format!("Bearer {}", body.access_token)))
        .send_request(&app)
        .await;

    assert_eq!(res.status(), StatusCode::OK);

    let _ = context.db.container.stop().await;
}

#[rstest]
#[awt]
#[actix_web::test]
async fn test_link_sending_accounts(#[future] context: TestContext) {
    let app = test::init_service(app::create(context.container)).await;

    let user = seed_user(&context.db.connection).await;
    let token = access_token(&app, &user.email, &user.password).await;

    let res = TestRequest::post()
        .uri("/api/auth/update")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "emailAccounts": [
                { "email": "First@gmail.com", "appPassword": "aaaa bbbb cccc dddd" },
                { "email": "second@gmail.com", "appPassword": "eeee ffff gggg hhhh" }
            ]
        }))
        .send_request(&app)
        .await;

    assert_eq!(res.status(), StatusCode::OK);

    let res = TestRequest::get()
        .uri("/api/auth/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .send_request(&app)
        .await;

    let body: UserResponse = test::read_body_json(res).await;
    let accounts: Vec<&str> = body
        .user
        .email_accounts
        .iter()
        .map(|account| account.email.as_str())
        .collect();

    assert_eq!(accounts, vec!["first@gmail.com", "second@gmail.com"]);

    let _ = context.db.container.stop().await;
}

#[rstest]
#[awt]
#[actix_web::test]
async fn test_profile_requires_token(#[future] context: TestContext) {
    let app = test::init_service(app::create(context.container)).await;

    let res = TestRequest::get()
        .uri("/api/auth/profile")
        .send_request(&app)
        .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let _ = context.db.container.stop().await;
}
