use crate::helpers::{assert_response_redirect_to, body_text, session_cookie, spawn_app, BASE_URL};

#[tokio::test]
async fn you_must_be_logged_in_to_access_the_operator_home() {
    let test_app = spawn_app().await;

    let response = test_app.get("/operator", None).await;

    assert_response_redirect_to(response, &format!("{}/operator/login", BASE_URL));
}

#[tokio::test]
async fn logged_in_operator_sees_the_home_page() {
    let test_app = spawn_app().await;
    let cookie = test_app.login_and_get_cookie(false).await;

    let response = test_app.get("/operator", Some(&cookie)).await;

    assert_eq!(response.status().as_u16(), 200);
    let html = body_text(response).await;
    assert!(html.contains(r#"<p class="operator">carol</p>"#));
}

#[tokio::test]
async fn login_returns_to_the_page_that_asked_for_it() {
    let test_app = spawn_app().await;

    let response = test_app.get("/operator?tab=queue", None).await;
    let cookie = session_cookie(&response).expect("No session cookie for the back path.");
    assert_response_redirect_to(response, &format!("{}/operator/login", BASE_URL));

    let body = serde_json::json!({
        "login": test_app.operator.login,
        "password": test_app.operator.password,
    });
    let response = test_app
        .post_login_with(body, "", Some(&cookie), None)
        .await;

    assert_response_redirect_to(response, &format!("{}/operator?tab=queue", BASE_URL));
}

#[tokio::test]
async fn logout_clears_session_state() {
    let test_app = spawn_app().await;
    let cookie = test_app.login_and_get_cookie(true).await;

    let response = test_app.get("/operator/logout", Some(&cookie)).await;
    assert_response_redirect_to(response, &format!("{}/operator/login", BASE_URL));

    let response = test_app.get("/operator", Some(&cookie)).await;
    assert_response_redirect_to(response, &format!("{}/operator/login", BASE_URL));
}
