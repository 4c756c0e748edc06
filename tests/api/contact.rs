use crate::helpers::{inquiry, reply_msg, spawn_app};
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

#[tokio::test]
async fn contact_returns_200_and_sends_both_emails() {
    // GIVEN
    let app = spawn_app().await;
    let body = inquiry();

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    // WHEN
    let result = app.post_contact(&body).await;

    // THEN
    assert_eq!(200, result.status());
    assert_eq!(reply_msg(result).await, "Sent!");

    let sent = app.sent_emails().await;
    assert_eq!(sent[0]["To"], app.settings.email.admin_email.as_str());
    assert_eq!(
        sent[0]["Subject"],
        format!("📩 New Inquiry from {}", body["name"].as_str().unwrap()).as_str()
    );
    assert_eq!(sent[1]["To"], body["email"]);
}

#[tokio::test]
async fn contact_returns_400_when_a_required_field_is_missing() {
    // GIVEN
    let app = spawn_app().await;
    let test_cases = [
        (serde_json::json!({ "email": "arsene@lup.in", "whatsapp": "123" }), "no name"),
        (serde_json::json!({ "name": "Lupin", "whatsapp": "123" }), "no email"),
        (serde_json::json!({ "name": "Lupin", "email": "arsene@lup.in" }), "no whatsapp"),
        (
            serde_json::json!({ "name": "  ", "email": "arsene@lup.in", "whatsapp": "123" }),
            "blank name",
        ),
        (
            serde_json::json!({ "name": "Lupin", "email": "", "whatsapp": "123" }),
            "empty email",
        ),
        (
            serde_json::json!({ "name": "Lupin", "email": "arsene@lup.in", "whatsapp": null }),
            "null whatsapp",
        ),
        (serde_json::json!({}), "no fields at all"),
    ];

    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    for (invalid_body, why_invalid_body_message) in test_cases {
        // WHEN
        let result = app.post_contact(&invalid_body).await;

        // THEN
        assert_eq!(
            400,
            result.status(),
            "The API did not fail properly with Bad Request (400) when the body had {why_invalid_body_message}"
        );
        assert_eq!(reply_msg(result).await, "All fields are required!");
    }
}

#[tokio::test]
async fn contact_accepts_an_email_without_checking_its_format() {
    // GIVEN
    let app = spawn_app().await;
    let mut body = inquiry();
    body["email"] = "not-an-email".into();

    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    // WHEN
    let result = app.post_contact(&body).await;

    // THEN
    assert_eq!(200, result.status());
}

#[tokio::test]
async fn admin_notice_uses_a_placeholder_when_no_message_was_added() {
    // GIVEN
    let app = spawn_app().await;
    let mut body = inquiry();
    body.as_object_mut().unwrap().remove("message");

    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    // WHEN
    app.post_contact(&body).await;

    // THEN
    let sent = app.sent_emails().await;
    let admin_notice = &sent[0];
    assert!(admin_notice["HtmlBody"]
        .as_str()
        .unwrap()
        .contains("No message added"));
    assert!(admin_notice["TextBody"]
        .as_str()
        .unwrap()
        .contains("No message added"));
}

#[tokio::test]
async fn contact_returns_500_when_the_admin_notice_fails() {
    // GIVEN
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // WHEN
    let result = app.post_contact(&inquiry()).await;

    // THEN
    assert_eq!(500, result.status());
    assert_eq!(reply_msg(result).await, "Server error! Mail not sent.");
}

#[tokio::test]
async fn contact_returns_500_when_only_the_acknowledgment_fails() {
    // GIVEN
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // WHEN
    let result = app.post_contact(&inquiry()).await;

    // THEN
    assert_eq!(500, result.status());
    assert_eq!(reply_msg(result).await, "Server error! Mail not sent.");
}

#[tokio::test]
async fn contact_returns_400_on_malformed_json() {
    // GIVEN
    let app = spawn_app().await;
    let test_cases = [
        ("{\"name\": ", "application/json", "truncated json"),
        ("name=Lupin", "application/x-www-form-urlencoded", "a form body"),
        ("{\"name\": 42}", "application/json", "a non-string name"),
    ];

    for (body, content_type, why) in test_cases {
        // WHEN
        let result = app.post_contact_raw(body.into(), content_type).await;

        // THEN
        assert_eq!(
            400,
            result.status(),
            "The API did not fail with Bad Request (400) for {why}"
        );
        assert_eq!(reply_msg(result).await, "Invalid request body");
    }
}

#[tokio::test]
async fn contact_only_allows_post() {
    // GIVEN
    let app = spawn_app().await;

    // WHEN
    let result = app.get("/api/contact").await;

    // THEN
    assert_eq!(405, result.status());
    assert_eq!(reply_msg(result).await, "Only POST allowed");
}
