use crate::helpers::spawn_app;

#[tokio::test]
async fn health_probe_reports_ready() {
    // GIVEN
    let app = spawn_app().await;

    // WHEN
    let result = app.get("/api/health").await;

    // THEN
    assert!(result.status().is_success());
    let body: serde_json::Value = result.json().await.unwrap();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Backend running");
}

#[tokio::test]
async fn root_serves_a_plain_text_banner() {
    // GIVEN
    let app = spawn_app().await;

    // WHEN
    let result = app.get("/").await;

    // THEN
    assert!(result.status().is_success());
    let body = result.text().await.unwrap();
    assert_eq!(
        body,
        format!("{} Backend Running ✔", app.settings.application.brand_name)
    );
}
