use contact_relay::client::{ContactForm, Severity, SubmitOutcome, READY_MESSAGE};
use fake::{
    faker::{internet::en::SafeEmail, name::en::FirstName, phone_number::en::PhoneNumber},
    Fake,
};
use wiremock::{matchers::path, Mock, ResponseTemplate};

use crate::helpers::spawn_app;

fn filled_form() -> ContactForm {
    ContactForm {
        name: FirstName().fake(),
        email: SafeEmail().fake(),
        whatsapp: PhoneNumber().fake(),
        message: String::new(),
    }
}

#[tokio::test]
async fn page_load_poll_finds_a_running_backend() {
    // GIVEN
    let app = spawn_app().await;
    let page = app.contact_page();

    // WHEN
    let result = page.poller.wait_until_ready().await;

    // THEN
    assert!(result.is_ok());
    let status = page.status.current().unwrap();
    assert_eq!(status.message, READY_MESSAGE);
    assert_eq!(status.severity, Severity::Success);
}

#[tokio::test]
async fn submitted_form_is_relayed_and_cleared() {
    // GIVEN
    let app = spawn_app().await;
    let page = app.contact_page();
    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;
    let mut form = filled_form();

    // WHEN
    let outcome = page.submission.submit(&mut form).await;

    // THEN
    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(form, ContactForm::default());
    assert_eq!(page.status.current().unwrap().severity, Severity::Success);
    assert!(!page.submission.button().disabled);
}

#[tokio::test]
async fn mail_failure_is_shown_with_the_server_message() {
    // GIVEN
    let app = spawn_app().await;
    let page = app.contact_page();
    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.email_server)
        .await;
    let mut form = filled_form();

    // WHEN
    let outcome = page.submission.submit(&mut form).await;

    // THEN
    assert_eq!(outcome, SubmitOutcome::Failed);
    let status = page.status.current().unwrap();
    assert_eq!(status.message, "Server error! Mail not sent.");
    assert_eq!(status.severity, Severity::Error);
    assert_ne!(form, ContactForm::default());
}
