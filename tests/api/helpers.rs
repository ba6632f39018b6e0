//! tests/api/helpers.rs

use missive::configuration::{get_configuration, Settings};
use missive::startup::build;
use missive::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // Set TEST_LOG=true to see logs during tests
    // Use bunyan to format the logs nicely:
    // $ TEST_LOG=true cargo test| bunyan
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub const SITEVERIFY_PATH: &str = "/turnstile/v0/siteverify";
pub const SENDER: &str = "Portfolio <onboarding@resend.dev>";
pub const RECIPIENT: &str = "owner@example.com";

pub struct Test {
    pub address: String,
    pub turnstile_server: MockServer,
    pub email_server: MockServer,
}

impl Test {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::get(&format!("{}{}", self.address, path))
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_contact(&self, form: &[(&str, &str)]) -> reqwest::Response {
        self.post_contact_with_headers(form, &[]).await
    }

    pub async fn post_contact_with_headers(
        &self,
        form: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> reqwest::Response {
        let mut request = reqwest::Client::new().post(&format!("{}/contact", self.address));
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        request
            .form(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Makes the verifier answer every request with `body`.
    pub async fn verifier_responds_with(&self, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(SITEVERIFY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .named("Turnstile siteverify")
            .mount(&self.turnstile_server)
            .await;
    }

    pub async fn verification_requests(&self) -> usize {
        self.turnstile_server
            .received_requests()
            .await
            .expect("Request recording is disabled")
            .len()
    }

    pub async fn email_requests(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .expect("Request recording is disabled")
            .iter()
            .map(|request| serde_json::from_slice(&request.body).expect("Failed to parse email"))
            .collect()
    }

    pub async fn received_email(&self) -> serde_json::Value {
        let mut emails = self.email_requests().await;
        if emails.len() != 1 {
            panic!(
                "Expected 1 email to be sent but instead {} were sent.",
                emails.len()
            );
        }

        emails.remove(0)
    }
}

/// The submission used throughout the tests.
pub fn ada(token: &'static str) -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Ada"),
        ("email", "ada@x.com"),
        ("message", "Hi"),
        ("token", token),
    ]
}

pub async fn setup() -> Test {
    setup_with(|_| {}).await
}

pub async fn setup_with(customise: impl FnOnce(&mut Settings)) -> Test {
    Lazy::force(&TRACING);

    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.port = 0;
    config.application.host = "127.0.0.1".into();
    config.turnstile.forward_client_ip = true;
    config.email.sender = Some(SENDER.into());
    config.email.recipient = Some(RECIPIENT.into());

    // Start the third-party doubles
    let turnstile_server = MockServer::start().await;
    config.set_turnstile_url(format!("{}{}", turnstile_server.uri(), SITEVERIFY_PATH));

    let email_server = MockServer::start().await;
    config.set_email_url(email_server.uri());

    customise(&mut config);

    // Launch the server
    let app = build(config.clone()).expect("Failed to build server.");
    let address = format!("http://127.0.0.1:{}", app.port());
    config.application.port = app.port();

    tracing::info!("Test running with the following Settings:\n{:#?}", config);

    // Launch the server as a background task
    let _ = tokio::spawn(app.run());

    Test {
        address,
        turnstile_server,
        email_server,
    }
}
