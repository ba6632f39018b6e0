//! src/startup.rs
use crate::captcha::TurnstileClient;
use crate::configuration::Settings;
use crate::dispatch::Dispatcher;
use crate::routes::{contact_form_config, health_check, submit};
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use secrecy::ExposeSecret;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run(self) -> std::io::Result<()> {
        self.server.await
    }
}

pub fn build(config: Settings) -> Result<Application, anyhow::Error> {
    let address = format!("{}:{}", config.application.host, config.application.port);
    let tcp_listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    let port = tcp_listener.local_addr()?.port();

    if config.turnstile.secret_key.expose_secret().is_empty() {
        tracing::warn!("TURNSTILE_SECRET_KEY is empty, every captcha check will be rejected");
    }
    if config.email.api_key.expose_secret().is_empty() {
        tracing::warn!("RESEND_API_KEY is empty, contact messages cannot be delivered");
    }

    let turnstile =
        TurnstileClient::new(&config.turnstile).context("Failed to build the captcha client")?;
    let dispatcher =
        Dispatcher::new(&config.email).context("Failed to build the email client")?;

    let server = run(tcp_listener, turnstile, dispatcher)?;

    Ok(Application { port, server })
}

pub fn run(
    listener: TcpListener,
    turnstile: TurnstileClient,
    dispatcher: Dispatcher,
) -> Result<Server, std::io::Error> {
    let turnstile = web::Data::new(turnstile);
    let dispatcher = web::Data::new(dispatcher);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/contact")
                    .app_data(contact_form_config())
                    .route(web::post().to(submit)),
            )
            .app_data(turnstile.clone())
            .app_data(dispatcher.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
