use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use anyhow::Context;

use crate::{
    configuration::{EmailSettings, Settings, TransportKind},
    dispatcher::{load_templates, MailDispatcher},
    email_client::EmailClient,
    mail_transport::{MailTransport, Sender},
    run,
    smtp_mailer::SmtpMailer,
};

/// Display name used for the sender mailbox and the root banner.
pub struct BrandName(pub String);

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let brand_name = config.application.brand_name.clone();
        let sender = Sender {
            name: brand_name.clone(),
            address: config.email.sender().map_err(anyhow::Error::msg)?,
        };
        let admin = config.email.admin().map_err(anyhow::Error::msg)?;

        let transport = build_transport(&config.email, sender)?;
        let templates = load_templates(&config.application.templates_dir)
            .context("Failed to load the email templates")?;
        let dispatcher = MailDispatcher::new(transport, templates, admin, brand_name.clone());

        let address = (config.application.host.as_str(), config.application.port);
        let listener = TcpListener::bind(address)
            .with_context(|| format!("Failed to bind {}:{}", address.0, address.1))?;
        let port = listener.local_addr()?.port();
        tracing::info!(
            host = %config.application.host,
            port,
            transport = ?config.email.transport,
            "{} backend listening", brand_name
        );

        let server = run(listener, dispatcher, BrandName(brand_name))?;

        Ok(Self { port, server })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn build_transport(
    settings: &EmailSettings,
    sender: Sender,
) -> Result<Arc<dyn MailTransport>, anyhow::Error> {
    let transport: Arc<dyn MailTransport> = match settings.transport {
        TransportKind::Api => Arc::new(EmailClient::new(
            settings.api.base_url.clone(),
            sender,
            settings.api.token.clone(),
            settings.timeout(),
        )),
        TransportKind::Smtp => Arc::new(SmtpMailer::new(
            &settings.smtp.host,
            settings.smtp.port,
            &settings.smtp.username,
            &settings.smtp.password,
            &sender,
            settings.timeout(),
        )?),
    };
    Ok(transport)
}
