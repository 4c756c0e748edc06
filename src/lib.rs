use crate::dispatcher::MailDispatcher;
use crate::startup::BrandName;
use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

pub mod client;
pub mod configuration;
pub mod dispatcher;
pub mod domain;
pub mod email_client;
pub mod mail_transport;
pub mod routes;
pub mod smtp_mailer;
pub mod startup;
pub mod telemetry;
pub mod utils;

pub fn run(
    listener: std::net::TcpListener,
    dispatcher: MailDispatcher,
    brand_name: BrandName,
) -> Result<Server, std::io::Error> {
    let dispatcher = web::Data::new(dispatcher);
    let brand_name = web::Data::new(brand_name);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/", web::get().to(routes::index))
            .route("/api/health", web::get().to(routes::health))
            .service(
                web::resource("/api/contact")
                    .app_data(routes::json_config())
                    .route(web::post().to(routes::contact))
                    .default_service(web::route().to(routes::method_not_allowed)),
            )
            .app_data(dispatcher.clone())
            .app_data(brand_name.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
