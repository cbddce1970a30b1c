use actix_cors::Cors;
use actix_web::{web, App, HttpServer, Result};
use rental_platform_shared::UserRole;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod utils;

use config::AppConfig;
use database::Database;
use error::AppError;
use middleware::AuthMiddleware;
use services::SeoService;
use utils::JwtService;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    info!(
        "Starting rental platform backend on {}:{}",
        config.host, config.port
    );

    let database = Database::new(&config.database_url).await?;
    database.migrate().await?;

    let jwt_service = JwtService::new()?;
    let seo_service = web::Data::new(SeoService::new(
        config.seo_cache_ttl(),
        config.site_name.clone(),
    ));

    let bind_addr = format!("{}:{}", config.host, config.port);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        let admin = || AuthMiddleware::new(jwt_service.clone()).require_role(UserRole::Admin);

        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(database.pool().clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .app_data(config.clone())
            .app_data(seo_service.clone())
            .route("/sitemap.xml", web::get().to(handlers::sitemap::sitemap_xml))
            .service(
                web::scope("/api/v1")
                    .route("/health", web::get().to(handlers::health::health_check))
                    .route("/auth/login", web::post().to(handlers::auth::login))
                    .service(
                        web::scope("/cars")
                            .route("", web::get().to(handlers::cars::list_cars))
                            .route(
                                "/slug/{slug}",
                                web::get().to(handlers::cars::get_car_by_slug),
                            )
                            .route("/{id}", web::get().to(handlers::cars::get_car))
                            .service(
                                web::scope("")
                                    .wrap(admin())
                                    .route("", web::post().to(handlers::cars::create_car))
                                    .route("/{id}", web::put().to(handlers::cars::update_car))
                                    .route("/{id}", web::delete().to(handlers::cars::delete_car)),
                            ),
                    )
                    .service(
                        web::scope("/bookings")
                            // Booking creation is the public lead-capture path.
                            .route("", web::post().to(handlers::bookings::create_booking))
                            .service(
                                web::scope("")
                                    .wrap(admin())
                                    .route("", web::get().to(handlers::bookings::list_bookings))
                                    .route("/{id}", web::get().to(handlers::bookings::get_booking))
                                    .route(
                                        "/{id}",
                                        web::put().to(handlers::bookings::update_booking),
                                    )
                                    .route(
                                        "/{id}",
                                        web::delete().to(handlers::bookings::delete_booking),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/blog")
                            .route("", web::get().to(handlers::blog::list_posts))
                            .route(
                                "/slug/{slug}",
                                web::get().to(handlers::blog::get_post_by_slug),
                            )
                            .route("/{id}", web::get().to(handlers::blog::get_post))
                            .service(
                                web::scope("")
                                    .wrap(admin())
                                    .route("", web::post().to(handlers::blog::create_post))
                                    .route("/{id}", web::put().to(handlers::blog::update_post))
                                    .route("/{id}", web::delete().to(handlers::blog::delete_post)),
                            ),
                    )
                    .service(
                        web::scope("/pages")
                            .route("", web::get().to(handlers::pages::list_pages))
                            .route(
                                "/slug/{slug}",
                                web::get().to(handlers::pages::get_page_by_slug),
                            )
                            .route("/{id}", web::get().to(handlers::pages::get_page))
                            .service(
                                web::scope("")
                                    .wrap(admin())
                                    .route("", web::post().to(handlers::pages::create_page))
                                    .route("/{id}", web::put().to(handlers::pages::update_page))
                                    .route("/{id}", web::delete().to(handlers::pages::delete_page)),
                            ),
                    )
                    .service(
                        web::scope("/service-pages")
                            .route(
                                "",
                                web::get().to(handlers::service_pages::list_service_pages),
                            )
                            .route(
                                "/{service_slug}/{location_slug}",
                                web::get().to(handlers::service_pages::get_service_page),
                            )
                            .service(
                                web::scope("")
                                    .wrap(admin())
                                    .route(
                                        "",
                                        web::post().to(handlers::service_pages::create_service_page),
                                    )
                                    .route(
                                        "/{id}",
                                        web::get()
                                            .to(handlers::service_pages::get_service_page_by_id),
                                    )
                                    .route(
                                        "/{id}",
                                        web::put().to(handlers::service_pages::update_service_page),
                                    )
                                    .route(
                                        "/{id}",
                                        web::delete()
                                            .to(handlers::service_pages::delete_service_page),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/menus")
                            .route("/tree", web::get().to(handlers::menus::get_menu_tree))
                            .service(
                                web::scope("")
                                    .wrap(admin())
                                    .route("", web::get().to(handlers::menus::list_menus))
                                    .route("", web::post().to(handlers::menus::create_menu))
                                    .route("/{id}", web::get().to(handlers::menus::get_menu))
                                    .route("/{id}", web::put().to(handlers::menus::update_menu))
                                    .route("/{id}", web::delete().to(handlers::menus::delete_menu)),
                            ),
                    )
                    .service(
                        web::scope("/notifications")
                            .route(
                                "",
                                web::get().to(handlers::notifications::list_notifications),
                            )
                            .service(
                                web::scope("")
                                    .wrap(admin())
                                    .route(
                                        "",
                                        web::post().to(handlers::notifications::create_notification),
                                    )
                                    .route(
                                        "/{id}",
                                        web::get().to(handlers::notifications::get_notification),
                                    )
                                    .route(
                                        "/{id}",
                                        web::put().to(handlers::notifications::update_notification),
                                    )
                                    .route(
                                        "/{id}",
                                        web::delete()
                                            .to(handlers::notifications::delete_notification),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/subscribers")
                            .route("", web::post().to(handlers::subscribers::subscribe))
                            .service(
                                web::scope("")
                                    .wrap(admin())
                                    .route(
                                        "",
                                        web::get().to(handlers::subscribers::list_subscribers),
                                    )
                                    .route(
                                        "/{id}",
                                        web::put().to(handlers::subscribers::update_subscriber),
                                    )
                                    .route(
                                        "/{id}",
                                        web::delete().to(handlers::subscribers::delete_subscriber),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/seo-settings")
                            .route("", web::get().to(handlers::seo::get_seo_settings))
                            .service(
                                web::scope("")
                                    .wrap(admin())
                                    .route("", web::post().to(handlers::seo::save_seo_settings)),
                            ),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
    .map_err(AppError::from)
}
