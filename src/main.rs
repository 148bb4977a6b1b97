use actix_web::{web, App, HttpResponse, HttpServer};
use dotenv::dotenv;

use emoji_explainer_backend::config::Config;
use emoji_explainer_backend::provider::ExplanationProvider;
use emoji_explainer_backend::{db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to create pool");
    db::init_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    let provider = ExplanationProvider::new(&config.provider_url, config.provider_api_key.clone());

    let server_address = config.bind_addr.clone();
    println!("Server running at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(provider.clone()))
            .route(
                "/",
                web::get().to(|| async { HttpResponse::Ok().body("Emoji explainer backend is up.") }),
            )
            .configure(routes::users_configure)
            .configure(routes::logs_configure)
            .configure(routes::emoji_configure)
    })
    .bind(server_address)?
    .run()
    .await
}
