pub mod emoji;
pub mod logs;
pub mod users;

use actix_web::web;

use self::users::user_handlers;

pub fn users_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("/register", web::post().to(user_handlers::register))
            .route("/login", web::post().to(user_handlers::login))
            .route("/logout", web::get().to(user_handlers::logout))
            .route("/checkSession", web::get().to(user_handlers::check_session))
            // Literal paths must be registered before the id capture
            .route("/{user_id}", web::get().to(user_handlers::get_user))
            .route("/{user_id}", web::put().to(user_handlers::update_user))
            .route("/{user_id}", web::delete().to(user_handlers::delete_user))
    );
}

use self::logs::log_handlers;

pub fn logs_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/log")
            .route("", web::get().to(log_handlers::fetch_logs))
            .route("/request", web::post().to(log_handlers::log_request))
            .route("/{log_id}", web::delete().to(log_handlers::delete_log))
    );
}

use self::emoji::emoji_handlers;

pub fn emoji_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/emoji")
            .route("/interpret", web::post().to(emoji_handlers::interpret_emoji))
    );
    cfg.service(
        web::scope("/emoji")
            .route("/explain", web::post().to(emoji_handlers::explain_emoji))
    );
}
