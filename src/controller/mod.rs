use actix_files::Files;
use actix_web::{HttpResponse, web};

pub mod rounds;
pub mod state;

pub use state::AppState;

async fn health() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Route table shared by the binary and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(rounds::index))
        .route("/rounds/start", web::post().to(rounds::start_round))
        .route("/rounds/end", web::post().to(rounds::end_round))
        .route("/active", web::get().to(rounds::active))
        .route("/active/names", web::get().to(rounds::active_names))
        .route("/history", web::get().to(rounds::history))
        .route("/history.csv", web::get().to(rounds::history_export))
        .route("/health", web::get().to(health));
}

/// Stylesheet and other static assets, served from `dir`.
pub fn static_files(dir: &str) -> Files {
    Files::new("/static", dir)
}
