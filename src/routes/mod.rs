// Route exports
pub mod matching;

use actix_web::web;

pub use matching::{handle_query_payload_error, AppState};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(matching::configure),
    );
}
