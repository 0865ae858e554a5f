pub mod quotation;

use actix_web::web;

pub use quotation::SERVER_ERROR_MESSAGE;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.configure(quotation::config);
}
