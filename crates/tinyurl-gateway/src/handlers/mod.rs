mod health;
mod url;

pub use health::health_handler;
pub use url::{bindings_handler, create_link_handler, get_url_handler, redirect_handler};
