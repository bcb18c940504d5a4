//! JSON HTTP surface of the tinyurl backend.
//!
//! | route                        | purpose                                  |
//! |------------------------------|------------------------------------------|
//! | `POST /create`               | shorten `{"url": ...}`                   |
//! | `GET /{short_hash}`          | `308` redirect to the full URL           |
//! | `GET /get_url/{short_hash}`  | look up a binding as JSON                |
//! | `GET /get_bindings`          | every binding, `full_url -> short_hash`  |
//! | `GET /health`                | liveness                                 |

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
