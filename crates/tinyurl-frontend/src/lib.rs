//! HTML front-end of the tinyurl shortener.
//!
//! Signed-in users can list, create and follow short links; all data comes
//! from the JSON backend over HTTP.
//!
//! | Method | Path            | Session | Description                       |
//! |--------|-----------------|---------|-----------------------------------|
//! | GET    | `/login`        | no      | Login form                        |
//! | POST   | `/login`        | no      | Check credentials, open a session |
//! | GET    | `/favicon.ico`  | no      | Empty `204`                       |
//! | GET    | `/`             | yes     | Bindings page                     |
//! | POST   | `/create`       | yes     | Shorten a URL (form field `URL`)  |
//! | POST   | `/logout`       | yes     | Drop the session                  |
//! | GET    | `/{short_hash}` | yes     | `308` to the full URL             |

pub mod app;
pub mod auth;
pub mod backend;
pub mod error;
pub mod handlers;
pub mod session;
pub mod state;
pub mod views;

pub use app::App;
pub use auth::{Authenticator, StaticCredentials};
pub use backend::{BackendClient, BackendError, Binding};
pub use error::FrontendError;
pub use session::{SessionStore, SESSION_COOKIE};
pub use state::FrontendState;
