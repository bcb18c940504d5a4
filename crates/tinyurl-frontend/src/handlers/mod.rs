mod links;
mod login;

pub use links::{create_link_handler, favicon_handler, index_handler, redirect_handler};
pub use login::{login_form_handler, login_handler, logout_handler, require_session, CurrentUser};
