use subtle::ConstantTimeEq;
use typed_builder::TypedBuilder;

/// Decides whether a username/password pair may open a session.
pub trait Authenticator: Send + Sync + 'static {
    fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// A single credential pair supplied through configuration.
#[derive(Clone, TypedBuilder)]
pub struct StaticCredentials {
    #[builder(setter(into))]
    username: String,
    #[builder(setter(into))]
    password: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

impl Authenticator for StaticCredentials {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        // evaluate both so timing doesn't reveal which one failed
        let user_ok = constant_time_eq(&self.username, username);
        let pass_ok = constant_time_eq(&self.password, password);
        user_ok & pass_ok
    }
}
