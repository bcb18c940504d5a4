use crate::auth::Authenticator;
use crate::backend::BackendClient;
use crate::session::SessionStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct FrontendState {
    backend: BackendClient,
    sessions: Arc<SessionStore>,
    authenticator: Arc<dyn Authenticator>,
}

impl FrontendState {
    pub fn new(
        backend: BackendClient,
        sessions: Arc<SessionStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            backend,
            sessions,
            authenticator,
        }
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    pub fn sessions(&self) -> &SessionStore {
        self.sessions.as_ref()
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }
}
