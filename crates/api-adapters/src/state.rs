use services::Services;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Marks the session cookie `Secure`; on behind TLS.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(services: Services, cookie_secure: bool) -> Self {
        Self { services, cookie_secure }
    }
}
