// Application state (AppState)

use crate::auth::service::AuthService;
use crate::core::config::Config;
use crate::security::rate_limiter::LoginRateLimiter;
use crate::stores::{movie_store::MovieStore, user_store::UserStore};
use std::sync::Arc;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// All fields are wrapped in Arc for efficient cloning across threads.
#[derive(Clone)]
pub struct AppState {
    /// User records and their favourites lists
    pub users: Arc<UserStore>,

    /// Movie catalog, resolves external ids to internal records
    pub movies: Arc<MovieStore>,

    /// Password verification and token issuance
    pub auth: Arc<AuthService>,

    /// Per-username throttle for login attempts
    pub login_limiter: Arc<LoginRateLimiter>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let auth = Arc::new(AuthService::new(&config.auth));
        let login_limiter = Arc::new(LoginRateLimiter::new(
            config.auth.max_login_attempts_per_minute,
        ));

        Self {
            users: Arc::new(UserStore::new()),
            movies: Arc::new(MovieStore::new()),
            auth,
            login_limiter,
            config: Arc::new(config),
        }
    }
}
