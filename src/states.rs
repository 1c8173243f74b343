use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::config::Config;
use crate::session::SessionStore;
use crate::store::MemoryStore;

/// Login attempts allowed per username per minute.
const LOGIN_ATTEMPTS_PER_MINUTE: NonZeroU32 = NonZeroU32::new(10).unwrap();

pub type LoginLimiter = DefaultKeyedRateLimiter<String>;

/// Shared application state, constructed once in `main` and cloned into
/// every handler. No module-level singletons: everything a handler touches
/// arrives through here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub sessions: Arc<SessionStore>,
    pub login_limiter: Arc<LoginLimiter>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, store: MemoryStore) -> Self {
        Self {
            store: Arc::new(store),
            sessions: Arc::new(SessionStore::new()),
            login_limiter: Arc::new(RateLimiter::keyed(Quota::per_minute(
                LOGIN_ATTEMPTS_PER_MINUTE,
            ))),
            config: Arc::new(config),
        }
    }
}
