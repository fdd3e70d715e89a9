//! Application context: one session store, one client, one repository per
//! entity, built once per application session.
//!
//! The repositories own their caches, so cache lifetime follows this
//! context instead of module load order, and dropping the context drops
//! every cache with it.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::session::{Session, SessionStore};
use crate::sync::{
    AuthApi, SyncInstallationRepository, SyncMaintenanceRepository, SyncReservationRepository,
    SyncTournamentRepository, SyncUserRepository,
};

pub struct AdminContext {
    pub session: Arc<SessionStore>,
    pub client: Arc<ApiClient>,
    pub auth: AuthApi,
    pub installations: Arc<SyncInstallationRepository>,
    pub maintenances: SyncMaintenanceRepository,
    pub reservations: SyncReservationRepository,
    pub tournaments: SyncTournamentRepository,
    pub users: SyncUserRepository,
}

impl AdminContext {
    /// Builds a context. `base_url = None` is the unconfigured mode: lists
    /// are empty and mutations stay local.
    pub fn new(base_url: Option<String>) -> Self {
        let session = Arc::new(SessionStore::new());
        let client = Arc::new(ApiClient::new(base_url, Arc::clone(&session)));
        let installations = Arc::new(SyncInstallationRepository::new(Arc::clone(&client)));
        Self {
            auth: AuthApi::new(Arc::clone(&client)),
            maintenances: SyncMaintenanceRepository::new(
                Arc::clone(&client),
                Arc::clone(&installations),
            ),
            reservations: SyncReservationRepository::new(Arc::clone(&client)),
            tournaments: SyncTournamentRepository::new(Arc::clone(&client)),
            users: SyncUserRepository::new(Arc::clone(&client)),
            installations,
            client,
            session,
        }
    }

    /// Builds a context and restores a previously saved session token.
    /// A blank token is ignored and the context starts logged out.
    pub fn with_token(
        base_url: Option<String>,
        token: Option<String>,
        user_id: Option<i64>,
    ) -> Self {
        let context = Self::new(base_url);
        if let Some(token) = token {
            if !token.trim().is_empty() {
                // set only fails on an empty token, checked above
                let _ = context.session.set(Session::new(token, user_id));
            }
        }
        context
    }
}
