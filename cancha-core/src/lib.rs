//! Cancha Core Library
//!
//! Shared models and API sync logic for the Cancha facility-administration
//! console: an authenticated JSON client, per-entity normalizers over the
//! backend's loosely-typed payloads, reference resolution, and cached list
//! synchronizers with optimistic single-record patches.

pub mod api;
pub mod context;
pub mod error;
pub mod models;
pub mod normalize;
pub mod refs;
pub mod session;
pub mod sync;

pub use api::{ApiBody, ApiClient};
pub use context::AdminContext;
pub use error::ApiError;
pub use models::{
    maintenance_status_label, person_type_label, Gender, Installation, Maintenance, Reservation,
    Tournament, User, MAINTENANCE_STATUSES,
};
pub use refs::{ReferenceMap, TournamentRefs};
pub use session::{Session, SessionStore};
pub use sync::{
    AuthApi, InstallationInput, ListCache, MaintenanceInput, RegisterInput, ReservationInput,
    SyncInstallationRepository, SyncMaintenanceRepository, SyncReservationRepository,
    SyncTournamentRepository, SyncUserRepository, TournamentInput, UserInput,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
