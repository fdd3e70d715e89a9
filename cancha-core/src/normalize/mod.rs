//! Entity normalizers: raw backend records to canonical local entities.
//!
//! Every normalizer is a total pure function - it never fails, whatever the
//! backend sent. Missing or mistyped fields degrade to defaults (empty
//! string, `None`, capacity 0), so one malformed record can never take down
//! a whole list render. Each module carries the candidate-key tables for its
//! entity's known field-name variants.

pub mod installation;
pub mod maintenance;
pub mod reservation;
pub mod tournament;
pub mod user;
pub mod value;

pub use installation::normalize_installation;
pub use maintenance::normalize_maintenance;
pub use reservation::normalize_reservation;
pub use tournament::normalize_tournament;
pub use user::normalize_user;
