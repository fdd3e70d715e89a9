mod installation;
mod maintenance;
mod reservation;
mod tournament;
mod user;

pub use installation::Installation;
pub use maintenance::{maintenance_status_label, Maintenance, MAINTENANCE_STATUSES};
pub use reservation::Reservation;
pub use tournament::Tournament;
pub use user::{person_type_label, Gender, User};
