pub mod insights;
pub mod reservation;
pub mod status;
pub mod update;

pub use insights::Insights;
pub use reservation::Reservation;
pub use status::Status;
pub use update::{ReservationField, ReservationUpdate};
