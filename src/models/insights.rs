use serde::Serialize;

/// Dashboard counts over the reservation table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Insights {
    pub total: u64,
    pub confirmed: u64,
    pub cancelled: u64,
    pub today_reservations: u64,
}
