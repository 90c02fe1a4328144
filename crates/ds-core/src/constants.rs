/// Tolerance for the conservation, range and conflict checks.
pub const TOLERANCE: f64 = 1e-7;

/// Largest supported domain. The state space is 2ⁿ entries and masks are `u32`.
pub const MAX_DOMAIN_SIZE: usize = 20;

/// Sentinel accepted by `Selector::from(&str)` for the full-domain entry.
pub const OMEGA: &str = "Omega";
