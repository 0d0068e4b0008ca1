//! Royal Court - throne and city-control politics for a simulated world

pub mod core;
pub mod court;
pub mod realm;
