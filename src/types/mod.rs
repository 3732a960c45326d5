pub mod activity;
pub mod chart;
pub mod zone;
