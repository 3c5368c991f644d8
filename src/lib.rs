//! Ball-by-ball T20 feature derivation and batting-order scoring.

pub mod api;
pub mod bowling;
pub mod dataset;
pub mod delivery;
pub mod enrich;
pub mod model;
pub mod recent_form;
pub mod run_rate;
pub mod scorer;
pub mod venue;
pub mod venue_report;
