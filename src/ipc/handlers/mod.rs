pub mod agenda;
pub mod backup_exchange;
pub mod core;
pub mod dashboard;
pub mod roster;
