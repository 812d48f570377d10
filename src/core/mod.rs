pub mod classify;
pub mod export;
pub mod log;
pub mod overlay;
pub mod reconcile;
pub mod reports;
pub mod session;
pub mod sync;
