pub mod annotation;
pub mod event;
pub mod filter;
pub mod placemark;
pub mod reaction;
pub mod report_type;
pub mod stop;
pub mod user;
