pub mod chart;
pub mod record;
pub mod request;
pub mod settings;
pub mod summary;
