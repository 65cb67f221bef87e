pub mod context;
pub mod file;
pub mod logging;
