pub mod api;
pub mod callback;
pub mod logging;
