pub mod control;
pub mod logging;
