//! Foundation utilities and math library

pub mod logging;
pub mod math;
pub mod time;
