#![forbid(unsafe_code)]

pub mod format;
pub mod model;
pub mod share;
pub mod time;
