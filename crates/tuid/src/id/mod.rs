mod tuid;

pub use tuid::*;
