mod global;
#[cfg(test)]
mod tests;
mod tuid;

pub use global::*;
pub use tuid::*;
