mod interface;
mod nano_clock;
mod system;

pub use interface::*;
pub use nano_clock::*;
pub use system::*;
