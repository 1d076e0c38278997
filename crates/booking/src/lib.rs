mod board;
mod calendar;
mod seed;
mod types;

pub use board::*;
pub use calendar::*;
pub use seed::*;
pub use types::*;
