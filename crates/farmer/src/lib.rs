mod command;
mod record;
mod repository;

pub use command::*;
pub use record::*;
pub use repository::*;
