//! Session vocabulary shared by every role: who the visitor is, how far they
//! got in signing in, and how an entry url decides where they start.

mod credentials;
mod line;
mod machine;
mod resolver;
mod role;

pub use credentials::*;
pub use line::*;
pub use machine::*;
pub use resolver::*;
pub use role::*;
