pub mod farmer;
pub mod migrate;
pub mod server;
