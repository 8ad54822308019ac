pub mod chain;
pub mod context;
pub mod init;
pub mod resolve;
