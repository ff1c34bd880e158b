pub mod extract;
pub mod init;
pub mod rewrite;

mod command_result;

pub use command_result::*;
