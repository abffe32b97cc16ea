pub mod init;
pub mod install;
pub mod latest;
pub mod remove;
pub mod show;
