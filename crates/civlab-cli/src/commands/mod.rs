pub mod animate;
pub mod band;
pub mod banks;
pub mod domains;
pub mod init;
pub mod quiz;
pub mod validate;
