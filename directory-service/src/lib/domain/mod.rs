pub mod account;
pub mod resource;
pub mod subscription;
