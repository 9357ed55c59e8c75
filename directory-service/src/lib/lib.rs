pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::account;
pub use domain::resource;
pub use domain::subscription;
pub use outbound::repositories;
