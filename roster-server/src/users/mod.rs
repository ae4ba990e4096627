pub mod requester;
pub mod role_handlers;
pub mod user_handlers;

pub use requester::{REQUESTER_ROLE_HEADER, Requester};
