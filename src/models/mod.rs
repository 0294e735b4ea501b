pub mod account;
pub mod board;

pub use account::{AccountRecord, AuthnRecord};
pub use board::{BoardRecord, CardRecord, ListRecord};
