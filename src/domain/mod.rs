pub mod account;
pub mod ports;
pub mod transaction;
pub mod wallet;
