pub mod in_memory;
pub mod notification;
pub mod paymentsvc;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
