//! Persistence adapters for the record store port.

mod memory_record_store;

pub use memory_record_store::MemoryRecordStore;
