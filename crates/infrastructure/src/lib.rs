//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_record_store;
mod system_clock;
mod tokio_latency_simulator;

pub use in_memory_record_store::InMemoryRecordStore;
pub use system_clock::SystemClock;
pub use tokio_latency_simulator::TokioLatencySimulator;
