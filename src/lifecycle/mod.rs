//! Process lifecycle for the replay driver

mod shutdown;

pub use shutdown::ShutdownSignal;
