//! Embassy async tasks
//!
//! Each task handles a specific subsystem and communicates via channels.

pub mod host;
pub mod trigger;

pub use host::{host_rx_task, host_tx_task};
pub use trigger::trigger_task;
