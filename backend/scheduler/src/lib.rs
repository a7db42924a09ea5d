//! Per-wallet session scheduling: quota windows, egress rotation, cooldown
//! jitter and the orchestrator that runs every session concurrently.

pub mod cooldown;
pub mod egress;
pub mod orchestrator;
pub mod session;

pub use cooldown::{pause, CooldownRange, Pause};
pub use egress::EgressSelector;
pub use orchestrator::{Orchestrator, RunSummary};
pub use session::{Clock, CycleOutcome, Remotes, SessionScheduler, SessionSettings};
