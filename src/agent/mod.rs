//! Agent driving modules
//!
//! Everything between the feature pipeline and the host:
//! - Inference model seam
//! - Stateless per-tick step
//! - Caller-side session state
//! - Fixed-cadence scheduler

pub mod model;
pub mod scheduler;
pub mod session;
pub mod tick;

pub use model::InferenceModel;
pub use scheduler::TickScheduler;
pub use session::{ImitationSession, TickOutcome};
pub use tick::{run_tick, TickReport};
