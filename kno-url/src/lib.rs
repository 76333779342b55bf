pub mod cleanup;
pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod help;
pub mod output;

pub use cleanup::{CleanupOutcome, CleanupPlan};
pub use config::Config;
pub use error::CommandError;
pub use handlers::{ConfirmCallback, Flow, InterruptCallback, Session};
