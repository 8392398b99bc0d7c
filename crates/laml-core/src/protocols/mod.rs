//! Protocols used by the orchestration pipeline stages.
//!
//! Each protocol is built on first use and shared for the life of the
//! process. They all follow the same discriminant pattern: a free-text
//! `RESPONSE_CHOICE_EXPLANATION`, a `RESPONSE_TYPE` constant, and one
//! optional section per response type.

pub mod agent_config;
pub mod decomposition;
pub mod task_config;
pub mod triage;

pub use agent_config::agent_config;
pub use decomposition::problem_decomposition;
pub use task_config::task_config;
pub use triage::triage;

use crate::Protocol;

/// Field holding the model's reasoning for its choice of response type.
pub const RESPONSE_CHOICE_EXPLANATION: &str = "RESPONSE_CHOICE_EXPLANATION";

/// Discriminant field naming which optional section follows.
pub const RESPONSE_TYPE: &str = "RESPONSE_TYPE";

/// Looks up a stock protocol by name.
///
/// Accepts `triage`, `problem_decomposition`, `agent_config` and
/// `task_config`.
pub fn by_name(name: &str) -> Option<&'static Protocol> {
    match name {
        "triage" => Some(triage()),
        "problem_decomposition" => Some(problem_decomposition()),
        "agent_config" => Some(agent_config()),
        "task_config" => Some(task_config()),
        _ => None,
    }
}

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &[
    "triage",
    "problem_decomposition",
    "agent_config",
    "task_config",
];

fn explanation(subject: &str) -> String {
    format!("Briefly explain why you chose this {subject}.")
}

fn only_when(response_type: &str, description: &str) -> String {
    format!("Only when {RESPONSE_TYPE} is {response_type}: {description}")
}
