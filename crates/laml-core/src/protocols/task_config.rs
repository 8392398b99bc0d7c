//! Task configuration: create, update or select the task definition a
//! sub-task runs under, or report that none fits.

use super::{RESPONSE_CHOICE_EXPLANATION, RESPONSE_TYPE, explanation, only_when};
use crate::{Protocol, Schema};
use std::sync::LazyLock;

pub const CREATE_TASK_CONFIG: &str = "CREATE_TASK_CONFIG";
pub const UPDATE_TASK_CONFIG: &str = "UPDATE_TASK_CONFIG";
pub const SELECT_TASK_CONFIG: &str = "SELECT_TASK_CONFIG";
pub const TASK_CONFIG_UNAVAILABLE: &str = "TASK_CONFIG_UNAVAILABLE";

const TASK_TYPE: &str = "Name of the task type in snake_case.";
const AGENT_TYPE: &str = "Agent type that runs this task.";
const DESCRIPTION: &str = "What the task does, with placeholders for its inputs.";
const INPUT: &str = "The input format the task expects.";

static TASK_CONFIG: LazyLock<Protocol> = LazyLock::new(|| {
    Schema::new()
        .comment("Respond in the following format and nothing else.")
        .text(RESPONSE_CHOICE_EXPLANATION, explanation("response type"))
        .constant(
            RESPONSE_TYPE,
            [
                CREATE_TASK_CONFIG,
                UPDATE_TASK_CONFIG,
                SELECT_TASK_CONFIG,
                TASK_CONFIG_UNAVAILABLE,
            ],
            "What to do with the existing task configurations.",
        )
        .optional_object(
            "RESPONSE_CREATE_TASK_CONFIG",
            only_when(CREATE_TASK_CONFIG, "the new task configuration."),
            Schema::new()
                .text("task_type", TASK_TYPE)
                .text("agent_type", AGENT_TYPE)
                .text("description", DESCRIPTION)
                .text("task_config_input", INPUT),
        )
        .optional_object(
            "RESPONSE_UPDATE_TASK_CONFIG",
            only_when(
                UPDATE_TASK_CONFIG,
                "the task to change and the properties to replace.",
            ),
            Schema::new()
                .text("task_type", "Name of an existing task type.")
                .optional_text("description", DESCRIPTION)
                .optional_text("task_config_input", INPUT),
        )
        .optional_object(
            "RESPONSE_SELECT_TASK_CONFIG",
            only_when(SELECT_TASK_CONFIG, "the existing task to reuse as is."),
            Schema::new().text("task_type", "Name of an existing task type."),
        )
        .optional_object(
            "RESPONSE_TASK_CONFIG_UNAVAILABLE",
            only_when(TASK_CONFIG_UNAVAILABLE, "why no task configuration fits."),
            Schema::new().text("explanation", "What is missing."),
        )
        .build()
        .expect("task config protocol is well-formed")
});

/// The task configuration protocol.
pub fn task_config() -> &'static Protocol {
    &TASK_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_existing_task() {
        let raw = "RESPONSE_CHOICE_EXPLANATION: Already exists.\nRESPONSE_TYPE: SELECT_TASK_CONFIG\nRESPONSE_SELECT_TASK_CONFIG:\n  task_type: summarize_headlines";
        let value = task_config().parse(raw).unwrap();
        assert_eq!(
            value.text_at(&["RESPONSE_SELECT_TASK_CONFIG", "task_type"]),
            Some("summarize_headlines")
        );
    }

    #[test]
    fn test_create_with_multiline_description() {
        let raw = "RESPONSE_CHOICE_EXPLANATION: New.\nRESPONSE_TYPE: CREATE_TASK_CONFIG\nRESPONSE_CREATE_TASK_CONFIG:\n  task_type: summarize_headlines\n  agent_type: news_headlines_24h\n  description: Summarize headlines about <<topic>>.\n  Keep it short.\n  task_config_input: topic as plain text";
        let value = task_config().parse(raw).unwrap();
        let create = value.get("RESPONSE_CREATE_TASK_CONFIG").unwrap();
        assert_eq!(
            create.text_at(&["description"]),
            Some("Summarize headlines about <<topic>>.\n  Keep it short.")
        );
        assert_eq!(
            create.text_at(&["task_config_input"]),
            Some("topic as plain text")
        );
    }
}
