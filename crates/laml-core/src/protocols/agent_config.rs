//! Agent configuration: create, update or select the agent that will run a
//! task, or report that none can.

use super::{RESPONSE_CHOICE_EXPLANATION, RESPONSE_TYPE, explanation, only_when};
use crate::{ItemKind, Protocol, Schema};
use std::sync::LazyLock;

pub const CREATE_AGENT_CONFIG: &str = "CREATE_AGENT_CONFIG";
pub const UPDATE_AGENT_CONFIG: &str = "UPDATE_AGENT_CONFIG";
pub const SELECT_AGENT_CONFIG: &str = "SELECT_AGENT_CONFIG";
pub const AGENT_CONFIG_UNAVAILABLE: &str = "AGENT_CONFIG_UNAVAILABLE";

const AGENT_TYPE: &str = "Name of the agent type in snake_case, e.g. news_headlines_24h.";
const DESCRIPTION: &str = "One sentence describing what the agent does.";
const INSTRUCTIONS: &str = "Instructions the agent follows, written in the second person.";
const TOOLS: &str = "Tools the agent may use, taken from the available tools.";

static AGENT_CONFIG: LazyLock<Protocol> = LazyLock::new(|| {
    Schema::new()
        .comment("Respond in the following format and nothing else.")
        .text(RESPONSE_CHOICE_EXPLANATION, explanation("response type"))
        .constant(
            RESPONSE_TYPE,
            [
                CREATE_AGENT_CONFIG,
                UPDATE_AGENT_CONFIG,
                SELECT_AGENT_CONFIG,
                AGENT_CONFIG_UNAVAILABLE,
            ],
            "What to do with the existing agent configurations.",
        )
        .optional_object(
            "RESPONSE_CREATE_AGENT_CONFIG",
            only_when(CREATE_AGENT_CONFIG, "the new agent configuration."),
            Schema::new()
                .text("agent_type", AGENT_TYPE)
                .text("description", DESCRIPTION)
                .text("instructions", INSTRUCTIONS)
                .array("tools", ItemKind::Text, TOOLS),
        )
        .optional_object(
            "RESPONSE_UPDATE_AGENT_CONFIG",
            only_when(
                UPDATE_AGENT_CONFIG,
                "the agent to change and the properties to replace.",
            ),
            Schema::new()
                .text("agent_type", "Name of an existing agent type.")
                .optional_text("description", DESCRIPTION)
                .optional_text("instructions", INSTRUCTIONS)
                .optional_array("tools", ItemKind::Text, TOOLS),
        )
        .optional_object(
            "RESPONSE_SELECT_AGENT_CONFIG",
            only_when(SELECT_AGENT_CONFIG, "the existing agent to reuse as is."),
            Schema::new().text("agent_type", "Name of an existing agent type."),
        )
        .optional_object(
            "RESPONSE_AGENT_CONFIG_UNAVAILABLE",
            only_when(AGENT_CONFIG_UNAVAILABLE, "why no agent can perform the task."),
            Schema::new().text("explanation", "What capability is missing."),
        )
        .build()
        .expect("agent config protocol is well-formed")
});

/// The agent configuration protocol.
pub fn agent_config() -> &'static Protocol {
    &AGENT_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldPath, ParseError, Value};

    #[test]
    fn test_update_with_partial_properties() {
        let raw = "RESPONSE_CHOICE_EXPLANATION: The agent lacks a tool.\nRESPONSE_TYPE: UPDATE_AGENT_CONFIG\nRESPONSE_UPDATE_AGENT_CONFIG:\n  agent_type: news_headlines_24h\n  tools: news_search, web_fetch";
        let value = agent_config().parse(raw).unwrap();

        let update = value.get("RESPONSE_UPDATE_AGENT_CONFIG").unwrap();
        assert_eq!(update.text_at(&["agent_type"]), Some("news_headlines_24h"));
        assert_eq!(
            update.get("tools"),
            Some(&Value::List(vec!["news_search".into(), "web_fetch".into()]))
        );
        assert!(update.get("description").is_none());
    }

    #[test]
    fn test_create_requires_all_properties() {
        let raw = "RESPONSE_CHOICE_EXPLANATION: New need.\nRESPONSE_TYPE: CREATE_AGENT_CONFIG\nRESPONSE_CREATE_AGENT_CONFIG:\n  agent_type: weather\n  description: Reports the weather.\n  tools: forecast";
        let err = agent_config().parse(raw).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingRequiredField {
                path: FieldPath::new(["RESPONSE_CREATE_AGENT_CONFIG", "instructions"])
            }
        );
    }
}
