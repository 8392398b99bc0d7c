//! Golden snapshots of rendered instruction blocks.
//!
//! A rendered block is embedded verbatim in prompts, so any change here
//! changes what models are asked to produce.

use laml_core::protocols::{agent_config, problem_decomposition, triage};
use laml_core::{ItemKind, ListKind, Schema};
use pretty_assertions::assert_eq;

#[test]
fn test_triage_render() {
    let expected = "\
Respond in the following format and nothing else.
RESPONSE_CHOICE_EXPLANATION: Briefly explain why you chose this response type.
RESPONSE_TYPE: How you will handle the request. (one of: DIRECT_ANSWER | CLARIFICATION | PASS_TO_PLANNER)
RESPONSE_DIRECT_ANSWER: Only when RESPONSE_TYPE is DIRECT_ANSWER: the complete answer to the request.
RESPONSE_CLARIFICATION: Only when RESPONSE_TYPE is CLARIFICATION: the question the user must answer first.
RESPONSE_PASS_TO_PLANNER: Only when RESPONSE_TYPE is PASS_TO_PLANNER: the request restated as a self-contained task.";

    assert_eq!(triage().render(), expected);
}

#[test]
fn test_problem_decomposition_render() {
    let expected = "\
Respond in the following format and nothing else.
RESPONSE_CHOICE_EXPLANATION: Briefly explain why you chose this verdict.
RESPONSE_TYPE: Whether the problem can be broken into sub-tasks. (one of: DECOMPOSABLE | UNSOLVABLE)
RESPONSE_DECOMPOSABLE: Only when RESPONSE_TYPE is DECOMPOSABLE: the sub-tasks in execution order, each one self-contained. (numbered list, one item per line: 1. ..., 2. ...)
RESPONSE_UNSOLVABLE: Only when RESPONSE_TYPE is UNSOLVABLE: what makes the problem impossible to solve.";

    assert_eq!(problem_decomposition().render(), expected);
}

#[test]
fn test_agent_config_render() {
    let expected = "\
Respond in the following format and nothing else.
RESPONSE_CHOICE_EXPLANATION: Briefly explain why you chose this response type.
RESPONSE_TYPE: What to do with the existing agent configurations. (one of: CREATE_AGENT_CONFIG | UPDATE_AGENT_CONFIG | SELECT_AGENT_CONFIG | AGENT_CONFIG_UNAVAILABLE)
RESPONSE_CREATE_AGENT_CONFIG: Only when RESPONSE_TYPE is CREATE_AGENT_CONFIG: the new agent configuration.
  agent_type: Name of the agent type in snake_case, e.g. news_headlines_24h.
  description: One sentence describing what the agent does.
  instructions: Instructions the agent follows, written in the second person.
  tools: Tools the agent may use, taken from the available tools. (comma-separated list)
RESPONSE_UPDATE_AGENT_CONFIG: Only when RESPONSE_TYPE is UPDATE_AGENT_CONFIG: the agent to change and the properties to replace.
  agent_type: Name of an existing agent type.
  description: One sentence describing what the agent does.
  instructions: Instructions the agent follows, written in the second person.
  tools: Tools the agent may use, taken from the available tools. (comma-separated list)
RESPONSE_SELECT_AGENT_CONFIG: Only when RESPONSE_TYPE is SELECT_AGENT_CONFIG: the existing agent to reuse as is.
  agent_type: Name of an existing agent type.
RESPONSE_AGENT_CONFIG_UNAVAILABLE: Only when RESPONSE_TYPE is AGENT_CONFIG_UNAVAILABLE: why no agent can perform the task.
  explanation: What capability is missing.";

    assert_eq!(agent_config().render(), expected);
}

#[test]
fn test_mixed_kinds_render() {
    let protocol = Schema::new()
        .comment("Plan the release.")
        .text("GOAL", "What the release delivers.")
        .array(
            "CHANNELS",
            ItemKind::Constant {
                allowed_values: vec!["stable".into(), "beta".into()],
            },
            "Where to publish.",
        )
        .list("STEPS", ListKind::Numbered, "")
        .optional_list("RISKS", ListKind::Bulleted, "Only if there are any.")
        .build()
        .unwrap();

    let expected = "\
Plan the release.
GOAL: What the release delivers.
CHANNELS: Where to publish. (comma-separated list, each one of: stable | beta)
STEPS: (numbered list, one item per line: 1. ..., 2. ...)
RISKS: Only if there are any. (bulleted list, one item per line: - ...)";

    assert_eq!(protocol.render(), expected);
}
