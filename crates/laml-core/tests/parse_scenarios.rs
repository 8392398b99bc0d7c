//! End-to-end parsing scenarios against the stock protocols.

use laml_core::protocols::{agent_config, triage};
use laml_core::{FieldPath, ItemKind, ListKind, Map, ParseError, Schema, Value, print};
use pretty_assertions::assert_eq;
use serde::Deserialize;

#[test]
fn test_discriminant_selects_section() {
    let value = triage()
        .parse("RESPONSE_CHOICE_EXPLANATION: Hi.\nRESPONSE_TYPE: DIRECT_ANSWER\nRESPONSE_DIRECT_ANSWER: Hello!")
        .unwrap();

    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"RESPONSE_CHOICE_EXPLANATION":"Hi.","RESPONSE_TYPE":"DIRECT_ANSWER","RESPONSE_DIRECT_ANSWER":"Hello!"}"#
    );
}

#[test]
fn test_missing_explanation_feedback() {
    let err = triage()
        .parse("RESPONSE_TYPE: DIRECT_ANSWER\nRESPONSE_DIRECT_ANSWER: Hello!")
        .unwrap_err();

    assert_eq!(err.path(), Some(&FieldPath::from("RESPONSE_CHOICE_EXPLANATION")));
    assert!(err.feedback().contains("`RESPONSE_CHOICE_EXPLANATION`"));
}

#[test]
fn test_enum_is_case_sensitive() {
    let err = triage()
        .parse("RESPONSE_CHOICE_EXPLANATION: x\nRESPONSE_TYPE: Direct_Answer")
        .unwrap_err();

    assert!(matches!(err, ParseError::InvalidConstantValue { .. }));
    assert!(err
        .feedback()
        .contains("Use exactly one of: DIRECT_ANSWER | CLARIFICATION | PASS_TO_PLANNER."));
}

#[test]
fn test_response_wrapped_in_chatter() {
    let raw = "Certainly! Here is my response:\n\nRESPONSE_CHOICE_EXPLANATION: The user asked for a fact.\nRESPONSE_TYPE: DIRECT_ANSWER\nRESPONSE_DIRECT_ANSWER: Paris is the capital of France.\n";

    let value = triage().parse(raw).unwrap();
    assert_eq!(
        value.text_at(&["RESPONSE_DIRECT_ANSWER"]),
        Some("Paris is the capital of France.")
    );

    let err = triage().parse_strict(raw).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnrecognizedTrailingContent {
            content: "Certainly! Here is my response:".to_string()
        }
    );
}

fn news_agent() -> Value {
    let raw = "\
RESPONSE_CHOICE_EXPLANATION: No existing agent covers news.
RESPONSE_TYPE: CREATE_AGENT_CONFIG
RESPONSE_CREATE_AGENT_CONFIG:
  agent_type: news_headlines_24h
  description: Collects news headlines from the last 24 hours.
  instructions: You search for headlines published in the last 24 hours.
Only report headlines with a verifiable source.
  tools: news_search, web_fetch";
    agent_config().parse(raw).unwrap()
}

#[test]
fn test_print_news_agent() {
    let value = news_agent();

    let expected = "\
RESPONSE_CHOICE_EXPLANATION: No existing agent covers news.
RESPONSE_TYPE: CREATE_AGENT_CONFIG
RESPONSE_CREATE_AGENT_CONFIG:
  agent_type: news_headlines_24h
  description: Collects news headlines from the last 24 hours.
  instructions: You search for headlines published in the last 24 hours.
Only report headlines with a verifiable source.
  tools: news_search, web_fetch";

    assert_eq!(print(&value), expected);
}

#[test]
fn test_printed_value_parses_back() {
    let value = news_agent();
    let reparsed = agent_config().parse(&print(&value)).unwrap();
    assert_eq!(reparsed, value);
}

#[test]
fn test_deserialize_into_struct() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct AgentConfig {
        agent_type: String,
        description: String,
        instructions: String,
        tools: Vec<String>,
    }

    let value = news_agent();
    let config: AgentConfig = value
        .get("RESPONSE_CREATE_AGENT_CONFIG")
        .unwrap()
        .deserialize_into()
        .unwrap();

    assert_eq!(config.agent_type, "news_headlines_24h");
    assert_eq!(config.tools, vec!["news_search", "web_fetch"]);
    assert!(config.instructions.ends_with("verifiable source."));
}

#[test]
fn test_protocol_shared_across_threads() {
    let protocol = Schema::new()
        .text("ANSWER", "")
        .build()
        .unwrap();

    std::thread::scope(|scope| {
        for i in 0..4 {
            let protocol = &protocol;
            scope.spawn(move || {
                let value = protocol.parse(&format!("ANSWER: {i}")).unwrap();
                assert_eq!(value.text_at(&["ANSWER"]), Some(i.to_string().as_str()));
            });
        }
    });
}

#[test]
fn test_printer_fidelity_news_headlines() {
    let instructions = "Search for news headlines from the past 24 hours.\n\nIgnore opinion pieces.\n  Cite every source.";
    let agent: Map = [
        ("agent_type", Value::from("news_headlines_24h")),
        ("description", Value::from("Gathers news headlines the past 24 hours.")),
        ("instructions", Value::from(instructions)),
        (
            "tools",
            Value::List(vec!["news_search".into(), "wikipedia".into()]),
        ),
    ]
    .into_iter()
    .collect();
    let value = Value::Object([("news_headlines_24h", Value::Object(agent))].into_iter().collect());

    let expected = "\
news_headlines_24h:
  agent_type: news_headlines_24h
  description: Gathers news headlines the past 24 hours.
  instructions: Search for news headlines from the past 24 hours.

Ignore opinion pieces.
  Cite every source.
  tools: news_search, wikipedia";

    assert_eq!(print(&value), expected);
}

#[test]
fn test_filled_in_render_round_trips() {
    let protocol = Schema::new()
        .comment("Plan the release.")
        .text("GOAL", "What the release delivers.")
        .constant("RISK", ["LOW", "HIGH"], "")
        .array(
            "CHANNELS",
            ItemKind::Constant {
                allowed_values: vec!["stable".into(), "beta".into()],
            },
            "",
        )
        .object(
            "OWNER",
            "",
            Schema::new()
                .text("name", "")
                .optional_text("team", ""),
        )
        .list("STEPS", ListKind::Numbered, "")
        .optional_text("NOTES", "")
        .build()
        .unwrap();

    let raw = "\
GOAL: Ship the parser.
It must handle nested sections.
RISK: LOW
CHANNELS: stable, beta
OWNER:
  name: Ana
STEPS:
1. Write tests
2. Tag the release";

    let value = protocol.parse(raw).unwrap();

    let owner: Map = [("name", Value::from("Ana"))].into_iter().collect();
    let expected: Map = [
        ("GOAL", Value::from("Ship the parser.\nIt must handle nested sections.")),
        ("RISK", Value::from("LOW")),
        ("CHANNELS", Value::List(vec!["stable".into(), "beta".into()])),
        ("OWNER", Value::Object(owner)),
        (
            "STEPS",
            Value::List(vec!["Write tests".into(), "Tag the release".into()]),
        ),
    ]
    .into_iter()
    .collect();
    assert_eq!(value, Value::Object(expected));
}
