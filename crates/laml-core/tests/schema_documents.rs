//! Schema documents declare the same protocols as the builder.

use laml_core::protocols::triage;
use laml_core::{ConfigError, SchemaDocument, SchemaError};
use pretty_assertions::assert_eq;

const TRIAGE_YAML: &str = r#"
name: triage
fields:
  - comment: Respond in the following format and nothing else.
  - name: RESPONSE_CHOICE_EXPLANATION
    description: Briefly explain why you chose this response type.
  - name: RESPONSE_TYPE
    type: constant
    description: How you will handle the request.
    values: [DIRECT_ANSWER, CLARIFICATION, PASS_TO_PLANNER]
  - name: RESPONSE_DIRECT_ANSWER
    optional: true
    description: "Only when RESPONSE_TYPE is DIRECT_ANSWER: the complete answer to the request."
  - name: RESPONSE_CLARIFICATION
    optional: true
    description: "Only when RESPONSE_TYPE is CLARIFICATION: the question the user must answer first."
  - name: RESPONSE_PASS_TO_PLANNER
    optional: true
    description: "Only when RESPONSE_TYPE is PASS_TO_PLANNER: the request restated as a self-contained task."
"#;

#[test]
fn test_yaml_triage_matches_builder() {
    let document = SchemaDocument::from_yaml_str(TRIAGE_YAML).unwrap();
    assert!(document.validate().unwrap().is_empty());

    let protocol = document.into_protocol().unwrap();
    assert_eq!(&protocol, triage());
    assert_eq!(protocol.render(), triage().render());
}

#[test]
fn test_invalid_field_name_in_document() {
    let yaml = "fields:\n  - name: RESPONSE TYPE\n";
    let err = SchemaDocument::from_yaml_str(yaml)
        .unwrap()
        .into_protocol()
        .unwrap_err();

    assert!(matches!(
        err,
        ConfigError::Schema(SchemaError::InvalidFieldName { ref name, .. }) if name == "RESPONSE TYPE"
    ));
}

#[test]
fn test_empty_object_in_document() {
    let yaml = "fields:\n  - name: AGENT\n    type: object\n    attributes:\n      - comment: nothing here\n";
    let err = SchemaDocument::from_yaml_str(yaml)
        .unwrap()
        .into_protocol()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid schema: Object field 'AGENT' has no attributes"
    );
}
