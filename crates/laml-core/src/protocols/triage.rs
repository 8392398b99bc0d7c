//! Request triage: answer directly, ask for clarification, or hand the
//! request to the planner.

use super::{RESPONSE_CHOICE_EXPLANATION, RESPONSE_TYPE, explanation, only_when};
use crate::{Protocol, Schema};
use std::sync::LazyLock;

pub const DIRECT_ANSWER: &str = "DIRECT_ANSWER";
pub const CLARIFICATION: &str = "CLARIFICATION";
pub const PASS_TO_PLANNER: &str = "PASS_TO_PLANNER";

static TRIAGE: LazyLock<Protocol> = LazyLock::new(|| {
    Schema::new()
        .comment("Respond in the following format and nothing else.")
        .text(RESPONSE_CHOICE_EXPLANATION, explanation("response type"))
        .constant(
            RESPONSE_TYPE,
            [DIRECT_ANSWER, CLARIFICATION, PASS_TO_PLANNER],
            "How you will handle the request.",
        )
        .optional_text(
            "RESPONSE_DIRECT_ANSWER",
            only_when(DIRECT_ANSWER, "the complete answer to the request."),
        )
        .optional_text(
            "RESPONSE_CLARIFICATION",
            only_when(CLARIFICATION, "the question the user must answer first."),
        )
        .optional_text(
            "RESPONSE_PASS_TO_PLANNER",
            only_when(PASS_TO_PLANNER, "the request restated as a self-contained task."),
        )
        .build()
        .expect("triage protocol is well-formed")
});

/// The triage protocol.
pub fn triage() -> &'static Protocol {
    &TRIAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_to_planner() {
        let raw = "RESPONSE_CHOICE_EXPLANATION: Needs several steps.\nRESPONSE_TYPE: PASS_TO_PLANNER\nRESPONSE_PASS_TO_PLANNER: Compare flight prices for next week.";
        let value = triage().parse(raw).unwrap();
        assert_eq!(value.text_at(&[RESPONSE_TYPE]), Some(PASS_TO_PLANNER));
        assert_eq!(
            value.text_at(&["RESPONSE_PASS_TO_PLANNER"]),
            Some("Compare flight prices for next week.")
        );
    }
}
