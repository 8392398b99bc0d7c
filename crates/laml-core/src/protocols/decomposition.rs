//! Problem decomposition: split a task into ordered sub-tasks or declare it
//! unsolvable.

use super::{RESPONSE_CHOICE_EXPLANATION, RESPONSE_TYPE, explanation, only_when};
use crate::{ListKind, Protocol, Schema};
use std::sync::LazyLock;

pub const DECOMPOSABLE: &str = "DECOMPOSABLE";
pub const UNSOLVABLE: &str = "UNSOLVABLE";

static DECOMPOSITION: LazyLock<Protocol> = LazyLock::new(|| {
    Schema::new()
        .comment("Respond in the following format and nothing else.")
        .text(RESPONSE_CHOICE_EXPLANATION, explanation("verdict"))
        .constant(
            RESPONSE_TYPE,
            [DECOMPOSABLE, UNSOLVABLE],
            "Whether the problem can be broken into sub-tasks.",
        )
        .optional_list(
            "RESPONSE_DECOMPOSABLE",
            ListKind::Numbered,
            only_when(
                DECOMPOSABLE,
                "the sub-tasks in execution order, each one self-contained.",
            ),
        )
        .optional_text(
            "RESPONSE_UNSOLVABLE",
            only_when(UNSOLVABLE, "what makes the problem impossible to solve."),
        )
        .build()
        .expect("problem decomposition protocol is well-formed")
});

/// The problem decomposition protocol.
pub fn problem_decomposition() -> &'static Protocol {
    &DECOMPOSITION
}
