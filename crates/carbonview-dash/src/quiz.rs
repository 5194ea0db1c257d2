//! Quiz progress state machine.
//!
//! Tracks the visible question, the per-question answers, and inline
//! validation messages. Progression is blocked until the current question
//! is answered; submission is blocked until every question is answered, and
//! a failed submission redirects the display to the first unanswered
//! question. Inline messages auto-dismiss after five seconds, each on its
//! own countdown.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifetime of an inline quiz message, in milliseconds.
pub const MESSAGE_DURATION_MS: u32 = 5000;

/// Severity of an inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    /// Validation error
    Error,
    /// Informational
    Info,
}

/// An inline message with its own dismissal countdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizNotice {
    /// Message text
    pub text: String,
    /// Severity
    pub kind: NoticeKind,
    /// Remaining lifetime in milliseconds
    pub remaining_ms: u32,
}

impl QuizNotice {
    fn error(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: NoticeKind::Error,
            remaining_ms: MESSAGE_DURATION_MS,
        }
    }
}

/// Result of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// All questions answered; the form is submitted
    Submitted,
    /// Unanswered questions remain; display moved to the first one
    Incomplete {
        /// Index of the first unanswered question
        first_unanswered: usize,
    },
}

/// The quiz progress state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizState {
    current_question: usize,
    answers: BTreeMap<usize, usize>,
    total_questions: usize,
    notices: Vec<QuizNotice>,
    submitted: bool,
}

impl QuizState {
    /// Create a quiz with `total_questions` questions, showing the first.
    #[must_use]
    pub fn new(total_questions: usize) -> Self {
        Self {
            current_question: 0,
            answers: BTreeMap::new(),
            total_questions,
            notices: Vec::new(),
            submitted: false,
        }
    }

    /// Index of the visible question.
    #[must_use]
    pub const fn current_question(&self) -> usize {
        self.current_question
    }

    /// Total question count.
    #[must_use]
    pub const fn total_questions(&self) -> usize {
        self.total_questions
    }

    /// The saved answer for a question, used to restore the selection when
    /// a question is re-shown.
    #[must_use]
    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    /// Whether the quiz has been submitted.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Live inline messages.
    #[must_use]
    pub fn notices(&self) -> &[QuizNotice] {
        &self.notices
    }

    /// Show a specific question; out-of-range indexes are ignored.
    pub fn show_question(&mut self, question: usize) {
        if question < self.total_questions {
            self.current_question = question;
        }
    }

    /// Record an answer for a question.
    pub fn select_answer(&mut self, question: usize, answer: usize) {
        if question < self.total_questions {
            self.answers.insert(question, answer);
        }
    }

    /// Whether the back button is enabled.
    #[must_use]
    pub const fn prev_enabled(&self) -> bool {
        self.current_question > 0
    }

    /// Whether the forward button is enabled (current question answered).
    #[must_use]
    pub fn next_enabled(&self) -> bool {
        self.answers.contains_key(&self.current_question)
    }

    /// Forward button caption: "Submit Quiz" on the last question.
    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.current_question + 1 == self.total_questions {
            "Submit Quiz"
        } else {
            "Next"
        }
    }

    /// Go back one question.
    pub fn prev(&mut self) {
        if self.current_question > 0 {
            self.current_question -= 1;
        }
    }

    /// Advance: move to the next question, or submit from the last one.
    /// Blocked with an inline error when the current question is
    /// unanswered.
    pub fn next(&mut self) -> Option<SubmitOutcome> {
        if !self.next_enabled() {
            self.notices
                .push(QuizNotice::error("Please select an answer before proceeding"));
            return None;
        }
        if self.current_question + 1 < self.total_questions {
            self.current_question += 1;
            None
        } else {
            Some(self.submit())
        }
    }

    /// Attempt submission.
    pub fn submit(&mut self) -> SubmitOutcome {
        if let Some(first_unanswered) =
            (0..self.total_questions).find(|q| !self.answers.contains_key(q))
        {
            self.notices.push(QuizNotice::error(
                "Please answer all questions before submitting",
            ));
            self.current_question = first_unanswered;
            return SubmitOutcome::Incomplete { first_unanswered };
        }
        self.submitted = true;
        SubmitOutcome::Submitted
    }

    /// Advance every notice's countdown, dropping expired messages. Each
    /// notice dismisses on its own schedule.
    pub fn tick(&mut self, elapsed_ms: u32) {
        for notice in &mut self.notices {
            notice.remaining_ms = notice.remaining_ms.saturating_sub(elapsed_ms);
        }
        self.notices.retain(|notice| notice.remaining_ms > 0);
    }
}
