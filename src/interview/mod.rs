pub mod controller;

pub use controller::*;

use serde::{Deserialize, Serialize};

/// One entry in the interview transcript. Append-only while an interview is
/// active; never reordered.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum ConversationTurn {
    Question(String),
    Answer(String),
}

/// Single tagged lifecycle state for the practice screen; every transition
/// goes through the session methods, never by flipping fields directly.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InterviewPhase {
    Idle,
    Active,
    Ended,
}

/// The fixed topic catalog offered on the practice screen.
pub const INTERVIEW_TOPICS: [&str; 12] = [
    "Web Development",
    "Mobile Development",
    "Machine Learning",
    "Technical Skills",
    "Behavioral Questions",
    "Leadership Experience",
    "Problem Solving",
    "Communication Skills",
    "Project Management",
    "Data Structures & Algorithms",
    "System Design",
    "Cultural Fit",
];
