//! The practice-screen lifecycle and the dashboard derivations, exercised
//! through the public library API without any network.

use vocahire_lib::interview::{ConversationTurn, InterviewPhase, InterviewSession};
use vocahire_lib::submissions::{
    extract_score, query, InterviewRecord, SortOrder,
};

fn record(id: &str, summary: &str) -> InterviewRecord {
    InterviewRecord {
        id: id.to_string(),
        chat_history: String::new(),
        summary: summary.to_string(),
    }
}

#[test]
fn a_full_interview_runs_idle_active_ended_idle() {
    let mut session = InterviewSession::new();
    assert_eq!(session.phase, InterviewPhase::Idle);

    assert!(session.begin("System Design", "Design a URL shortener.".to_string()));
    assert_eq!(session.phase, InterviewPhase::Active);

    assert!(session.record_exchange(
        "I would start with the API surface.".to_string(),
        "How would you scale reads?".to_string(),
    ));
    assert!(session.record_exchange(
        "Caching and read replicas.".to_string(),
        "What about hot keys?".to_string(),
    ));

    // Two exchanges on top of the opening question: Q A Q A Q.
    assert_eq!(session.transcript.len(), 5);
    assert!(matches!(session.transcript[0], ConversationTurn::Question(_)));
    assert!(matches!(session.transcript[1], ConversationTurn::Answer(_)));
    assert!(matches!(session.transcript[2], ConversationTurn::Question(_)));

    assert!(session.finish("SCORE: 7/10. Good structure.".to_string()));
    assert_eq!(session.phase, InterviewPhase::Ended);
    assert_eq!(extract_score(&session.summary), Some(7.0));

    session.reset();
    assert_eq!(session.phase, InterviewPhase::Idle);
    assert!(session.transcript.is_empty());
}

#[test]
fn ended_sessions_reject_further_exchanges() {
    let mut session = InterviewSession::new();
    session.begin("Web Development", "Q1".to_string());
    session.finish("done".to_string());

    assert!(!session.record_exchange("too late".to_string(), "Q2".to_string()));
    assert!(!session.finish("again".to_string()));
    assert_eq!(session.transcript.len(), 1);
}

#[test]
fn dashboard_score_sort_is_a_total_order() {
    let records = vec![
        record("2", "SCORE: 3/10"),
        record("1", "nothing here"),
        record("3", "SCORE: 9/10"),
        record("4", "SCORE: 9/10"),
    ];

    let cards = query(&records, "", SortOrder::Score);
    let scores: Vec<f64> = cards.iter().map(|c| c.score.unwrap_or(0.0)).collect();
    assert_eq!(scores, vec![9.0, 9.0, 3.0, 0.0]);
    // Ties keep fetch order.
    assert_eq!(cards[0].id, "3");
    assert_eq!(cards[1].id, "4");
}
