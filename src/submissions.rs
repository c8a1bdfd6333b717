use std::cmp::Ordering;

use chrono::DateTime;
use lazy_static::lazy_static;
use log::{error, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tauri::State;

use crate::AppState;

lazy_static! {
    static ref SCORE_RE: Regex = Regex::new(r"(?i)SCORE:\s*(\d+(?:\.\d+)?)[/\s]*10").unwrap();
    static ref CONTENT_RE: Regex = Regex::new(r"content='([^']+)'").unwrap();
    static ref QUESTION_RE: Regex = Regex::new(r"([^.!?]*\?)").unwrap();
}

/// A past interview as the backend stores it. Read-only on this side;
/// fetched wholesale, never paginated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub chat_history: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
    NotScored,
}

impl PerformanceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "Excellent",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Average => "Average",
            PerformanceLevel::NeedsImprovement => "Needs Improvement",
            PerformanceLevel::NotScored => "Not Scored",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Newest,
    Oldest,
    Score,
}

/// Display fields derived from one record, all best-effort.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionCard {
    pub id: String,
    pub topic: String,
    pub question: String,
    pub score: Option<f64>,
    pub performance: PerformanceLevel,
    pub recorded_at: String,
    pub summary_preview: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmissionStats {
    pub total: usize,
    pub average_score: f64,
    pub good_or_better: usize,
    pub scored: usize,
}

/// Pull a "SCORE: n/10" token out of the free-text summary.
pub fn extract_score(summary: &str) -> Option<f64> {
    SCORE_RE
        .captures(summary)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Keyword match across chat history and summary. Defaults to "Technical
/// Interview"; a record with nothing to analyze is a "General Interview".
pub fn extract_topic(chat_history: &str, summary: &str) -> String {
    if chat_history.is_empty() && summary.is_empty() {
        return "General Interview".to_string();
    }

    let text = format!("{} {}", chat_history, summary).to_lowercase();

    let topic = if text.contains("data structure") || text.contains("algorithm") {
        "Data Structures & Algorithms"
    } else if text.contains("web development")
        || text.contains("react")
        || text.contains("javascript")
    {
        "Web Development"
    } else if text.contains("mobile") || text.contains("android") || text.contains("ios") {
        "Mobile Development"
    } else if text.contains("machine learning") || text.contains("ai") || text.contains("ml") {
        "Machine Learning"
    } else if text.contains("behavioral") || text.contains("leadership") {
        "Behavioral Questions"
    } else if text.contains("system design") {
        "System Design"
    } else {
        "Technical Interview"
    };

    topic.to_string()
}

/// The chat history is a serialized message dump; the first question lives
/// in a content='...' marker. Fall back to the first sentence ending in a
/// question mark.
pub fn extract_question(chat_history: &str) -> String {
    if chat_history.is_empty() {
        return "No question available".to_string();
    }

    if let Some(caps) = CONTENT_RE.captures(chat_history) {
        return caps[1].to_string();
    }

    if let Some(caps) = QUESTION_RE.captures(chat_history) {
        return caps[1].trim().to_string();
    }

    "Question content not available".to_string()
}

/// The first 8 hex chars of a Mongo ObjectId are its creation time.
pub fn format_record_date(id: &str) -> String {
    id.get(0..8)
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
        .and_then(|secs| DateTime::from_timestamp(secs as i64, 0))
        .map(|dt| dt.format("%b %d, %Y %H:%M").to_string())
        .unwrap_or_else(|| "Date not available".to_string())
}

pub fn performance_level(score: Option<f64>) -> PerformanceLevel {
    match score {
        None => PerformanceLevel::NotScored,
        Some(s) if s >= 9.0 => PerformanceLevel::Excellent,
        Some(s) if s >= 7.0 => PerformanceLevel::Good,
        Some(s) if s >= 5.0 => PerformanceLevel::Average,
        Some(_) => PerformanceLevel::NeedsImprovement,
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{}...", cut)
    }
}

fn card_for(record: &InterviewRecord) -> SubmissionCard {
    let score = extract_score(&record.summary);
    SubmissionCard {
        id: record.id.clone(),
        topic: extract_topic(&record.chat_history, &record.summary),
        question: truncate(&extract_question(&record.chat_history), 80),
        score,
        performance: performance_level(score),
        recorded_at: format_record_date(&record.id),
        summary_preview: truncate(&record.summary, 100),
    }
}

/// Client-side substring search plus one of three sort orders over the
/// cached record set.
pub fn query(records: &[InterviewRecord], search: &str, sort: SortOrder) -> Vec<SubmissionCard> {
    let needle = search.trim().to_lowercase();

    let mut cards: Vec<SubmissionCard> = records
        .iter()
        .filter(|record| {
            if needle.is_empty() {
                return true;
            }
            let topic = extract_topic(&record.chat_history, &record.summary);
            let question = extract_question(&record.chat_history);
            topic.to_lowercase().contains(&needle)
                || record.summary.to_lowercase().contains(&needle)
                || question.to_lowercase().contains(&needle)
        })
        .map(card_for)
        .collect();

    match sort {
        SortOrder::Newest => cards.sort_by(|a, b| b.id.cmp(&a.id)),
        SortOrder::Oldest => cards.sort_by(|a, b| a.id.cmp(&b.id)),
        // Missing scores sort as zero; stable sort keeps ties in fetch order.
        SortOrder::Score => cards.sort_by(|a, b| {
            let sa = a.score.unwrap_or(0.0);
            let sb = b.score.unwrap_or(0.0);
            sb.partial_cmp(&sa).unwrap_or(Ordering::Equal)
        }),
    }

    cards
}

pub fn stats(records: &[InterviewRecord]) -> SubmissionStats {
    let scores: Vec<f64> = records
        .iter()
        .filter_map(|r| extract_score(&r.summary))
        .collect();

    let average_score = if scores.is_empty() {
        0.0
    } else {
        let avg = scores.iter().sum::<f64>() / scores.len() as f64;
        (avg * 10.0).round() / 10.0
    };

    SubmissionStats {
        total: records.len(),
        average_score,
        good_or_better: scores.iter().filter(|s| **s >= 7.0).count(),
        scored: scores.len(),
    }
}

/// Fetch the full record set and cache it; the dashboard queries the cache
/// until the next explicit refresh.
#[tauri::command]
pub async fn fetch_submissions(state: State<'_, AppState>) -> Result<Vec<SubmissionCard>, String> {
    let api = state.ensure_api()?;

    match api.get_all_interviews().await {
        Ok(records) => {
            info!("Fetched {} interview submissions", records.len());
            let cards = query(&records, "", SortOrder::Newest);
            *state.submissions.lock() = records;
            Ok(cards)
        }
        Err(e) => {
            error!("Error fetching interviews: {}", e);
            Err("Error fetching interview submissions. Please try again.".to_string())
        }
    }
}

#[tauri::command]
pub fn query_submissions(
    search: String,
    sort: SortOrder,
    state: State<'_, AppState>,
) -> Result<Vec<SubmissionCard>, String> {
    Ok(query(&state.submissions.lock(), &search, sort))
}

#[tauri::command]
pub fn submission_stats(state: State<'_, AppState>) -> Result<SubmissionStats, String> {
    Ok(stats(&state.submissions.lock()))
}

/// Full record plus derived fields, for the detail modal.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionDetail {
    pub card: SubmissionCard,
    pub question: String,
    pub summary: String,
    pub chat_history: String,
}

#[tauri::command]
pub fn get_submission(id: String, state: State<'_, AppState>) -> Result<SubmissionDetail, String> {
    let records = state.submissions.lock();
    let record = records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| "Submission not found.".to_string())?;

    Ok(SubmissionDetail {
        card: card_for(record),
        question: extract_question(&record.chat_history),
        summary: record.summary.clone(),
        chat_history: record.chat_history.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, chat_history: &str, summary: &str) -> InterviewRecord {
        InterviewRecord {
            id: id.to_string(),
            chat_history: chat_history.to_string(),
            summary: summary.to_string(),
        }
    }

    #[test]
    fn score_token_is_extracted() {
        assert_eq!(
            extract_score("Overall a good run. SCORE: 8/10. Keep going."),
            Some(8.0)
        );
        assert_eq!(extract_score("score: 7.5/10"), Some(7.5));
        assert_eq!(extract_score("SCORE: 6 10 or so"), Some(6.0));
    }

    #[test]
    fn missing_score_token_yields_none() {
        assert_eq!(extract_score("A decent interview, 8 out of 10."), None);
        assert_eq!(extract_score(""), None);
    }

    #[test]
    fn topic_keywords_are_matched() {
        assert_eq!(
            extract_topic("we discussed binary trees and algorithms", ""),
            "Data Structures & Algorithms"
        );
        assert_eq!(extract_topic("", "react hooks and javascript"), "Web Development");
        assert_eq!(extract_topic("android lifecycle questions", ""), "Mobile Development");
        assert_eq!(
            extract_topic("", "leadership style under pressure"),
            "Behavioral Questions"
        );
        assert_eq!(extract_topic("capacity planning", "system design"), "System Design");
    }

    #[test]
    fn topic_defaults_to_technical_interview() {
        assert_eq!(extract_topic("tell me about rust", "idiomatic"), "Technical Interview");
    }

    #[test]
    fn empty_inputs_are_a_general_interview() {
        assert_eq!(extract_topic("", ""), "General Interview");
    }

    #[test]
    fn question_comes_from_the_content_marker() {
        let history = "HumanMessage(content='What is a closure?'), AIMessage(...)";
        assert_eq!(extract_question(history), "What is a closure?");
    }

    #[test]
    fn question_falls_back_to_first_question_mark_sentence() {
        let history = "The interviewer opened with greetings. What does REST stand for? More text.";
        assert_eq!(extract_question(history), "What does REST stand for?");
    }

    #[test]
    fn question_placeholders_cover_the_rest() {
        assert_eq!(extract_question(""), "No question available");
        assert_eq!(
            extract_question("only statements here."),
            "Question content not available"
        );
    }

    #[test]
    fn object_id_prefix_becomes_a_date() {
        // 0x65000000 = 2023-09-12 06:06:56 UTC
        assert_eq!(
            format_record_date("65000000aaaaaaaaaaaaaaaa"),
            "Sep 12, 2023 06:06"
        );
    }

    #[test]
    fn bad_object_ids_fall_back() {
        assert_eq!(format_record_date("zzzz"), "Date not available");
        assert_eq!(format_record_date(""), "Date not available");
    }

    #[test]
    fn performance_bands_follow_the_thresholds() {
        assert_eq!(performance_level(Some(9.0)), PerformanceLevel::Excellent);
        assert_eq!(performance_level(Some(7.0)), PerformanceLevel::Good);
        assert_eq!(performance_level(Some(5.0)), PerformanceLevel::Average);
        assert_eq!(performance_level(Some(4.9)), PerformanceLevel::NeedsImprovement);
        // A literal zero is still a score; only a missing score is unscored.
        assert_eq!(performance_level(Some(0.0)), PerformanceLevel::NeedsImprovement);
        assert_eq!(performance_level(None), PerformanceLevel::NotScored);
        assert_eq!(PerformanceLevel::NeedsImprovement.label(), "Needs Improvement");
        assert_eq!(PerformanceLevel::NotScored.label(), "Not Scored");
    }

    #[test]
    fn score_sort_treats_missing_as_zero_and_is_stable() {
        let records = vec![
            record("a1", "", "SCORE: 4/10"),
            record("b2", "", "no token"),
            record("c3", "", "SCORE: 9/10"),
            record("d4", "", "also no token"),
        ];
        let cards = query(&records, "", SortOrder::Score);
        let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        // Unscored records tie at zero and keep their fetch order.
        assert_eq!(ids, vec!["c3", "a1", "b2", "d4"]);
    }

    #[test]
    fn newest_and_oldest_sort_lexically_on_id() {
        let records = vec![
            record("65000001", "", ""),
            record("65000003", "", ""),
            record("65000002", "", ""),
        ];
        let newest: Vec<String> = query(&records, "", SortOrder::Newest)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(newest, vec!["65000003", "65000002", "65000001"]);

        let oldest: Vec<String> = query(&records, "", SortOrder::Oldest)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(oldest, vec!["65000001", "65000002", "65000003"]);
    }

    #[test]
    fn search_matches_topic_summary_and_question() {
        let records = vec![
            record("a", "content='Explain react hooks?'", "went fine"),
            record("b", "", "strong leadership signals"),
            record("c", "", "unrelated"),
        ];
        // "web" hits record a through its derived topic.
        assert_eq!(query(&records, "web", SortOrder::Newest).len(), 1);
        // "leadership" hits record b through its summary.
        assert_eq!(query(&records, "Leadership", SortOrder::Newest).len(), 1);
        // "hooks" hits record a through the extracted question.
        assert_eq!(query(&records, "hooks", SortOrder::Newest).len(), 1);
        assert_eq!(query(&records, "", SortOrder::Newest).len(), 3);
    }

    #[test]
    fn stats_average_ignores_unscored_records() {
        let records = vec![
            record("a", "", "SCORE: 8/10"),
            record("b", "", "SCORE: 7/10"),
            record("c", "", "no token"),
        ];
        let s = stats(&records);
        assert_eq!(s.total, 3);
        assert_eq!(s.scored, 2);
        assert_eq!(s.good_or_better, 2);
        assert_eq!(s.average_score, 7.5);
    }

    #[test]
    fn stats_on_empty_set_are_all_zero() {
        let s = stats(&[]);
        assert_eq!(
            s,
            SubmissionStats {
                total: 0,
                average_score: 0.0,
                good_or_better: 0,
                scored: 0,
            }
        );
    }

    #[test]
    fn cards_truncate_long_questions() {
        let long_question = format!("content='{}?'", "a".repeat(200));
        let records = vec![record("a", &long_question, "")];
        let cards = query(&records, "", SortOrder::Newest);
        assert!(cards[0].question.len() <= 83); // 80 chars + "..."
        assert!(cards[0].question.ends_with("..."));
    }
}
