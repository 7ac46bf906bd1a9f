// src/models/analysis.rs

use serde::Serialize;
use uuid::Uuid;

use super::test::{Difficulty, Subject};

/// Everything the analysis page renders for one test.
///
/// Only the summary fields and `progress` come from stored tests. The other
/// sections are fixed sample data because generated questions are never graded.
#[derive(Debug, Serialize)]
pub struct AnalysisView {
    pub id: Uuid,
    pub title: String,
    pub subject: Subject,
    pub difficulty: Difficulty,
    pub date: String,
    pub score: Option<u8>,
    pub duration: u32,
    pub total_questions: u32,
    pub topic_performance: Vec<TopicPerformance>,
    pub progress: Vec<ProgressPoint>,
    pub question_review: Vec<QuestionReview>,
    pub recommendations: Recommendations,
    pub sample_data: bool,
}

/// Bar chart entry: correct answers vs. questions asked for one topic.
#[derive(Debug, Serialize)]
pub struct TopicPerformance {
    pub name: &'static str,
    pub correct: u32,
    pub total: u32,
}

/// Line chart entry: score of an earlier test in the same subject.
#[derive(Debug, Serialize)]
pub struct ProgressPoint {
    pub date: String,
    pub score: u8,
}

#[derive(Debug, Serialize)]
pub struct QuestionReview {
    pub number: u32,
    pub correct: bool,
    pub question: &'static str,
    pub explanation: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Recommendations {
    pub strengths: Vec<&'static str>,
    pub improvements: Vec<&'static str>,
}
