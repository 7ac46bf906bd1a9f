// src/generator/mod.rs

pub mod gemini;
pub mod wizard;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{error::AppError, models::test::Test};

pub use gemini::GeminiClient;
pub use wizard::{TestDraft, Wizard};

/// Stored in place of the questions when the service answers with an
/// unexpected shape.
pub const NO_QUESTIONS: &str = "No questions generated.";

/// A text-generation backend.
///
/// Returns the generated payload as-is; callers never parse it into
/// individual questions.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<serde_json::Value, AppError>;
}

/// Natural-language instruction sent to the generation service.
pub fn build_prompt(draft: &TestDraft) -> String {
    format!(
        "Generate {} {} level multiple-choice questions for {} chapters: {}. \n    \
         Format each question as: \"Question: ... Options: a) ... b) ... c) ... d) ... Answer: ...\"",
        draft.question_count,
        draft.difficulty.prompt_word(),
        draft.subject.as_str(),
        draft.chapters.join(", ")
    )
}

/// Calls the generator for `draft` and builds the new test record.
///
/// Nothing is stored here; on error no record exists.
pub async fn generate_test(
    generator: &dyn QuestionGenerator,
    draft: TestDraft,
) -> Result<Test, AppError> {
    let prompt = build_prompt(&draft);
    tracing::info!(
        "Generating {} {} questions for {} ({})",
        draft.question_count,
        draft.difficulty.prompt_word(),
        draft.subject.as_str(),
        draft.chapters.join(", ")
    );

    let questions = generator.generate(&prompt).await?;

    Ok(Test {
        id: Uuid::new_v4(),
        title: draft.title(),
        subject: draft.subject,
        difficulty: draft.difficulty,
        chapters: draft.chapters,
        total_questions: draft.question_count,
        duration: draft.duration,
        questions,
        created_at: Utc::now(),
        completed_at: None,
        score: None,
    })
}
