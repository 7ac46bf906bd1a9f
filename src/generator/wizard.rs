// src/generator/wizard.rs

use crate::{
    config::{DEFAULT_DURATION, DEFAULT_QUESTION_COUNT, DURATIONS, MAX_QUESTION_COUNT},
    error::AppError,
    models::test::{Difficulty, GenerateTestRequest, Subject},
};

pub const MISSING_SELECTION: &str = "Please select a subject and at least one chapter.";

/// Validated wizard output, ready to be turned into a prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct TestDraft {
    pub subject: Subject,
    pub chapters: Vec<String>,
    pub difficulty: Difficulty,
    pub duration: u32,
    pub question_count: u32,
}

impl TestDraft {
    pub fn title(&self) -> String {
        format!("{} Test", self.subject.display_name())
    }
}

/// Selection state of the test generator.
///
/// Chapters can only be picked once a subject is chosen, and picking another
/// subject clears them. Difficulty and duration are independent.
#[derive(Debug, Clone)]
pub struct Wizard {
    subject: Option<Subject>,
    chapters: Vec<&'static str>,
    difficulty: Difficulty,
    duration: u32,
    question_count: u32,
}

impl Default for Wizard {
    fn default() -> Self {
        Self {
            subject: None,
            chapters: Vec::new(),
            difficulty: Difficulty::Easy,
            duration: DEFAULT_DURATION,
            question_count: DEFAULT_QUESTION_COUNT,
        }
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chapters(&self) -> &[&'static str] {
        &self.chapters
    }

    pub fn select_subject(&mut self, subject: Subject) {
        if self.subject != Some(subject) {
            self.chapters.clear();
        }
        self.subject = Some(subject);
    }

    /// Adds or removes a chapter of the selected subject. Returns whether the
    /// chapter is selected afterwards.
    pub fn toggle_chapter(&mut self, chapter: &str) -> Result<bool, AppError> {
        let subject = self
            .subject
            .ok_or_else(|| AppError::BadRequest("Select a subject before choosing chapters.".to_string()))?;

        let chapter = subject
            .chapters()
            .iter()
            .copied()
            .find(|c| *c == chapter)
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "'{}' is not a {} chapter",
                    chapter,
                    subject.display_name()
                ))
            })?;

        if let Some(pos) = self.chapters.iter().position(|c| *c == chapter) {
            self.chapters.remove(pos);
            Ok(false)
        } else {
            self.chapters.push(chapter);
            Ok(true)
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_duration(&mut self, minutes: u32) -> Result<(), AppError> {
        if !DURATIONS.contains(&minutes) {
            return Err(AppError::BadRequest(format!(
                "Duration must be one of {:?} minutes",
                DURATIONS
            )));
        }
        self.duration = minutes;
        Ok(())
    }

    pub fn set_question_count(&mut self, count: u32) -> Result<(), AppError> {
        if !(1..=MAX_QUESTION_COUNT).contains(&count) {
            return Err(AppError::BadRequest(format!(
                "Question count must be between 1 and {}.",
                MAX_QUESTION_COUNT
            )));
        }
        self.question_count = count;
        Ok(())
    }

    /// Whether the generate action is enabled.
    pub fn can_submit(&self) -> bool {
        self.subject.is_some() && !self.chapters.is_empty()
    }

    pub fn finish(&self) -> Result<TestDraft, AppError> {
        match self.subject {
            Some(subject) if self.can_submit() => Ok(TestDraft {
                subject,
                chapters: self.chapters.iter().map(|c| c.to_string()).collect(),
                difficulty: self.difficulty,
                duration: self.duration,
                question_count: self.question_count,
            }),
            _ => Err(AppError::BadRequest(MISSING_SELECTION.to_string())),
        }
    }

    /// Replays a submitted form through the wizard steps.
    pub fn from_request(req: &GenerateTestRequest) -> Result<Self, AppError> {
        let mut wizard = Self::new();
        let subject = req
            .subject
            .ok_or_else(|| AppError::BadRequest(MISSING_SELECTION.to_string()))?;
        wizard.select_subject(subject);

        for chapter in &req.chapters {
            if wizard.chapters.iter().any(|c| c == chapter) {
                continue;
            }
            wizard.toggle_chapter(chapter)?;
        }

        wizard.set_difficulty(req.difficulty);
        if let Some(duration) = req.duration {
            wizard.set_duration(duration)?;
        }
        if let Some(count) = req.question_count {
            wizard.set_question_count(count)?;
        }
        Ok(wizard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapters_require_subject() {
        let mut wizard = Wizard::new();
        assert!(wizard.toggle_chapter("Algebra").is_err());
        assert!(!wizard.can_submit());
    }

    #[test]
    fn test_toggle_chapter() {
        let mut wizard = Wizard::new();
        wizard.select_subject(Subject::Mathematics);
        assert!(wizard.toggle_chapter("Algebra").unwrap());
        assert!(wizard.toggle_chapter("Calculus").unwrap());
        assert!(!wizard.toggle_chapter("Algebra").unwrap());
        assert_eq!(wizard.chapters(), &["Calculus"]);
    }

    #[test]
    fn test_chapter_must_belong_to_subject() {
        let mut wizard = Wizard::new();
        wizard.select_subject(Subject::Physics);
        assert!(matches!(
            wizard.toggle_chapter("Equilibrium"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_switching_subject_clears_chapters() {
        let mut wizard = Wizard::new();
        wizard.select_subject(Subject::Physics);
        wizard.toggle_chapter("Kinematics").unwrap();
        wizard.select_subject(Subject::Physics);
        assert_eq!(wizard.chapters().len(), 1);

        wizard.select_subject(Subject::Chemistry);
        assert!(wizard.chapters().is_empty());
        assert!(!wizard.can_submit());
    }

    #[test]
    fn test_finish_without_chapters() {
        let mut wizard = Wizard::new();
        wizard.select_subject(Subject::Chemistry);
        let err = wizard.finish().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == MISSING_SELECTION));
    }

    #[test]
    fn test_duration_and_count_bounds() {
        let mut wizard = Wizard::new();
        assert!(wizard.set_duration(45).is_err());
        assert!(wizard.set_duration(90).is_ok());
        assert!(wizard.set_question_count(0).is_err());
        assert!(wizard.set_question_count(101).is_err());
        assert!(wizard.set_question_count(10).is_ok());
    }

    #[test]
    fn test_finish_defaults() {
        let mut wizard = Wizard::new();
        wizard.select_subject(Subject::Physics);
        wizard.toggle_chapter("Laws of Motion").unwrap();
        wizard.set_difficulty(Difficulty::Hard);

        let draft = wizard.finish().unwrap();
        assert_eq!(draft.title(), "Physics Test");
        assert_eq!(draft.duration, 60);
        assert_eq!(draft.question_count, 30);
        assert_eq!(draft.difficulty, Difficulty::Hard);
        assert_eq!(draft.chapters, vec!["Laws of Motion".to_string()]);
    }

    #[test]
    fn test_from_request_ignores_duplicate_chapters() {
        let req = GenerateTestRequest {
            subject: Some(Subject::Chemistry),
            chapters: vec!["Thermodynamics".into(), "Thermodynamics".into(), "Equilibrium".into()],
            difficulty: Difficulty::Medium,
            duration: Some(30),
            question_count: None,
        };
        let draft = Wizard::from_request(&req).unwrap().finish().unwrap();
        assert_eq!(draft.chapters, vec!["Thermodynamics", "Equilibrium"]);
        assert_eq!(draft.duration, 30);
    }
}
