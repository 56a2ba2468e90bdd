//! Multiple-choice quiz over a fixed question list.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct: usize,
}

impl QuizQuestion {
    pub fn new(question: &str, options: &[&str], correct: usize) -> Self {
        Self {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
        }
    }
}

/// The embedded question set shown on the page.
pub fn default_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion::new(
            "Quelle est la capitale du Japon ?",
            &["Kyoto", "Tokyo", "Osaka", "Hiroshima"],
            1,
        ),
        QuizQuestion::new(
            "Quel continent abrite le plus de langues différentes ?",
            &["Asie", "Afrique", "Europe", "Amérique"],
            1,
        ),
        QuizQuestion::new(
            "Quelle est la danse traditionnelle argentine ?",
            &["Flamenco", "Samba", "Tango", "Salsa"],
            2,
        ),
        QuizQuestion::new(
            "Dans quel pays trouve-t-on le Taj Mahal ?",
            &["Pakistan", "Inde", "Bangladesh", "Sri Lanka"],
            1,
        ),
        QuizQuestion::new(
            "Quelle est la langue la plus parlée au monde ?",
            &["Anglais", "Espagnol", "Chinois Mandarin", "Hindi"],
            2,
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// Not a JSON array of questions.
    Parse(String),
    /// `correct` does not index into `options`.
    CorrectOutOfRange { question: usize },
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Parse(msg) => write!(f, "quiz questions invalid: {msg}"),
            QuizError::CorrectOutOfRange { question } => {
                write!(f, "quiz question {question}: correct answer index out of range")
            }
        }
    }
}

impl std::error::Error for QuizError {}

/// Parses a JSON array of `{question, options, correct}` objects.
pub fn parse_questions(raw: &str) -> Result<Vec<QuizQuestion>, QuizError> {
    let questions: Vec<QuizQuestion> =
        serde_json::from_str(raw).map_err(|e| QuizError::Parse(e.to_string()))?;
    if let Some(question) = questions.iter().position(|q| q.correct >= q.options.len()) {
        return Err(QuizError::CorrectOutOfRange { question });
    }
    Ok(questions)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    AwaitingAnswer,
    Answered,
    Finished,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    /// Option to highlight as correct.
    pub correct: usize,
    /// Option the player picked; highlighted as wrong unless equal to `correct`.
    pub chosen: usize,
    pub is_correct: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResultTier {
    Excellent,
    Good,
    Beginner,
}

impl ResultTier {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 80 {
            ResultTier::Excellent
        } else if percentage >= 60 {
            ResultTier::Good
        } else {
            ResultTier::Beginner
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ResultTier::Excellent => "Excellent ! Vous êtes un vrai citoyen du monde ! 🌟",
            ResultTier::Good => "Bien joué ! Continuez à explorer les cultures ! 🌍",
            ResultTier::Beginner => "C'est un bon début ! Il y a tant à découvrir ! 🎓",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            ResultTier::Excellent => "🏆",
            ResultTier::Good => "🥇",
            ResultTier::Beginner => "📚",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub tier: ResultTier,
}

impl QuizResult {
    fn new(score: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            ((score as f64 / total as f64) * 100.0).round() as u32
        };
        Self {
            score,
            total,
            percentage,
            tier: ResultTier::from_percentage(percentage),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuizStep {
    /// Now showing the question at this index.
    Question(usize),
    Finished(QuizResult),
}

#[derive(Debug, Clone)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
    current: usize,
    score: usize,
    phase: QuizPhase,
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new(default_questions())
    }
}

impl Quiz {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let phase = if questions.is_empty() {
            QuizPhase::Finished
        } else {
            QuizPhase::AwaitingAnswer
        };
        Self {
            questions,
            current: 0,
            score: 0,
            phase,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            QuizPhase::Finished => None,
            _ => self.questions.get(self.current),
        }
    }

    /// Records an answer. Only the first answer to a question counts;
    /// out-of-range indices are ignored.
    pub fn select_answer(&mut self, index: usize) -> Option<AnswerFeedback> {
        if self.phase != QuizPhase::AwaitingAnswer {
            return None;
        }
        let question = self.questions.get(self.current)?;
        if index >= question.options.len() {
            return None;
        }

        let is_correct = index == question.correct;
        if is_correct {
            self.score += 1;
        }
        self.phase = QuizPhase::Answered;
        Some(AnswerFeedback {
            correct: question.correct,
            chosen: index,
            is_correct,
        })
    }

    /// Moves to the next question, or to the result after the last one.
    pub fn next(&mut self) -> QuizStep {
        if self.phase == QuizPhase::Finished {
            return QuizStep::Finished(QuizResult::new(self.score, self.total()));
        }

        self.current += 1;
        if self.current < self.questions.len() {
            self.phase = QuizPhase::AwaitingAnswer;
            QuizStep::Question(self.current)
        } else {
            self.phase = QuizPhase::Finished;
            let result = QuizResult::new(self.score, self.total());
            tracing::info!(
                score = result.score,
                total = result.total,
                percentage = result.percentage,
                "quiz finished"
            );
            QuizStep::Finished(result)
        }
    }

    pub fn result(&self) -> Option<QuizResult> {
        (self.phase == QuizPhase::Finished).then(|| QuizResult::new(self.score, self.total()))
    }

    pub fn restart(&mut self) {
        *self = Self::new(std::mem::take(&mut self.questions));
    }

    /// "Score: s/n" where n counts questions answered so far.
    pub fn score_line(&self) -> String {
        let answered = usize::from(self.phase == QuizPhase::Answered);
        let seen = (self.current + answered).min(self.total());
        format!("Score: {}/{}", self.score, seen)
    }
}
