//! Plain-text rendering of the explorer panels.

use std::io::{self, BufRead, Write};

use explore::{DetailSection, DetailView, Quiz, QuizResult, QuizStep, SearchOutcome, NO_MATCH_MESSAGE};

/// Writes the info panel as text. The first write error is kept and
/// reported by [`TerminalView::finish`].
pub struct TerminalView<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn write_line(&mut self, line: &str) {
        if self.error.is_none() {
            if let Err(err) = writeln!(self.out, "{line}") {
                self.error = Some(err);
            }
        }
    }

    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.out),
        }
    }
}

impl<W: Write> DetailView for TerminalView<W> {
    fn set_title(&mut self, title: &str) {
        self.write_line(title);
        self.write_line(&"=".repeat(title.chars().count().max(3)));
    }

    fn set_description(&mut self, text: &str) {
        self.write_line(text);
    }

    fn set_details(&mut self, sections: &[DetailSection]) {
        for section in sections {
            self.write_line("");
            self.write_line(&format!("{} {}:", section.icon, section.label));
            for line in &section.lines {
                self.write_line(&format!("  {line}"));
            }
        }
    }

    fn set_visible(&mut self, _visible: bool) {}

    fn scroll_into_view(&mut self) {}
}

pub fn write_search(out: &mut impl Write, outcome: &SearchOutcome) -> io::Result<()> {
    match outcome {
        SearchOutcome::TooShort => writeln!(out, "Tapez au moins 2 caractères."),
        SearchOutcome::NoMatch => writeln!(out, "{NO_MATCH_MESSAGE}"),
        SearchOutcome::Matches(hits) => {
            for hit in hits {
                writeln!(out, "{}\t{}", hit.key, hit.display_name)?;
            }
            Ok(())
        }
    }
}

pub fn write_result(out: &mut impl Write, result: &QuizResult) -> io::Result<()> {
    writeln!(out, "Quiz Terminé ! {}", result.tier.badge())?;
    writeln!(
        out,
        "Score Final: {}/{} ({}%)",
        result.score, result.total, result.percentage
    )?;
    writeln!(out, "{}", result.tier.message())
}

/// Runs the quiz over line-based input; answers are 1-based option numbers.
/// Returns `None` if input ends before the last question.
pub fn run_quiz(
    quiz: &mut Quiz,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<QuizResult>> {
    if let Some(result) = quiz.result() {
        return Ok(Some(result));
    }

    let mut line = String::new();
    loop {
        let Some(question) = quiz.current_question().cloned() else {
            return Ok(quiz.result());
        };
        writeln!(out)?;
        writeln!(out, "{}", question.question)?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(out, "  {}. {option}", i + 1)?;
        }

        let feedback = loop {
            write!(out, "> ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let picked = line.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1));
            if let Some(feedback) = picked.and_then(|index| quiz.select_answer(index)) {
                break feedback;
            }
            writeln!(out, "Choisissez un nombre entre 1 et {}.", question.options.len())?;
        };

        if feedback.is_correct {
            writeln!(out, "✔ Correct")?;
        } else {
            writeln!(out, "✘ Réponse: {}", question.options[feedback.correct])?;
        }
        writeln!(out, "{}", quiz.score_line())?;

        if let QuizStep::Finished(result) = quiz.next() {
            return Ok(Some(result));
        }
    }
}
