//! DOM writers for the panels around the globe.

use explore::{
    AnswerFeedback, DetailSection, DetailView, NO_MATCH_MESSAGE, Quiz, QuizResult, SearchOutcome,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn element(doc: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
}

fn create(doc: &Document, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if !text.is_empty() {
        el.set_text_content(Some(text));
    }
    Ok(el)
}

fn set_display(el: &HtmlElement, value: &str) {
    let _ = el.style().set_property("display", value);
}

/// The `country-info` panel.
pub struct DomDetailView {
    name: HtmlElement,
    description: HtmlElement,
    details: HtmlElement,
    panel: HtmlElement,
}

impl DomDetailView {
    pub fn from_document(doc: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            name: element(doc, "country-name")?,
            description: element(doc, "country-description")?,
            details: element(doc, "country-details")?,
            panel: element(doc, "country-info")?,
        })
    }

    fn write_sections(&self, sections: &[DetailSection]) -> Result<(), JsValue> {
        let doc = document()?;
        self.details.set_inner_html("");
        for section in sections {
            let item = create(&doc, "div", "", "")?;
            let heading = create(
                &doc,
                "strong",
                "",
                &format!("{} {}:", section.icon, section.label),
            )?;
            item.append_child(&heading)?;
            for line in &section.lines {
                let br = doc.create_element("br")?;
                item.append_child(&br)?;
                item.append_child(&doc.create_text_node(line))?;
            }
            self.details.append_child(&item)?;
        }
        Ok(())
    }
}

impl DetailView for DomDetailView {
    fn set_title(&mut self, title: &str) {
        self.name.set_text_content(Some(title));
    }

    fn set_description(&mut self, text: &str) {
        self.description.set_text_content(Some(text));
    }

    fn set_details(&mut self, sections: &[DetailSection]) {
        if let Err(err) = self.write_sections(sections) {
            tracing::warn!(error = ?err, "could not write country details");
        }
    }

    fn set_visible(&mut self, visible: bool) {
        set_display(&self.panel, if visible { "block" } else { "none" });
    }

    fn scroll_into_view(&mut self) {
        self.panel.scroll_into_view();
    }
}

/// Fills `search-results`. Items carry `data-country` for the host's click handler.
pub fn render_search_results(doc: &Document, outcome: &SearchOutcome) -> Result<(), JsValue> {
    let results = element(doc, "search-results")?;
    match outcome {
        SearchOutcome::TooShort => {
            results.class_list().remove_1("active")?;
        }
        SearchOutcome::NoMatch => {
            results.set_inner_html("");
            let item = create(doc, "div", "search-result-item", NO_MATCH_MESSAGE)?;
            results.append_child(&item)?;
            results.class_list().add_1("active")?;
        }
        SearchOutcome::Matches(hits) => {
            results.set_inner_html("");
            for hit in hits {
                let item = create(doc, "div", "search-result-item", &hit.display_name)?;
                item.set_attribute("data-country", &hit.key)?;
                results.append_child(&item)?;
            }
            results.class_list().add_1("active")?;
        }
    }
    Ok(())
}

pub fn close_search_results(doc: &Document) -> Result<(), JsValue> {
    element(doc, "search-results")?.class_list().remove_1("active")
}

const QUIZ_MARKUP: &str = r#"<div class="question" id="question-text"></div>
<div class="quiz-options" id="quiz-options"></div>
<button class="cta-button" id="next-btn" data-quiz-action="next" style="display: none;">Question Suivante</button>
<div class="quiz-score" id="quiz-score">Score: 0/0</div>"#;

/// Writes the current question. Option buttons carry `data-option`.
pub fn render_question(doc: &Document, quiz: &Quiz) -> Result<(), JsValue> {
    let Some(question) = quiz.current_question() else {
        return Ok(());
    };
    element(doc, "question-text")?.set_text_content(Some(&question.question));

    let options = element(doc, "quiz-options")?;
    options.set_inner_html("");
    for (index, option) in question.options.iter().enumerate() {
        let button = create(doc, "button", "quiz-option", option)?;
        button.set_attribute("data-option", &index.to_string())?;
        options.append_child(&button)?;
    }

    set_display(&element(doc, "next-btn")?, "none");
    render_score(doc, quiz)
}

pub fn render_feedback(doc: &Document, quiz: &Quiz, feedback: AnswerFeedback) -> Result<(), JsValue> {
    let buttons = element(doc, "quiz-options")?.children();
    if let Some(correct) = buttons.item(feedback.correct as u32) {
        correct.class_list().add_1("correct")?;
    }
    if !feedback.is_correct {
        if let Some(chosen) = buttons.item(feedback.chosen as u32) {
            chosen.class_list().add_1("incorrect")?;
        }
    }
    set_display(&element(doc, "next-btn")?, "inline-block");
    render_score(doc, quiz)
}

pub fn render_score(doc: &Document, quiz: &Quiz) -> Result<(), JsValue> {
    element(doc, "quiz-score")?.set_text_content(Some(&quiz.score_line()));
    Ok(())
}

pub fn render_result(doc: &Document, result: QuizResult) -> Result<(), JsValue> {
    let content = element(doc, "quiz-content")?;
    content.set_inner_html("");
    let title = create(doc, "h3", "", "Quiz Terminé !")?;
    let badge = create(doc, "div", "quiz-badge", result.tier.badge())?;
    let score = create(
        doc,
        "div",
        "quiz-score",
        &format!(
            "Score Final: {}/{} ({}%)",
            result.score, result.total, result.percentage
        ),
    )?;
    let message = create(doc, "p", "", result.tier.message())?;
    for el in [&title, &badge, &score, &message] {
        content.append_child(el)?;
    }
    let restart = create(doc, "button", "cta-button", "Recommencer le Quiz")?;
    restart.set_attribute("data-quiz-action", "restart")?;
    content.append_child(&restart)?;
    Ok(())
}

/// Puts the question layout back after a result screen.
pub fn reset_quiz_markup(doc: &Document) -> Result<(), JsValue> {
    element(doc, "quiz-content")?.set_inner_html(QUIZ_MARKUP);
    Ok(())
}

pub fn render_auto_rotate_button(doc: &Document, enabled: bool) {
    if let Ok(button) = element(doc, "auto-rotate-btn") {
        button.set_text_content(Some(if enabled {
            "⏸️ Pause Rotation"
        } else {
            "▶️ Démarrer Rotation"
        }));
    }
}

pub fn fallback_message(countries: usize) -> String {
    format!("Globe 3D en cours de chargement... ({countries} pays chargés)")
}

/// Replaces the globe container when the 3D view cannot start.
pub fn render_globe_fallback(container: &HtmlElement, countries: usize) -> Result<(), JsValue> {
    let doc = document()?;
    container.set_inner_html("");
    let wrapper = create(&doc, "div", "globe-fallback", "")?;
    let icon = create(&doc, "div", "globe-fallback-icon", "🌍")?;
    let text = create(&doc, "p", "", &fallback_message(countries))?;
    wrapper.append_child(&icon)?;
    wrapper.append_child(&text)?;
    container.append_child(&wrapper)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::fallback_message;
    use pretty_assertions::assert_eq;

    #[test]
    fn fallback_message_counts_loaded_countries() {
        assert_eq!(
            fallback_message(12),
            "Globe 3D en cours de chargement... (12 pays chargés)"
        );
        assert_eq!(
            fallback_message(0),
            "Globe 3D en cours de chargement... (0 pays chargés)"
        );
    }
}
