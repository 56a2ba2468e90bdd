//! Browser shell for the globe explorer.
//!
//! The host page calls [`init`] once, forwards pointer events and
//! `requestAnimationFrame` ticks to the exported entry points, and routes
//! clicks on search results and quiz buttons back in through
//! [`select_country`] and the `quiz_*` functions.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use catalog::{CatalogError, DataOrigin, REST_COUNTRIES_URL, load_or_fallback};
use explore::{Quiz, QuizStep, Session};
use foundation::math::Vec2;
use gloo_net::http::Request;
use scene::{GlobeConfig, GlobeError, PointerEvent, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

mod canvas;
mod dom;

use canvas::Canvas2dRenderer;
use dom::DomDetailView;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// The quiz does not depend on country data, so it is ready before the
/// fetch settles.
#[derive(Default)]
struct PageState {
    quiz: Quiz,
    session: Option<Session>,
    renderer: Option<Canvas2dRenderer>,
    canvas: Option<HtmlCanvasElement>,
    container: Option<HtmlElement>,
}

thread_local! {
    static STATE: RefCell<PageState> = RefCell::new(PageState::default());
}

fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&mut PageState) -> R,
{
    STATE.with(|state| f(&mut state.borrow_mut()))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    if let Err(err) = quiz_restart() {
        tracing::warn!(error = ?err, "quiz markup unavailable");
    }
    Ok(())
}

async fn fetch_directory(url: &str) -> Result<String, CatalogError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| CatalogError::Fetch(e.to_string()))?;
    if !resp.ok() {
        return Err(CatalogError::Fetch(format!("HTTP {}", resp.status())));
    }
    resp.text()
        .await
        .map_err(|e| CatalogError::Fetch(e.to_string()))
}

fn parse_config(config_json: Option<String>) -> GlobeConfig {
    let Some(raw) = config_json.filter(|raw| !raw.trim().is_empty()) else {
        return GlobeConfig::default();
    };
    match GlobeConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            let err = GlobeError::Config(err.to_string());
            tracing::warn!(error = %err, "using default globe config");
            GlobeConfig::default()
        }
    }
}

/// Loads country data, then builds the globe inside `container_id`.
///
/// `config_json` optionally overrides [`GlobeConfig`] fields.
#[wasm_bindgen]
pub fn init(container_id: String, config_json: Option<String>) {
    let config = parse_config(config_json);
    spawn_local(async move {
        let loaded = load_or_fallback(fetch_directory(REST_COUNTRIES_URL).await);
        with_state(|s| s.session = Some(Session::new(loaded)));

        if let Err(err) = init_globe(&container_id, config) {
            tracing::error!(error = %err, "globe unavailable, showing text fallback");
            show_globe_fallback(&container_id);
        }
    });
}

fn init_globe(container_id: &str, config: GlobeConfig) -> Result<(), GlobeError> {
    let render_err = |e: JsValue| GlobeError::RenderInit(format!("{e:?}"));

    let doc = dom::document().map_err(render_err)?;
    let container = dom::element(&doc, container_id).map_err(render_err)?;
    let canvas = doc
        .create_element("canvas")
        .map_err(render_err)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| GlobeError::RenderInit("canvas element unavailable".to_string()))?;
    let ctx = canvas
        .get_context("2d")
        .map_err(render_err)?
        .ok_or_else(|| GlobeError::RenderInit("2d context unavailable".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| GlobeError::RenderInit("2d context unavailable".to_string()))?;
    container.append_child(&canvas).map_err(render_err)?;

    let viewport = container_viewport(&container);
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);

    with_state(|s| {
        let session = s
            .session
            .as_mut()
            .ok_or_else(|| GlobeError::RenderInit("no country data".to_string()))?;
        session.attach_globe(config, viewport)?;
        s.renderer = Some(Canvas2dRenderer::new(ctx, viewport));
        s.canvas = Some(canvas);
        s.container = Some(container);
        Ok(())
    })
}

fn container_viewport(container: &HtmlElement) -> Viewport {
    Viewport::new(
        f64::from(container.client_width()),
        f64::from(container.client_height()),
    )
}

fn show_globe_fallback(container_id: &str) {
    let countries = with_state(|s| s.session.as_ref().map(|session| session.catalog().len()))
        .unwrap_or(0);
    let shown = dom::document()
        .and_then(|doc| dom::element(&doc, container_id))
        .and_then(|container| dom::render_globe_fallback(&container, countries));
    if let Err(err) = shown {
        tracing::error!(error = ?err, "could not render globe fallback");
    }
}

/// One animation frame. Call from `requestAnimationFrame`.
#[wasm_bindgen]
pub fn advance_frame() {
    with_state(|s| {
        let PageState {
            session, renderer, ..
        } = s;
        if let (Some(globe), Some(renderer)) =
            (session.as_mut().and_then(Session::globe_mut), renderer.as_mut())
        {
            globe.frame(renderer);
        }
    });
}

/// Re-reads the container size.
#[wasm_bindgen]
pub fn resize() {
    with_state(|s| {
        let Some(container) = s.container.as_ref() else {
            return;
        };
        let viewport = container_viewport(container);
        if let Some(canvas) = &s.canvas {
            canvas.set_width(viewport.width as u32);
            canvas.set_height(viewport.height as u32);
        }
        if let Some(renderer) = s.renderer.as_mut() {
            renderer.set_viewport(viewport);
        }
        if let Some(globe) = s.session.as_mut().and_then(Session::globe_mut) {
            globe.resize(viewport.width, viewport.height);
        }
    });
}

/// Looks the panel up on demand; a page without it still rotates.
fn detail_view() -> Option<DomDetailView> {
    dom::document()
        .and_then(|doc| DomDetailView::from_document(&doc))
        .map_err(|err| tracing::warn!(error = ?err, "country panel unavailable"))
        .ok()
}

fn dispatch_pointer(event: PointerEvent) -> Result<(), JsValue> {
    let response = with_state(|s| {
        s.session
            .as_mut()
            .map(|session| session.handle_pointer(event, detail_view))
    });
    let Some(response) = response else {
        return Ok(());
    };
    if let Some(cursor) = response.cursor {
        with_state(|s| {
            if let Some(container) = &s.container {
                let _ = container.style().set_property("cursor", cursor.css());
            }
        });
    }
    Ok(())
}

/// Pointer coordinates are pixels relative to the globe container.
#[wasm_bindgen]
pub fn pointer_down(x_px: f64, y_px: f64) -> Result<(), JsValue> {
    dispatch_pointer(PointerEvent::Down(Vec2::new(x_px, y_px)))
}

#[wasm_bindgen]
pub fn pointer_move(x_px: f64, y_px: f64) -> Result<(), JsValue> {
    dispatch_pointer(PointerEvent::Move(Vec2::new(x_px, y_px)))
}

#[wasm_bindgen]
pub fn pointer_up() -> Result<(), JsValue> {
    dispatch_pointer(PointerEvent::Up)
}

#[wasm_bindgen]
pub fn pointer_click(x_px: f64, y_px: f64) -> Result<(), JsValue> {
    dispatch_pointer(PointerEvent::Click(Vec2::new(x_px, y_px)))
}

#[wasm_bindgen]
pub fn reset_globe() -> Result<(), JsValue> {
    with_state(|s| {
        if let Some(session) = s.session.as_mut() {
            session.reset_globe(detail_view);
        }
    });
    dom::render_auto_rotate_button(&dom::document()?, true);
    Ok(())
}

/// Returns the new auto-rotation flag.
#[wasm_bindgen]
pub fn toggle_auto_rotation() -> Result<bool, JsValue> {
    let enabled = with_state(|s| s.session.as_mut().and_then(Session::toggle_auto_rotation));
    let Some(enabled) = enabled else {
        return Ok(false);
    };
    dom::render_auto_rotate_button(&dom::document()?, enabled);
    Ok(enabled)
}

/// Filters countries for the search box and fills `search-results`.
#[wasm_bindgen]
pub fn search_countries(query: &str) -> Result<(), JsValue> {
    let outcome = with_state(|s| s.session.as_ref().map(|session| session.search(query)));
    match outcome {
        Some(outcome) => dom::render_search_results(&dom::document()?, &outcome),
        None => Ok(()),
    }
}

#[wasm_bindgen]
pub fn close_search() -> Result<(), JsValue> {
    dom::close_search_results(&dom::document()?)
}

/// Opens a country in the info panel and turns the globe toward it.
#[wasm_bindgen]
pub fn select_country(key: &str) -> Result<bool, JsValue> {
    let doc = dom::document()?;
    let mut view = DomDetailView::from_document(&doc)?;
    let selected = with_state(|s| {
        s.session
            .as_mut()
            .is_some_and(|session| session.select_country(key, &mut view))
    });
    dom::close_search_results(&doc)?;
    Ok(selected)
}

#[wasm_bindgen]
pub fn quiz_select_answer(index: usize) -> Result<(), JsValue> {
    let doc = dom::document()?;
    with_state(|s| match s.quiz.select_answer(index) {
        Some(feedback) => dom::render_feedback(&doc, &s.quiz, feedback),
        None => Ok(()),
    })
}

#[wasm_bindgen]
pub fn quiz_next() -> Result<(), JsValue> {
    let doc = dom::document()?;
    with_state(|s| match s.quiz.next() {
        QuizStep::Question(_) => dom::render_question(&doc, &s.quiz),
        QuizStep::Finished(result) => dom::render_result(&doc, result),
    })
}

#[wasm_bindgen]
pub fn quiz_restart() -> Result<(), JsValue> {
    let doc = dom::document()?;
    dom::reset_quiz_markup(&doc)?;
    with_state(|s| {
        s.quiz.restart();
        dom::render_question(&doc, &s.quiz)
    })
}

/// Number of countries loaded, and whether they came from the embedded table.
#[wasm_bindgen]
pub fn data_summary() -> JsValue {
    let summary = with_state(|s| {
        s.session
            .as_ref()
            .map(|session| (session.catalog().len(), session.origin()))
    });
    let Some((countries, origin)) = summary else {
        return JsValue::NULL;
    };
    let out = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &out,
        &JsValue::from_str("countries"),
        &JsValue::from_f64(countries as f64),
    );
    let _ = js_sys::Reflect::set(
        &out,
        &JsValue::from_str("fallback"),
        &JsValue::from_bool(origin == DataOrigin::Fallback),
    );
    out.into()
}

/// Fetches the directory again and swaps it in, rebuilding the markers.
#[wasm_bindgen]
pub fn reload_countries() {
    spawn_local(async {
        let loaded = load_or_fallback(fetch_directory(REST_COUNTRIES_URL).await);
        let replaced = with_state(|s| match s.session.as_mut() {
            Some(session) => session.replace_catalog(loaded),
            None => {
                s.session = Some(Session::new(loaded));
                Ok(())
            }
        });
        if let Err(err) = replaced {
            tracing::warn!(error = %err, "keeping previous countries");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::PageState;
    use explore::QuizPhase;
    use pretty_assertions::assert_eq;

    #[test]
    fn quiz_is_playable_before_countries_load() {
        let mut state = PageState::default();
        assert!(state.session.is_none());
        assert_eq!(state.quiz.phase(), QuizPhase::AwaitingAnswer);
        assert!(state.quiz.current_question().is_some());

        let feedback = state.quiz.select_answer(0).expect("first answer accepted");
        assert_eq!(feedback.chosen, 0);
        assert_eq!(state.quiz.phase(), QuizPhase::Answered);
    }
}
