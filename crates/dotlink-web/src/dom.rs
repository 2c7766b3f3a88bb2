use std::cell::Cell;
use std::rc::Rc;

use dotlink_engine::{GameError, LevelConfig, Modal, Presenter, Result, UiAction};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// Class toggled on the time display while time is low.
const LOW_TIME_CLASS: &str = "blink";

type ClickHandler = Closure<dyn FnMut(web_sys::MouseEvent)>;

/// Page elements the game writes to, looked up once.
struct Displays {
    time: HtmlElement,
    dots_remaining: Element,
    target: Element,
    initial_time: Element,
    level: Element,
    modal: HtmlElement,
    title: Element,
    message: Element,
    next_button: HtmlElement,
    replay_button: HtmlElement,
    // Must outlive the listeners on the two buttons.
    _handlers: Vec<ClickHandler>,
}

/// Presenter that writes into the host page's DOM.
pub struct DomPresenter {
    displays: Option<Displays>,
    /// Action fired by the replay button: retry, or play again at the end.
    replay_action: Rc<Cell<UiAction>>,
}

impl DomPresenter {
    pub fn new() -> Self {
        Self {
            displays: None,
            replay_action: Rc::new(Cell::new(UiAction::Retry)),
        }
    }
}

impl Default for DomPresenter {
    fn default() -> Self {
        Self::new()
    }
}

fn by_id(doc: &Document, id: &'static str) -> Result<Element> {
    doc.get_element_by_id(id)
        .ok_or(GameError::MissingDisplay(id))
}

fn by_selector(doc: &Document, selector: &'static str) -> Result<Element> {
    doc.query_selector(selector)
        .ok()
        .flatten()
        .ok_or(GameError::MissingDisplay(selector))
}

fn html(element: Element, name: &'static str) -> Result<HtmlElement> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| GameError::MissingDisplay(name))
}

fn set_display(element: &HtmlElement, value: &str) {
    if element.style().set_property("display", value).is_err() {
        log::warn!("could not set display {} on {}", value, element.id());
    }
}

fn on_click(button: &HtmlElement, action: impl Fn() -> UiAction + 'static) -> ClickHandler {
    let handler = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        crate::dispatch_action(action());
    }) as Box<dyn FnMut(_)>);
    if button
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("could not attach click handler to {}", button.id());
    }
    handler
}

impl Displays {
    /// Resolve every element. Nothing is attached yet, so a missing element
    /// leaves the page as it was.
    fn lookup(doc: &Document) -> Result<Self> {
        Ok(Self {
            time: html(by_selector(doc, ".time-display")?, ".time-display")?,
            dots_remaining: by_selector(doc, ".dots-remaining-display")?,
            target: by_id(doc, "target-dots")?,
            initial_time: by_id(doc, "initial-time")?,
            level: by_id(doc, "current-level")?,
            modal: html(by_id(doc, "level-modal")?, "level-modal")?,
            title: by_id(doc, "modal-title")?,
            message: by_id(doc, "modal-message")?,
            next_button: html(by_id(doc, "next-level-btn")?, "next-level-btn")?,
            replay_button: html(by_id(doc, "replay-btn")?, "replay-btn")?,
            _handlers: Vec::new(),
        })
    }

    fn attach(&mut self, replay_action: Rc<Cell<UiAction>>) {
        self._handlers = vec![
            on_click(&self.next_button, || UiAction::NextLevel),
            on_click(&self.replay_button, move || replay_action.get()),
        ];
    }
}

impl Presenter for DomPresenter {
    fn bind(&mut self) -> Result<()> {
        if self.displays.is_some() {
            return Ok(());
        }
        let doc = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(GameError::MissingDisplay("document"))?;

        let mut displays = Displays::lookup(&doc)?;
        displays.attach(Rc::clone(&self.replay_action));
        self.displays = Some(displays);
        log::debug!("displays bound");
        Ok(())
    }

    fn show_level(&mut self, config: &LevelConfig) {
        if let Some(d) = &self.displays {
            d.target.set_text_content(Some(&config.target.to_string()));
            d.initial_time
                .set_text_content(Some(&config.initial_time.to_string()));
            d.level.set_text_content(Some(&config.level.to_string()));
        }
    }

    fn show_remaining_time(&mut self, seconds: u32) {
        if let Some(d) = &self.displays {
            d.time.set_text_content(Some(&seconds.to_string()));
        }
    }

    fn show_dots_remaining(&mut self, count: u32) {
        if let Some(d) = &self.displays {
            d.dots_remaining.set_text_content(Some(&count.to_string()));
        }
    }

    fn set_low_time(&mut self, on: bool) {
        let Some(d) = &self.displays else {
            return;
        };
        let classes = d.time.class_list();
        let toggled = if on {
            classes.add_1(LOW_TIME_CLASS)
        } else {
            classes.remove_1(LOW_TIME_CLASS)
        };
        if toggled.is_err() {
            log::warn!("could not toggle low-time cue");
        }
    }

    fn show_modal(&mut self, modal: &Modal) {
        let Some(d) = &self.displays else {
            return;
        };
        d.title.set_text_content(Some(&modal.title));
        d.message.set_text_content(Some(&modal.message));

        let (shown, hidden) = match modal.button.action {
            UiAction::NextLevel => (&d.next_button, &d.replay_button),
            action => {
                self.replay_action.set(action);
                (&d.replay_button, &d.next_button)
            }
        };
        shown.set_text_content(Some(&modal.button.label));
        set_display(shown, "inline-block");
        set_display(hidden, "none");
        set_display(&d.modal, "block");
    }

    fn hide_modal(&mut self) {
        if let Some(d) = &self.displays {
            set_display(&d.modal, "none");
        }
    }
}
