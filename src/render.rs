//! Mirrors greeting state into the DOM.
//!
//! The page never reads the DOM back. Each frame the renderer drains the
//! registry's change list and the shell events and patches only what they
//! name.

use crate::constants::*;
use crate::dom;
use crate::format;
use crate::overlay;
use crate::Page;
use birthday_core::{AnimationStage, ElementKind, Millis, RegistryChange, ShellEvent};
use wasm_bindgen::JsValue;
use web_sys as web;

pub struct Renderer {
    document: web::Document,
    /// Wall-clock epoch milliseconds at page clock zero.
    epoch_ms: f64,
    next_clock_refresh: Millis,
    wishes_drawn: bool,
}

impl Renderer {
    pub fn new(document: web::Document, page_now: Millis) -> Self {
        Self {
            document,
            epoch_ms: js_sys::Date::now() - page_now as f64,
            next_clock_refresh: 0,
            wishes_drawn: false,
        }
    }

    pub fn apply(&mut self, page: &mut Page) {
        let now = page.now();
        if !self.wishes_drawn {
            self.render_wishes(page);
            self.wishes_drawn = true;
        }
        for change in page.registry_mut().drain_changes() {
            self.apply_change(page, change);
        }
        for event in page.drain_events() {
            self.apply_event(page, event);
        }
        if now >= self.next_clock_refresh {
            self.refresh_clock();
            self.next_clock_refresh = now + CLOCK_REFRESH_MS;
        }
    }

    fn apply_change(&self, page: &Page, change: RegistryChange) {
        match change {
            RegistryChange::Spawned(id) => {
                let Some(el) = page.registry().get(id) else {
                    return;
                };
                let Some(layer) = self.document.get_element_by_id(format::layer_id(&el.kind))
                else {
                    return;
                };
                let Some(node) = dom::create_node(
                    &self.document,
                    "div",
                    &format::element_class(&el.kind),
                    &format::element_style(el),
                    format::element_text(&el.kind),
                ) else {
                    return;
                };
                node.set_id(&format::dom_id(id));
                if let ElementKind::ConfettiBurst { particles } = el.kind {
                    for piece in format::burst_pieces(particles) {
                        if let Some(child) =
                            dom::create_node(&self.document, "span", &piece.class, &piece.style, "")
                        {
                            let _ = node.append_child(&child);
                        }
                    }
                }
                let _ = layer.append_child(&node);
            }
            RegistryChange::Expired(id) => {
                if let Some(node) = self.document.get_element_by_id(&format::dom_id(id)) {
                    node.remove();
                }
            }
        }
    }

    fn apply_event(&self, page: &Page, event: ShellEvent) {
        let doc = &self.document;
        match event {
            ShellEvent::CardShown => {
                overlay::show(doc);
                dom::set_disabled(doc, SURPRISE_BUTTON_ID, true);
            }
            ShellEvent::CardHidden => overlay::hide(doc),
            ShellEvent::MusicChanged(playing) => {
                dom::set_hidden(doc, MUSIC_TOGGLE_ID, false);
                dom::set_text(doc, MUSIC_TOGGLE_ID, format::music_label(playing));
            }
            ShellEvent::CakeActivated => self.show_stage(AnimationStage::Idle),
            ShellEvent::StageChanged(stage) => self.show_stage(stage),
            ShellEvent::CakeCompleted => log::info!("[render] cake sequence finished"),
            ShellEvent::CakeReset => self.show_stage(AnimationStage::Idle),
            ShellEvent::WishSubmitting => self.set_submitting(true),
            ShellEvent::WishAdded(_) => {
                self.set_submitting(false);
                if let Some(input) = dom::input(doc, WISH_INPUT_ID) {
                    input.set_value("");
                }
                dom::set_disabled(doc, WISH_SUBMIT_ID, true);
                self.render_wishes(page);
            }
            ShellEvent::SlicesChanged(n) => {
                dom::set_text(doc, SLICE_BADGE_ID, &n.to_string());
                dom::set_hidden(doc, SLICE_BADGE_ID, n == 0);
                dom::set_text(doc, SLICE_CAPTION_ID, &format::slice_caption(n));
                dom::set_class_flag(doc, CAKE_ID, CUTTING_CLASS, true);
            }
            ShellEvent::CutFinished => dom::set_class_flag(doc, CAKE_ID, CUTTING_CLASS, false),
        }
    }

    fn show_stage(&self, stage: AnimationStage) {
        dom::set_class_name(&self.document, CAKE_STAGE_ID, &format::cake_class(stage));
        let Some(stage_el) = self.document.get_element_by_id(CAKE_STAGE_ID) else {
            return;
        };
        dom::clear_children(&stage_el);
        if matches!(stage, AnimationStage::Idle | AnimationStage::Vibrating) {
            if let Some(cake) = dom::create_node(&self.document, "div", "cake-body", "", "🎂") {
                let _ = stage_el.append_child(&cake);
            }
        }
        for piece in format::stage_pieces(stage) {
            if let Some(node) =
                dom::create_node(&self.document, "div", &piece.class, &piece.style, piece.text)
            {
                let _ = stage_el.append_child(&node);
            }
        }
    }

    fn set_submitting(&self, busy: bool) {
        dom::set_disabled(&self.document, WISH_INPUT_ID, busy);
        dom::set_hidden(&self.document, WISH_SPINNER_ID, !busy);
        if busy {
            dom::set_disabled(&self.document, WISH_SUBMIT_ID, true);
        }
    }

    fn render_wishes(&self, page: &Page) {
        let Some(list) = self.document.get_element_by_id(WISH_LIST_ID) else {
            return;
        };
        dom::clear_children(&list);
        if let Some(empty) = format::empty_wishes_piece(page.wishes().len()) {
            if let Some(li) = dom::create_node(&self.document, "li", &empty.class, "", empty.text) {
                let _ = list.append_child(&li);
            }
            return;
        }
        for wish in page.wishes().wishes() {
            let Some(li) = dom::create_node(&self.document, "li", "wish", "", "") else {
                continue;
            };
            if let Some(text) = dom::create_node(&self.document, "span", "wish-text", "", &wish.message) {
                let _ = li.append_child(&text);
            }
            let at = js_sys::Date::new(&JsValue::from_f64(self.epoch_ms + wish.timestamp as f64));
            let time = format::clock_text(at.get_hours(), at.get_minutes());
            if let Some(stamp) = dom::create_node(&self.document, "span", "wish-time", "", &time) {
                let _ = li.append_child(&stamp);
            }
            let _ = list.append_child(&li);
        }
    }

    fn refresh_clock(&self) {
        let now = js_sys::Date::new_0();
        dom::set_text(
            &self.document,
            TIME_WIDGET_ID,
            &format::clock_text(now.get_hours(), now.get_minutes()),
        );
    }
}
