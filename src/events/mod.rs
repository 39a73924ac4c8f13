//! Gesture wiring. Handlers only call into the page; the next frame renders
//! whatever changed.

mod wish_form;

use crate::constants::*;
use crate::dom;
use crate::SharedPage;
use wasm_bindgen::JsCast;
use web_sys as web;

pub use wish_form::wire_wish_form;

pub fn wire_buttons(document: &web::Document, page: &SharedPage) {
    let p = page.clone();
    dom::add_click_listener(document, SURPRISE_BUTTON_ID, move || {
        if p.borrow_mut().click_surprise() {
            log::info!("[events] surprise!");
        }
    });

    let p = page.clone();
    dom::add_click_listener(document, MUSIC_TOGGLE_ID, move || {
        let playing = p.borrow_mut().toggle_music();
        log::info!("[events] music {}", if playing { "on" } else { "off" });
    });

    let p = page.clone();
    dom::add_click_listener(document, CAKE_STAGE_ID, move || {
        if !p.borrow_mut().click_cake() {
            log::debug!("[events] cake busy");
        }
    });

    for id in [CAKE_ID, CUT_BUTTON_ID] {
        let p = page.clone();
        dom::add_click_listener(document, id, move || {
            p.borrow_mut().cut_cake();
        });
    }
}

pub fn wire_wish_card(document: &web::Document, page: &SharedPage) {
    let p = page.clone();
    dom::add_click_listener(document, WISH_CARD_CLOSE_ID, move || {
        p.borrow_mut().close_card();
    });

    // only clicks on the backdrop itself, not ones bubbling up from the card
    let p = page.clone();
    dom::add_event_listener(document, WISH_CARD_BACKDROP_ID, "click", move |ev| {
        let on_backdrop = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .map(|el| el.id() == WISH_CARD_BACKDROP_ID)
            .unwrap_or(false);
        if on_backdrop {
            p.borrow_mut().close_card();
        }
    });
}

/// Tears the page down when the browser unloads it.
pub fn wire_pagehide(page: &SharedPage) {
    let Some(window) = web::window() else {
        return;
    };
    let p = page.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        if let Ok(mut page) = p.try_borrow_mut() {
            page.unmount();
        }
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    closure.forget();
}
