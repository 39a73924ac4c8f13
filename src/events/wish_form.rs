use crate::constants::*;
use crate::dom;
use crate::format::can_submit;
use crate::SharedPage;
use birthday_core::WishError;
use web_sys as web;

pub fn wire_wish_form(document: &web::Document, page: &SharedPage) {
    // submit stays disabled until there is something to send
    dom::set_disabled(document, WISH_SUBMIT_ID, true);

    let doc = document.clone();
    dom::add_listener(document, WISH_INPUT_ID, "input", move || {
        let text = dom::input(&doc, WISH_INPUT_ID)
            .map(|i| i.value())
            .unwrap_or_default();
        dom::set_disabled(&doc, WISH_SUBMIT_ID, !can_submit(&text));
    });

    let doc = document.clone();
    let p = page.clone();
    dom::add_event_listener(document, WISH_FORM_ID, "submit", move |ev| {
        ev.prevent_default();
        let Some(input) = dom::input(&doc, WISH_INPUT_ID) else {
            return;
        };
        match p.borrow_mut().submit_wish(&input.value()) {
            Ok(id) => log::info!("[wish] submitting {:?}", id),
            Err(WishError::Empty) => log::debug!("[wish] ignoring blank wish"),
            Err(WishError::Busy) => log::debug!("[wish] still sending the previous wish"),
        }
    });
}
