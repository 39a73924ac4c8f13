use crate::constants::{HIDDEN_CLASS, WISH_CARD_ID, WISH_INPUT_ID};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Reveals the wish card modal and focuses its input.
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(WISH_CARD_ID) {
        let _ = el.class_list().remove_1(HIDDEN_CLASS);
        // fallback for environments without the stylesheet
        let _ = el.set_attribute("style", "");
    }
    if let Some(input) = document
        .get_element_by_id(WISH_INPUT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        let _ = input.focus();
    }
}

pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(WISH_CARD_ID) {
        let _ = el.class_list().add_1(HIDDEN_CLASS);
        let _ = el.set_attribute("style", "display:none");
    }
}
