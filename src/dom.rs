use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    handler: impl FnMut() + 'static,
) {
    add_listener(document, element_id, "click", handler);
}

pub fn add_listener(
    document: &web::Document,
    element_id: &str,
    event: &str,
    mut handler: impl FnMut() + 'static,
) {
    match document.get_element_by_id(element_id) {
        Some(el) => {
            let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
            let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
        None => log::warn!("[dom] missing #{} for {}", element_id, event),
    }
}

/// Like [`add_listener`] but the handler sees the event, e.g. to call
/// `prevent_default` or check the target.
pub fn add_event_listener(
    document: &web::Document,
    element_id: &str,
    event: &str,
    mut handler: impl FnMut(web::Event) + 'static,
) {
    match document.get_element_by_id(element_id) {
        Some(el) => {
            let closure =
                Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
            let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
        None => log::warn!("[dom] missing #{} for {}", element_id, event),
    }
}

pub fn set_hidden(document: &web::Document, element_id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let cl = el.class_list();
        let _ = if hidden {
            cl.add_1(crate::constants::HIDDEN_CLASS)
        } else {
            cl.remove_1(crate::constants::HIDDEN_CLASS)
        };
    }
}

pub fn set_class_flag(document: &web::Document, element_id: &str, class: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = el.class_list().toggle_with_force(class, on);
    }
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_class_name(document: &web::Document, element_id: &str, class: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_class_name(class);
    }
}

pub fn input(document: &web::Document, element_id: &str) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

pub fn set_disabled(document: &web::Document, element_id: &str, disabled: bool) {
    let Some(el) = document.get_element_by_id(element_id) else {
        return;
    };
    if let Some(button) = el.dyn_ref::<web::HtmlButtonElement>() {
        button.set_disabled(disabled);
    } else if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        input.set_disabled(disabled);
    }
}

/// Creates `<tag class=.. style=..>text</tag>`.
pub fn create_node(
    document: &web::Document,
    tag: &str,
    class: &str,
    style: &str,
    text: &str,
) -> Option<web::Element> {
    let el = document.create_element(tag).ok()?;
    el.set_class_name(class);
    if !style.is_empty() {
        let _ = el.set_attribute("style", style);
    }
    if !text.is_empty() {
        el.set_text_content(Some(text));
    }
    Some(el)
}

pub fn clear_children(el: &web::Element) {
    el.set_inner_html("");
}
