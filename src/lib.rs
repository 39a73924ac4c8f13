#![cfg(target_arch = "wasm32")]
use birthday_core::{Greeting, GreetingConfig, MonotonicClock};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod format;
mod frame;
mod overlay;
mod render;

pub(crate) type Page = Greeting<MonotonicClock, audio::WebAudioBackend>;
pub(crate) type SharedPage = Rc<RefCell<Page>>;

/// Reads the optional `<script id="greeting-config" type="application/json">`
/// block. A fresh random seed applies unless the block names one; a broken
/// block is logged and ignored.
fn load_config(document: &web::Document) -> GreetingConfig {
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let Some(text) = document
        .get_element_by_id(constants::CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
    else {
        return GreetingConfig {
            seed,
            ..GreetingConfig::default()
        };
    };
    match GreetingConfig::from_json_or_seed(&text, seed) {
        Ok(config) => {
            log::info!("[config] loaded from page (seed {})", config.seed);
            config
        }
        Err(e) => {
            log::warn!("[config] {}; using defaults", e);
            GreetingConfig {
                seed,
                ..GreetingConfig::default()
            }
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("birthday-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = load_config(&document);
    let mut greeting = Greeting::with_config(MonotonicClock::new(), audio::WebAudioBackend, config)?;
    greeting.mount();
    let renderer = render::Renderer::new(document.clone(), greeting.now());
    let page: SharedPage = Rc::new(RefCell::new(greeting));

    events::wire_buttons(&document, &page);
    events::wire_wish_card(&document, &page);
    events::wire_wish_form(&document, &page);
    events::wire_pagehide(&page);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        page: page.clone(),
        renderer,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
