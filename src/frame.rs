use crate::render::Renderer;
use crate::SharedPage;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub page: SharedPage,
    pub renderer: Renderer,
}

impl FrameContext {
    pub fn frame(&mut self) {
        // handlers only borrow between frames; skip rather than panic
        let Ok(mut page) = self.page.try_borrow_mut() else {
            return;
        };
        page.tick();
        self.renderer.apply(&mut page);
    }
}

/// Drives [`FrameContext::frame`] from `requestAnimationFrame` forever.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
