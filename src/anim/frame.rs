use gloo::render::{AnimationFrame, request_animation_frame};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Repeating requestAnimationFrame loop. The callback receives the frame delta in ms.
/// Dropping the loop cancels the pending frame; nothing runs after that.
pub struct FrameLoop {
    pending: Rc<RefCell<Option<AnimationFrame>>>,
    alive: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn start<F>(callback: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        let pending = Rc::new(RefCell::new(None));
        let alive = Rc::new(Cell::new(true));
        let callback: Rc<RefCell<dyn FnMut(f64)>> = Rc::new(RefCell::new(callback));
        schedule(pending.clone(), alive.clone(), Rc::new(Cell::new(None)), callback);
        Self { pending, alive }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.alive.set(false);
        self.pending.borrow_mut().take();
    }
}

fn schedule(
    pending: Rc<RefCell<Option<AnimationFrame>>>,
    alive: Rc<Cell<bool>>,
    last_ts: Rc<Cell<Option<f64>>>,
    callback: Rc<RefCell<dyn FnMut(f64)>>,
) {
    let slot = pending.clone();
    let frame = request_animation_frame(move |ts| {
        if !alive.get() {
            return;
        }
        let dt = last_ts.get().map(|prev| (ts - prev).max(0.0)).unwrap_or(0.0);
        last_ts.set(Some(ts));
        (&mut *callback.borrow_mut())(dt);
        // the callback may have dropped the loop
        if alive.get() {
            schedule(slot, alive, last_ts, callback);
        }
    });
    *pending.borrow_mut() = Some(frame);
}
