use std::cell::{Cell, RefCell};
use std::rc::Rc;

use allhalal_web_core::{FrameTask, TaskStatus};
use gloo::render::{request_animation_frame, AnimationFrame};

struct FrameLoopState<T> {
    task: RefCell<T>,
    frame: RefCell<Option<AnimationFrame>>,
    running: Cell<bool>,
}

/// Drives a [`FrameTask`] from `requestAnimationFrame` until it reports
/// [`TaskStatus::Done`] or the loop is stopped. Dropping the loop cancels
/// the pending frame.
pub(crate) struct FrameLoop<T: FrameTask + 'static> {
    state: Rc<FrameLoopState<T>>,
}

impl<T: FrameTask + 'static> FrameLoop<T> {
    pub(crate) fn new(task: T) -> Self {
        Self {
            state: Rc::new(FrameLoopState {
                task: RefCell::new(task),
                frame: RefCell::new(None),
                running: Cell::new(false),
            }),
        }
    }

    pub(crate) fn start(&self) {
        if self.state.running.replace(true) {
            return;
        }
        schedule(&self.state);
    }

    pub(crate) fn stop(&self) {
        self.state.running.set(false);
        self.state.frame.borrow_mut().take();
    }

    pub(crate) fn is_running(&self) -> bool {
        self.state.running.get()
    }

    pub(crate) fn with_task<R>(&self, action: impl FnOnce(&mut T) -> R) -> R {
        action(&mut self.state.task.borrow_mut())
    }
}

impl<T: FrameTask + 'static> Drop for FrameLoop<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule<T: FrameTask + 'static>(state: &Rc<FrameLoopState<T>>) {
    let next = Rc::clone(state);
    let handle = request_animation_frame(move |timestamp| {
        next.frame.borrow_mut().take();
        if !next.running.get() {
            return;
        }
        let status = next.task.borrow_mut().tick(timestamp);
        match status {
            TaskStatus::Continue if next.running.get() => schedule(&next),
            TaskStatus::Continue => {}
            TaskStatus::Done => next.running.set(false),
        }
    });
    *state.frame.borrow_mut() = Some(handle);
}
