/// Result of one frame of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Continue,
    Done,
}

/// Per-frame work driven by the browser's animation-frame callback.
///
/// Implementations must be safe to tick at any rate; the driver stops
/// scheduling a task once it returns [`TaskStatus::Done`].
pub trait FrameTask {
    fn tick(&mut self, timestamp_ms: f64) -> TaskStatus;
}

impl<F> FrameTask for F
where
    F: FnMut(f64) -> TaskStatus,
{
    fn tick(&mut self, timestamp_ms: f64) -> TaskStatus {
        self(timestamp_ms)
    }
}

/// Ticks `task` at a fixed step until it finishes or `max_frames` elapse.
/// Returns the number of frames run.
pub fn run_to_completion<T: FrameTask + ?Sized>(
    task: &mut T,
    start_ms: f64,
    step_ms: f64,
    max_frames: usize,
) -> usize {
    for frame in 0..max_frames {
        let now = start_ms + step_ms * frame as f64;
        if task.tick(now) == TaskStatus::Done {
            return frame + 1;
        }
    }
    max_frames
}
