use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Trailing-edge debouncer plus a rapid-repeat guard.
///
/// One pending action at a time: scheduling again restarts the window and
/// the superseded action never runs. After `cancel` (or drop) nothing
/// fires: the generation check and the action run under the same lock the
/// cancel takes, so the action must not call back into this instance.
pub struct Debouncer {
    generation: Arc<Mutex<u64>>,
    last_permit: Option<Instant>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self {
            generation: Arc::new(Mutex::new(0)),
            last_permit: None,
        }
    }

    /// Runs `action` once `delay` has passed without another schedule.
    pub fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let scheduled = {
            let mut generation = self.generation.lock().expect("debounce lock");
            *generation += 1;
            *generation
        };
        let generation = Arc::clone(&self.generation);
        thread::spawn(move || {
            thread::sleep(delay);
            let current = generation.lock().expect("debounce lock");
            if *current == scheduled {
                action();
            }
        });
    }

    /// Click-repeat guard: true on the first call, false for any call
    /// within `window` of the last permitted one.
    pub fn allow_repeat(&mut self, window: Duration) -> bool {
        match self.last_permit {
            Some(last) if last.elapsed() < window => false,
            _ => {
                self.last_permit = Some(Instant::now());
                true
            }
        }
    }

    /// Invalidates whatever is pending.
    pub fn cancel(&mut self) {
        *self.generation.lock().expect("debounce lock") += 1;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
