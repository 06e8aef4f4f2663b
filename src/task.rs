//! Deferred and periodic callbacks.
//!
//! A [`Task`] runs a callback after a delay, once or repeatedly, on the
//! current thread's [`tokio::task::LocalSet`]. The callback does not need to
//! be `Send`, so it may hold `Rc`s into single-threaded state.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::{ClientError, Result};

type Callback = Rc<RefCell<Box<dyn FnMut()>>>;

/// A restartable timer that invokes a callback.
pub struct Task {
    delay: Rc<Cell<Duration>>,
    repeat: bool,
    callback: Callback,
    armed: Option<JoinHandle<()>>,
}

impl Task {
    pub fn new<F>(delay: Duration, repeat: bool, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self {
            delay: Rc::new(Cell::new(delay)),
            repeat,
            callback: Rc::new(RefCell::new(Box::new(callback))),
            armed: None,
        }
    }

    /// Like [`new`](Self::new) with the delay in seconds.
    ///
    /// Negative or non-finite delays fail with [`ClientError::InvalidArgument`].
    pub fn from_secs_f64<F>(delay_secs: f64, repeat: bool, callback: F) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        let delay = Duration::try_from_secs_f64(delay_secs).map_err(|_| {
            ClientError::InvalidArgument(format!("invalid task delay: {}", delay_secs))
        })?;
        Ok(Self::new(delay, repeat, callback))
    }

    /// Arm the task to fire after the current delay, cancelling any
    /// previous arming first.
    ///
    /// # Panics
    ///
    /// Panics when called outside a [`tokio::task::LocalSet`].
    pub fn start(&mut self) {
        self.stop();

        let delay = Rc::clone(&self.delay);
        let callback = Rc::clone(&self.callback);
        let repeat = self.repeat;
        let first = delay.get();

        self.armed = Some(tokio::task::spawn_local(async move {
            let mut wait = first;
            loop {
                tokio::time::sleep(wait).await;
                (callback.borrow_mut())();
                if !repeat {
                    break;
                }
                wait = delay.get();
            }
        }));
    }

    /// Cancel a pending firing. Does nothing when not armed.
    pub fn stop(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.abort();
        }
    }

    /// Use `delay` from the next arming on; a pending wait keeps its delay.
    pub fn change_delay(&mut self, delay: Duration) {
        self.delay.set(delay);
    }

    pub fn delay(&self) -> Duration {
        self.delay.get()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.as_ref().is_some_and(|armed| !armed.is_finished())
    }
}

impl Drop for Task {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("delay", &self.delay.get())
            .field("repeat", &self.repeat)
            .field("armed", &self.is_armed())
            .finish()
    }
}
