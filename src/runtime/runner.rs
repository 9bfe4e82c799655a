use crate::core::value::Value;
use crate::runtime::scheduler::Scheduler;
use crate::state::form::Form;
use std::time::{Duration, Instant};

/// Owns a form together with the scheduler that times its deferred work.
///
/// The caller's loop supplies every `now`: nothing in here reads the clock,
/// so hosts decide how time advances and tests can step it explicitly. A
/// typical loop alternates `tick`, `poll_timeout`-bounded input waits, and
/// the `handle_*` wrappers.
pub struct FormRunner {
    form: Form,
    scheduler: Scheduler,
}

impl FormRunner {
    pub fn new(form: Form) -> Self {
        Self {
            form,
            scheduler: Scheduler::new(),
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Direct access to the form. After operations that queue deferred work
    /// (`handle_change`, `reset`, `cancel_pending_validation`), call
    /// [`FormRunner::flush`] so the scheduler picks the commands up.
    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn handle_change(&mut self, field: &str, value: impl Into<Value>, now: Instant) {
        self.form.handle_change(field, value);
        self.flush(now);
    }

    pub fn handle_blur(&mut self, field: &str, now: Instant) {
        self.form.handle_blur(field);
        self.flush(now);
    }

    pub fn reset(&mut self, now: Instant) {
        self.form.reset();
        self.flush(now);
    }

    /// Teardown hook: invalidates whatever validation is still in flight.
    pub fn cancel_pending(&mut self, now: Instant) {
        self.form.cancel_pending_validation();
        self.flush(now);
    }

    /// Moves queued commands from the form into the scheduler, stamping the
    /// debounce windows against `now`.
    pub fn flush(&mut self, now: Instant) {
        for command in self.form.take_pending_scheduler_commands() {
            self.scheduler.schedule(command, now);
        }
    }

    /// Applies every due scheduled event to the form and returns how many
    /// were applied.
    pub fn tick(&mut self, now: Instant) -> usize {
        let events = self.scheduler.drain_ready(now);
        let applied = events.len();
        for event in events {
            self.form.apply(event);
        }
        self.flush(now);
        applied
    }

    /// How long the caller may block for input before the next deferred
    /// validation comes due.
    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.scheduler.poll_timeout(now, default_timeout)
    }

    pub fn has_pending(&self) -> bool {
        self.scheduler.has_pending()
    }
}
