use crate::runtime::event::FormEvent;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Commands a form queues for the scheduler that owns its clock.
#[derive(Debug, Clone)]
pub enum SchedulerCommand {
    /// Trailing-edge debounce: supersedes any pending task under the same key.
    Debounce {
        key: String,
        delay: Duration,
        event: FormEvent,
    },
    /// Invalidates every pending task under the key.
    Cancel { key: String },
}

#[derive(Debug, Clone)]
struct Pending {
    due_at: Instant,
    key: String,
    version: u64,
    event: FormEvent,
}

/// Single-threaded timer queue. Superseded and cancelled tasks are not
/// removed eagerly; they stay in the queue with a stale version and are
/// dropped when they come due.
#[derive(Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
    versions: HashMap<String, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, command: SchedulerCommand, now: Instant) {
        match command {
            SchedulerCommand::Debounce { key, delay, event } => {
                let version = self.bump_version(&key);
                self.pending.push(Pending {
                    due_at: now + delay,
                    key,
                    version,
                    event,
                });
            }
            SchedulerCommand::Cancel { key } => {
                self.bump_version(&key);
            }
        }
    }

    /// Releases every due task that still holds the current version of its key.
    pub fn drain_ready(&mut self, now: Instant) -> Vec<FormEvent> {
        let mut ready = Vec::new();
        let mut idx = 0usize;
        while idx < self.pending.len() {
            if self.pending[idx].due_at <= now {
                let task = self.pending.swap_remove(idx);
                if self.is_current(&task) {
                    ready.push(task.event);
                }
            } else {
                idx += 1;
            }
        }
        ready
    }

    /// How long the caller may sleep before the next live task comes due.
    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        let mut next = default_timeout;
        for task in &self.pending {
            if !self.is_current(task) {
                continue;
            }
            let due_in = task.due_at.saturating_duration_since(now);
            if due_in < next {
                next = due_in;
            }
        }
        next
    }

    pub fn has_pending(&self) -> bool {
        self.pending.iter().any(|task| self.is_current(task))
    }

    fn is_current(&self, task: &Pending) -> bool {
        let current = *self.versions.get(&task.key).unwrap_or(&0);
        current == task.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}
