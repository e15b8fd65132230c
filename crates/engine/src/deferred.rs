//! Deferred engine work.
//!
//! A few steps must wait for a focus transition to settle before they run.
//! They are queued here in FIFO order with a due time and drained by
//! [`Engine::tick`](crate::Engine::tick). Each task carries enough state to
//! re-check that its target still exists when it finally runs.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tessel_syntax::NodeId;

/// Deferred work item payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
	/// Start editing the provisional node created by quarantine entry `seq`.
	EnterEdit { seq: u64 },
	/// Put a rejected edit back into editing.
	RefocusEdit { session: u64 },
	/// Return focus to `node` after a copy, if the tree is still `generation`.
	Refocus { node: NodeId, generation: u64 },
	/// Drop the copy transfer buffer.
	ReleaseTransfer,
}

/// Queue entry with scheduling metadata.
#[derive(Debug, Clone, Copy)]
pub struct Deferred {
	pub task: Task,
	pub due: Instant,
	pub seq: u64,
}

/// FIFO queue of deferred tasks.
#[derive(Debug, Default)]
pub struct DeferredQueue {
	seq_next: u64,
	queue: VecDeque<Deferred>,
}

impl DeferredQueue {
	/// Queues `task` to run `delay` after `now`. Returns its sequence number.
	pub fn schedule(&mut self, task: Task, now: Instant, delay: Duration) -> u64 {
		let seq = self.seq_next;
		self.seq_next = self.seq_next.wrapping_add(1);
		self.queue.push_back(Deferred {
			task,
			due: now + delay,
			seq,
		});
		seq
	}

	/// Removes and returns every task due at `now`, in queue order.
	pub fn take_due(&mut self, now: Instant) -> Vec<Task> {
		let mut due = Vec::new();
		self.queue.retain(|item| {
			if item.due <= now {
				due.push(item.task);
				false
			} else {
				true
			}
		});
		due
	}

	/// Removes and returns every task regardless of due time.
	pub fn take_all(&mut self) -> Vec<Task> {
		self.queue.drain(..).map(|item| item.task).collect()
	}

	/// Drops queued tasks matching `pred`. Returns how many were removed.
	pub fn cancel(&mut self, mut pred: impl FnMut(&Task) -> bool) -> usize {
		let before = self.queue.len();
		self.queue.retain(|item| !pred(&item.task));
		before - self.queue.len()
	}

	/// Earliest due time, if anything is queued.
	pub fn next_due(&self) -> Option<Instant> {
		self.queue.iter().map(|item| item.due).min()
	}

	pub fn len(&self) -> usize {
		self.queue.len()
	}

	pub fn is_empty(&self) -> bool {
		self.queue.is_empty()
	}
}
