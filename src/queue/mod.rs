//! Handoff Queue Component
//!
//! A named pool of single-consumer-release queues. Producers push items at any
//! rate; each queue hands its items over one at a time, and only when the
//! consumer signals that it is ready for the next one. The queue buffers
//! without bound but paces delivery strictly to consumer demand.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   enqueue("jobs", v)    ┌──────────────────────────────┐
//! │   Producer   │ ──────────────────────► │       QueuePoolManager       │
//! └──────────────┘                         │  "jobs"   ─► HandoffQueue<T> │
//! ┌──────────────┐   dequeue("jobs")       │  "emails" ─► HandoffQueue<U> │
//! │   Consumer   │ ──────────────────────► │  ...  (bounded by pool-size) │
//! └──────┬───────┘                         └──────────────┬───────────────┘
//!        │ when_ready_to_dequeue / when_dequeued /        │
//!        │ status_change subscriptions                    │
//!        └────────────────────────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use handoff_queue::queue::api::{QueuePoolManager, QueueStatus};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = QueuePoolManager::unbounded();
//!
//! // Producer side
//! pool.enqueue("jobs", "build".to_string())?;
//! let waiter = pool.enqueue_and_wait_dequeue("jobs", "deploy".to_string())?;
//!
//! // Consumer side: release one item per signal
//! pool.dequeue("jobs");
//! pool.dequeue("jobs");
//!
//! assert_eq!(waiter.await.map(|item| item.value.clone()), Some("deploy".to_string()));
//! assert_eq!(pool.status("jobs"), Some(QueueStatus::Empty));
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod handoff;
mod item;
mod pool;
mod status;
mod traits;
mod waiter;

pub mod api;

pub use config::PoolConfig;
pub use error::{QueueError, QueueResult};
pub use handoff::HandoffQueue;
pub use item::QueueItem;
pub use pool::QueuePoolManager;
pub use status::QueueStatus;
pub use waiter::DequeueWaiter;

#[cfg(test)]
mod tests;
