//! Script session: executes commands against a queue pool
//!
//! Queue notifications are published synchronously while a command runs, so
//! after each command the session drains its watch subscriptions and polls its
//! pending waiters without blocking. Output order is therefore deterministic:
//! a command's acknowledgement followed by the notifications it caused.

use crate::app::cli::script::{parse_line, ScriptCommand};
use crate::app::error::AppError;
use crate::app::styles::StyleRole;
use crate::core::logging::reconfigure_logging;
use crate::queue::api::{
    DequeueWaiter, QueueItem, QueuePoolManager, QueueResult, QueueStatus, Subscription,
};
use futures::FutureExt;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

type Item = Arc<QueueItem<String>>;

struct Watch {
    name: String,
    ready: Subscription<Item>,
    dequeued: Subscription<Item>,
    status: Subscription<QueueStatus>,
}

struct PendingWait {
    name: String,
    index: Option<u64>,
    waiter: DequeueWaiter<String>,
}

pub struct Session {
    pool: Arc<QueuePoolManager>,
    watches: Vec<Watch>,
    waits: Vec<PendingWait>,
    color: bool,
}

impl Session {
    pub fn new(pool: Arc<QueuePoolManager>, color: bool) -> Self {
        Self {
            pool,
            watches: Vec::new(),
            waits: Vec::new(),
            color,
        }
    }

    pub fn pool(&self) -> &Arc<QueuePoolManager> {
        &self.pool
    }

    /// Number of `wait` commands whose item has not been released yet
    pub fn pending_waits(&self) -> usize {
        self.waits.len()
    }

    fn paint(&self, role: StyleRole, text: &str) -> String {
        role.paint(text, self.color)
    }

    fn describe(&self, name: &str, item: &QueueItem<String>) -> String {
        format!(
            "{} #{} {}",
            self.paint(StyleRole::QueueName, name),
            item.index,
            item.value
        )
    }

    /// Execute one command and return the lines it produced
    pub fn execute(&mut self, command: ScriptCommand) -> QueueResult<Vec<String>> {
        log::debug!("Executing {:?}", command);
        let mut lines = Vec::new();

        match command {
            ScriptCommand::Set { name } => {
                self.pool.set::<String>(&name)?;
                lines.push(format!("created {}", name));
            }
            ScriptCommand::Enqueue { name, value } => {
                let queue = self.pool.get_or_create::<String>(&name)?;
                match queue.enqueue(value) {
                    Some(index) => lines.push(format!("enqueued {} #{}", name, index)),
                    None => lines.push(format!("{} is destroyed, item dropped", name)),
                }
            }
            ScriptCommand::Wait { name, value } => {
                let waiter = self.pool.enqueue_and_wait_dequeue(&name, value)?;
                let index = waiter.index();
                match index {
                    Some(index) => lines.push(format!("enqueued {} #{} (waiting)", name, index)),
                    None => lines.push(format!("{} is destroyed, item dropped", name)),
                }
                self.waits.push(PendingWait {
                    name,
                    index,
                    waiter,
                });
            }
            ScriptCommand::Dequeue { name } => match self.pool.get::<String>(&name) {
                Some(queue) => match queue.dequeue() {
                    Some(item) => lines.push(format!("dequeued {}", self.describe(&name, &item))),
                    None => lines.push(format!("nothing to dequeue from {}", name)),
                },
                None => lines.push(format!("no queue named {}", name)),
            },
            ScriptCommand::Watch { name } => {
                let watch = Watch {
                    ready: self.pool.when_ready_to_dequeue::<String>(&name)?,
                    dequeued: self.pool.when_dequeued::<String>(&name)?,
                    status: self.pool.status_change::<String>(&name)?,
                    name,
                };
                lines.push(format!("watching {}", watch.name));
                self.watches.push(watch);
            }
            ScriptCommand::Status { name } => {
                match (self.pool.status(&name), self.pool.backlog_len(&name)) {
                    (Some(status), Some(backlog)) => {
                        lines.push(format!("{}: {} ({} unreleased)", name, status, backlog))
                    }
                    _ => lines.push(format!("no queue named {}", name)),
                }
            }
            ScriptCommand::Remove { name } => {
                let existed = self.pool.contains(&name);
                self.pool.remove(&name);
                if existed {
                    lines.push(format!("removed {}", name));
                } else {
                    lines.push(format!("no queue named {}", name));
                }
            }
            ScriptCommand::Clear => {
                let count = self.pool.len();
                self.pool.clear();
                lines.push(format!("cleared {} queue(s)", count));
            }
            ScriptCommand::List => {
                let names = self.pool.names();
                if names.is_empty() {
                    lines.push("(no queues)".to_string());
                }
                for name in names {
                    if let (Some(status), Some(backlog)) =
                        (self.pool.status(&name), self.pool.backlog_len(&name))
                    {
                        lines.push(format!("{} {} {}", name, status, backlog));
                    }
                }
            }
            ScriptCommand::Log { level } => match reconfigure_logging(&level) {
                Ok(()) => lines.push(format!("log level set to {}", level)),
                Err(e) => lines.push(format!("log level unchanged: {}", e)),
            },
        }

        lines.extend(self.collect_notifications());
        Ok(lines)
    }

    /// Drain watch subscriptions and resolve finished waits
    fn collect_notifications(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        let color = self.color;

        for watch in &mut self.watches {
            let label = StyleRole::QueueName.paint(&watch.name, color);
            // A release publishes status, then the released item, then the next head-of-line item
            for status in watch.status.drain() {
                lines.push(format!(
                    "  [{}] {} {}",
                    label,
                    StyleRole::Status.paint("status", color),
                    status
                ));
            }
            for item in watch.dequeued.drain() {
                lines.push(format!(
                    "  [{}] {} #{} {}",
                    label,
                    StyleRole::Released.paint("dequeued", color),
                    item.index,
                    item.value
                ));
            }
            for item in watch.ready.drain() {
                lines.push(format!(
                    "  [{}] {} #{} {}",
                    label,
                    StyleRole::Ready.paint("ready", color),
                    item.index,
                    item.value
                ));
            }
        }
        self.watches.retain(|watch| !watch.status.is_terminated());

        self.waits.retain_mut(|pending| {
            let index = pending
                .index
                .map_or_else(|| "-".to_string(), |index| index.to_string());
            match (&mut pending.waiter).now_or_never() {
                Some(Some(item)) => {
                    lines.push(format!(
                        "{} {} #{} {}",
                        StyleRole::Released.paint("released", color),
                        pending.name,
                        index,
                        item.value
                    ));
                    false
                }
                Some(None) => {
                    lines.push(format!(
                        "{} {} #{}",
                        StyleRole::Abandoned.paint("abandoned", color),
                        pending.name,
                        index
                    ));
                    false
                }
                None => true,
            }
        });

        lines
    }

    /// Run every line of `reader`, writing command output to `out`
    ///
    /// Stops at the first line that fails to parse or that the pool rejects.
    /// Returns the number of commands executed.
    pub async fn run<R, W>(&mut self, reader: R, out: &mut W) -> Result<usize, AppError>
    where
        R: AsyncBufRead + Unpin,
        W: std::io::Write,
    {
        let mut lines = reader.lines();
        let mut line_number = 0;
        let mut executed = 0;

        while let Some(line) = lines.next_line().await? {
            line_number += 1;
            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => return Err(AppError::script(line_number, message)),
            };

            let output = self
                .execute(command)
                .map_err(|source| AppError::queue(line_number, source))?;
            for text in output {
                writeln!(out, "{}", text)?;
            }
            executed += 1;
        }

        if !self.waits.is_empty() {
            log::info!(
                "Script finished with {} wait(s) still pending",
                self.waits.len()
            );
        }
        Ok(executed)
    }
}
