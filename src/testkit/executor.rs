//! Scripted [`CommandExecutor`] for exercising provisioning without
//! spawning processes.
//!
//! Results are matched by subcommand (`create`, `ip`, `rm`, ...) and
//! optionally by machine name. Each rule holds a queue of results; the last
//! one repeats once the queue is down to it. Unmatched commands succeed with
//! empty output.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{CommandResult, CommandSpec};
use crate::port::CommandExecutor;

struct Rule {
    subcommand: String,
    machine: Option<String>,
    results: VecDeque<CommandResult>,
}

impl Rule {
    fn matches(&self, command: &CommandSpec) -> bool {
        if command.subcommand() != Some(self.subcommand.as_str()) {
            return false;
        }
        match &self.machine {
            None => true,
            Some(machine) => {
                let remote = format!("{machine}:");
                command
                    .argv()
                    .iter()
                    .any(|a| *a == machine.as_str() || a.starts_with(&remote))
            }
        }
    }

    fn next(&mut self) -> CommandResult {
        if self.results.len() > 1 {
            self.results.pop_front().unwrap_or_else(|| CommandResult::ok(""))
        } else {
            self.results
                .front()
                .cloned()
                .unwrap_or_else(|| CommandResult::ok(""))
        }
    }
}

#[derive(Default)]
pub struct ScriptedExecutor {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<CommandSpec>>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command take `delay` before returning.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Script results for `subcommand`, optionally only for one machine.
    ///
    /// Later rules do not override earlier ones; the first match wins.
    pub fn respond<I>(&self, subcommand: &str, machine: Option<&str>, results: I) -> &Self
    where
        I: IntoIterator<Item = CommandResult>,
    {
        self.rules.lock().push(Rule {
            subcommand: subcommand.to_string(),
            machine: machine.map(str::to_string),
            results: results.into_iter().collect(),
        });
        self
    }

    /// Every command executed so far, in call order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().clone()
    }

    /// Commands executed with the given subcommand.
    pub fn calls_to(&self, subcommand: &str) -> Vec<CommandSpec> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.subcommand() == Some(subcommand))
            .cloned()
            .collect()
    }

    /// Highest number of commands observed running at once.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, command: &CommandSpec, _stream_output: bool) -> CommandResult {
        self.calls.lock().push(command.clone());
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = self
            .rules
            .lock()
            .iter_mut()
            .find(|rule| rule.matches(command))
            .map(Rule::next)
            .unwrap_or_else(|| CommandResult::ok(""));

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
