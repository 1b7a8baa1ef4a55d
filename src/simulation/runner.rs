//! Feeds generated events into a sink under the caller's failure policy

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument, warn};

use crate::domain::{EventKind, InteractionEvent};
use crate::error::{Error, Result};
use crate::simulation::sink::EventSink;

/// What to do when the sink refuses an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkFailurePolicy {
    /// Stop at the first failure and return it
    #[default]
    Abort,
    /// Log the failure, count it and keep going
    Continue,
}

/// Tally of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub searches: u64,
    pub results: u64,
    pub navigations: u64,
    pub successes: u64,
    pub failures: u64,
}

impl RunSummary {
    fn count(&mut self, kind: EventKind) {
        match kind {
            EventKind::OnSearch => self.searches += 1,
            EventKind::OnResults => self.results += 1,
            EventKind::OnNavigate => self.navigations += 1,
            EventKind::OnSuccess => self.successes += 1,
        }
    }

    /// Events the sink accepted
    pub fn recorded(&self) -> u64 {
        self.searches + self.results + self.navigations + self.successes
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} recorded ({} searches, {} results, {} navigations, {} successes), {} failed",
            self.recorded(),
            self.searches,
            self.results,
            self.navigations,
            self.successes,
            self.failures
        )
    }
}

/// Drain `events` into `sink`, then flush it
///
/// Under [`SinkFailurePolicy::Abort`] the first failed record ends the run
/// with [`Error::Sink`]. A failed flush is always returned.
#[instrument(skip_all, fields(policy = ?policy))]
pub fn run_simulation<I, S>(
    events: I,
    sink: &mut S,
    policy: SinkFailurePolicy,
) -> Result<RunSummary>
where
    I: IntoIterator<Item = InteractionEvent>,
    S: EventSink + ?Sized,
{
    let mut summary = RunSummary::default();

    for (index, event) in events.into_iter().enumerate() {
        match sink.record(&event) {
            Ok(()) => summary.count(event.kind()),
            Err(source) => match policy {
                SinkFailurePolicy::Abort => return Err(Error::sink(index, source)),
                SinkFailurePolicy::Continue => {
                    warn!(index, event = %event.kind(), error = %source, "Sink rejected event");
                    summary.failures += 1;
                }
            },
        }
    }

    sink.flush().map_err(Error::SinkFlush)?;

    info!(%summary, "Simulation run finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SimulationConfig;
    use crate::simulation::generator::EventSimulator;
    use crate::simulation::sink::{MemorySink, SinkError};

    /// Rejects every `n`th record
    struct FlakySink {
        every: usize,
        seen: usize,
        accepted: Vec<InteractionEvent>,
    }

    impl FlakySink {
        fn new(every: usize) -> Self {
            Self {
                every,
                seen: 0,
                accepted: Vec::new(),
            }
        }
    }

    impl EventSink for FlakySink {
        fn record(&mut self, event: &InteractionEvent) -> std::result::Result<(), SinkError> {
            self.seen += 1;
            if self.seen % self.every == 0 {
                return Err(SinkError::rejected("throttled"));
            }
            self.accepted.push(event.clone());
            Ok(())
        }
    }

    struct FailingFlush;

    impl EventSink for FailingFlush {
        fn record(&mut self, _event: &InteractionEvent) -> std::result::Result<(), SinkError> {
            Ok(())
        }

        fn flush(&mut self) -> std::result::Result<(), SinkError> {
            Err(SinkError::rejected("connection closed"))
        }
    }

    fn events() -> Vec<InteractionEvent> {
        EventSimulator::from_seed(SimulationConfig::default(), 99).collect()
    }

    #[test]
    fn test_memory_sink_receives_every_event() {
        let events = events();
        let mut sink = MemorySink::new();

        let summary = run_simulation(events.clone(), &mut sink, SinkFailurePolicy::Abort).unwrap();

        assert_eq!(sink.events(), events.as_slice());
        assert_eq!(summary.recorded() as usize, events.len());
        assert_eq!(summary.failures, 0);
        assert_eq!(summary.results, 0);
    }

    #[test]
    fn test_abort_policy_stops_at_first_failure() {
        let mut sink = FlakySink::new(3);

        let error = run_simulation(events(), &mut sink, SinkFailurePolicy::Abort).unwrap_err();

        assert!(matches!(error, Error::Sink { index: 2, .. }));
        assert_eq!(sink.accepted.len(), 2);
    }

    #[test]
    fn test_continue_policy_counts_failures() {
        let events = events();
        let total = events.len();
        let mut sink = FlakySink::new(4);

        let summary = run_simulation(events, &mut sink, SinkFailurePolicy::Continue).unwrap();

        assert_eq!(summary.failures as usize, total / 4);
        assert_eq!(summary.recorded() as usize, sink.accepted.len());
        assert_eq!(summary.recorded() + summary.failures, total as u64);
    }

    #[test]
    fn test_flush_failure_is_reported() {
        let result = run_simulation(events(), &mut FailingFlush, SinkFailurePolicy::Continue);
        assert!(matches!(result, Err(Error::SinkFlush(_))));
    }

    #[test]
    fn test_policy_parses_from_lowercase_names() {
        let policy: SinkFailurePolicy = serde_json::from_str("\"continue\"").unwrap();
        assert_eq!(policy, SinkFailurePolicy::Continue);
    }

    #[test]
    fn test_summary_display_reports_every_kind() {
        let config = SimulationConfig::default().with_emit_results(true);
        let summary = run_simulation(
            EventSimulator::from_seed(config, 99),
            &mut MemorySink::new(),
            SinkFailurePolicy::Abort,
        )
        .unwrap();

        assert!(summary.results > 0);
        let rendered = summary.to_string();
        assert!(rendered.starts_with(&format!("{} recorded", summary.recorded())));
        assert!(rendered.contains(&format!("{} results", summary.results)));
        assert!(rendered.ends_with(&format!("{} failed", summary.failures)));
    }
}
