//! Destinations for generated events
//!
//! A sink is the telemetry client the simulator feeds. Sinks report every
//! failure to the caller; none of them retry.

use std::io::Write;
use thiserror::Error;
use tracing::info;

use crate::domain::{EventPayload, InteractionEvent};

/// Failure to record an event
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Event rejected: {reason}")]
    Rejected { reason: String },
}

impl SinkError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

/// Capability to record interaction events
pub trait EventSink {
    fn record(&mut self, event: &InteractionEvent) -> Result<(), SinkError>;

    /// Push buffered records to their destination
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn record(&mut self, event: &InteractionEvent) -> Result<(), SinkError> {
        (**self).record(event)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

/// Keeps every recorded event in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Vec<InteractionEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[InteractionEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<InteractionEvent> {
        self.events
    }
}

impl EventSink for MemorySink {
    fn record(&mut self, event: &InteractionEvent) -> Result<(), SinkError> {
        self.events.push(event.clone());
        Ok(())
    }
}

/// Writes one JSON object per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn record(&mut self, event: &InteractionEvent) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Emits each event as a structured `tracing` record on the `telemetry` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: &InteractionEvent) -> Result<(), SinkError> {
        let event_name = event.kind().to_string();
        match &event.payload {
            EventPayload::OnSearch { query } => info!(
                target: "telemetry",
                event = %event_name,
                query = %query,
                correlation_id = %event.correlation_id,
                session_id = %event.session_id,
                user_id = %event.user_id,
                mock_timestamp = %event.mock_timestamp.to_rfc3339(),
                "Interaction event"
            ),
            EventPayload::OnResults {
                query,
                result_count,
            } => info!(
                target: "telemetry",
                event = %event_name,
                query = %query,
                result_count = result_count.into_inner(),
                correlation_id = %event.correlation_id,
                session_id = %event.session_id,
                user_id = %event.user_id,
                mock_timestamp = %event.mock_timestamp.to_rfc3339(),
                "Interaction event"
            ),
            EventPayload::OnNavigate {
                index_rank,
                document_id,
            }
            | EventPayload::OnSuccess {
                index_rank,
                document_id,
            } => info!(
                target: "telemetry",
                event = %event_name,
                index_rank = index_rank.into_inner(),
                document_id = %document_id,
                correlation_id = %event.correlation_id,
                session_id = %event.session_id,
                user_id = %event.user_id,
                mock_timestamp = %event.mock_timestamp.to_rfc3339(),
                "Interaction event"
            ),
        }
        Ok(())
    }
}
