use chrono::NaiveDate;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use crate::domain::{
    DayCount, FeedbackProbability, MaxQueriesPerSession, MaxResultsPerQuery, QueryText,
    SessionsPerDay, SimulationConfig,
};
use crate::error::{Error, Result};
use crate::simulation::{EventSink, JsonLinesSink, SinkFailurePolicy, TracingSink};

/// Prefix for environment overrides, e.g. `INTERACTION_SIM__SIMULATION__SEED=7`
pub const ENV_PREFIX: &str = "INTERACTION_SIM";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub simulation: SimulationSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationSettings {
    pub start_date: NaiveDate,
    pub day_count: u32,
    pub sessions_per_day: u32,
    pub max_queries_per_session: u32,
    pub max_results_per_query: u32,
    pub feedback_probability: f64,
    pub emit_results: bool,
    pub seed: Option<u64>,
    pub query_vocabulary: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputSettings {
    pub kind: OutputKind,
    pub path: Option<PathBuf>,
    pub failure_policy: SinkFailurePolicy,
}

/// Where generated events go
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// JSON lines on standard output
    Stdout,
    /// JSON lines in `output.path`
    File,
    /// Structured `tracing` records
    Log,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Settings {
    pub fn new() -> std::result::Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Layered load: defaults, `config/*` files, an optional explicit file,
    /// then environment overrides
    pub fn load(extra_file: Option<&Path>) -> std::result::Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let mut builder = Config::builder()
            .set_default("simulation.start_date", "2024-01-01")?
            .set_default("simulation.day_count", 30)?
            .set_default("simulation.sessions_per_day", 10)?
            .set_default("simulation.max_queries_per_session", 5)?
            .set_default("simulation.max_results_per_query", 10)?
            .set_default("simulation.feedback_probability", 0.3)?
            .set_default("simulation.emit_results", false)?
            .set_default("output.kind", "stdout")?
            .set_default("output.failure_policy", "abort")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("simulation.query_vocabulary")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl SimulationSettings {
    /// Validate the raw settings into an immutable [`SimulationConfig`]
    pub fn to_config(&self) -> Result<SimulationConfig> {
        let day_count = DayCount::try_new(self.day_count)
            .map_err(|e| Error::invalid_input("simulation.day_count", e.to_string()))?;
        let sessions_per_day = SessionsPerDay::try_new(self.sessions_per_day)
            .map_err(|e| Error::invalid_input("simulation.sessions_per_day", e.to_string()))?;
        let max_queries = MaxQueriesPerSession::try_new(self.max_queries_per_session).map_err(
            |e| Error::invalid_input("simulation.max_queries_per_session", e.to_string()),
        )?;
        let max_results = MaxResultsPerQuery::try_new(self.max_results_per_query).map_err(
            |e| Error::invalid_input("simulation.max_results_per_query", e.to_string()),
        )?;
        let feedback_probability = FeedbackProbability::try_new(self.feedback_probability)
            .map_err(|e| Error::invalid_input("simulation.feedback_probability", e.to_string()))?;

        let config = SimulationConfig::new(
            self.start_date,
            day_count,
            sessions_per_day,
            max_queries,
            max_results,
            feedback_probability,
        )?
        .with_emit_results(self.emit_results);

        match &self.query_vocabulary {
            Some(queries) => {
                let queries = queries
                    .iter()
                    .map(|q| {
                        QueryText::try_new(q.clone()).map_err(|e| {
                            Error::invalid_input("simulation.query_vocabulary", e.to_string())
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                config.with_query_vocabulary(queries)
            }
            None => Ok(config),
        }
    }
}

impl OutputSettings {
    /// Open the sink this output configuration points at
    pub fn open_sink(&self) -> Result<Box<dyn EventSink>> {
        match self.kind {
            OutputKind::Stdout => Ok(Box::new(JsonLinesSink::new(BufWriter::new(
                io::stdout().lock(),
            )))),
            OutputKind::File => {
                let path = self.path.as_deref().ok_or_else(|| {
                    Error::invalid_input("output.path", "required when output.kind is \"file\"")
                })?;
                let file = fs::File::create(path)?;
                Ok(Box::new(JsonLinesSink::new(BufWriter::new(file))))
            }
            OutputKind::Log => Ok(Box::new(TracingSink)),
        }
    }
}
