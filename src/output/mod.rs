mod csv;
mod json;
mod text;

use chrono::Utc;

use crate::config::ActiveSpaceInput;
use crate::session::Evaluation;
use crate::signal::AttenuationTrace;
use crate::sonar::{ActiveSpace, SourceLevel};
use crate::sweep::SweepPoint;

pub use self::csv::{CsvFormatter, write_samples_csv};
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Kind of record a formatter is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    ActiveSpace,
    SourceLevel,
    Attenuation,
    Sweep,
}

pub trait Formatter: Send {
    fn active_space(&self, result: &ActiveSpace) -> String;

    fn source_level(&self, result: &SourceLevel) -> String;

    fn attenuation(&self, trace: &AttenuationTrace) -> String;

    fn sweep_point(&self, input: ActiveSpaceInput, point: &SweepPoint) -> String;

    fn header(&self, _kind: RecordKind) -> Option<&'static str> {
        None
    }

    fn format(&self, evaluation: &Evaluation) -> String {
        match evaluation {
            Evaluation::ActiveSpace(r) => self.active_space(r),
            Evaluation::SourceLevel(r) => self.source_level(r),
            Evaluation::Attenuation(t) => self.attenuation(t),
        }
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Short name of a swept input, used as a column or key
pub fn input_key(input: ActiveSpaceInput) -> &'static str {
    match input {
        ActiveSpaceInput::SourceLevel => "sl",
        ActiveSpaceInput::DetectionThreshold => "dt",
        ActiveSpaceInput::NoiseLevel => "nl",
        ActiveSpaceInput::ProcessingGain => "pg",
        ActiveSpaceInput::GeometricSpreading => "spreading",
    }
}
