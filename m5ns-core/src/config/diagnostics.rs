//! Resolution diagnostics
//!
//! The resolver reports every field it resolves, and any fatal error, to a
//! [`Diagnostics`] observer. Reports are purely observational: nothing an
//! observer does can change the resolved configuration.

use core::fmt::{self, Write};

use heapless::String;
use m5ns_hal::{LineSink, SourceError};

use super::error::FatalConfigError;
use super::types::Lossy;

/// Rendered diagnostic line capacity
pub const DIAGNOSTIC_LINE_LEN: usize = 128;

/// A resolved field value
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value<'a> {
    /// Raw text bytes, rendered lossily
    Text(&'a [u8]),
    Int(i32),
    Float(f32),
    Flag(bool),
    /// Value withheld from output
    Masked,
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(bytes) => write!(f, "\"{}\"", Lossy(bytes)),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Flag(on) => write!(f, "{}", *on as u8),
            Value::Masked => f.write_str("***"),
        }
    }
}

/// Why a field fell back to its default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DefaultReason {
    /// The lookup had no value
    Absent(SourceError),
    /// The lookup failed for a reason other than absence
    Unreadable(SourceError),
    /// The value had no numeric prefix
    Unparsable,
    /// The value parsed but is outside the field's valid range
    OutOfRange,
}

impl DefaultReason {
    /// Classify a failed lookup
    pub fn from_lookup(error: SourceError) -> Self {
        if error.is_absent() {
            DefaultReason::Absent(error)
        } else {
            DefaultReason::Unreadable(error)
        }
    }
}

impl fmt::Display for DefaultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultReason::Absent(e) => write!(f, "{}", e),
            DefaultReason::Unreadable(e) => write!(f, "unreadable: {}", e),
            DefaultReason::Unparsable => f.write_str("not a number"),
            DefaultReason::OutOfRange => f.write_str("out of range"),
        }
    }
}

/// How a field got its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Taken from the configuration source
    Read,
    /// Substituted by the field default
    Defaulted(DefaultReason),
}

/// How loudly a report should be logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Value read, or an optional key left out
    Info,
    /// Value present but unusable
    Warn,
}

/// One field resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldReport<'a> {
    pub section: &'a str,
    pub key: &'static str,
    pub value: Value<'a>,
    pub outcome: Outcome,
    /// Value must not be echoed (tokens, passphrases)
    pub secret: bool,
}

impl FieldReport<'_> {
    /// Value safe to print
    pub fn shown_value(&self) -> Value<'_> {
        if self.secret && self.outcome == Outcome::Read {
            Value::Masked
        } else {
            self.value
        }
    }

    /// Leaving an optional key out is normal; a bad value is not
    pub fn severity(&self) -> Severity {
        match self.outcome {
            Outcome::Read | Outcome::Defaulted(DefaultReason::Absent(_)) => Severity::Info,
            Outcome::Defaulted(_) => Severity::Warn,
        }
    }
}

/// Observer for resolution progress
pub trait Diagnostics {
    /// A field was resolved
    fn field(&mut self, report: &FieldReport<'_>);

    /// Resolution stopped on a fatal error
    fn fatal(&mut self, error: &FatalConfigError) {
        let _ = error;
    }
}

/// Silent observer
impl Diagnostics for () {
    fn field(&mut self, _report: &FieldReport<'_>) {}
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn field(&mut self, report: &FieldReport<'_>) {
        (**self).field(report)
    }

    fn fatal(&mut self, error: &FatalConfigError) {
        (**self).fatal(error)
    }
}

/// Writes one text line per report to a [`LineSink`]
///
/// Sink errors are dropped; diagnostics never affect resolution.
pub struct LineDiagnostics<S> {
    sink: S,
}

impl<S: LineSink> LineDiagnostics<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Reclaim the sink
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn emit(&mut self, line: &str) {
        let _ = self.sink.write_line(line);
    }
}

/// Render a report as a single line
///
/// Output that does not fit [`DIAGNOSTIC_LINE_LEN`] is cut short.
pub fn render_field(report: &FieldReport<'_>) -> String<DIAGNOSTIC_LINE_LEN> {
    let mut line = String::new();
    let _ = write!(
        line,
        "[{}] {} = {}",
        report.section,
        report.key,
        report.shown_value()
    );
    if let Outcome::Defaulted(reason) = report.outcome {
        let _ = write!(line, " (default, {})", reason);
    }
    line
}

impl<S: LineSink> Diagnostics for LineDiagnostics<S> {
    fn field(&mut self, report: &FieldReport<'_>) {
        let line = render_field(report);
        self.emit(&line);
    }

    fn fatal(&mut self, error: &FatalConfigError) {
        let mut line: String<DIAGNOSTIC_LINE_LEN> = String::new();
        let _ = write!(line, "FATAL: {}", error);
        self.emit(&line);
    }
}

/// Logs reports over defmt
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtDiagnostics;

#[cfg(feature = "defmt")]
impl Diagnostics for DefmtDiagnostics {
    fn field(&mut self, report: &FieldReport<'_>) {
        match (report.severity(), report.outcome) {
            (_, Outcome::Read) => defmt::info!(
                "[{=str}] {=str} = {}",
                report.section,
                report.key,
                report.shown_value()
            ),
            (Severity::Info, Outcome::Defaulted(reason)) => defmt::info!(
                "[{=str}] {=str} = {} (default, {})",
                report.section,
                report.key,
                report.shown_value(),
                reason
            ),
            (Severity::Warn, Outcome::Defaulted(reason)) => defmt::warn!(
                "[{=str}] {=str} = {} (default, {})",
                report.section,
                report.key,
                report.shown_value(),
                reason
            ),
        }
    }

    fn fatal(&mut self, error: &FatalConfigError) {
        defmt::error!("Configuration unusable: {}", error);
    }
}
