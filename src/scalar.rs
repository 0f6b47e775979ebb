//! Binding glue for the SQL surface.
//!
//! The executor registers `strftime(DATE, VARCHAR)`,
//! `strftime(TIMESTAMP, VARCHAR)` and `strptime(VARCHAR, VARCHAR)` as
//! scalar functions. The format argument must be a plan-time constant;
//! the bind step compiles it once into a program that is then shared
//! read-only across every row of the expression. Date and timestamp
//! inputs share one bound type: a `DATE` row implements the clock half of
//! [`Time`] as zero.

use core::fmt;

use crate::format::CompileError;
use crate::strftime::StrfTimeFormat;
use crate::strptime::{ParseError, Parsed, StrpTimeFormat};
use crate::{Error, Time};

/// The format argument of a scalar function call, as seen at plan time.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FormatArg<'a> {
    /// A plan-time constant; `None` is the SQL `NULL` literal.
    Constant(Option<&'a str>),
    /// A per-row expression. Rejected at bind time.
    Column,
}

/// Error type returned when binding a scalar function fails.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BindError {
    /// The format argument is not a plan-time constant.
    NotConstant,
    /// The constant format string failed to compile.
    InvalidFormat {
        /// The offending format string.
        format: String,
        /// Why it failed to compile.
        reason: CompileError,
    },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::NotConstant => write!(f, "strftime format must be a constant"),
            BindError::InvalidFormat { format, reason } => {
                write!(f, "Failed to parse format specifier {}: {}", format, reason)
            }
        }
    }
}

impl std::error::Error for BindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindError::NotConstant => None,
            BindError::InvalidFormat { reason, .. } => Some(reason),
        }
    }
}

/// A sink of per-row output strings.
///
/// The executor's columnar string buffer implements this; the engine asks
/// it for a writable region of the exact predicted length for every row.
/// `Vec<u8>` implements it as a flat buffer for in-process use.
pub trait StringSink {
    /// Obtain a writable region of exactly `len` bytes for the next row.
    fn allocate(&mut self, len: usize) -> &mut [u8];
}

impl StringSink for Vec<u8> {
    fn allocate(&mut self, len: usize) -> &mut [u8] {
        let start = self.len();
        self.resize(start + len, 0);
        &mut self[start..]
    }
}

/// A bound `strftime` call: the format compiled once at plan time.
///
/// # Examples
///
/// ```
/// use strftime_sql::scalar::{FormatArg, Strftime};
/// use strftime_sql::Time;
/// # include!("mock.rs.in");
///
/// let bound = Strftime::bind(FormatArg::Constant(Some("%Y-%m-%d %H:%M:%S"))).unwrap();
/// let row = MockTime::new(1992, 3, 2, 7, 8, 9, 0, 1, 62);
/// assert_eq!(bound.format_row(&row).as_deref(), Some("1992-03-02 07:08:09"));
/// ```
#[derive(Debug)]
pub struct Strftime {
    program: Option<StrfTimeFormat>,
}

impl Strftime {
    /// Bind the format argument, compiling it into a program.
    ///
    /// # Errors
    ///
    /// Fails with [`BindError::NotConstant`] for a non-constant format
    /// and [`BindError::InvalidFormat`] when compilation fails.
    pub fn bind(format: FormatArg<'_>) -> Result<Self, BindError> {
        Ok(Self {
            program: bind_format(format, StrfTimeFormat::compile)?,
        })
    }

    /// Whether the bound format was the SQL `NULL` literal, making the
    /// whole result vector a constant `NULL`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.program.is_none()
    }

    /// Format a single row. `None` when the bound format was `NULL`.
    pub fn format_row(&self, row: &impl Time) -> Option<String> {
        self.program.as_ref().map(|program| program.format(row))
    }

    /// Format a vector of rows, reserving the exact predicted length for
    /// each from the sink. A `NULL` format writes nothing; the executor
    /// short-circuits on [`is_null`](Self::is_null).
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteZero`] only if the sink hands back a region
    /// smaller than requested.
    pub fn execute<T: Time>(
        &self,
        rows: &[T],
        sink: &mut impl StringSink,
    ) -> Result<(), Error> {
        let program = match &self.program {
            Some(program) => program,
            None => return Ok(()),
        };
        for row in rows {
            let length = program.length(row);
            program.format_into(row, sink.allocate(length))?;
        }
        Ok(())
    }
}

/// A bound `strptime` call: the format compiled once at plan time.
///
/// # Examples
///
/// ```
/// use strftime_sql::scalar::{FormatArg, Strptime};
///
/// let bound = Strptime::bind(FormatArg::Constant(Some("%-d %b %Y"))).unwrap();
/// let parsed = bound.parse_row("5 Dec 1992").unwrap().unwrap();
/// assert_eq!((parsed.year, parsed.month, parsed.day), (1992, 12, 5));
/// ```
#[derive(Debug)]
pub struct Strptime {
    program: Option<StrpTimeFormat>,
    format: String,
}

impl Strptime {
    /// Bind the format argument, compiling it into a parse program.
    ///
    /// # Errors
    ///
    /// Fails with [`BindError::NotConstant`] for a non-constant format
    /// and [`BindError::InvalidFormat`] when compilation fails, including
    /// for the specifiers the parser cannot invert.
    pub fn bind(format: FormatArg<'_>) -> Result<Self, BindError> {
        let text = match format {
            FormatArg::Constant(Some(text)) => text.to_string(),
            _ => String::new(),
        };
        Ok(Self {
            program: bind_format(format, StrpTimeFormat::compile)?,
            format: text,
        })
    }

    /// Whether the bound format was the SQL `NULL` literal, making the
    /// whole result vector a constant `NULL`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.program.is_none()
    }

    /// Parse a single row. `Ok(None)` when the bound format was `NULL`.
    ///
    /// # Errors
    ///
    /// A failed parse is reported with the row input, the format string
    /// and a caret marking the failing position.
    pub fn parse_row(&self, input: &str) -> Result<Option<Parsed>, StrptimeError> {
        let program = match &self.program {
            Some(program) => program,
            None => return Ok(None),
        };
        match program.parse(input) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(error) => Err(StrptimeError {
                input: input.to_string(),
                format: self.format.clone(),
                error,
            }),
        }
    }
}

fn bind_format<T>(
    format: FormatArg<'_>,
    compile: impl FnOnce(&str) -> Result<T, CompileError>,
) -> Result<Option<T>, BindError> {
    match format {
        FormatArg::Column => Err(BindError::NotConstant),
        FormatArg::Constant(None) => Ok(None),
        FormatArg::Constant(Some(format)) => match compile(format) {
            Ok(program) => Ok(Some(program)),
            Err(reason) => Err(BindError::InvalidFormat {
                format: format.to_string(),
                reason,
            }),
        },
    }
}

/// A per-row `strptime` failure, rendered with the offending input and a
/// caret marking the position at which matching failed.
///
/// ```text
/// Could not parse string "13 PM" according to format specifier "%-I %p"
/// 13 PM
/// ^
/// Error: Hour12 out of range, expected a value between 1 and 12
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StrptimeError {
    input: String,
    format: String,
    error: ParseError,
}

impl StrptimeError {
    /// The underlying positioned parse error.
    #[must_use]
    pub fn parse_error(&self) -> &ParseError {
        &self.error
    }
}

impl fmt::Display for StrptimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Could not parse string \"{}\" according to format specifier \"{}\"",
            self.input, self.format
        )?;
        writeln!(f, "{}", self.input)?;
        write!(f, "{: >width$}^", "", width = self.error.position)?;
        write!(f, "\nError: {}", self.error)
    }
}

impl std::error::Error for StrptimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
