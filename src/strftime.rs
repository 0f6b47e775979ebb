//! Formatting side of the engine: a compiled program that predicts the
//! exact output length for a given time and then emits it.

use crate::format::{parse_format_string, CompileError, Program, Specifier, DAYS, MONTHS};
use crate::utils::{signed_length, unsigned_length, write_two_digits, write_unsigned};
use crate::week::{week_number, WeekStart};
use crate::write::Write;
use crate::{Error, Time};

/// Map an hour of the day onto the 12-hour clock.
fn hour_12(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        hour => hour,
    }
}

/// A compiled `strftime` program.
///
/// Compiled once at plan time from a constant format string, then shared
/// read-only across all rows (and threads) of the bound expression.
///
/// # Examples
///
/// ```
/// use strftime_sql::StrfTimeFormat;
///
/// assert!(StrfTimeFormat::compile("%Y-%m-%d").is_ok());
///
/// let err = StrfTimeFormat::compile("%q").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Unrecognized format for strftime/strptime: %q"
/// );
/// ```
#[derive(Debug)]
pub struct StrfTimeFormat {
    literals: Vec<String>,
    specifiers: Vec<Specifier>,
    /// Sum of the literal sizes and the widths of the constant-size
    /// specifiers.
    constant_size: usize,
    /// The specifiers whose output width depends on the formatted value.
    variable_specifiers: Vec<Specifier>,
    /// Which specifiers need the calendar date rather than only the seven
    /// field values. Parallel to `specifiers`.
    is_date_specifier: Vec<bool>,
}

impl StrfTimeFormat {
    /// Compile a format string into a `strftime` program.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] when the format string contains an
    /// unrecognized specifier or ends with a lone `%`.
    pub fn compile(format: &str) -> Result<Self, CompileError> {
        let mut program = Program::default();
        parse_format_string(format, &mut program)?;
        let Program {
            literals,
            specifiers,
        } = program;

        let mut constant_size = literals.iter().map(String::len).sum::<usize>();
        let mut variable_specifiers = Vec::new();
        let mut is_date_specifier = Vec::with_capacity(specifiers.len());
        for &specifier in &specifiers {
            match specifier.fixed_width() {
                Some(width) => constant_size += width,
                None => variable_specifiers.push(specifier),
            }
            is_date_specifier.push(specifier.needs_date());
        }

        Ok(Self {
            literals,
            specifiers,
            constant_size,
            variable_specifiers,
            is_date_specifier,
        })
    }

    /// The literal fragments of the program. There is always exactly one
    /// more literal than there are specifiers; output interleaves them,
    /// starting and ending with a literal.
    #[must_use]
    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    /// The specifiers of the program, in output order.
    #[must_use]
    pub fn specifiers(&self) -> &[Specifier] {
        &self.specifiers
    }

    /// Whether any specifier in this program needs the calendar date
    /// (weekday, day of year, week number) rather than only the seven
    /// field values. Executors that materialize date parts lazily can
    /// skip the date extraction when this is `false`.
    #[must_use]
    pub fn requires_date(&self) -> bool {
        self.is_date_specifier.iter().any(|&is_date| is_date)
    }

    /// The exact number of bytes [`format_into`](Self::format_into) will
    /// write for this time.
    pub fn length(&self, time: &impl Time) -> usize {
        let mut size = self.constant_size;
        for &specifier in &self.variable_specifiers {
            size += variable_length(specifier, time);
        }
        size
    }

    /// Format `time`, writing into the provided buffer and returning the
    /// written subslice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteZero`] when the buffer is smaller than
    /// [`length`](Self::length) reports for this time.
    pub fn format_into<'a>(
        &self,
        time: &impl Time,
        buf: &'a mut [u8],
    ) -> Result<&'a mut [u8], Error> {
        let len = buf.len();

        let mut cursor = &mut buf[..];
        self.fmt(time, &mut cursor)?;
        let remaining_len = cursor.len();

        Ok(&mut buf[..len - remaining_len])
    }

    /// Format `time` into an owned string of exactly
    /// [`length`](Self::length) bytes.
    pub fn format(&self, time: &impl Time) -> String {
        let mut buf = Vec::with_capacity(self.length(time));
        // Vec sinks accept the whole output.
        let result = self.fmt(time, &mut buf);
        debug_assert!(result.is_ok());
        debug_assert_eq!(buf.len(), self.length(time));
        String::from_utf8(buf).expect("formatted output should be valid UTF-8")
    }

    fn fmt<W: Write + ?Sized>(&self, time: &impl Time, f: &mut W) -> Result<(), Error> {
        let mut literals = self.literals.iter();
        for &specifier in &self.specifiers {
            if let Some(literal) = literals.next() {
                f.write_all(literal.as_bytes())?;
            }
            write_specifier(specifier, time, f)?;
        }
        for literal in literals {
            f.write_all(literal.as_bytes())?;
        }
        Ok(())
    }
}

/// Output width of a variable-length specifier for the given time.
fn variable_length(specifier: Specifier, time: &impl Time) -> usize {
    match specifier {
        Specifier::FullWeekdayName => DAYS[time.day_of_week() as usize].len(),
        Specifier::FullMonthName => MONTHS[(time.month() - 1) as usize].len(),
        Specifier::Year => {
            let year = time.year();
            if (0..=9999).contains(&year) {
                4
            } else {
                signed_length(i64::from(year))
            }
        }
        Specifier::YearWithoutCentury => unsigned_length(time.year().rem_euclid(100) as u64),
        Specifier::DayOfMonth => unsigned_length(u64::from(time.day())),
        Specifier::Month => unsigned_length(u64::from(time.month())),
        Specifier::Hour24 => unsigned_length(u64::from(time.hour())),
        Specifier::Hour12 => unsigned_length(u64::from(hour_12(time.hour()))),
        Specifier::Minute => unsigned_length(u64::from(time.minute())),
        Specifier::Second => unsigned_length(u64::from(time.second())),
        Specifier::DayOfYear => unsigned_length(u64::from(time.day_of_year())),
        // Reserved for future time zone support.
        Specifier::UtcOffset | Specifier::TimeZoneName => 0,
        _ => unreachable!("constant-size specifiers are part of constant_size"),
    }
}

fn write_specifier<W: Write + ?Sized>(
    specifier: Specifier,
    time: &impl Time,
    f: &mut W,
) -> Result<(), Error> {
    match specifier {
        Specifier::AbbreviatedWeekdayName => {
            f.write_all(&DAYS[time.day_of_week() as usize].as_bytes()[..3])
        }
        Specifier::FullWeekdayName => f.write_all(DAYS[time.day_of_week() as usize].as_bytes()),
        Specifier::WeekdayDecimal => f.write_all(&[b'0' + time.day_of_week()]),
        Specifier::DayOfMonthPadded => write_two_digits(f, u32::from(time.day())),
        Specifier::DayOfMonth => write_unsigned(f, u64::from(time.day())),
        Specifier::AbbreviatedMonthName => {
            f.write_all(&MONTHS[(time.month() - 1) as usize].as_bytes()[..3])
        }
        Specifier::FullMonthName => f.write_all(MONTHS[(time.month() - 1) as usize].as_bytes()),
        Specifier::MonthPadded => write_two_digits(f, u32::from(time.month())),
        Specifier::Month => write_unsigned(f, u64::from(time.month())),
        Specifier::YearWithoutCenturyPadded => {
            write_two_digits(f, time.year().rem_euclid(100) as u32)
        }
        Specifier::YearWithoutCentury => write_unsigned(f, time.year().rem_euclid(100) as u64),
        Specifier::Year => {
            let year = time.year();
            if (0..=9999).contains(&year) {
                let year = year as u32;
                write_two_digits(f, year / 100)?;
                write_two_digits(f, year % 100)
            } else {
                if year < 0 {
                    f.write_all(b"-")?;
                }
                write_unsigned(f, u64::from(year.unsigned_abs()))
            }
        }
        Specifier::Hour24Padded => write_two_digits(f, u32::from(time.hour())),
        Specifier::Hour24 => write_unsigned(f, u64::from(time.hour())),
        Specifier::Hour12Padded => write_two_digits(f, u32::from(hour_12(time.hour()))),
        Specifier::Hour12 => write_unsigned(f, u64::from(hour_12(time.hour()))),
        Specifier::Meridian => f.write_all(if time.hour() >= 12 { b"PM" } else { b"AM" }),
        Specifier::MinutePadded => write_two_digits(f, u32::from(time.minute())),
        Specifier::Minute => write_unsigned(f, u64::from(time.minute())),
        Specifier::SecondPadded => write_two_digits(f, u32::from(time.second())),
        Specifier::Second => write_unsigned(f, u64::from(time.second())),
        Specifier::Microsecond => {
            let micros = time.microsecond();
            write_two_digits(f, micros / 10_000)?;
            write_two_digits(f, (micros / 100) % 100)?;
            write_two_digits(f, micros % 100)
        }
        // Reserved for future time zone support.
        Specifier::UtcOffset | Specifier::TimeZoneName => Ok(()),
        Specifier::DayOfYearPadded => {
            let day_of_year = u32::from(time.day_of_year());
            f.write_all(&[b'0' + (day_of_year / 100) as u8])?;
            write_two_digits(f, day_of_year % 100)
        }
        Specifier::DayOfYear => write_unsigned(f, u64::from(time.day_of_year())),
        Specifier::WeekNumberSunday => {
            let week = week_number(
                i64::from(time.day_of_week()),
                i64::from(time.day_of_year()),
                WeekStart::Sunday,
            );
            write_two_digits(f, week as u32)
        }
        Specifier::WeekNumberMonday => {
            let week = week_number(
                i64::from(time.day_of_week()),
                i64::from(time.day_of_year()),
                WeekStart::Monday,
            );
            write_two_digits(f, week as u32)
        }
    }
}
