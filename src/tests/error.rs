use std::error::Error as _;

use crate::format::Specifier;
use crate::scalar::{BindError, FormatArg, Strptime};
use crate::{CompileError, Error, Field, ParseError, ParseErrorKind, StrpTimeFormat};

#[test]
fn test_compile_error_messages() {
    assert_eq!(
        CompileError::UnrecognizedSpecifier {
            specifier: 'q',
            unpadded: false,
        }
        .to_string(),
        "Unrecognized format for strftime/strptime: %q"
    );
    assert_eq!(
        CompileError::UnrecognizedSpecifier {
            specifier: 'q',
            unpadded: true,
        }
        .to_string(),
        "Unrecognized format for strftime/strptime: %-q"
    );
    assert_eq!(
        CompileError::TrailingFormatCharacter.to_string(),
        "Trailing format character %"
    );
    assert_eq!(
        CompileError::NotImplemented(Specifier::WeekNumberSunday).to_string(),
        "%U specifier is not implemented for parsing"
    );
    assert_eq!(
        CompileError::NotImplemented(Specifier::DayOfYearPadded).to_string(),
        "%j specifier is not implemented for parsing"
    );
}

#[test]
fn test_parse_error_messages() {
    let check = |kind: ParseErrorKind, expected: &str| {
        assert_eq!(kind.to_string(), expected);
    };

    check(
        ParseErrorKind::LiteralMismatch {
            expected: "-".to_string(),
        },
        "Literal does not match, expected -",
    );
    check(ParseErrorKind::ExpectedNumber, "Expected a number");
    check(
        ParseErrorKind::NumberOutOfRange,
        "Number is out of range of format specifier",
    );
    check(ParseErrorKind::ExpectedMeridiem, "Expected AM/PM");
    check(
        ParseErrorKind::TrailingCharacters,
        "Full specifier did not match: trailing characters",
    );
    check(
        ParseErrorKind::ExpectedWeekdayName { abbreviated: true },
        "Expected an abbreviated weekday name",
    );
    check(
        ParseErrorKind::ExpectedMonthName { abbreviated: false },
        "Expected a full month name",
    );
}

#[test]
fn test_out_of_range_messages() {
    let check = |field: Field, expected: &str| {
        assert_eq!(ParseErrorKind::OutOfRange { field }.to_string(), expected);
    };

    check(Field::Day, "Day out of range, expected a value between 1 and 31");
    check(Field::Month, "Month out of range, expected a value between 1 and 12");
    check(Field::Year, "Year out of range, expected a value between 0 and 99");
    check(Field::Hour24, "Hour24 out of range, expected a value between 0 and 23");
    check(Field::Hour12, "Hour12 out of range, expected a value between 1 and 12");
    check(Field::Minute, "Minute out of range, expected a value between 0 and 59");
    check(Field::Second, "Second out of range, expected a value between 0 and 59");
    check(
        Field::Microseconds,
        "Microseconds out of range, expected a value between 0 and 999999",
    );
}

#[test]
fn test_error_display_is_non_empty() {
    assert!(!Error::WriteZero.to_string().is_empty());
    assert!(!BindError::NotConstant.to_string().is_empty());

    let error = ParseError {
        kind: ParseErrorKind::ExpectedNumber,
        position: 3,
    };
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_error_source_returns_inner_error() {
    // Errors without an inner error
    assert!(Error::WriteZero.source().is_none());
    assert!(BindError::NotConstant.source().is_none());

    // A failed bind exposes the compile error
    let err = StrpTimeFormat::compile("%q").unwrap_err();
    let bind_err = BindError::InvalidFormat {
        format: "%q".to_string(),
        reason: err.clone(),
    };
    let source = bind_err.source().unwrap().downcast_ref();
    assert_eq!(source, Some(&err));

    // A failed row parse exposes the positioned parse error
    let bound = Strptime::bind(FormatArg::Constant(Some("%Y"))).unwrap();
    let row_err = bound.parse_row("abc").unwrap_err();
    let source: &ParseError = row_err.source().unwrap().downcast_ref().unwrap();
    assert_eq!(source.kind, ParseErrorKind::ExpectedNumber);
    assert_eq!(source, row_err.parse_error());
}
