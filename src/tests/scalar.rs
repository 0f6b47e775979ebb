use crate::scalar::{BindError, FormatArg, Strftime, Strptime, StringSink};
use crate::{CompileError, ParseErrorKind};

use super::MockTime;

#[test]
fn test_bind_rejects_non_constant_format() {
    let err = Strftime::bind(FormatArg::Column).unwrap_err();
    assert_eq!(err, BindError::NotConstant);
    assert_eq!(err.to_string(), "strftime format must be a constant");

    // strptime inherits the strftime wording.
    let err = Strptime::bind(FormatArg::Column).unwrap_err();
    assert_eq!(err.to_string(), "strftime format must be a constant");
}

#[test]
fn test_bind_wraps_compile_errors() {
    let err = Strftime::bind(FormatArg::Constant(Some("%q"))).unwrap_err();
    assert_eq!(
        err,
        BindError::InvalidFormat {
            format: "%q".to_string(),
            reason: CompileError::UnrecognizedSpecifier {
                specifier: 'q',
                unpadded: false,
            },
        }
    );
    assert_eq!(
        err.to_string(),
        "Failed to parse format specifier %q: Unrecognized format for strftime/strptime: %q"
    );

    let err = Strftime::bind(FormatArg::Constant(Some("born on %"))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to parse format specifier born on %: Trailing format character %"
    );

    let err = Strptime::bind(FormatArg::Constant(Some("%U"))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to parse format specifier %U: %U specifier is not implemented for parsing"
    );

    // strftime accepts the specifiers that only strptime rejects.
    assert!(Strftime::bind(FormatArg::Constant(Some("%U"))).is_ok());
}

#[test]
fn test_bind_null_format_makes_rows_null() {
    let bound = Strftime::bind(FormatArg::Constant(None)).unwrap();
    assert!(bound.is_null());
    assert_eq!(bound.format_row(&MockTime::default()), None);

    let mut sink = Vec::new();
    bound.execute(&[MockTime::default()], &mut sink).unwrap();
    assert!(sink.is_empty());

    let bound = Strptime::bind(FormatArg::Constant(None)).unwrap();
    assert!(bound.is_null());
    assert_eq!(bound.parse_row("1992-01-01").unwrap(), None);
}

#[test]
fn test_strftime_rows() {
    let bound = Strftime::bind(FormatArg::Constant(Some("%Y-%m-%d %H:%M:%S"))).unwrap();
    assert!(!bound.is_null());

    let row = MockTime::new(1992, 3, 2, 7, 8, 9, 0, 1, 62);
    assert_eq!(
        bound.format_row(&row).as_deref(),
        Some("1992-03-02 07:08:09")
    );
}

#[test]
fn test_strftime_execute_vector() {
    let bound = Strftime::bind(FormatArg::Constant(Some("%Y-%m"))).unwrap();
    let rows = [
        MockTime::new(1992, 3, 2, 0, 0, 0, 0, 1, 62),
        MockTime::new(-1, 12, 31, 0, 0, 0, 0, 5, 365),
        MockTime::new(2094, 1, 2, 0, 0, 0, 0, 6, 2),
    ];

    let mut sink = Vec::new();
    bound.execute(&rows, &mut sink).unwrap();
    assert_eq!(sink, b"1992-03-1-122094-01".to_vec());
}

#[test]
fn test_string_sink_allocates_exact_regions() {
    let mut sink = Vec::new();
    StringSink::allocate(&mut sink, 2).copy_from_slice(b"ab");
    StringSink::allocate(&mut sink, 0).copy_from_slice(b"");
    StringSink::allocate(&mut sink, 3).copy_from_slice(b"cde");
    assert_eq!(sink, b"abcde".to_vec());
}

#[test]
fn test_strptime_rows() {
    let bound = Strptime::bind(FormatArg::Constant(Some("%-d %b %Y"))).unwrap();
    let parsed = bound.parse_row("5 Dec 1992").unwrap().unwrap();
    assert_eq!((parsed.year, parsed.month, parsed.day), (1992, 12, 5));
    assert_eq!((parsed.hour, parsed.minute, parsed.second), (0, 0, 0));
}

#[test]
fn test_strptime_error_carries_caret() {
    let bound = Strptime::bind(FormatArg::Constant(Some("%-I %p"))).unwrap();
    let err = bound.parse_row("13 PM").unwrap_err();

    assert_eq!(
        err.to_string(),
        "Could not parse string \"13 PM\" according to format specifier \"%-I %p\"\n\
         13 PM\n\
         ^\n\
         Error: Hour12 out of range, expected a value between 1 and 12"
    );
    assert_eq!(err.parse_error().position, 0);

    let bound = Strptime::bind(FormatArg::Constant(Some("%Y-%m"))).unwrap();
    let err = bound.parse_row("1992/03").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not parse string \"1992/03\" according to format specifier \"%Y-%m\"\n\
         1992/03\n\
         \u{20}   ^\n\
         Error: Literal does not match, expected -"
    );
    assert_eq!(err.parse_error().position, 4);
    assert_eq!(
        err.parse_error().kind,
        ParseErrorKind::LiteralMismatch {
            expected: "-".to_string()
        }
    );
}
