#![no_main]

mod mock;

use libfuzzer_sys::fuzz_target;
use mock::MockTime;
use strftime_sql::StrfTimeFormat;

fuzz_target!(|data: (MockTime, &str)| {
    let (time, format) = data;
    if let Ok(program) = StrfTimeFormat::compile(format) {
        // The length oracle must agree with the bytes written.
        let length = program.length(&time);
        let mut buf = vec![0u8; length];
        let written = program.format_into(&time, &mut buf).unwrap();
        assert_eq!(written.len(), length);
    }
});
