#![no_main]

use libfuzzer_sys::fuzz_target;
use mztab_m::parser::MzTabFileParser;

fuzz_target!(|data: &[u8]| {
    // Malformed documents must end up in the report, never in a panic
    let _ = MzTabFileParser::new().parse_reader(data);
});
