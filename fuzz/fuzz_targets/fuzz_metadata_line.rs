#![no_main]

use libfuzzer_sys::fuzz_target;
use mztab_m::error::ErrorList;
use mztab_m::parser::{MetadataLabel, MtdLineParser, ParserContext};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = MetadataLabel::parse(text);

    let mut context = ParserContext::new();
    let mut errors = ErrorList::default();
    let mut parser = MtdLineParser::new(&mut context, &mut errors);
    for (i, line) in text.lines().enumerate() {
        if parser.parse(i + 1, line).is_err() {
            break;
        }
    }
    let _ = parser.refine_normal_metadata();
});
