#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lingo_catalog::template::{self, TemplateData};

#[derive(Arbitrary, Debug)]
struct Input {
    template: String,
    args: Vec<(String, String)>,
}

fuzz_target!(|input: Input| {
    if input.template.len() > 1024 || input.args.len() > 16 {
        return;
    }
    let data: TemplateData = input.args.into_iter().collect();

    // Must never panic; on success every placeholder was supplied.
    if template::render(&input.template, &data).is_ok() {
        for name in template::placeholders(&input.template) {
            assert!(data.contains_key(name), "rendered without value for {name:?}");
        }
    }
});
