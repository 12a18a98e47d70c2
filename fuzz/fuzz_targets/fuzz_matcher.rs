#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    name: &'a str,
    query: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let hit = spyglass::query::matches(input.name, input.query);

    // A name always contains itself, whatever its case
    assert!(spyglass::query::matches(input.name, input.name));
    if input.query.is_empty() {
        assert!(hit);
    }

    let bucket = spyglass::index::hash_name(input.name);
    assert!(bucket < spyglass::index::TABLE_SIZE);
});
