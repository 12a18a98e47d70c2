#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spyglass::index::NameIndex;
use spyglass::session::{FileLauncher, Input, LoopState, Session, SessionOptions};
use std::path::Path;

struct NoLaunch;

impl FileLauncher for NoLaunch {
    fn open(&mut self, _path: &Path) {}
}

#[derive(Arbitrary, Debug)]
enum Op {
    Char(char),
    Backspace,
    Confirm,
    Terminate,
    Replace(String),
    Select(String),
}

fuzz_target!(|data: (Vec<(String, String)>, Vec<Op>)| {
    let (files, ops) = data;
    let mut index = NameIndex::new();
    for (name, path) in files {
        index.insert(name, path);
    }

    let options = SessionOptions::default();
    let mut session = Session::new(&index, options);
    for op in ops {
        let input = match op {
            Op::Char(c) => Input::Char(c),
            Op::Backspace => Input::Backspace,
            Op::Confirm => Input::Confirm,
            Op::Terminate => Input::Terminate,
            Op::Replace(text) => Input::ReplaceQuery(text),
            Op::Select(text) => Input::Selection(text),
        };
        let state = session.handle(input, &mut NoLaunch);

        assert!(session.matches().len() <= options.max_results);
        assert!(session.query().chars().count() <= options.max_query_len);
        if state == LoopState::Confirming {
            assert!(!session.matches().is_empty());
        }
    }
});
