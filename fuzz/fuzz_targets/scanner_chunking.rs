#![no_main]

use libfuzzer_sys::fuzz_target;
use particle_wire::{Delimiters, Segmenter, Segments};

// Fuzz target: chunked feeding must agree with a single-slice split.
//
// Input format:
//   byte 0: chunk size (0 is treated as 1)
//   byte 1: low bit selects emit_delimiters
//   bytes 2..: document
//
// Feeds the document in fixed-size chunks, carrying unconsumed bytes
// (partial delimiters) into the next call, and asserts the routed
// segments and any error match `Segmenter::split_slice`.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let chunk_size = usize::from(data[0]).max(1);
    let emit = data[1] & 1 == 1;
    let doc = &data[2..];
    let delimiters = Delimiters::single("---").unwrap();

    let expected = Segmenter::split_slice(delimiters.clone(), emit, doc);

    let mut segmenter = Segmenter::new(delimiters, emit);
    let mut out = Segments::default();
    let mut pending = Vec::new();
    let mut chunks = doc.chunks(chunk_size).peekable();

    let actual = loop {
        if let Some(chunk) = chunks.next() {
            pending.extend_from_slice(chunk);
        }
        let at_eof = chunks.peek().is_none();
        match segmenter.feed(&pending, at_eof, &mut out) {
            Ok(progress) => {
                pending.drain(..progress.consumed);
                if progress.finished {
                    break Ok(out);
                }
            }
            Err(err) => break Err(err),
        }
    };

    assert_eq!(actual, expected);
});
