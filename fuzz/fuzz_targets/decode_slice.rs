#![no_main]

use libfuzzer_sys::fuzz_target;
use particle_decoder::FrontmatterDecoder;
use particle_types::{JSON, TOML, YAML};

// Fuzz target: in-memory decode under every built-in profile.
//
// Input format:
//   byte 0: profile selector (yaml, toml, json)
//   bytes 1..: document
//
// Decodes into a `serde_json::Value` so any well-formed metadata is
// accepted. Catches panics in delimiter recognition and in the codecs.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, doc)) = data.split_first() else {
        return;
    };

    let mut meta = serde_json::Value::Null;
    let _ = match selector % 3 {
        0 => FrontmatterDecoder::new(&YAML).decode_slice(doc, &mut meta),
        1 => FrontmatterDecoder::new(&TOML).decode_slice(doc, &mut meta),
        _ => FrontmatterDecoder::new(&JSON).decode_slice(doc, &mut meta),
    };
});
