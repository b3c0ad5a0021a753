//! Golden fixture generator for the particle conformance suite.
//!
//! Writes one `document.md` per built-in profile under `tests/golden/`.
//! Run it after any deliberate change to the framing or to a codec's
//! output, then review the diff before committing.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p particle-tests
//! ```
//!
//! # Generated fixtures
//!
//! | Directory | Contents                                        |
//! |-----------|-------------------------------------------------|
//! | yaml      | `---` block + content                           |
//! | toml      | `+++` block + content                           |
//! | json      | brace-delimited JSON object + content           |
//! | plain     | no frontmatter at all (handwritten, not touched) |

#![allow(clippy::pedantic)]

use std::fs;
use std::path::Path;

use particle_encoder::FrontmatterEncoder;
use particle_tests::{GOLDEN_CONTENT, golden_path, golden_post};
use particle_types::{Codec, Encoding, JSON, TOML, YAML};

fn main() {
    write_fixture("yaml", &YAML);
    write_fixture("toml", &TOML);
    write_fixture("json", &JSON);
}

fn write_fixture<C: Codec>(name: &str, encoding: &Encoding<C>) {
    let doc = FrontmatterEncoder::new(encoding)
        .encode(GOLDEN_CONTENT, &golden_post())
        .unwrap_or_else(|e| panic!("failed to encode {name} fixture: {e}"));
    write(&golden_path(name), &doc);
}

fn write(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture directory");
    }
    fs::write(path, bytes).expect("write fixture");
    println!("wrote {} ({} bytes)", path.display(), bytes.len());
}
