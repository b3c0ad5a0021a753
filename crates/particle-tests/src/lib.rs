//! Shared fixtures for the integration tests, benches and the golden
//! file generator.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Metadata carried by every golden fixture.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub struct Post {
    pub title: String,
    pub author: String,
    pub draft: bool,
    pub weight: i64,
}

/// The metadata value written into the golden fixtures.
#[must_use]
pub fn golden_post() -> Post {
    Post {
        title: "Hello Particle".to_string(),
        author: "John Doe".to_string(),
        draft: false,
        weight: 10,
    }
}

/// The content body written into the golden fixtures.
pub const GOLDEN_CONTENT: &[u8] = b"# Hello\n\nThis document has a frontmatter block.\n";

/// Fixture directories under `tests/golden/`, one per built-in profile.
pub const GOLDEN_FORMATS: [&str; 3] = ["yaml", "toml", "json"];

/// `tests/golden/<fixture>/document.md` inside this crate.
#[must_use]
pub fn golden_path(fixture: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(fixture)
        .join("document.md")
}

/// A document of roughly `body_len` content bytes behind a small YAML
/// block, for benches and stress tests.
#[must_use]
pub fn large_yaml_document(body_len: usize) -> Vec<u8> {
    let mut doc = b"---\ntitle: Large\nauthor: Bench\ndraft: true\nweight: 1\n---\n\n".to_vec();
    let line = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n";
    while doc.len() < body_len {
        doc.extend_from_slice(line);
    }
    doc
}
