//! Edge-case tests for delimiter recognition and framing.
//!
//! These pin down behaviour at the boundaries of the delimiter rules:
//! near-miss delimiters, empty and unterminated blocks, documents that are
//! all frontmatter, and delimiter text appearing inside content.

use insta::assert_snapshot;
use particle_decoder::{DecodeError, FrontmatterDecoder};
use particle_encoder::{EncodeError, FrontmatterEncoder};
use particle_tests::Post;
use particle_types::{ConfigError, Encoding, JSON, JsonCodec, TOML, YAML, YamlCodec};
use particle_wire::{DelimiterStyle, WireError};
use serde::{Deserialize, Serialize};

fn decode_yaml(doc: &str) -> Result<(Post, Vec<u8>), DecodeError> {
    let mut post = Post::default();
    let content = FrontmatterDecoder::new(&YAML).decode_str(doc, &mut post)?;
    Ok((post, content))
}

#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
struct Example {
    #[serde(rename = "Name")]
    name: String,
}

// ── Recognition ───────────────────────────────────────────────────────────────

#[test]
fn empty_input_is_empty_content() {
    let (post, content) = decode_yaml("").unwrap();
    assert_eq!(post, Post::default());
    assert!(content.is_empty());
}

#[test]
fn delimiter_must_be_at_the_very_start() {
    let doc = "\n---\ntitle: late\n---\n\nbody";
    let (post, content) = decode_yaml(doc).unwrap();
    assert_eq!(post, Post::default());
    assert_eq!(content, doc.as_bytes());
}

#[test]
fn longer_dash_run_is_not_a_delimiter() {
    let doc = "----\ntitle: x\n----\n\nbody";
    let (post, content) = decode_yaml(doc).unwrap();
    assert_eq!(post, Post::default());
    assert_eq!(content, doc.as_bytes());
}

#[test]
fn delimiter_with_trailing_space_is_not_a_delimiter() {
    let doc = "--- \ntitle: x\n";
    let (_, content) = decode_yaml(doc).unwrap();
    assert_eq!(content, doc.as_bytes());
}

#[test]
fn crlf_line_endings_are_not_recognized() {
    let doc = "---\r\ntitle: x\r\n---\r\n\r\nbody";
    let (post, content) = decode_yaml(doc).unwrap();
    assert_eq!(post, Post::default());
    assert_eq!(content, doc.as_bytes());
}

#[test]
fn bare_delimiter_without_newline_is_content() {
    let (post, content) = decode_yaml("---").unwrap();
    assert_eq!(post, Post::default());
    assert_eq!(content, b"---");
}

// ── Block shapes ──────────────────────────────────────────────────────────────

#[test]
fn empty_block_closes() {
    let (post, content) = decode_yaml("---\n---\n\nbody\n").unwrap();
    assert_eq!(post, Post::default());
    assert_eq!(content, b"body\n");
}

#[test]
fn document_that_is_only_frontmatter() {
    let (post, content) = decode_yaml("---\ntitle: alone\n---\n").unwrap();
    assert_eq!(post.title, "alone");
    assert!(content.is_empty());
}

#[test]
fn content_directly_after_close_keeps_its_first_byte() {
    let (post, content) = decode_yaml("---\ntitle: tight\n---\nbody").unwrap();
    assert_eq!(post.title, "tight");
    assert_eq!(content, b"body");
}

#[test]
fn only_one_separator_newline_is_dropped() {
    let (_, content) = decode_yaml("---\ntitle: t\n---\n\n\nbody").unwrap();
    assert_eq!(content, b"\nbody");
}

#[test]
fn unterminated_block_is_an_error() {
    let err = decode_yaml("---\ntitle: never closed\n\nbody text\n").unwrap_err();
    assert!(matches!(err, DecodeError::Wire(WireError::UnterminatedBlock { .. })));
}

#[test]
fn close_at_end_of_input_without_newline_is_not_a_close() {
    let err = decode_yaml("---\ntitle: t\n---").unwrap_err();
    assert!(matches!(err, DecodeError::Wire(WireError::UnterminatedBlock { offset: 16 })));
}

#[test]
fn later_delimiters_stay_in_content() {
    let doc = "---\ntitle: first\n---\n\nbody\n---\ntitle: second\n---\n";
    let (post, content) = decode_yaml(doc).unwrap();
    assert_eq!(post.title, "first");
    assert_eq!(content, b"body\n---\ntitle: second\n---\n");
}

#[test]
fn indented_close_is_metadata() {
    #[derive(Debug, Default, Deserialize)]
    struct Literal {
        body: String,
    }

    let doc = "---\nbody: |-\n  ---\n  literal\n---\n\ncontent";
    let mut meta = Literal::default();
    let content = FrontmatterDecoder::new(&YAML)
        .decode_str(doc, &mut meta)
        .unwrap();
    assert_eq!(meta.body, "---\nliteral");
    assert_eq!(content, b"content");
}

// ── Reference documents ───────────────────────────────────────────────────────

#[test]
fn decodes_the_reference_yaml_document() {
    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Meta {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Date")]
        date: String,
        #[serde(rename = "Title")]
        title: String,
    }

    let doc = "---\nName: John Doe\nDate: 10-10-2016\nTitle: example YAML\n---\n\nThis is an example file.\n";
    let mut meta = Meta::default();
    let content = FrontmatterDecoder::new(&YAML).decode_str(doc, &mut meta).unwrap();
    assert_eq!(
        meta,
        Meta {
            name: "John Doe".into(),
            date: "10-10-2016".into(),
            title: "example YAML".into(),
        }
    );
    assert_eq!(content, b"This is an example file.\n");
}

#[test]
fn encodes_the_reference_json_document() {
    let doc = FrontmatterEncoder::new(&JSON)
        .encode_to_string("Content...", &Example { name: "A Example".into() })
        .unwrap();
    assert_eq!(doc, "{\n\t\"Name\": \"A Example\"\n}\n\nContent...");
}

#[test]
fn encodes_the_reference_toml_document() {
    let doc = FrontmatterEncoder::new(&TOML)
        .encode_to_string("Content...", &Example { name: "A Example".into() })
        .unwrap();
    assert_eq!(doc, "+++\nName = \"A Example\"\n+++\n\nContent...");
}

// ── Unframeable metadata ──────────────────────────────────────────────────────

#[test]
fn toml_title_holding_a_delimiter_line_is_refused() {
    let post = Post {
        title: "a\n+++\nb".into(),
        ..Post::default()
    };
    let err = FrontmatterEncoder::new(&TOML).encode(b"body", &post).unwrap_err();
    assert!(matches!(err, EncodeError::Unframeable { ref delimiter } if delimiter == "+++"));
}

#[test]
fn yaml_title_holding_a_delimiter_line_roundtrips() {
    let post = Post {
        title: "a\n---\nb".into(),
        ..Post::default()
    };
    let doc = FrontmatterEncoder::new(&YAML).encode(b"body", &post).unwrap();
    let mut back = Post::default();
    let content = FrontmatterDecoder::new(&YAML).decode_slice(&doc, &mut back).unwrap();
    assert_eq!(back, post);
    assert_eq!(content, b"body");
}

#[test]
fn json_scalar_metadata_is_refused() {
    let err = FrontmatterEncoder::new(&JSON).encode(b"body", &"just a string").unwrap_err();
    assert!(matches!(err, EncodeError::Unframeable { .. }));
}

// ── Profiles ──────────────────────────────────────────────────────────────────

#[test]
fn pair_style_rejects_a_single_token() {
    let err = Encoding::builder(JsonCodec)
        .delimiter("{}")
        .style(DelimiterStyle::SpaceSeparatedPair)
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Delimiter(WireError::InvalidDelimiterPair { .. })));
}

#[test]
fn empty_delimiter_is_rejected() {
    let err = Encoding::builder(YamlCodec).delimiter("").build().unwrap_err();
    assert!(matches!(err, ConfigError::Delimiter(WireError::EmptyDelimiter)));
}

#[test]
fn custom_pair_delimiters() {
    let enc = Encoding::builder(YamlCodec)
        .delimiter("<!-- -->")
        .style(DelimiterStyle::SpaceSeparatedPair)
        .build()
        .unwrap();
    let doc = FrontmatterEncoder::new(&enc)
        .encode_to_string("<p>hi</p>", &Example { name: "html".into() })
        .unwrap();
    assert_eq!(doc, "<!--\nName: html\n-->\n\n<p>hi</p>");

    let mut back = Example::default();
    let content = FrontmatterDecoder::new(&enc).decode_str(&doc, &mut back).unwrap();
    assert_eq!(back.name, "html");
    assert_eq!(content, b"<p>hi</p>");
}

#[test]
fn json_profile_ignores_yaml_documents() {
    let doc = "---\nName: x\n---\n\nbody";
    let mut back = Example::default();
    let content = FrontmatterDecoder::new(&JSON).decode_str(doc, &mut back).unwrap();
    assert_eq!(back, Example::default());
    assert_eq!(content, doc.as_bytes());
}

// ── Error messages ────────────────────────────────────────────────────────────

#[test]
fn unterminated_block_message() {
    let err = decode_yaml("---\ntitle: t\n").unwrap_err();
    assert_snapshot!(err.to_string(), @"frontmatter block opened but never closed (input ended at offset 13)");
}

#[test]
fn invalid_pair_message() {
    let err = Encoding::builder(JsonCodec)
        .delimiter("{ } ]")
        .style(DelimiterStyle::SpaceSeparatedPair)
        .build()
        .unwrap_err();
    assert_snapshot!(
        err.to_string(),
        @r#"delimiter "{ } ]" does not split into exactly two tokens (got 3)"#
    );
}
