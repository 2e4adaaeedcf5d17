use std::io::Cursor;

use txtres_editor::txtres::{decoder, encoder, length, table, text, validate};
use txtres_editor::{Document, FormatConfig, SelectionPolicy, TextEncoding, TxtResError};

// --- fixture builders (raw bytes, independent of the codec under test) ---

/// Length-prefixed ASCII payload with its NUL terminator (none when empty).
fn ascii_field(s: &str) -> Vec<u8> {
    let mut payload = s.as_bytes().to_vec();
    if !payload.is_empty() {
        payload.push(0);
    }
    let mut out = (payload.len() as u32).to_le_bytes().to_vec();
    out.extend_from_slice(&payload);
    out
}

/// Length-prefixed UTF-16LE payload with terminator and sentinel length.
fn utf16_field(s: &str) -> Vec<u8> {
    let mut payload: Vec<u8> = s.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect();
    payload.extend_from_slice(&[0, 0]);
    let code_units = (payload.len() / 2) as u32;
    let raw = 0xFFFF_FFFFu32 - code_units + 1;
    let mut out = raw.to_le_bytes().to_vec();
    out.extend_from_slice(&payload);
    out
}

fn record(key: &str, translation_field: Vec<u8>, variants: Vec<([u8; 8], Vec<u8>)>) -> Vec<u8> {
    let mut out = ascii_field(key);
    out.extend(translation_field);
    out.extend((variants.len() as u32).to_le_bytes());
    for (tag, field) in variants {
        out.extend_from_slice(&tag);
        out.extend(field);
    }
    out
}

fn fixture(header: &[u8], records: &[Vec<u8>], footer: &[u8]) -> Vec<u8> {
    let mut out = header.to_vec();
    for record in records {
        out.extend_from_slice(record);
    }
    out.extend_from_slice(footer);
    out
}

fn parse(bytes: &[u8], config: &FormatConfig) -> txtres_editor::Result<Document> {
    decoder::parse(&mut Cursor::new(bytes.to_vec()), bytes.len() as u64, config)
}

/// decode -> project -> import -> encode with no edits and the default
/// `"1"` policy.
fn reencode_unedited(bytes: &[u8], config: &FormatConfig) -> Vec<u8> {
    let document = parse(bytes, config).expect("decode");
    let projected = table::export_table(&document, config);
    let map = table::ColumnMap::discover(&projected.columns).expect("column map");
    let rows: Vec<_> = projected.rows.iter().map(|cells| map.row(cells)).collect();
    let set = table::split_sentinels(rows, config).expect("sentinel rows");
    encoder::encode(&set, &SelectionPolicy::default(), config).expect("encode")
}

// --- length field ---

const UNICODE_BYTE_LENGTHS: &[u64] = &[2, 4, 64, 4096, 65536];
const ASCII_BYTE_LENGTHS: &[u32] = &[0, 1, 5, 100, 0x7FFF_FFFF];

#[test]
fn length_sentinel_inverse() {
    for &byte_len in UNICODE_BYTE_LENGTHS {
        let field = length::decode(length::encode_unicode(byte_len as u32));
        assert!(field.is_unicode, "byte_len {} not unicode", byte_len);
        assert_eq!(field.byte_len, byte_len);
    }
    for &byte_len in ASCII_BYTE_LENGTHS {
        let field = length::decode(length::encode_ascii(byte_len));
        assert!(!field.is_unicode, "byte_len {} flagged unicode", byte_len);
        assert_eq!(field.byte_len, byte_len as u64);
    }
}

// --- string codec ---

#[test]
fn crlf_normalizes_to_marker_and_back() {
    let decoded = text::decode(b"Line1\r\nLine2\0", TextEncoding::Ascii);
    assert_eq!(decoded.text, "Line1<crlf>Line2");

    let (payload, field) = text::encode(&decoded.text);
    assert_eq!(payload, b"Line1\r\nLine2\0");
    assert_eq!(length::decode(field).byte_len, payload.len() as u64);
}

#[test]
fn human_normalization_is_idempotent() {
    for payload in [&b"A\r\nB\0"[..], &b"NoTerminator"[..], &b""[..]] {
        let first = text::decode(payload, TextEncoding::Ascii);
        let (bytes, _) = text::encode(&first.text);
        let second = text::decode(&bytes, TextEncoding::Ascii);
        assert_eq!(second.text, first.text, "payload {:?}", payload);
    }
}

#[test]
fn empty_text_encodes_without_terminator() {
    let (payload, field) = text::encode("");
    assert!(payload.is_empty());
    assert_eq!(length::decode(field).byte_len, 0);
}

// --- decoder ---

#[test]
fn decodes_single_ascii_record() {
    let config = FormatConfig::default();
    let bytes = fixture(
        &[0u8; 17],
        &[record("K", ascii_field("Hello"), vec![])],
        &[],
    );

    let document = parse(&bytes, &config).expect("decode");
    assert_eq!(document.header, vec![0u8; 17]);
    assert_eq!(document.records.len(), 1);
    assert!(document.footer.is_empty());

    let decoded = &document.records[0];
    assert_eq!(decoded.key, "K");
    assert_eq!(decoded.translation.text, "Hello");
    assert_eq!(decoded.translation.encoding, TextEncoding::Ascii);
    assert!(decoded.variants.is_empty());

    assert_eq!(reencode_unedited(&bytes, &config), bytes);
}

#[test]
fn records_remember_source_encoding() {
    let config = FormatConfig::default();
    let bytes = fixture(&[0u8; 17], &[record("K", utf16_field("héllo"), vec![])], &[]);

    let document = parse(&bytes, &config).expect("decode");
    let decoded = &document.records[0];
    assert_eq!(decoded.translation.text, "héllo");
    assert_eq!(decoded.translation.encoding, TextEncoding::Utf16Le);
}

#[test]
fn trailing_bytes_become_footer() {
    let config = FormatConfig::default();
    let footer = [0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x01];
    let bytes = fixture(&[0u8; 17], &[record("K", ascii_field("Hi"), vec![])], &footer);

    let document = parse(&bytes, &config).expect("decode");
    assert_eq!(document.records.len(), 1);
    assert_eq!(document.footer, footer);
}

#[test]
fn file_smaller_than_header_is_corrupt() {
    let config = FormatConfig::default();
    let err = parse(&[0u8; 10], &config).expect_err("undersized file");
    assert!(
        matches!(err, TxtResError::TruncatedOrCorrupt(_)),
        "unexpected error: {:?}",
        err
    );
}

#[test]
fn variant_count_matches_list_length() {
    let config = FormatConfig::default();
    let bytes = fixture(
        &[0u8; 17],
        &[record(
            "K",
            ascii_field("base"),
            vec![
                ([1, 0, 0, 0, 0, 0, 0, 0xAA], ascii_field("first")),
                ([2, 0, 0, 0, 0, 0, 0, 0xBB], ascii_field("second")),
            ],
        )],
        &[],
    );

    let document = parse(&bytes, &config).expect("decode");
    let decoded = &document.records[0];
    assert_eq!(decoded.variants.len(), 2);
    assert_eq!(decoded.variants[0].type_tag, "01000000000000aa");
    assert_eq!(decoded.variants[0].translation.text, "first");
    assert_eq!(decoded.variants[1].type_tag, "02000000000000bb");
    assert_eq!(decoded.variants[1].translation.text, "second");
}

// --- round trip ---

#[test]
fn unedited_roundtrip_reproduces_bytes() {
    let config = FormatConfig::default();
    let header: Vec<u8> = (0u8..17).collect();
    let records = [
        record("GREETING", ascii_field("Hello\r\nWorld"), vec![]),
        record(
            "FAREWELL",
            utf16_field("さようなら"),
            vec![
                ([0x01, 0, 0, 0, 0, 0, 0, 0xAA], ascii_field("bye")),
                ([0x02, 0, 0, 0, 0, 0, 0, 0xBB], utf16_field("さらば")),
            ],
        ),
        record("EMPTY", ascii_field(""), vec![]),
    ];
    let footer = [0xDE, 0xAD, 0xBE, 0xEF, 0x99];
    let bytes = fixture(&header, &records, &footer);

    assert_eq!(reencode_unedited(&bytes, &config), bytes);
}

#[test]
fn roundtrip_with_alternate_header_length() {
    let config = FormatConfig {
        header_len: 4,
        ..FormatConfig::default()
    };
    let bytes = fixture(&[9u8; 4], &[record("K", ascii_field("Hi"), vec![])], &[0x42]);

    assert_eq!(reencode_unedited(&bytes, &config), bytes);
}

// --- validation ---

#[test]
fn identical_streams_have_no_divergences() {
    let bytes = fixture(&[0u8; 17], &[record("K", ascii_field("Hello"), vec![])], &[]);
    let divergences = validate::compare(
        &mut Cursor::new(bytes.clone()),
        &mut Cursor::new(bytes),
        8,
    )
    .expect("compare");
    assert!(divergences.is_empty());
}

#[test]
fn truncation_reports_size_then_boundary_chunk() {
    let original: Vec<u8> = (1u8..=21).collect();
    let truncated = original[..20].to_vec();

    let divergences = validate::compare(
        &mut Cursor::new(original),
        &mut Cursor::new(truncated),
        8,
    )
    .expect("compare");

    assert_eq!(divergences.len(), 2);
    assert_eq!(
        divergences[0],
        validate::Divergence::SizeMismatch {
            left: 21,
            right: 20
        }
    );
    match &divergences[1] {
        validate::Divergence::ByteMismatch { offset, .. } => assert_eq!(*offset, 16),
        other => panic!("expected byte mismatch, got {:?}", other),
    }
}

#[test]
fn comparison_halts_at_first_divergence() {
    let left = vec![0u8; 32];
    let mut right = left.clone();
    right[3] = 1;
    right[25] = 1;

    let divergences =
        validate::compare(&mut Cursor::new(left), &mut Cursor::new(right), 8).expect("compare");

    assert_eq!(divergences.len(), 1);
    match &divergences[0] {
        validate::Divergence::ByteMismatch { offset, .. } => assert_eq!(*offset, 0),
        other => panic!("expected byte mismatch, got {:?}", other),
    }
}
