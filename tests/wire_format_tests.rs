//! Byte-level checks of the WowAce wire format, independent of serde derive.

use serde_wowace::{
    from_slice, from_str, to_string, to_vec, wowace, Deserializer, Error, ErrorKind, Serializer,
    Table, Value, WowAceOptions,
};

fn encode(value: &Value) -> String {
    let mut serializer = Serializer::new(WowAceOptions::default());
    serializer.serialize_document(value).unwrap();
    String::from_utf8(serializer.into_inner()).unwrap()
}

fn decode(input: &str) -> Result<Value, Error> {
    Deserializer::parse(input.as_bytes(), WowAceOptions::default())
}

#[test]
fn test_reference_vectors() {
    assert_eq!(to_string(&42).unwrap(), "^1^N42^^");
    assert_eq!(to_string(&true).unwrap(), "^1^B^^");
    assert_eq!(to_string(&Value::Null).unwrap(), "^1^Z^^");
    assert_eq!(to_string("a^b").unwrap(), "^1^Sa~Ub^^");
}

#[test]
fn test_every_tag() {
    let value = Value::Array(vec![
        Value::Null,
        Value::Bool(true),
        Value::Bool(false),
        Value::Integer(-12),
        Value::Float(0.75),
        Value::from("x"),
        Value::Table(Table::new()),
    ]);
    let encoded = encode(&value);
    assert_eq!(
        encoded,
        "^1^T^N1^Z^N2^B^N3^b^N4^N-12^N5^F6755399441055744^f0^N6^Sx^N7^T^t^t^^"
    );

    // The empty table comes back as an empty sequence.
    let mut expected = value.clone();
    if let Value::Array(items) = &mut expected {
        items[6] = Value::Array(vec![]);
    }
    assert_eq!(decode(&encoded).unwrap(), expected);
}

#[test]
fn test_escape_table() {
    let cases: &[(&[u8], &str)] = &[
        (b"^", "~U"),
        (b"~", "~T"),
        (b"\x7f", "~S"),
        (b" ", "~`"),
        (b"\n", "~J"),
        (b"\t", "~I"),
        (b"\x00", "~@"),
        (b"\x13", "~s"),
        (b"\x14", "~t"),
        (b"\x15", "~u"),
        (b"\x1e", "~z"),
        (b"\x1f", "~_"),
        (b"plain", "plain"),
    ];
    for (raw, escaped) in cases {
        let encoded = encode(&Value::bytes(raw.to_vec()));
        assert_eq!(encoded, format!("^1^S{escaped}^^"), "{raw:?}");
        assert_eq!(decode(&encoded).unwrap(), Value::bytes(raw.to_vec()));
    }
}

#[test]
fn test_escaped_strings_never_contain_raw_specials() {
    let all: Vec<u8> = (0u8..=255).collect();
    let encoded = to_vec(&Value::bytes(all)).unwrap();
    let body = &encoded[4..encoded.len() - 2];
    assert!(!body.contains(&b'^'));
    assert!(body.iter().all(|&b| b > 0x20 && b != 0x7f));
}

#[test]
fn test_classic_escapes_are_accepted() {
    assert_eq!(decode("^1^S~{~|~}^^").unwrap(), Value::bytes(b"\x7f~^".to_vec()));
}

#[test]
fn test_invalid_escapes() {
    assert!(matches!(
        decode("^1^Sab~^^"),
        Err(Error::InvalidFormat { offset: 6, .. })
    ));
    assert!(decode("^1^S~5^^").unwrap_err().is_format());
}

#[test]
fn test_sequence_collapse() {
    assert_eq!(
        decode("^1^T^N3^Sc^N1^Sa^N2^Sb^t^^").unwrap(),
        wowace!(["a", "b", "c"])
    );

    let gap = decode("^1^T^N1^Sa^N3^Sc^t^^").unwrap();
    assert!(gap.is_table());

    let zero = decode("^1^T^N0^Sa^t^^").unwrap();
    assert!(zero.is_table());
}

#[test]
fn test_number_forms() {
    assert_eq!(decode("^1^N0^^").unwrap(), Value::Integer(0));
    assert_eq!(decode("^1^N-0^^").unwrap(), Value::Integer(0));
    assert_eq!(decode("^1^N2.5^^").unwrap(), Value::Float(2.5));
    assert_eq!(decode("^1^N-1e3^^").unwrap(), Value::Float(-1000.0));
    assert_eq!(
        decode("^1^N9223372036854775808^^").unwrap(),
        Value::from(9_223_372_036_854_775_808u64)
    );
    assert_eq!(
        decode("^1^N-9223372036854775808^^").unwrap(),
        Value::Integer(i64::MIN)
    );
}

#[test]
fn test_malformed_documents() {
    let cases = [
        "",
        "^",
        "^1",
        "^1^^",
        "1^Z^^",
        "^1^Z",
        "^1^Z^",
        "^1^Qfoo^^",
        "^1^T^N1^^",
        "^1^T^N1^Sa",
        "^1^F1^^",
        "^1^F1^g2^^",
        "^1^Nfoo^^",
        "^1^Nnan^^",
        "^1^Z^Z^^",
        "^1^Sa^Sb^^",
    ];
    for input in cases {
        let err = decode(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format, "{input:?} gave {err}");
    }
}

#[test]
fn test_unknown_tag_reports_offset() {
    let err = from_str::<Value>("^1^T^Sa^Xb^t^^").unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedTag {
            offset: 7,
            tag: 'X'
        }
    );
}

#[test]
fn test_trailing_input() {
    let err = decode("^1^N1^N2^^").unwrap_err();
    assert_eq!(
        err,
        Error::TrailingInput {
            offset: 5,
            remaining: 3
        }
    );
}

#[test]
fn test_whitespace_is_ignored() {
    let value: Vec<String> = from_slice(b"  ^1^T^N1^Sa\n^N2^Sb^t\n^^\n").unwrap();
    assert_eq!(value, vec!["a", "b"]);
}

#[test]
fn test_table_key_order_is_preserved() {
    let mut table = Table::new();
    for key in ["zeta", "alpha", "mid"] {
        table.insert(key, Value::Null);
    }
    let encoded = encode(&Value::Table(table));
    assert_eq!(encoded, "^1^T^Szeta^Z^Salpha^Z^Smid^Z^t^^");

    let decoded = decode(&encoded).unwrap();
    let keys: Vec<_> = decoded
        .as_table()
        .unwrap()
        .keys()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}
