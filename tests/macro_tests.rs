use serde_wowace::{to_string, wowace, Table, Value};

#[test]
fn test_wowace_macro_null() {
    let value = wowace!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_wowace_macro_booleans() {
    assert_eq!(wowace!(true), Value::Bool(true));
    assert_eq!(wowace!(false), Value::Bool(false));
}

#[test]
fn test_wowace_macro_numbers() {
    assert_eq!(wowace!(42), Value::Integer(42));
    assert_eq!(wowace!(3.5), Value::Float(3.5));
    assert_eq!(wowace!(-123), Value::Integer(-123));
    assert_eq!(wowace!(u64::MAX), Value::from(u64::MAX));
}

#[test]
fn test_wowace_macro_strings() {
    assert_eq!(wowace!("hello world"), Value::from("hello world"));
    assert_eq!(wowace!(""), Value::from(""));
}

#[test]
fn test_wowace_macro_arrays() {
    assert_eq!(wowace!([]), Value::Array(vec![]));
    assert_eq!(
        wowace!([1, 2, 3]),
        Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)])
    );
    assert_eq!(
        wowace!([[true], [false, null]]),
        Value::Array(vec![
            Value::Array(vec![Value::Bool(true)]),
            Value::Array(vec![Value::Bool(false), Value::Null]),
        ])
    );
}

#[test]
fn test_wowace_macro_tables() {
    assert_eq!(wowace!({}), Value::Table(Table::new()));

    let value = wowace!({
        "name": "Sylvanas",
        "stats": { "agi": 30, "int": 12 },
        7: "lucky",
    });

    let table = value.as_table().unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.get(&Value::from(7)), Some(&Value::from("lucky")));

    let stats = table.get_field("stats").and_then(Value::as_table).unwrap();
    assert_eq!(stats.get_field("agi"), Some(&Value::from(30)));
}

#[test]
fn test_wowace_macro_encodes() {
    let value = wowace!({ "on": true, "list": ["x"] });
    assert_eq!(
        to_string(&value).unwrap(),
        "^1^T^Son^B^Slist^T^N1^Sx^t^t^^"
    );
}
