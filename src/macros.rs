/// Builds a [`Value`](crate::Value) from a literal-like syntax.
///
/// Table keys may be any single token tree: string, number and boolean
/// literals, or a parenthesized expression.
///
/// ```rust
/// use serde_wowace::{wowace, Value};
///
/// let profile = wowace!({
///     "name": "Jaina",
///     "spells": ["Frostbolt", "Blink"],
///     1: true,
///     (2 + 1): null
/// });
/// let table = profile.as_table().unwrap();
/// assert_eq!(table.get(&Value::from(3)), Some(&Value::Null));
/// ```
#[macro_export]
macro_rules! wowace {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::wowace!($elem)),*])
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($crate::wowace!($key), $crate::wowace!($value));
        )*
        $crate::Value::Table(table)
    }};

    // Any other expression goes through serde.
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or_default()
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Table, Value};

    #[test]
    fn test_wowace_macro_primitives() {
        assert_eq!(wowace!(null), Value::Null);
        assert_eq!(wowace!(true), Value::Bool(true));
        assert_eq!(wowace!(false), Value::Bool(false));
        assert_eq!(wowace!(42), Value::Integer(42));
        assert_eq!(wowace!(3.5), Value::Float(3.5));
        assert_eq!(wowace!("hello"), Value::from("hello"));
    }

    #[test]
    fn test_wowace_macro_arrays() {
        assert_eq!(wowace!([]), Value::Array(vec![]));

        let arr = wowace!([1, "two", [null]]);
        assert_eq!(
            arr,
            Value::Array(vec![
                Value::Integer(1),
                Value::from("two"),
                Value::Array(vec![Value::Null]),
            ])
        );
    }

    #[test]
    fn test_wowace_macro_tables() {
        assert_eq!(wowace!({}), Value::Table(Table::new()));

        let table = wowace!({
            "name": "Alice",
            10: false,
            true: [1, 2]
        });

        match table {
            Value::Table(table) => {
                assert_eq!(table.len(), 3);
                assert_eq!(table.get_field("name"), Some(&Value::from("Alice")));
                assert_eq!(table.get(&Value::from(10)), Some(&Value::Bool(false)));
                assert_eq!(
                    table.get(&Value::Bool(true)),
                    Some(&Value::Array(vec![Value::Integer(1), Value::Integer(2)]))
                );
            }
            _ => panic!("Expected table"),
        }
    }

    #[test]
    fn test_wowace_macro_expressions() {
        let level = 60u8;
        assert_eq!(wowace!(level), Value::Integer(60));
        assert_eq!(wowace!(vec![1, 2]), Value::Array(vec![Value::from(1), Value::from(2)]));
    }
}
