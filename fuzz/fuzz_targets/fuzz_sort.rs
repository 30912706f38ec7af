#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use querylite::{SortSpec, Value, sorted};

#[derive(Debug, Arbitrary)]
enum Cell {
    Null,
    Missing,
    Bool(bool),
    Num(f64),
    Text(String),
}

impl From<Cell> for Value {
    fn from(c: Cell) -> Self {
        match c {
            Cell::Null => Value::Null,
            Cell::Missing => Value::Undefined,
            Cell::Bool(b) => Value::Bool(b),
            Cell::Num(n) => Value::Number(n),
            Cell::Text(s) => Value::String(s),
        }
    }
}

fuzz_target!(|rows: Vec<(Cell, Cell)>| {
    if rows.len() > 256 {
        return;
    }
    let n = rows.len();
    let items: Vec<Value> = rows
        .into_iter()
        .map(|(a, b)| [("a", Value::from(a)), ("b", Value::from(b))].into_iter().collect())
        .collect();
    let out = sorted(items, &SortSpec::new().asc("a").desc("b"));
    assert_eq!(out.len(), n);
});
