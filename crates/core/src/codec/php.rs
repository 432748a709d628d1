//! Best-effort decoder for the legacy PHP `serialize()` response format.
//!
//! Supported grammar:
//!
//! ```text
//! N;            null
//! b:0; b:1;     bool
//! i:<int>;      integer
//! d:<float>;    float
//! s:<len>:"<bytes>";
//! a:<n>:{<key><value>...}
//! O:<len>:"<class>":<n>:{<key><value>...}
//! ```
//!
//! Arrays whose keys are exactly `0..n` in order become JSON arrays, every
//! other array or object becomes a JSON object with string keys. Anything
//! outside the grammar, trailing bytes after the value, or nesting deeper
//! than [`MAX_DEPTH`] yields `None`.

use serde_json::{Map, Number, Value};

use super::MAX_DEPTH;

/// Decode a PHP-serialized document.
pub fn unserialize(input: &str) -> Option<Value> {
    let mut parser = Parser { bytes: input.as_bytes(), pos: 0, depth: 0 };
    let value = parser.value()?;
    parser.skip_whitespace();
    (parser.pos == parser.bytes.len()).then_some(value)
}

enum Key {
    Int(i64),
    Str(String),
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn value(&mut self) -> Option<Value> {
        match self.next()? {
            b'N' => {
                self.expect(b';')?;
                Some(Value::Null)
            }
            b'b' => {
                self.expect(b':')?;
                match self.read_until(b';')? {
                    "0" => Some(Value::Bool(false)),
                    "1" => Some(Value::Bool(true)),
                    _ => None,
                }
            }
            b'i' => {
                self.expect(b':')?;
                self.read_until(b';')?.parse::<i64>().ok().map(Value::from)
            }
            b'd' => {
                self.expect(b':')?;
                let text = self.read_until(b';')?;
                Some(float_value(text)?)
            }
            b's' => {
                self.expect(b':')?;
                Some(Value::String(self.string_body()?))
            }
            b'a' => {
                self.expect(b':')?;
                let count = self.read_until(b':')?.parse::<usize>().ok()?;
                let entries = self.entries(count)?;
                Some(array_or_object(entries))
            }
            b'O' => {
                self.expect(b':')?;
                let class_len = self.read_until(b':')?.parse::<usize>().ok()?;
                self.expect(b'"')?;
                self.take(class_len)?;
                self.expect(b'"')?;
                self.expect(b':')?;
                let count = self.read_until(b':')?.parse::<usize>().ok()?;
                let entries = self.entries(count)?;
                let fields = entries
                    .into_iter()
                    .map(|(key, value)| (property_name(key), value))
                    .collect::<Map<_, _>>();
                Some(Value::Object(fields))
            }
            _ => None,
        }
    }

    /// `{` followed by `count` key/value pairs and `}`.
    fn entries(&mut self, count: usize) -> Option<Vec<(Key, Value)>> {
        self.expect(b'{')?;
        if self.depth >= MAX_DEPTH {
            return None;
        }
        self.depth += 1;
        let mut entries = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            let key = self.key()?;
            let value = self.value()?;
            entries.push((key, value));
        }
        self.depth -= 1;
        self.expect(b'}')?;
        Some(entries)
    }

    fn key(&mut self) -> Option<Key> {
        match self.next()? {
            b'i' => {
                self.expect(b':')?;
                self.read_until(b';')?.parse::<i64>().ok().map(Key::Int)
            }
            b's' => {
                self.expect(b':')?;
                self.string_body().map(Key::Str)
            }
            _ => None,
        }
    }

    /// `<len>:"<bytes>";` after the `s:` prefix. Length counts bytes.
    fn string_body(&mut self) -> Option<String> {
        let len = self.read_until(b':')?.parse::<usize>().ok()?;
        self.expect(b'"')?;
        let raw = self.take(len)?;
        self.expect(b'"')?;
        self.expect(b';')?;
        Some(String::from_utf8_lossy(raw).into_owned())
    }

    fn next(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn expect(&mut self, byte: u8) -> Option<()> {
        (self.next()? == byte).then_some(())
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let bytes: &'a [u8] = self.bytes;
        let end = self.pos.checked_add(len)?;
        let slice = bytes.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn read_until(&mut self, delimiter: u8) -> Option<&'a str> {
        let bytes: &'a [u8] = self.bytes;
        let rest = bytes.get(self.pos..)?;
        let offset = rest.iter().position(|b| *b == delimiter)?;
        let text = std::str::from_utf8(&rest[..offset]).ok()?;
        self.pos += offset + 1;
        Some(text)
    }

    fn skip_whitespace(&mut self) {
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_whitespace) {
            self.pos += 1;
        }
    }
}

fn float_value(text: &str) -> Option<Value> {
    match text {
        "NAN" | "INF" | "-INF" => Some(Value::String(text.to_string())),
        _ => {
            let parsed = text.parse::<f64>().ok()?;
            Number::from_f64(parsed).map(Value::Number)
        }
    }
}

fn key_string(key: Key) -> String {
    match key {
        Key::Int(i) => i.to_string(),
        Key::Str(s) => s,
    }
}

/// Protected and private properties are serialized as `\0*\0name` and
/// `\0Class\0name`; keep the bare name.
fn property_name(key: Key) -> String {
    let name = key_string(key);
    match name.rfind('\0') {
        Some(index) => name[index + 1..].to_string(),
        None => name,
    }
}

fn array_or_object(entries: Vec<(Key, Value)>) -> Value {
    let sequential = entries.iter().enumerate().all(|(index, (key, _))| {
        matches!(key, Key::Int(i) if usize::try_from(*i).is_ok_and(|i| i == index))
    });

    if sequential && !entries.is_empty() {
        Value::Array(entries.into_iter().map(|(_, value)| value).collect())
    } else {
        Value::Object(entries.into_iter().map(|(key, value)| (key_string(key), value)).collect())
    }
}
