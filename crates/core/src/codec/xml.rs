//! Best-effort XML response decoding.
//!
//! The root element's content becomes the decoded value. Child elements map
//! to object fields, repeated children to arrays, attributes to `@name`
//! fields, and text-only elements to strings. Mixed content keeps its text
//! under `#text`. This is lossy and only meant for inspection.

use std::collections::HashSet;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use super::MAX_DEPTH;

/// Convert an XML document into a JSON value, or `None` if it is not
/// well-formed or nests deeper than [`MAX_DEPTH`] elements.
pub fn to_value(input: &str) -> Option<Value> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if stack.len() >= MAX_DEPTH {
                    return None;
                }
                stack.push(Node::open(&start)?);
            }
            Ok(Event::Empty(start)) => {
                let node = Node::open(&start)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Text(text)) => {
                let node = stack.last_mut()?;
                node.text.push_str(&text.unescape().ok()?);
            }
            Ok(Event::CData(data)) => {
                let node = stack.last_mut()?;
                node.text.push_str(std::str::from_utf8(&data.into_inner()).ok()?);
            }
            Ok(Event::End(_)) => {
                let node = stack.pop()?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    if stack.is_empty() {
        root
    } else {
        None
    }
}

fn attach(stack: &mut [Node], root: &mut Option<Value>, node: Node) -> Option<()> {
    let name = node.name.clone();
    let value = node.finish();
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None if root.is_none() => *root = Some(value),
        // A second root element is not well-formed.
        None => return None,
    }
    Some(())
}

struct Node {
    name: String,
    fields: Map<String, Value>,
    repeated: HashSet<String>,
    text: String,
}

impl Node {
    fn open(start: &BytesStart<'_>) -> Option<Self> {
        let name = String::from_utf8(start.name().as_ref().to_vec()).ok()?;
        let mut fields = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.ok()?;
            let key = String::from_utf8(attribute.key.as_ref().to_vec()).ok()?;
            let value = attribute.unescape_value().ok()?.into_owned();
            fields.insert(format!("@{key}"), Value::String(value));
        }
        Some(Self { name, fields, repeated: HashSet::new(), text: String::new() })
    }

    fn add_child(&mut self, name: String, value: Value) {
        if self.repeated.contains(&name) {
            if let Some(Value::Array(items)) = self.fields.get_mut(&name) {
                items.push(value);
            }
            return;
        }
        match self.fields.remove(&name) {
            Some(existing) => {
                self.fields.insert(name.clone(), Value::Array(vec![existing, value]));
                self.repeated.insert(name);
            }
            None => {
                self.fields.insert(name, value);
            }
        }
    }

    fn finish(mut self) -> Value {
        if self.fields.is_empty() {
            return Value::String(self.text);
        }
        if !self.text.is_empty() {
            self.fields.insert("#text".to_string(), Value::String(self.text));
        }
        Value::Object(self.fields)
    }
}
