use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Deserialize;
use serde_json::Value;

/// Identifier of a node or edge. Documents use strings or numbers.
///
/// Integral numbers, including ones written as `2.0`, are [`Id::Int`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawId")]
pub enum Id {
	/// Integer id, e.g. `"id": 3`.
	Int(i64),
	/// Fractional or out-of-range numeric id, e.g. `"id": 1.5`.
	Float(FloatId),
	/// String id, e.g. `"id": "smelter-1"`.
	Str(String),
}

/// A finite numeric id compared by its bit pattern.
#[derive(Clone, Copy, Debug)]
pub struct FloatId(pub f64);

impl PartialEq for FloatId {
	fn eq(&self, other: &Self) -> bool {
		self.0.to_bits() == other.0.to_bits()
	}
}

impl Eq for FloatId {}

impl Hash for FloatId {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.to_bits().hash(state);
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Int(i64),
	Float(f64),
	Str(String),
}

impl From<RawId> for Id {
	fn from(raw: RawId) -> Self {
		match raw {
			RawId::Int(n) => Id::Int(n),
			RawId::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Id::Int(f as i64),
			RawId::Float(f) => Id::Float(FloatId(f)),
			RawId::Str(s) => Id::Str(s),
		}
	}
}

impl fmt::Display for Id {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Id::Int(n) => write!(f, "{n}"),
			Id::Float(n) => write!(f, "{}", n.0),
			Id::Str(s) => f.write_str(s),
		}
	}
}

impl From<&str> for Id {
	fn from(s: &str) -> Self {
		Id::Str(s.to_owned())
	}
}

impl From<String> for Id {
	fn from(s: String) -> Self {
		Id::Str(s)
	}
}

impl From<i64> for Id {
	fn from(n: i64) -> Self {
		Id::Int(n)
	}
}

/// A facility.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Node {
	/// Unique id.
	pub id: Id,
	/// Display name; the id is shown when absent.
	#[serde(default)]
	pub label: Option<String>,
	/// Where the facility is.
	#[serde(default)]
	pub location: Option<String>,
	/// Recipes run at this facility, in document order.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub production_tables: Vec<ProductionEntry>,
}

impl Node {
	/// A bare node with only an id.
	pub fn new(id: impl Into<Id>) -> Self {
		Self {
			id: id.into(),
			label: None,
			location: None,
			production_tables: Vec::new(),
		}
	}

	/// Sets the display name.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}
}

/// A directed connection `from -> to`. Parallel edges are distinct.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Unique id.
	pub id: Id,
	/// Supplying node.
	pub from: Id,
	/// Consuming node.
	pub to: Id,
	/// Text drawn along the edge.
	pub label: Option<String>,
}

impl Edge {
	/// An unlabeled edge.
	pub fn new(id: impl Into<Id>, from: impl Into<Id>, to: impl Into<Id>) -> Self {
		Self {
			id: id.into(),
			from: from.into(),
			to: to.into(),
			label: None,
		}
	}

	/// True when both endpoints are the same node.
	pub fn is_self_loop(&self) -> bool {
		self.from == self.to
	}
}

/// Edge as it appears in a document; the id may be left out.
#[derive(Clone, Debug, Deserialize)]
pub struct EdgeRecord {
	/// Explicit id, if any.
	#[serde(default)]
	pub id: Option<Id>,
	/// Supplying node.
	pub from: Id,
	/// Consuming node.
	pub to: Id,
	/// Text drawn along the edge.
	#[serde(default)]
	pub label: Option<String>,
}

impl EdgeRecord {
	/// Resolves the record into an [`Edge`], naming id-less edges `auto:<index>`.
	pub fn into_edge(self, index: usize) -> Edge {
		Edge {
			id: self.id.unwrap_or_else(|| Id::Str(format!("auto:{index}"))),
			from: self.from,
			to: self.to,
			label: self.label,
		}
	}
}

/// One recipe of a facility.
///
/// Item fields are read leniently: anything that is not an object becomes
/// `None` instead of failing the whole document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProductionEntry {
	/// Consumed items; unreadable entries are kept as `None` to preserve positions.
	#[serde(rename = "Input", default, deserialize_with = "lenient_items")]
	pub inputs: Vec<Option<ItemAmount>>,
	/// Produced item.
	#[serde(rename = "Output", default, deserialize_with = "lenient_item")]
	pub output: Option<ItemAmount>,
	/// Duration of one cycle, as written.
	#[serde(rename = "Process Time", default)]
	pub process_time: Option<Value>,
	/// Throughput limit, as written.
	#[serde(rename = "Output Capacity", default)]
	pub output_capacity: Option<Value>,
}

/// A named quantity of some item. Both fields may be missing in real documents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemAmount {
	/// Item name, usually a string.
	pub name: Option<Value>,
	/// Quantity, usually a number.
	pub amount: Option<Value>,
}

impl ItemAmount {
	/// An item with both fields set.
	pub fn new(name: impl Into<String>, amount: impl Into<Value>) -> Self {
		Self {
			name: Some(Value::String(name.into())),
			amount: Some(amount.into()),
		}
	}

	/// Reads an item from any JSON value; non-objects yield `None`, nulls are absent.
	pub fn from_value(value: Value) -> Option<Self> {
		let Value::Object(mut map) = value else {
			return None;
		};
		let mut field = |key: &str| map.remove(key).filter(|v| !v.is_null());
		Some(Self {
			name: field("name"),
			amount: field("amount"),
		})
	}
}

/// The parsed input document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphDocument {
	/// Facilities.
	#[serde(default)]
	pub nodes: Vec<Node>,
	/// Connections between facilities.
	#[serde(default)]
	pub edges: Vec<EdgeRecord>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: serde::Deserializer<'de>,
	T: Deserialize<'de>,
{
	Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<Option<ItemAmount>>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(match Option::<Value>::deserialize(deserializer)? {
		Some(Value::Array(items)) => items.into_iter().map(ItemAmount::from_value).collect(),
		_ => Vec::new(),
	})
}

fn lenient_item<'de, D>(deserializer: D) -> Result<Option<ItemAmount>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(Option::<Value>::deserialize(deserializer)?.and_then(ItemAmount::from_value))
}
