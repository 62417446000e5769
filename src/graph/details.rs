//! Projection of a facility into the content of the details panel.

use serde_json::Value;

use super::types::{ItemAmount, Node, ProductionEntry};

/// Placeholder for anything missing.
pub const NOT_AVAILABLE: &str = "N/A";

/// Content of the details panel for one facility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailDocument {
	/// Facility label, or its id when unlabeled.
	pub title: String,
	/// Location line, omitted when absent or empty.
	pub location: Option<String>,
	/// One row per production table; empty means no production section.
	pub production_rows: Vec<ProductionRow>,
}

/// One production table, flattened to display strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductionRow {
	/// First input as `<amount>x <name>`.
	pub input_display: String,
	/// Output as `<amount>x <name>`.
	pub output_display: String,
	/// Process time as written.
	pub process_time: String,
	/// Output capacity as written.
	pub output_capacity: String,
}

/// Builds the details of `node`. Never fails; missing data becomes [`NOT_AVAILABLE`].
pub fn project(node: &Node) -> DetailDocument {
	DetailDocument {
		title: node.label.clone().unwrap_or_else(|| node.id.to_string()),
		location: node.location.clone().filter(|l| !l.is_empty()),
		production_rows: node.production_tables.iter().map(project_entry).collect(),
	}
}

fn project_entry(entry: &ProductionEntry) -> ProductionRow {
	// only the first input is shown, multi-input recipes are not expanded
	let input_display = entry
		.inputs
		.first()
		.and_then(Option::as_ref)
		.map(item_display)
		.unwrap_or_else(|| NOT_AVAILABLE.into());
	let output_display = entry
		.output
		.as_ref()
		.filter(|o| o.name.as_ref().is_some_and(is_truthy))
		.map(item_display)
		.unwrap_or_else(|| NOT_AVAILABLE.into());

	ProductionRow {
		input_display,
		output_display,
		process_time: truthy_literal(entry.process_time.as_ref()),
		output_capacity: truthy_literal(entry.output_capacity.as_ref()),
	}
}

fn item_display(item: &ItemAmount) -> String {
	let amount = item.amount.as_ref().map_or_else(|| "?".into(), literal);
	let name = item.name.as_ref().map_or_else(|| "?".into(), literal);
	format!("{amount}x {name}")
}

/// Renders a document value the way it is written, strings without quotes.
/// Floats print in shortest form, so `2.0` shows as `2`.
fn literal(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Number(n) if n.is_f64() => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
		other => other.to_string(),
	}
}

/// null, false, 0 and "" count as absent.
fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null | Value::Bool(false) => false,
		Value::String(s) => !s.is_empty(),
		Value::Number(n) => n.as_f64() != Some(0.0),
		_ => true,
	}
}

fn truthy_literal(value: Option<&Value>) -> String {
	value
		.filter(|v| is_truthy(v))
		.map_or_else(|| NOT_AVAILABLE.into(), literal)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn node_with(tables: Vec<ProductionEntry>) -> Node {
		Node {
			production_tables: tables,
			..Node::new("smelter").with_label("Iron Smelter")
		}
	}

	fn row(input: &str, output: &str, time: &str, capacity: &str) -> ProductionRow {
		ProductionRow {
			input_display: input.into(),
			output_display: output.into(),
			process_time: time.into(),
			output_capacity: capacity.into(),
		}
	}

	#[test]
	fn full_entry() {
		let node = Node {
			location: Some("Sector 7".into()),
			..node_with(vec![ProductionEntry {
				inputs: vec![Some(ItemAmount::new("Iron Ore", 2)), Some(ItemAmount::new("Coal", 1))],
				output: Some(ItemAmount::new("Iron Ingot", 1)),
				process_time: Some(json!("3.2s")),
				output_capacity: Some(json!(50)),
			}])
		};
		let doc = project(&node);
		assert_eq!(doc.title, "Iron Smelter");
		assert_eq!(doc.location.as_deref(), Some("Sector 7"));
		assert_eq!(
			doc.production_rows,
			[row("2x Iron Ore", "1x Iron Ingot", "3.2s", "50")]
		);
	}

	#[test]
	fn empty_entry_degrades_to_not_available() {
		let node = node_with(vec![ProductionEntry {
			inputs: vec![],
			output: Some(ItemAmount::default()),
			process_time: Some(Value::Null),
			output_capacity: None,
		}]);
		assert_eq!(
			project(&node).production_rows,
			[row("N/A", "N/A", "N/A", "N/A")]
		);
	}

	#[test]
	fn falsy_values_are_not_available() {
		let node = node_with(vec![ProductionEntry {
			process_time: Some(json!(0)),
			output_capacity: Some(json!("")),
			..Default::default()
		}]);
		assert_eq!(
			project(&node).production_rows,
			[row("N/A", "N/A", "N/A", "N/A")]
		);
	}

	#[test]
	fn missing_amount_and_name() {
		let node = node_with(vec![ProductionEntry {
			inputs: vec![Some(ItemAmount {
				name: Some("Water".into()),
				amount: None,
			})],
			output: Some(ItemAmount {
				name: Some("Steam".into()),
				amount: Some(json!("10")),
			}),
			..Default::default()
		}]);
		assert_eq!(
			project(&node).production_rows,
			[row("?x Water", "10x Steam", "N/A", "N/A")]
		);
	}

	#[test]
	fn no_tables_no_rows() {
		let doc = project(&Node::new(7_i64));
		assert_eq!(doc.title, "7");
		assert_eq!(doc.location, None);
		assert!(doc.production_rows.is_empty());
	}

	#[test]
	fn one_row_per_table() {
		let node = node_with(vec![
			ProductionEntry {
				output: Some(ItemAmount::new("Plate", 1)),
				..Default::default()
			},
			ProductionEntry {
				output: Some(ItemAmount::new("Gear", 2)),
				..Default::default()
			},
		]);
		let rows = project(&node).production_rows;
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[1].output_display, "2x Gear");
	}

	#[test]
	fn integral_float_amount_prints_without_fraction() {
		let node = node_with(vec![ProductionEntry {
			inputs: vec![Some(ItemAmount::new("Iron", 2.0))],
			output: Some(ItemAmount::new("Slag", 0.5)),
			output_capacity: Some(json!(40.0)),
			..Default::default()
		}]);
		assert_eq!(
			project(&node).production_rows,
			[row("2x Iron", "0.5x Slag", "N/A", "40")]
		);
	}

	#[test]
	fn unreadable_first_input_and_numeric_names() {
		let node = node_with(vec![ProductionEntry {
			inputs: vec![None, Some(ItemAmount::new("Coal", 1))],
			output: Some(ItemAmount {
				name: Some(json!(5)),
				amount: Some(json!(3)),
			}),
			..Default::default()
		}]);
		assert_eq!(
			project(&node).production_rows,
			[row("N/A", "3x 5", "N/A", "N/A")]
		);
	}
}
