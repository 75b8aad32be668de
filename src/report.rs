//src/report.rs

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use ahash::AHashMap;

use crate::error::Result;
use crate::types::{EntityVectors, FunctionInfo};

/// Render an entity-by-sample table:
/// ```text
/// \t<sample1>\t<sample2>...
/// <entity>\t<value1>\t<value2>...
/// ```
/// Entities are written in sorted order.
pub fn render_row_table(sample_names: &[String], rows: &EntityVectors) -> String {
    let mut output = String::new();
    writeln!(output, "\t{}", sample_names.join("\t")).unwrap();

    let mut entities: Vec<&String> = rows.keys().collect();
    entities.sort();
    for entity in entities {
        output.push_str(entity);
        for value in &rows[entity] {
            write!(output, "\t{}", value).unwrap();
        }
        output.push('\n');
    }
    output
}

pub fn write_row_table<P: AsRef<Path>>(
    path: P,
    sample_names: &[String],
    rows: &EntityVectors,
) -> Result<()> {
    fs::write(path, render_row_table(sample_names, rows))?;
    Ok(())
}

/// Render a function info table (ID, name and, if any, hierarchy), sorted by ID.
pub fn render_info_table(info: &AHashMap<String, FunctionInfo>) -> String {
    let mut output = String::new();
    let with_hierarchy = info.values().any(|i| i.hierarchy.is_some());
    if with_hierarchy {
        output.push_str("\tName\tHierarchy\n");
    } else {
        output.push_str("\tName\n");
    }

    let mut ids: Vec<&String> = info.keys().collect();
    ids.sort();
    for id in ids {
        let entry = &info[id];
        match (&entry.hierarchy, with_hierarchy) {
            (Some(h), _) => writeln!(output, "{}\t{}\t{}", id, entry.name, h).unwrap(),
            (None, true) => writeln!(output, "{}\t{}\t", id, entry.name).unwrap(),
            (None, false) => writeln!(output, "{}\t{}", id, entry.name).unwrap(),
        }
    }
    output
}
