// Copyright 2024-2026 GG-CORE Contributors
// SPDX-License-Identifier: Apache-2.0

//! Status CLI subcommands: show, get.

use std::collections::BTreeMap;

use crate::status::{StatisticsRegistry, StatusValue, StatusVars};

/// Collect and print every variable. Returns the process exit code.
pub fn run_show(registry: &StatisticsRegistry, json: bool) -> i32 {
    let vars = match registry.collect() {
        Ok(vars) => vars,
        Err(e) => {
            eprintln!("Status collection failed: {}", e);
            return 1;
        }
    };

    if json {
        match render_json(&vars) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Failed to encode status: {}", e);
                return 1;
            }
        }
    } else {
        print!("{}", render_table(&vars));
    }
    0
}

/// Collect, then look up a single variable by name (case-insensitive).
///
/// Returns 1 if collection fails or the variable does not exist.
pub fn run_get(registry: &StatisticsRegistry, name: &str, json: bool) -> i32 {
    if let Err(e) = registry.collect() {
        eprintln!("Status collection failed: {}", e);
        return 1;
    }

    let Some(status) = registry.lookup(name) else {
        eprintln!("Unknown status variable: {}", name);
        return 1;
    };

    if json {
        match serde_json::to_string_pretty(&status) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Failed to encode status: {}", e);
                return 1;
            }
        }
    } else {
        println!("{}\t{}", status.value, status.scope);
    }
    0
}

/// Render variables as an aligned `Variable_name / Value / Scope` table,
/// sorted by name.
pub fn render_table(vars: &StatusVars) -> String {
    let rows: BTreeMap<&str, &StatusValue> = vars.iter().map(|(k, v)| (k.as_str(), v)).collect();
    let values: Vec<String> = rows.values().map(|s| s.value.to_string()).collect();

    let name_width = rows
        .keys()
        .map(|k| k.len())
        .chain(std::iter::once("Variable_name".len()))
        .max()
        .unwrap_or_default();
    let value_width = values
        .iter()
        .map(|v| v.len())
        .chain(std::iter::once("Value".len()))
        .max()
        .unwrap_or_default();

    let mut out = format!(
        "{:<nw$}  {:<vw$}  {}\n",
        "Variable_name",
        "Value",
        "Scope",
        nw = name_width,
        vw = value_width
    );
    for ((name, status), value) in rows.iter().zip(values.iter()) {
        out.push_str(&format!(
            "{:<nw$}  {:<vw$}  {}\n",
            name,
            value,
            status.scope,
            nw = name_width,
            vw = value_width
        ));
    }
    out
}

/// Render variables as pretty JSON with keys sorted.
pub fn render_json(vars: &StatusVars) -> Result<String, serde_json::Error> {
    let sorted: BTreeMap<&String, &StatusValue> = vars.iter().collect();
    serde_json::to_string_pretty(&sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{ScopeFlag, VarValue};

    fn sample() -> StatusVars {
        let mut vars = StatusVars::new();
        vars.insert("Uptime".into(), StatusValue::new(42u64, ScopeFlag::GLOBAL));
        vars.insert("Com_select".into(), StatusValue::placeholder());
        vars.insert(
            "Ssl_cipher".into(),
            StatusValue::new(VarValue::from("TLS_AES_128"), ScopeFlag::DEFAULT),
        );
        vars
    }

    #[test]
    fn test_table_is_sorted_with_header() {
        let table = render_table(&sample());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Variable_name"));
        assert!(lines[1].starts_with("Com_select"));
        assert!(lines[2].starts_with("Ssl_cipher"));
        assert!(lines[3].starts_with("Uptime"));
        assert!(lines[3].contains("42"));
        assert!(lines[3].ends_with("GLOBAL"));
        assert!(lines[1].ends_with("NONE"));
    }

    #[test]
    fn test_empty_table_has_only_header() {
        let table = render_table(&StatusVars::new());
        assert_eq!(table.lines().count(), 1);
    }

    #[test]
    fn test_json_keys_sorted() {
        let json = render_json(&sample()).unwrap();
        let com = json.find("Com_select").unwrap();
        let up = json.find("Uptime").unwrap();
        assert!(com < up);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["Uptime"]["value"], 42);
        assert_eq!(parsed["Com_select"]["value"], serde_json::Value::Null);
    }
}
