// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Projection of upstream app records onto [`IntegrationApp`].
//!
//! The apps API has shipped several field spellings; each output field
//! takes the first alternative present.

use frontdesk_core::types::IntegrationApp;
use serde_json::Value;

/// Extracts the app list from either a bare array or `{"apps": [...]}`.
pub fn app_records(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("apps") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn first_string(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match record.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn truthy(record: &Value, key: &str) -> bool {
    match record.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Null) | None => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Normalizes one record; `None` when it has no usable id or name.
pub fn normalize_app(record: &Value) -> Option<IntegrationApp> {
    let app_id = first_string(record, &["id", "app_id", "slug"])?;
    let app_name = first_string(record, &["name", "app_name", "title"])?;

    let categories = ["categories", "tags"]
        .iter()
        .find_map(|k| record.get(*k).filter(|v| !v.is_null()).map(string_list))
        .or_else(|| record.get("category").map(string_list))
        .unwrap_or_default();

    let auth_type = first_string(record, &["auth_type", "authType"]).or_else(|| {
        if truthy(record, "oauth") {
            Some("oauth".to_string())
        } else if truthy(record, "api_key") {
            Some("api_key".to_string())
        } else {
            None
        }
    });

    Some(IntegrationApp {
        app_id,
        app_name,
        description: first_string(record, &["description", "summary"]).unwrap_or_default(),
        logo_url: first_string(record, &["logo_url", "logoUrl", "logo"]).unwrap_or_default(),
        categories,
        auth_type,
    })
}

/// Case-insensitive substring match over name, description, and categories.
/// `query` must already be lowercased.
pub fn matches_query(app: &IntegrationApp, query: &str) -> bool {
    let mut haystack = format!("{} {}", app.app_name, app.description);
    for category in &app.categories {
        haystack.push(' ');
        haystack.push_str(category);
    }
    haystack.to_lowercase().contains(query)
}
