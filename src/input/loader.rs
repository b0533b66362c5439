use crate::input::SearchInput;
use crate::model::Category;
use crate::{InputError, InputResult};
use serde_json::Value;
use std::path::Path;

/// Reads and validates an input file
///
/// # Arguments
///
/// * `path` - Path to the JSON input file
///
/// # Returns
///
/// * `Ok(SearchInput)` - Keywords, proxies and category
/// * `Err(InputError)` - The file is unreadable, malformed or incomplete
pub fn load_input(path: &Path) -> InputResult<SearchInput> {
    tracing::info!("Input file: `{}`", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_input(&content)
}

/// Parses and validates input JSON text
pub fn parse_input(content: &str) -> InputResult<SearchInput> {
    let data: Value = serde_json::from_str(content)?;

    let keywords = string_list(&data, "keywords")?;
    let proxies = string_list(&data, "proxies")?;
    let raw_type = data.get("type").ok_or(InputError::MissingKey("type"))?;

    if proxies.is_empty() {
        return Err(InputError::NoProxies);
    }

    let type_name = scalar_to_string(raw_type).ok_or_else(|| {
        InputError::InvalidCategory(raw_type.to_string())
    })?;
    let category: Category = type_name.parse().map_err(InputError::InvalidCategory)?;

    Ok(SearchInput {
        keywords,
        proxies,
        category,
    })
}

/// Reads `key` as a list of scalars, each turned into a string
fn string_list(data: &Value, key: &'static str) -> InputResult<Vec<String>> {
    let value = data.get(key).ok_or(InputError::MissingKey(key))?;
    let items = value.as_array().ok_or_else(|| InputError::InvalidEntry {
        key,
        found: value.to_string(),
    })?;

    items
        .iter()
        .map(|item| {
            scalar_to_string(item).ok_or_else(|| InputError::InvalidEntry {
                key,
                found: item.to_string(),
            })
        })
        .collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
