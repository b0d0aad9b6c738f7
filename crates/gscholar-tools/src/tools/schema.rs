//! Dialect adapter: canonical operations rendered per provider convention.
//!
//! The differences between provider tool schemas are purely structural —
//! how the parameter schema is nested, and how tool identity and results
//! are carried. This module is a pure format-translation table; adding a
//! dialect means adding match arms, never touching the canonical specs.

use serde_json::{Value, json};

use super::{Invocation, Operation, OperationArgs, ToolSpec, canonical_specs};
use crate::error::{ToolError, ToolResult};

/// A provider's tool-calling schema dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// OpenAI function calling: named function objects with a nested
    /// `parameters` schema; invocations carry arguments as a JSON string.
    OpenAi,
    /// Anthropic tool use: flat tool objects with `input_schema`;
    /// invocations are typed `tool_use` content blocks.
    Anthropic,
}

/// Build the JSON Schema object shared by both dialects.
fn parameter_schema(spec: &ToolSpec) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for param in spec.params {
        properties.insert(
            param.name.to_string(),
            json!({"type": param.kind, "description": param.description}),
        );
        if param.required {
            required.push(param.name);
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Describe all four operations in the given dialect's schema shape.
#[must_use]
pub fn describe_tools(dialect: Dialect) -> Vec<Value> {
    canonical_specs()
        .iter()
        .map(|spec| match dialect {
            Dialect::OpenAi => json!({
                "type": "function",
                "function": {
                    "name": spec.operation.name(),
                    "description": spec.description,
                    "parameters": parameter_schema(spec),
                }
            }),
            Dialect::Anthropic => json!({
                "name": spec.operation.name(),
                "description": spec.description,
                "input_schema": parameter_schema(spec),
            }),
        })
        .collect()
}

/// Parse a provider-shaped tool invocation into canonical form.
///
/// # Errors
///
/// Returns [`ToolError::UnrecognizedOperation`] for unknown tool names and
/// [`ToolError::MalformedArguments`] when required arguments are missing
/// or mistyped.
pub fn parse_invocation(dialect: Dialect, raw: &Value) -> ToolResult<Invocation> {
    let (name, arguments, id) = match dialect {
        Dialect::OpenAi => {
            let function = raw.get("function").unwrap_or(raw);
            let name = function
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| ToolError::malformed("tool_call", "missing function name"))?;

            // OpenAI sends arguments as a JSON-encoded string
            let arguments = match function.get("arguments") {
                Some(Value::String(s)) => serde_json::from_str(s)
                    .map_err(|e| ToolError::malformed(name, format!("invalid argument JSON: {e}")))?,
                Some(other) => other.clone(),
                None => json!({}),
            };

            let id = raw.get("id").and_then(Value::as_str).map(String::from);
            (name.to_string(), arguments, id)
        }
        Dialect::Anthropic => {
            let name = raw
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| ToolError::malformed("tool_use", "missing tool name"))?;

            let arguments = raw.get("input").cloned().unwrap_or_else(|| json!({}));
            let id = raw.get("id").and_then(Value::as_str).map(String::from);
            (name.to_string(), arguments, id)
        }
    };

    let operation =
        Operation::from_name(&name).ok_or_else(|| ToolError::unrecognized(&name))?;
    let args = OperationArgs::from_value(operation, arguments)?;

    Ok(Invocation { id, args })
}

/// Wrap a tool's output text in the envelope the dialect's conversation
/// format expects.
#[must_use]
pub fn wrap_result(dialect: Dialect, invocation_id: &str, result_text: &str) -> Value {
    match dialect {
        Dialect::OpenAi => json!({
            "role": "tool",
            "tool_call_id": invocation_id,
            "content": result_text,
        }),
        Dialect::Anthropic => json!({
            "type": "tool_result",
            "tool_use_id": invocation_id,
            "content": result_text,
        }),
    }
}
