//! RPC method handler for the Calcdesk JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method call to the calculator, the key map or
//! the settings engine held by the `App`.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::key_map::{KeyMapTrait, Modifiers};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::input::Operator;

/// Current display state as a JSON object.
fn state_json(app: &App) -> Value {
    let state = app.calculator.display_state();
    json!({"expression": state.expression, "result": state.result})
}

fn single_char(params: &Value, name: &str) -> Result<char, String> {
    let s = params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))?;
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("invalid {}: expected a single character", name)),
    }
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Expression input ───
        "calc.digit" => {
            let digit = single_char(params, "digit")?;
            if !digit.is_ascii_digit() {
                return Err(format!("invalid digit: {}", digit));
            }
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.calculator.input_digit(digit);
            Ok(state_json(&a))
        }
        "calc.operator" => {
            let c = single_char(params, "operator")?;
            let op = Operator::from_char(c).ok_or_else(|| format!("invalid operator: {}", c))?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.calculator.input_operator(op);
            Ok(state_json(&a))
        }
        "calc.decimal" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.calculator.input_decimal();
            Ok(state_json(&a))
        }
        "calc.backspace" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.calculator.backspace();
            Ok(state_json(&a))
        }
        "calc.clear" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.calculator.clear();
            Ok(state_json(&a))
        }
        "calc.clear_all" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.calculator.clear_all();
            Ok(state_json(&a))
        }
        "calc.evaluate" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.calculator.evaluate();
            Ok(state_json(&a))
        }
        "calc.key" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let modifiers = Modifiers {
                ctrl: params.get("ctrl").and_then(|v| v.as_bool()).unwrap_or(false),
                meta: params.get("meta").and_then(|v| v.as_bool()).unwrap_or(false),
            };
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let event = a.key_map.translate(key, modifiers);
            if let Some(event) = event {
                a.calculator.handle_event(event);
            }
            let mut state = state_json(&a);
            state["handled"] = json!(event.is_some());
            Ok(state)
        }
        "calc.state" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(state_json(&a))
        }

        // ─── History ───
        "history.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let arr: Vec<Value> = a
                .calculator
                .history()
                .iter()
                .enumerate()
                .map(|(i, h)| json!({"index": i, "expression": h.expression, "result": h.result, "timestamp": h.timestamp}))
                .collect();
            Ok(json!(arr))
        }
        "history.select" => {
            let index = params.get("index").and_then(|v| v.as_u64()).ok_or("missing index")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let found = a.calculator.select_history(index as usize);
            let mut state = state_json(&a);
            state["found"] = json!(found);
            Ok(state)
        }
        "history.clear" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.calculator.clear_history();
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
