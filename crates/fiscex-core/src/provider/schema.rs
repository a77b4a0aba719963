//! Line-item schemas and model-reply reshaping.
//!
//! The vision model replies with JSON, frequently wrapped in markdown
//! code fences and sometimes as a bare item array. Everything here is
//! tolerant: missing optional fields become null, malformed JSON
//! surfaces as a per-document error string with an empty item list.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::CollaboratorError;
use crate::models::record::LineItem;

use super::Strategy;

/// Coca-Cola item keys, including the computed prorated-tax columns.
pub const COCA_COLA_KEYS: &[&str] = &[
    "Codigo",
    "Descripcion",
    "Cantidad",
    "PrecioUnitario",
    "Subtotal",
    "bulto",
    "px_bulto",
    "desc",
    "neto",
    "imp_int",
    "iva_21",
    "total",
    "porc_desc",
    "neto_mas_imp_int",
    "iibb_caba",
    "iibb_reg_3337",
    "total_final",
    "costo_x_bulto",
];

/// Quilmes item keys.
pub const QUILMES_KEYS: &[&str] = &[
    "Num_de_FC",
    "Producto",
    "Familia",
    "Bultos",
    "Ps",
    "Q",
    "Px_Lista",
    "Desc_Uni",
    "Total",
    "Desc_Global",
    "Desc_Porc",
    "Neto",
    "Imp_Int",
    "Porc_II",
    "Neto_Imp",
    "IVA",
    "IIBB",
    "Perc_IVA",
    "Final",
    "Pack_Final",
    "Unit",
];

/// Generic item keys.
pub const GENERAL_KEYS: &[&str] = &["Codigo", "Descripcion", "Cantidad", "PrecioUnitario", "Subtotal"];

/// Ratio columns exempt from whole-unit rounding.
const RATIO_KEYS: &[&str] = &["porc_desc", "Desc_Porc", "Porc_II"];

/// Decoded and schema-coerced model reply.
#[derive(Debug, Clone, Default)]
pub struct ReshapedInvoice {
    pub invoice_number: Option<String>,
    pub invoice_total: Option<i64>,
    pub items: Vec<LineItem>,
}

/// Strip a leading ```json / ``` fence and a trailing ``` fence.
fn strip_code_fences(reply: &str) -> &str {
    let mut s = reply.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// Decode a raw model reply and coerce its items onto the strategy's
/// fixed key schema.
///
/// Accepts either `{invoice_number?, invoice_total?, items: [...]}` or
/// a bare item array. Malformed JSON is reported as an error, never a
/// panic.
pub fn reshape_reply(reply: &str, strategy: &Strategy) -> Result<ReshapedInvoice, CollaboratorError> {
    let payload = strip_code_fences(reply);
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| CollaboratorError::BadReply(e.to_string()))?;

    let mut reshaped = ReshapedInvoice::default();

    let raw_items: Vec<Value> = match &value {
        Value::Array(items) => items.clone(),
        Value::Object(obj) => {
            reshaped.invoice_number = obj
                .get("invoice_number")
                .and_then(Value::as_str)
                .map(str::to_string);
            reshaped.invoice_total = obj
                .get("invoice_total")
                .and_then(coerce_integer);
            match obj.get("items") {
                Some(Value::Array(items)) => items.clone(),
                _ => Vec::new(),
            }
        }
        _ => {
            return Err(CollaboratorError::BadReply(
                "expected a JSON object or array".to_string(),
            ));
        }
    };

    reshaped.items = raw_items
        .into_iter()
        .filter_map(|item| item.as_object().cloned())
        .map(|obj| coerce_item(&obj, strategy))
        .collect();

    Ok(reshaped)
}

/// Project one raw item onto the fixed key set: missing keys become
/// null, extra keys are dropped, numbers follow the provider rounding
/// rule.
fn coerce_item(raw: &serde_json::Map<String, Value>, strategy: &Strategy) -> LineItem {
    let mut fields = IndexMap::with_capacity(strategy.item_keys.len());

    for &key in strategy.item_keys {
        let value = raw.get(key).cloned().unwrap_or(Value::Null);
        let value = if strategy.integer_amounts && !RATIO_KEYS.contains(&key) {
            round_number(value)
        } else {
            value
        };
        fields.insert(key.to_string(), value);
    }

    LineItem { fields }
}

/// Round a numeric JSON value to a whole currency unit, leaving
/// strings and nulls untouched.
fn round_number(value: Value) -> Value {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(f) = n.as_f64() {
                Value::from(f.round() as i64)
            } else {
                Value::Number(n)
            }
        }
        other => other,
    }
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => crate::text::locale::normalize_amount(s).parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{strategy_for, Provider};

    #[test]
    fn test_fenced_reply_parses() {
        let strategy = strategy_for(Provider::General);
        let reply = "```json\n{\"items\":[]}\n```";
        let reshaped = reshape_reply(reply, &strategy).unwrap();
        assert!(reshaped.items.is_empty());
    }

    #[test]
    fn test_bare_fence_and_array() {
        let strategy = strategy_for(Provider::General);
        let reply = "```\n[{\"Codigo\":\"A1\",\"Cantidad\":2}]\n```";
        let reshaped = reshape_reply(reply, &strategy).unwrap();
        assert_eq!(reshaped.items.len(), 1);
        assert_eq!(reshaped.items[0].get("Codigo"), Some(&Value::from("A1")));
        // Missing schema keys are null, not absent.
        assert_eq!(reshaped.items[0].get("Subtotal"), Some(&Value::Null));
    }

    #[test]
    fn test_item_coercion_drops_extras_and_rounds() {
        let strategy = strategy_for(Provider::Cocacola);
        let reply = r#"{
            "invoice_number": "0619-00434490",
            "invoice_total": 860602.32,
            "items": [{"Codigo": "112", "neto": 270899.1, "porc_desc": 0.4, "sello": "x"}]
        }"#;
        let reshaped = reshape_reply(reply, &strategy).unwrap();
        assert_eq!(reshaped.invoice_number.as_deref(), Some("0619-00434490"));
        assert_eq!(reshaped.invoice_total, Some(860602));

        let item = &reshaped.items[0];
        assert_eq!(item.fields.len(), COCA_COLA_KEYS.len());
        assert_eq!(item.get("neto"), Some(&Value::from(270899)));
        // Ratio columns keep their decimals.
        assert_eq!(item.get("porc_desc"), Some(&Value::from(0.4)));
        assert_eq!(item.get("sello"), None);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let strategy = strategy_for(Provider::General);
        assert!(reshape_reply("not json at all", &strategy).is_err());
        assert!(reshape_reply("\"just a string\"", &strategy).is_err());
    }
}
