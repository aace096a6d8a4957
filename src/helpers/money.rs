//! Currency amount formatting helper

use anyhow::bail;
use serde_json::Value;

use crate::render::{Helper, RenderContext};

/// Formats an integer amount of minor currency units
///
/// The first argument is the amount in minor units (cents for USD); the
/// optional second argument is an ISO currency code, defaulting to USD.
/// Floats are rejected rather than rounded.
pub struct MoneyHelper;

impl Helper for MoneyHelper {
    fn call(&self, _context: &RenderContext, args: &[Value]) -> anyhow::Result<Vec<Value>> {
        if args.is_empty() || args.len() > 2 {
            bail!(
                "money expects an amount and an optional currency code, got {} arguments",
                args.len()
            );
        }

        let amount = match &args[0] {
            Value::Number(number) => match number.as_i64() {
                Some(amount) => amount,
                None => bail!("money amount must be integer minor units, got {}", number),
            },
            other => bail!("money amount must be a number, got {}", other),
        };

        let currency = match args.get(1) {
            None => "USD",
            Some(Value::String(code)) => code.as_str(),
            Some(other) => bail!("money currency must be a string, got {}", other),
        };

        Ok(vec![Value::String(format_amount(amount, currency))])
    }
}

/// Symbol and minor-unit digits for known currency codes
fn currency_style(code: &str) -> (Option<&'static str>, u32) {
    match code {
        "USD" => (Some("$"), 2),
        "EUR" => (Some("€"), 2),
        "GBP" => (Some("£"), 2),
        "JPY" => (Some("¥"), 0),
        _ => (None, 2),
    }
}

fn format_amount(amount: i64, currency: &str) -> String {
    let (symbol, decimals) = currency_style(currency);
    let sign = if amount < 0 { "-" } else { "" };
    let magnitude = amount.unsigned_abs();

    let digits = if decimals == 0 {
        magnitude.to_string()
    } else {
        let scale = 10u64.pow(decimals);
        format!(
            "{}.{:0width$}",
            magnitude / scale,
            magnitude % scale,
            width = decimals as usize
        )
    };

    match symbol {
        Some(symbol) => format!("{}{}{}", sign, symbol, digits),
        None => format!("{}{} {}", sign, digits, currency),
    }
}
