use super::fields::{FormRecord, PredictionRequest};
use crate::prelude::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};

/// How raw form text becomes numbers at submission time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoercionPolicy {
    /// Longest numeric prefix wins, anything else becomes NaN and is sent anyway.
    #[default]
    Permissive,
    /// Every field must hold a complete finite number; nothing is sent otherwise.
    Strict,
}

impl CoercionPolicy {
    pub fn coerce(self, form: &FormRecord) -> ClientResult<PredictionRequest> {
        let mut values = [f64::NAN; 8];
        for (slot, (field, raw)) in values.iter_mut().zip(form.iter()) {
            *slot = match self {
                CoercionPolicy::Permissive => parse_float_prefix(raw),
                CoercionPolicy::Strict => raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| ClientError::InvalidInput {
                        field,
                        value: raw.to_string(),
                    })?,
            };
        }
        Ok(PredictionRequest::from_values(values))
    }
}

/// Parses the longest decimal literal at the start of `raw`, after leading
/// whitespace. Returns NaN when there is none.
pub fn parse_float_prefix(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
