//! `foodQuantity` coercion and ordering
//!
//! Listings store the quantity as whatever the client sent, usually text.
//! Before sorting, a value that reads as a number (JavaScript `Number`
//! rules, so `"0x10"` and `"1e3"` both qualify) is rewritten as the integer
//! its leading digits spell (`parseInt` rules: `"1e3"` is 1, `"0x10"` is 16,
//! `"7.9"` is 7). Anything else is left exactly as stored.
//!
//! Ordering is total:
//! - two numbers compare descending
//! - non-numeric values are all equal to each other
//! - numbers come before non-numeric values
//!
//! The sort is stable, so non-numeric listings keep their storage order at
//! the tail.

use std::cmp::Ordering;

use mongodb::bson::{Bson, Document};

pub const QUANTITY_FIELD: &str = "foodQuantity";

/// Coerced integer form of a quantity, if it has one.
///
/// Returns `Int64`, or `Double` when the integer falls outside the `i64`
/// range. Text that passes the number check but has no leading digits
/// (`""`, `"Infinity"`, `".5"`) has no integer form and stays as stored.
pub fn numeric_quantity(value: &Bson) -> Option<Bson> {
    let integer = match value {
        Bson::Int32(n) => return Some(Bson::Int64(i64::from(*n))),
        Bson::Int64(n) => return Some(Bson::Int64(*n)),
        Bson::Double(n) if n.is_finite() => {
            let magnitude = n.abs();
            if magnitude == 0.0 || (1e-6..1e21).contains(&magnitude) {
                Some(n.trunc())
            } else {
                // Outside that range the number prints in exponent form,
                // so only the first mantissa digit survives.
                parse_int(&format!("{n:e}"))
            }
        }
        Bson::String(text) if reads_as_number(text) => parse_int(text),
        _ => None,
    }?;

    Some(integer_bson(integer))
}

/// Rewrite `foodQuantity` as an integer when it reads as a number.
pub fn coerce_quantity(document: &mut Document) {
    let coerced = document.get(QUANTITY_FIELD).and_then(numeric_quantity);
    if let Some(n) = coerced {
        document.insert(QUANTITY_FIELD, n);
    }
}

/// Descending comparator over `foodQuantity`.
pub fn compare_by_quantity(a: &Document, b: &Document) -> Ordering {
    match (sort_key(a), sort_key(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Coerce every listing, then sort largest quantity first.
pub fn sort_by_quantity(documents: &mut [Document]) {
    documents.iter_mut().for_each(coerce_quantity);
    documents.sort_by(compare_by_quantity);
}

fn sort_key(document: &Document) -> Option<f64> {
    match document.get(QUANTITY_FIELD).and_then(numeric_quantity)? {
        Bson::Int64(n) => Some(n as f64),
        Bson::Double(n) => Some(n),
        _ => None,
    }
}

fn integer_bson(n: f64) -> Bson {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Bson::Int64(n as i64)
    } else {
        Bson::Double(n)
    }
}

/// Whitespace as JavaScript trims it.
fn is_js_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Whether `text` converts to a number under JavaScript's `Number(text)`.
fn reads_as_number(text: &str) -> bool {
    let text = text.trim_matches(is_js_whitespace);
    if text.is_empty() {
        return true;
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let lower = text.get(..2).map(str::to_ascii_lowercase);
        if lower.as_deref() == Some(prefix) {
            let digits = &text[2..];
            return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
        }
    }

    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return true;
    }

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };

    let mut parts = mantissa.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if whole.len() + fraction.len() == 0 || !digits_only(whole) || !digits_only(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(exponent) => {
            let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            !exponent.is_empty() && digits_only(exponent)
        }
    }
}

/// Leading integer of `text` under JavaScript's `parseInt(text)`.
fn parse_int(text: &str) -> Option<f64> {
    let text = text.trim_start_matches(is_js_whitespace);
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (radix, text) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(rest) => (16, rest),
        None => (10, text),
    };

    let end = text
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(text.len());
    let digits = &text[..end];
    if digits.is_empty() {
        return None;
    }

    let magnitude = if radix == 10 {
        digits.parse::<f64>().ok()?
    } else {
        digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
    };

    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn quantities(documents: &[Document]) -> Vec<Option<&Bson>> {
        documents.iter().map(|d| d.get(QUANTITY_FIELD)).collect()
    }

    fn text(value: &str) -> Bson {
        Bson::String(value.into())
    }

    #[test]
    fn numeric_text_is_coerced() {
        assert_eq!(numeric_quantity(&text("5")), Some(Bson::Int64(5)));
        assert_eq!(numeric_quantity(&text(" 12 ")), Some(Bson::Int64(12)));
        assert_eq!(numeric_quantity(&text("7.9")), Some(Bson::Int64(7)));
        assert_eq!(numeric_quantity(&text("-2.5")), Some(Bson::Int64(-2)));
        assert_eq!(numeric_quantity(&Bson::Double(3.99)), Some(Bson::Int64(3)));
        assert_eq!(numeric_quantity(&Bson::Int32(4)), Some(Bson::Int64(4)));
    }

    #[test]
    fn only_leading_digits_count() {
        assert_eq!(numeric_quantity(&text("1e3")), Some(Bson::Int64(1)));
        assert_eq!(numeric_quantity(&text("1e30")), Some(Bson::Int64(1)));
        assert_eq!(numeric_quantity(&text("5.")), Some(Bson::Int64(5)));
        assert_eq!(numeric_quantity(&text("0o17")), Some(Bson::Int64(0)));
        assert_eq!(numeric_quantity(&Bson::Double(1e21)), Some(Bson::Int64(1)));
        assert_eq!(numeric_quantity(&Bson::Double(-5e-7)), Some(Bson::Int64(-5)));
    }

    #[test]
    fn hex_text_is_coerced() {
        assert_eq!(numeric_quantity(&text("0x10")), Some(Bson::Int64(16)));
        assert_eq!(numeric_quantity(&text("0XfF")), Some(Bson::Int64(255)));
        assert_eq!(numeric_quantity(&text("-0x10")), None);
        assert_eq!(numeric_quantity(&text("0x")), None);
    }

    #[test]
    fn integers_past_i64_stay_doubles() {
        assert_eq!(
            numeric_quantity(&text("99999999999999999999")),
            Some(Bson::Double(1e20))
        );
    }

    #[test]
    fn non_numeric_values_are_left_alone() {
        assert_eq!(numeric_quantity(&text("plenty")), None);
        assert_eq!(numeric_quantity(&text("5 loaves")), None);
        assert_eq!(numeric_quantity(&text("1_000")), None);
        assert_eq!(numeric_quantity(&text("")), None);
        assert_eq!(numeric_quantity(&text("Infinity")), None);
        assert_eq!(numeric_quantity(&text(".5")), None);
        assert_eq!(numeric_quantity(&text("NaN")), None);
        assert_eq!(numeric_quantity(&text("inf")), None);
        assert_eq!(numeric_quantity(&Bson::Boolean(true)), None);
        assert_eq!(numeric_quantity(&Bson::Null), None);

        let mut listing = doc! { "foodQuantity": "plenty" };
        coerce_quantity(&mut listing);
        assert_eq!(listing, doc! { "foodQuantity": "plenty" });

        let mut listing = doc! { "name": "Soup" };
        coerce_quantity(&mut listing);
        assert_eq!(listing, doc! { "name": "Soup" });
    }

    #[test]
    fn coercion_writes_an_integer() {
        let mut listing = doc! { "name": "Rice", "foodQuantity": "5" };
        coerce_quantity(&mut listing);
        assert_eq!(listing.get(QUANTITY_FIELD), Some(&Bson::Int64(5)));
    }

    #[test]
    fn sorts_descending_with_non_numeric_last() {
        let mut listings = vec![
            doc! { "foodQuantity": "3" },
            doc! { "foodQuantity": "lots" },
            doc! { "foodQuantity": 10 },
            doc! { "name": "no quantity" },
            doc! { "foodQuantity": "7" },
            doc! { "foodQuantity": "1e3" },
        ];

        sort_by_quantity(&mut listings);

        assert_eq!(
            quantities(&listings),
            vec![
                Some(&Bson::Int64(10)),
                Some(&Bson::Int64(7)),
                Some(&Bson::Int64(3)),
                Some(&Bson::Int64(1)),
                Some(&Bson::String("lots".into())),
                None,
            ]
        );
    }

    #[test]
    fn equal_quantities_keep_storage_order() {
        let mut listings = vec![
            doc! { "name": "a", "foodQuantity": "2" },
            doc! { "name": "b", "foodQuantity": 2 },
        ];

        sort_by_quantity(&mut listings);

        let names: Vec<_> = listings.iter().map(|d| d.get_str("name").unwrap()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn comparator_is_consistent_across_mixed_values() {
        let five = doc! { "foodQuantity": 5 };
        let three = doc! { "foodQuantity": 3 };
        let text = doc! { "foodQuantity": "x" };

        assert_eq!(compare_by_quantity(&five, &three), Ordering::Less);
        assert_eq!(compare_by_quantity(&three, &five), Ordering::Greater);
        assert_eq!(compare_by_quantity(&five, &text), Ordering::Less);
        assert_eq!(compare_by_quantity(&text, &three), Ordering::Greater);
        assert_eq!(compare_by_quantity(&text, &text), Ordering::Equal);
    }
}
