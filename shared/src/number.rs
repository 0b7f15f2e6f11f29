//! Locale-aware number handling for price and quantity inputs.
//!
//! Users type numbers the Colombian way (`1.234,56`): `.` groups
//! thousands and `,` marks the decimals. Inputs of `type=number` are
//! different, the browser already hands us a canonical `1234.56`.

/// How the text of an input should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// Free text with `.` thousands separators and `,` decimals
    Localized,
    /// Browser-normalized value of an `<input type="number">`
    Canonical,
}

impl NumberStyle {
    /// Style for an input given its `type` attribute
    pub fn for_input_type(input_type: &str) -> Self {
        if input_type.eq_ignore_ascii_case("number") {
            NumberStyle::Canonical
        } else {
            NumberStyle::Localized
        }
    }

    /// Like [`for_input_type`](Self::for_input_type), but a text field whose
    /// value was already rewritten by [`normalize_for_submit`] is canonical
    /// until the user edits it again.
    pub fn for_input(input_type: &str, already_normalized: bool) -> Self {
        if already_normalized {
            NumberStyle::Canonical
        } else {
            Self::for_input_type(input_type)
        }
    }
}

/// Strip `.` thousands separators and turn `,` into the decimal point
pub fn normalize_localized(raw: &str) -> String {
    raw.trim().replace('.', "").replace(',', ".")
}

/// Normalize `raw` according to `style` so it can be handed to [`parse_decimal`]
pub fn normalize(raw: &str, style: NumberStyle) -> String {
    match style {
        NumberStyle::Localized => normalize_localized(raw),
        NumberStyle::Canonical => raw.trim().to_string(),
    }
}

/// Strict decimal parse: optional sign, digits, optional fraction.
///
/// Unlike `f64::from_str` this rejects `inf`, `NaN`, exponents and any
/// trailing text, so `12abc` is not silently read as 12.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    let unsigned = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Value written back into a numeric field right before the form is submitted.
///
/// Localized text loses its grouping and, if several decimal points are
/// left, every one but the last is treated as part of the integer.
pub fn normalize_for_submit(raw: &str, style: NumberStyle) -> String {
    if raw.is_empty() || style == NumberStyle::Canonical {
        return raw.to_string();
    }

    let cleaned = normalize_localized(raw);
    match cleaned.rsplit_once('.') {
        Some((int_part, frac_part)) if int_part.contains('.') => {
            format!("{}.{}", int_part.replace('.', ""), frac_part)
        }
        _ => cleaned,
    }
}

/// es-CO rendering: `.` thousands grouping, `,` decimals, at most two
/// fraction digits and no trailing zeros.
pub fn format_grouped(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{}", sign, grouped, frac_part)
    }
}

fn looks_grouped(text: &str) -> bool {
    let text = text.strip_prefix('-').unwrap_or(text);
    let mut groups = text.split('.');
    let head_ok = groups
        .next()
        .map(|head| (1..=3).contains(&head.len()))
        .unwrap_or(false);
    let tail: Vec<&str> = groups.collect();
    head_ok && !tail.is_empty() && tail.iter().all(|group| group.len() == 3)
}

fn keep_number_chars(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect()
}

/// Read the value of a display-only field, whether it currently holds
/// a plain number (`1234.5`) or a grouped one (`$ 1.234,5`).
pub fn parse_display_number(text: &str) -> Option<f64> {
    let cleaned = keep_number_chars(text);
    if cleaned.is_empty() {
        return None;
    }

    if cleaned.contains(',') {
        parse_decimal(&normalize_localized(&cleaned))
    } else if looks_grouped(&cleaned) {
        parse_decimal(&cleaned.replace('.', ""))
    } else {
        parse_decimal(&cleaned)
    }
}

/// Plain editable text for a display-only field that gained focus
pub fn unformat_for_edit(text: &str) -> String {
    match parse_display_number(text) {
        Some(value) => value.to_string(),
        None => keep_number_chars(text).replace(',', "."),
    }
}
