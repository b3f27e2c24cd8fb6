use num_format::{Locale, ToFormattedString};

#[derive(Clone, Debug)]
pub struct NumberFormatOptions {
    pub use_comma: bool,
    pub locale: String,
    pub decimal_places: usize,
}

impl Default for NumberFormatOptions {
    fn default() -> Self {
        Self {
            use_comma: true,
            locale: "en".to_string(),
            decimal_places: 2,
        }
    }
}

impl NumberFormatOptions {
    fn locale(&self) -> Locale {
        match self.locale.as_str() {
            "de" => Locale::de,
            "fr" => Locale::fr,
            "es" => Locale::es,
            "it" => Locale::it,
            "ja" => Locale::ja,
            "ko" => Locale::ko,
            "zh" => Locale::zh,
            _ => Locale::en,
        }
    }
}

/// Format an integer count for display. Accepts both u32 and u64.
pub fn format_number(n: impl Into<u64>, options: &NumberFormatOptions) -> String {
    let n: u64 = n.into();
    if options.use_comma {
        n.to_formatted_string(&options.locale())
    } else {
        n.to_string()
    }
}

/// Format a monetary amount as `$1,234.56`, rounded to `decimal_places`.
pub fn format_currency(amount: f64, options: &NumberFormatOptions) -> String {
    let places = options.decimal_places;
    let fixed = format!("{:.places$}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let locale = options.locale();
    let whole = match whole.parse::<u64>() {
        Ok(w) if options.use_comma => w.to_formatted_string(&locale),
        _ => whole.to_string(),
    };

    // Rounding can turn -0.001 into "0.00"; only keep the sign when something is left.
    let sign = if amount < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };

    if fraction.is_empty() {
        format!("{sign}${whole}")
    } else {
        let decimal = if options.use_comma { locale.decimal() } else { "." };
        format!("{sign}${whole}{decimal}{fraction}")
    }
}

#[cfg(test)]
mod tests;
