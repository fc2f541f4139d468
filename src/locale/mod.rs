//! Locale-aware metric formatters.
//!
//! Terminal values of a view-model (currency, percentages, dates, counts)
//! are formatted here and only here; aggregation keeps full f64 precision so
//! that summing stays order-independent. Every formatter is total: `None`,
//! NaN, and malformed dates render as the locale placeholder instead of
//! panicking.

use serde::{Deserialize, Serialize};

/// Formatting table for one locale. Defaults to pt-BR, the locale of the
/// CRM this report layer was extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locale {
    #[serde(default = "default_decimal_sep")]
    pub decimal_sep: char,
    #[serde(default = "default_group_sep")]
    pub group_sep: char,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_month_abbrev")]
    pub month_abbrev: Vec<String>,
}

fn default_decimal_sep() -> char {
    ','
}

fn default_group_sep() -> char {
    '.'
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

fn default_placeholder() -> String {
    "-".to_string()
}

fn default_month_abbrev() -> Vec<String> {
    [
        "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}

impl Default for Locale {
    fn default() -> Self {
        Self::pt_br()
    }
}

impl Locale {
    pub fn pt_br() -> Self {
        Self {
            decimal_sep: default_decimal_sep(),
            group_sep: default_group_sep(),
            currency_symbol: default_currency_symbol(),
            placeholder: default_placeholder(),
            month_abbrev: default_month_abbrev(),
        }
    }

    pub fn en_us() -> Self {
        Self {
            decimal_sep: '.',
            group_sep: ',',
            currency_symbol: "$".to_string(),
            placeholder: "-".to_string(),
            month_abbrev: [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]
            .iter()
            .map(|m| m.to_string())
            .collect(),
        }
    }

    /// `1234.5` → `"R$ 1.234,50"`.
    pub fn currency(&self, value: f64) -> String {
        if !value.is_finite() {
            return self.placeholder.clone();
        }
        let sign = if value < 0.0 { "-" } else { "" };
        let fixed = self.fixed(value.abs(), 2);
        if fixed == self.placeholder {
            return self.placeholder.clone();
        }
        format!("{sign}{} {fixed}", self.currency_symbol)
    }

    /// Value already on the 0..100 percent scale: `percent(0.0, 1)` → `"0.0%"`.
    ///
    /// Percent output keeps the `.` decimal point regardless of locale, as
    /// did every dashboard this was extracted from (`toFixed` output).
    pub fn percent(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return self.placeholder.clone();
        }
        format!("{value:.decimals$}%")
    }

    /// Value on the 0..1 ratio scale: `ratio_percent(0.5, 1)` → `"50.0%"`.
    pub fn ratio_percent(&self, value: f64, decimals: usize) -> String {
        self.percent(value * 100.0, decimals)
    }

    /// Grouped integer count: `1234.0` → `"1.234"`.
    pub fn count(&self, value: f64) -> String {
        if !value.is_finite() {
            return self.placeholder.clone();
        }
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}{}", self.grouped(value.abs().round() as u64))
    }

    /// ISO date (or datetime) → `"dd/mm/yyyy"`; anything unparseable → placeholder.
    pub fn date(&self, iso: Option<&str>) -> String {
        let Some(iso) = iso else {
            return self.placeholder.clone();
        };
        match parse_iso_date(iso) {
            Some(date) => date.format("%d/%m/%Y").to_string(),
            None => self.placeholder.clone(),
        }
    }

    /// ISO month `"2024-01"` → `"Jan/24"`.
    pub fn month(&self, iso_month: &str) -> String {
        let mut parts = iso_month.splitn(3, '-');
        let (Some(year), Some(month)) = (parts.next(), parts.next()) else {
            return self.placeholder.clone();
        };
        // Month strings come straight from payloads; reject anything that
        // is not a plain digit year before slicing it.
        if year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
            return self.placeholder.clone();
        }
        let Ok(month_idx) = month.parse::<usize>() else {
            return self.placeholder.clone();
        };
        let Some(abbrev) = self.month_abbrev.get(month_idx.wrapping_sub(1)) else {
            return self.placeholder.clone();
        };
        match year.len() {
            4 => format!("{abbrev}/{}", &year[2..]),
            _ => format!("{abbrev}/{year}"),
        }
    }

    /// Day quantities: `12.34` → `"12,3 dias"` under pt-BR.
    pub fn days(&self, value: f64) -> String {
        if !value.is_finite() {
            return self.placeholder.clone();
        }
        let fixed = self.fixed(value, 1);
        if fixed == self.placeholder {
            return self.placeholder.clone();
        }
        format!("{} dias", fixed)
    }

    /// Fixed-point with locale separators: `fixed(1234.5, 2)` → `"1.234,50"`.
    pub fn fixed(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return self.placeholder.clone();
        }
        let rendered = format!("{:.decimals$}", value.abs());
        let (int_part, frac_part) = match rendered.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (rendered.as_str(), None),
        };
        let sign = if value < 0.0 { "-" } else { "" };
        // The integer part only overflows u64 for magnitudes no report
        // legitimately reaches; render those as unknown, not as zero.
        let Ok(int) = int_part.parse::<u64>() else {
            return self.placeholder.clone();
        };
        let grouped = self.grouped(int);
        match frac_part {
            Some(frac) => format!("{sign}{grouped}{}{frac}", self.decimal_sep),
            None => format!("{sign}{grouped}"),
        }
    }

    fn grouped(&self, value: u64) -> String {
        let digits = value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        let offset = digits.len() % 3;
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - offset) % 3 == 0 {
                out.push(self.group_sep);
            }
            out.push(ch);
        }
        out
    }
}

fn parse_iso_date(iso: &str) -> Option<chrono::NaiveDate> {
    // Date-only, RFC 3339 datetime, or a bare `YYYY-MM-DDTHH:MM:SS`.
    if let Ok(date) = chrono::NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(iso) {
        return Some(dt.date_naive());
    }
    chrono::NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}
