//! Currency Formatting
//!
//! Locale-aware rendering of money amounts for the revenue headline. The
//! currency code and the locale are independent settings: the locale decides
//! separators and symbol placement, the code decides the symbol and the
//! number of minor units.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// No-break space used by CLDR currency patterns
const NBSP: char = '\u{a0}';
/// Narrow no-break space used as the French group separator
const NNBSP: char = '\u{202f}';

/// Currency formatting errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Unsupported locale: {0}")]
    UnknownLocale(String),

    #[error("Invalid currency code: {0:?} (expected three ASCII letters)")]
    InvalidCode(String),
}

/// Where the currency symbol goes relative to the number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPlacement {
    /// `$1,234.56`
    Prefix,
    /// `R$ 1.234,56`
    PrefixSpaced,
    /// `1.234,56 €`
    SuffixSpaced,
}

/// Number layout for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocaleRules {
    name: &'static str,
    group: char,
    decimal: char,
    placement: SymbolPlacement,
}

const LOCALES: [LocaleRules; 8] = [
    LocaleRules { name: "en_US", group: ',', decimal: '.', placement: SymbolPlacement::Prefix },
    LocaleRules { name: "en_AU", group: ',', decimal: '.', placement: SymbolPlacement::Prefix },
    LocaleRules { name: "en_GB", group: ',', decimal: '.', placement: SymbolPlacement::Prefix },
    LocaleRules { name: "es_CO", group: '.', decimal: ',', placement: SymbolPlacement::PrefixSpaced },
    LocaleRules { name: "id_ID", group: '.', decimal: ',', placement: SymbolPlacement::Prefix },
    LocaleRules { name: "pt_BR", group: '.', decimal: ',', placement: SymbolPlacement::PrefixSpaced },
    LocaleRules { name: "de_DE", group: '.', decimal: ',', placement: SymbolPlacement::SuffixSpaced },
    LocaleRules { name: "fr_FR", group: NNBSP, decimal: ',', placement: SymbolPlacement::SuffixSpaced },
];

/// Formats amounts in one currency under one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    code: String,
    rules: LocaleRules,
}

impl CurrencyFormatter {
    /// Build a formatter. Accepts `es_CO` and `es-CO` spellings.
    pub fn new(code: &str, locale: &str) -> Result<Self, CurrencyError> {
        let code = code.trim().to_ascii_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyError::InvalidCode(code));
        }

        let normalized = locale.trim().replace('-', "_");
        let rules = LOCALES
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(&normalized))
            .copied()
            .ok_or_else(|| CurrencyError::UnknownLocale(locale.to_string()))?;

        Ok(Self { code, rules })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn locale(&self) -> &str {
        self.rules.name
    }

    /// Render an amount, rounding half-to-even to the currency's minor units
    pub fn format(&self, amount: Decimal) -> String {
        let digits = minor_units(&self.code);
        let rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let plain = format!("{:.*}", digits as usize, rounded.abs());
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (plain.as_str(), None),
        };

        let mut number = group_digits(int_part, self.rules.group);
        if let Some(frac) = frac_part {
            number.push(self.rules.decimal);
            number.push_str(frac);
        }

        let symbol = self.symbol();
        let sign = if negative { "-" } else { "" };
        match self.rules.placement {
            SymbolPlacement::Prefix => format!("{sign}{symbol}{number}"),
            SymbolPlacement::PrefixSpaced => format!("{sign}{symbol}{NBSP}{number}"),
            SymbolPlacement::SuffixSpaced => format!("{sign}{number}{NBSP}{symbol}"),
        }
    }

    /// Symbol for the configured code as written in the configured locale
    fn symbol(&self) -> String {
        let locale = self.rules.name;
        let symbol = match (self.code.as_str(), locale) {
            ("USD", "en_US") => "$",
            ("AUD", "en_AU") => "$",
            ("COP", "es_CO") => "$",
            ("IDR", "id_ID") => "Rp",
            ("USD", _) => "US$",
            ("AUD", _) => "AU$",
            ("BRL", _) => "R$",
            ("EUR", _) => "€",
            ("GBP", _) => "£",
            ("JPY", _) => "¥",
            (code, _) => code,
        };
        symbol.to_string()
    }
}

/// Fraction digits used by a currency
fn minor_units(code: &str) -> u32 {
    match code {
        "JPY" | "KRW" | "CLP" | "VND" => 0,
        _ => 2,
    }
}

fn group_digits(int_part: &str, separator: char) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
