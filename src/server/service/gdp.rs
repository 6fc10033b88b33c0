//! Estimated GDP calculation.
//!
//! The estimate is a synthetic figure: population times a random multiplier, divided by
//! the USD exchange rate of the country's first currency. Which branch applies depends on
//! whether the country has a currency at all and whether that currency has a rate, see
//! [`CurrencyRate`].

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::server::external::model::{ExchangeRates, ExternalCurrency};

/// Smallest multiplier drawn for an estimate
pub const MULTIPLIER_MIN: u32 = 1000;
/// Largest multiplier drawn for an estimate
pub const MULTIPLIER_MAX: u32 = 2000;

/// Source of the integer multiplier applied to every estimate
pub trait MultiplierSource {
    /// Next multiplier, expected within `MULTIPLIER_MIN..=MULTIPLIER_MAX`
    fn next_multiplier(&mut self) -> u32;
}

/// Uniformly random multipliers from an OS-seeded RNG
pub struct RandomMultiplier {
    rng: StdRng,
}

impl RandomMultiplier {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for RandomMultiplier {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiplierSource for RandomMultiplier {
    fn next_multiplier(&mut self) -> u32 {
        self.rng.random_range(MULTIPLIER_MIN..=MULTIPLIER_MAX)
    }
}

/// Replays a fixed sequence of multipliers, starting over once exhausted
///
/// Makes estimates deterministic where a test needs an exact value.
pub struct FixedMultiplier {
    values: Vec<u32>,
    next: usize,
}

impl FixedMultiplier {
    /// Cycles through `values`; an empty sequence always yields [`MULTIPLIER_MIN`]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, next: 0 }
    }

    /// Always yields `value`
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }
}

impl MultiplierSource for FixedMultiplier {
    fn next_multiplier(&mut self) -> u32 {
        if self.values.is_empty() {
            return MULTIPLIER_MIN;
        }

        let value = self.values[self.next % self.values.len()];
        self.next += 1;

        value
    }
}

/// What the exchange-rate source knows about a country's currency
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurrencyRate {
    /// The country lists no currency at all
    None,
    /// The country has a currency but the rate mapping has no entry for it
    Unlisted,
    /// The rate mapping has an entry for the currency, possibly `null`
    Listed(Option<f64>),
}

/// Currency attributes stored for a country, resolved from its first currency
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCurrency {
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub rate: CurrencyRate,
}

/// Resolves the first currency of a country against the rate mapping
///
/// A first currency without a code is handled like a code missing from the mapping.
pub fn resolve_currency(currencies: &[ExternalCurrency], rates: &ExchangeRates) -> ResolvedCurrency {
    let Some(first) = currencies.first() else {
        return ResolvedCurrency {
            currency_code: None,
            exchange_rate: None,
            rate: CurrencyRate::None,
        };
    };

    let Some(code) = &first.code else {
        return ResolvedCurrency {
            currency_code: None,
            exchange_rate: None,
            rate: CurrencyRate::Unlisted,
        };
    };

    match rates.rates.get(code) {
        Some(rate) => ResolvedCurrency {
            currency_code: Some(code.clone()),
            exchange_rate: *rate,
            rate: CurrencyRate::Listed(*rate),
        },
        None => ResolvedCurrency {
            currency_code: Some(code.clone()),
            exchange_rate: None,
            rate: CurrencyRate::Unlisted,
        },
    }
}

/// Estimates GDP for a country
///
/// # Returns
/// - `Some(0.0)` - No currency, or a listed rate that is `null` or `0`
/// - `None` - The currency has no entry in the rate mapping
/// - `Some(population * multiplier / rate)` - Otherwise, drawing one multiplier
pub fn estimate_gdp<M: MultiplierSource>(
    population: i64,
    currency: CurrencyRate,
    multipliers: &mut M,
) -> Option<f64> {
    match currency {
        CurrencyRate::None => Some(0.0),
        CurrencyRate::Unlisted => None,
        CurrencyRate::Listed(Some(rate)) if rate != 0.0 => {
            let multiplier = multipliers.next_multiplier();
            Some(population as f64 * f64::from(multiplier) / rate)
        }
        CurrencyRate::Listed(_) => Some(0.0),
    }
}
