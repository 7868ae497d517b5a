//! Value types shared by the fill models: fixed-point prices and quantities,
//! instrument metadata, and order/book side enums.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Highest decimal precision a [`Price`] or [`Quantity`] can carry.
pub const MAX_PRECISION: u8 = 9;

/// Rejects precisions above [`MAX_PRECISION`].
pub fn check_precision(precision: u8) -> Result<(), ConfigError> {
    if precision <= MAX_PRECISION {
        Ok(())
    } else {
        Err(ConfigError::InvalidPrecision(precision))
    }
}

fn pow10(precision: u8) -> u64 {
    10_u64.pow(u32::from(precision))
}

/// Scale a raw value from `from` decimals up to `to` decimals (`to >= from`).
fn rescale_u64(raw: u64, from: u8, to: u8) -> u64 {
    raw.saturating_mul(pow10(to - from))
}

fn rescale_i64(raw: i64, from: u8, to: u8) -> i64 {
    raw.saturating_mul(pow10(to - from) as i64)
}

fn fmt_fixed(f: &mut fmt::Formatter<'_>, negative: bool, abs: u64, precision: u8) -> fmt::Result {
    let sign = if negative { "-" } else { "" };
    if precision == 0 {
        return write!(f, "{}{}", sign, abs);
    }
    let scale = pow10(precision);
    write!(
        f,
        "{}{}.{:0width$}",
        sign,
        abs / scale,
        abs % scale,
        width = usize::from(precision)
    )
}

/// Fixed-point price: `raw` scaled by `10^precision`.
///
/// Arithmetic is exact integer arithmetic. Operands of different precision
/// are rescaled to the larger of the two before combining.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Price {
    raw: i64,
    precision: u8,
}

impl Price {
    /// Create a price from a float, rounded to `precision` decimals.
    /// Precision is capped at [`MAX_PRECISION`]; the value is rounded, not rescaled.
    pub fn new(value: f64, precision: u8) -> Self {
        let precision = precision.min(MAX_PRECISION);
        let raw = (value * pow10(precision) as f64).round() as i64;
        Self { raw, precision }
    }

    /// Wrap a raw value already scaled by `10^precision`.
    pub fn from_raw(raw: i64, precision: u8) -> Result<Self, ConfigError> {
        check_precision(precision)?;
        Ok(Self { raw, precision })
    }

    pub fn from_int(value: i64, precision: u8) -> Self {
        let precision = precision.min(MAX_PRECISION);
        Self {
            raw: value.saturating_mul(pow10(precision) as i64),
            precision,
        }
    }

    pub fn raw(&self) -> i64 {
        self.raw
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn is_positive(&self) -> bool {
        self.raw > 0
    }

    /// Move this price up by `ticks` multiples of `increment`.
    pub fn add_ticks(self, increment: Price, ticks: u32) -> Price {
        self + increment.times(ticks)
    }

    /// Move this price down by `ticks` multiples of `increment`.
    pub fn sub_ticks(self, increment: Price, ticks: u32) -> Price {
        self - increment.times(ticks)
    }

    fn times(self, n: u32) -> Price {
        Price {
            raw: self.raw.saturating_mul(i64::from(n)),
            precision: self.precision,
        }
    }

    /// Raw values of both prices at their common (larger) precision.
    fn aligned(self, other: Price) -> (i64, i64, u8) {
        let precision = self.precision.max(other.precision);
        (
            rescale_i64(self.raw, self.precision, precision),
            rescale_i64(other.raw, other.precision, precision),
            precision,
        )
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        let (a, b, precision) = self.aligned(rhs);
        Price {
            raw: a.saturating_add(b),
            precision,
        }
    }
}

impl Sub for Price {
    type Output = Price;

    fn sub(self, rhs: Price) -> Price {
        let (a, b, precision) = self.aligned(rhs);
        Price {
            raw: a.saturating_sub(b),
            precision,
        }
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        let (a, b, _) = self.aligned(*other);
        a == b
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligned(*other);
        a.cmp(&b)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_fixed(f, self.raw < 0, self.raw.unsigned_abs(), self.precision)
    }
}

/// Fixed-point, non-negative quantity: `raw` scaled by `10^precision`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quantity {
    raw: u64,
    precision: u8,
}

impl Quantity {
    /// Create a quantity from a float, rounded to `precision` decimals.
    /// Negative and NaN inputs become zero.
    pub fn new(value: f64, precision: u8) -> Self {
        let precision = precision.min(MAX_PRECISION);
        let scaled = (value * pow10(precision) as f64).round();
        let raw = if scaled.is_nan() || scaled <= 0.0 {
            0
        } else {
            scaled as u64
        };
        Self { raw, precision }
    }

    /// Wrap a raw value already scaled by `10^precision`.
    pub fn from_raw(raw: u64, precision: u8) -> Result<Self, ConfigError> {
        check_precision(precision)?;
        Ok(Self { raw, precision })
    }

    /// Whole units at the given precision, e.g. `from_int(10, 2)` is `10.00`.
    pub fn from_int(units: u64, precision: u8) -> Self {
        let precision = precision.min(MAX_PRECISION);
        Self {
            raw: units.saturating_mul(pow10(precision)),
            precision,
        }
    }

    pub fn zero(precision: u8) -> Self {
        Self {
            raw: 0,
            precision: precision.min(MAX_PRECISION),
        }
    }

    pub fn raw(&self) -> u64 {
        self.raw
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    fn aligned(self, other: Quantity) -> (u64, u64, u8) {
        let precision = self.precision.max(other.precision);
        (
            rescale_u64(self.raw, self.precision, precision),
            rescale_u64(other.raw, other.precision, precision),
            precision,
        )
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        let (a, b, precision) = self.aligned(rhs);
        Quantity {
            raw: a.saturating_add(b),
            precision,
        }
    }
}

/// Saturates at zero.
impl Sub for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        let (a, b, precision) = self.aligned(rhs);
        Quantity {
            raw: a.saturating_sub(b),
            precision,
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        let (a, b, _) = self.aligned(*other);
        a == b
    }
}

impl Eq for Quantity {}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligned(*other);
        a.cmp(&b)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_fixed(f, false, self.raw, self.precision)
    }
}

/// Instrument identifier, e.g. `"BTCUSDT.BINANCE"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentId(String);

impl InstrumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InstrumentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for InstrumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The instrument metadata fill models need: tick size and size precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instrument {
    id: InstrumentId,
    price_increment: Price,
    size_increment: Quantity,
}

impl Instrument {
    /// Both increments must be strictly positive with at most
    /// [`MAX_PRECISION`] decimals. Their precisions become the instrument's
    /// price and size precision.
    pub fn new(
        id: impl Into<InstrumentId>,
        price_increment: Price,
        size_increment: Quantity,
    ) -> Result<Self, ConfigError> {
        let id = id.into();
        for (name, precision) in [
            ("price", price_increment.precision()),
            ("size", size_increment.precision()),
        ] {
            if check_precision(precision).is_err() {
                return Err(ConfigError::InvalidInstrument(format!(
                    "{}: {} increment precision {} exceeds {}",
                    id, name, precision, MAX_PRECISION
                )));
            }
        }
        if !price_increment.is_positive() {
            return Err(ConfigError::InvalidInstrument(format!(
                "{}: price increment must be positive, was {}",
                id, price_increment
            )));
        }
        if size_increment.is_zero() {
            return Err(ConfigError::InvalidInstrument(format!(
                "{}: size increment must be positive",
                id
            )));
        }
        Ok(Self {
            id,
            price_increment,
            size_increment,
        })
    }

    pub fn id(&self) -> &InstrumentId {
        &self.id
    }

    pub fn price_increment(&self) -> Price {
        self.price_increment
    }

    pub fn price_precision(&self) -> u8 {
        self.price_increment.precision()
    }

    pub fn size_increment(&self) -> Quantity {
        self.size_increment
    }

    pub fn size_precision(&self) -> u8 {
        self.size_increment.precision()
    }

    pub fn make_price(&self, value: f64) -> Price {
        Price::new(value, self.price_precision())
    }
}

/// Side of an incoming or resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn label(&self) -> &str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Side of a book level. Bids rest below the spread, asks above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSide {
    Bid,
    Ask,
}

impl BookSide {
    pub fn label(&self) -> &str {
        match self {
            BookSide::Bid => "BID",
            BookSide::Ask => "ASK",
        }
    }
}

impl fmt::Display for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Granularity of an order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookType {
    /// Top of book only.
    L1Mbp,
    /// Aggregated price levels.
    L2Mbp,
    /// Individual orders.
    L3Mbo,
}

impl fmt::Display for BookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookType::L1Mbp => "L1_MBP",
            BookType::L2Mbp => "L2_MBP",
            BookType::L3Mbo => "L3_MBO",
        };
        f.write_str(label)
    }
}

/// The part of an order the fill models look at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub side: OrderSide,
    pub quantity: Quantity,
}

impl Order {
    pub fn new(side: OrderSide, quantity: Quantity) -> Self {
        Self { side, quantity }
    }
}
