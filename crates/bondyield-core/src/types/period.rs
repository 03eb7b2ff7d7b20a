//! Calendar-like periods used for coupon intervals and tenors.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Weeks in a year for the purpose of [`Period::fraction_of_year`].
pub const WEEKS_PER_YEAR: u32 = 52;

/// Months in a year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Unit in which a [`Period`] is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    /// Whole weeks.
    Weeks,
    /// Whole months.
    Months,
    /// Whole years.
    Years,
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PeriodUnit::Weeks => "weeks",
            PeriodUnit::Months => "months",
            PeriodUnit::Years => "years",
        };
        write!(f, "{name}")
    }
}

/// A time interval measured in exactly one unit.
///
/// Periods describe both the spacing of coupon payments and the tenor of a
/// bond. Weeks do not convert to months or years; months and years convert
/// via a factor of twelve.
///
/// The checked constructors reject a zero count. The variants stay public so
/// periods can be pattern matched; arithmetic validates its operands.
///
/// Serialized as a single-key map, e.g. `{"months": 6}`.
///
/// # Example
///
/// ```rust
/// use bondyield_core::types::Period;
///
/// let tenor = Period::years(10).unwrap();
/// let coupon = Period::months(6).unwrap();
///
/// assert_eq!(tenor.divide(&coupon).unwrap(), 20);
/// assert_eq!(coupon.to_string(), "6 months");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodSpec", into = "PeriodSpec")]
pub enum Period {
    /// A number of weeks.
    Weeks(u32),
    /// A number of months.
    Months(u32),
    /// A number of years.
    Years(u32),
}

/// Span of a period expressed in its convertible base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Weeks(u64),
    Months(u64),
}

impl Period {
    /// Creates a period of `count` weeks.
    pub fn weeks(count: u32) -> CoreResult<Self> {
        Self::new(PeriodUnit::Weeks, count)
    }

    /// Creates a period of `count` months.
    pub fn months(count: u32) -> CoreResult<Self> {
        Self::new(PeriodUnit::Months, count)
    }

    /// Creates a period of `count` years.
    pub fn years(count: u32) -> CoreResult<Self> {
        Self::new(PeriodUnit::Years, count)
    }

    /// Creates a period from a unit and a positive count.
    pub fn new(unit: PeriodUnit, count: u32) -> CoreResult<Self> {
        if count == 0 {
            return Err(CoreError::invalid_period_reason(format!(
                "{unit} must be positive"
            )));
        }

        Ok(match unit {
            PeriodUnit::Weeks => Period::Weeks(count),
            PeriodUnit::Months => Period::Months(count),
            PeriodUnit::Years => Period::Years(count),
        })
    }

    /// Creates a period from three optional fields, exactly one of which must
    /// be supplied.
    ///
    /// This is the shape external descriptors arrive in.
    pub fn from_parts(
        weeks: Option<u32>,
        months: Option<u32>,
        years: Option<u32>,
    ) -> CoreResult<Self> {
        match (weeks, months, years) {
            (Some(n), None, None) => Self::weeks(n),
            (None, Some(n), None) => Self::months(n),
            (None, None, Some(n)) => Self::years(n),
            _ => Err(CoreError::invalid_period()),
        }
    }

    /// Returns the unit of this period.
    #[must_use]
    pub fn unit(&self) -> PeriodUnit {
        match self {
            Period::Weeks(_) => PeriodUnit::Weeks,
            Period::Months(_) => PeriodUnit::Months,
            Period::Years(_) => PeriodUnit::Years,
        }
    }

    /// Returns the count of units in this period.
    #[must_use]
    pub fn count(&self) -> u32 {
        match self {
            Period::Weeks(n) | Period::Months(n) | Period::Years(n) => *n,
        }
    }

    /// Returns true if this period is measured in weeks.
    #[must_use]
    pub fn is_weeks(&self) -> bool {
        matches!(self, Period::Weeks(_))
    }

    /// Checks that the count is positive.
    pub fn validate(&self) -> CoreResult<()> {
        if self.count() == 0 {
            return Err(CoreError::invalid_period_reason(format!(
                "{} must be positive",
                self.unit()
            )));
        }
        Ok(())
    }

    /// Returns the fraction of a year this period represents.
    ///
    /// Weeks count as 1/52 of a year, months as 1/12 and years are converted
    /// to months first.
    ///
    /// ```rust
    /// use bondyield_core::types::Period;
    ///
    /// assert_eq!(Period::Weeks(26).fraction_of_year(), 0.5);
    /// assert_eq!(Period::Months(3).fraction_of_year(), 0.25);
    /// assert_eq!(Period::Years(2).fraction_of_year(), 2.0);
    /// ```
    #[must_use]
    pub fn fraction_of_year(&self) -> f64 {
        match self.span() {
            Span::Weeks(w) => w as f64 / f64::from(WEEKS_PER_YEAR),
            Span::Months(m) => m as f64 / f64::from(MONTHS_PER_YEAR),
        }
    }

    /// Counts how many `other` periods fit exactly into this one.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Conversion`] if exactly one operand is in weeks
    /// - [`CoreError::NonIntegerRatio`] if the quotient is not whole
    /// - [`CoreError::InvalidPeriod`] if either count is zero
    ///
    /// ```rust
    /// use bondyield_core::types::Period;
    ///
    /// let tenor = Period::Years(10);
    /// assert_eq!(tenor.divide(&Period::Years(5)).unwrap(), 2);
    /// assert!(tenor.divide(&Period::Years(4)).is_err());
    /// assert!(tenor.divide(&Period::Weeks(5)).is_err());
    /// ```
    pub fn divide(&self, other: &Period) -> CoreResult<u32> {
        self.validate()?;
        other.validate()?;

        let (numerator, denominator) = self.common_spans(other)?;
        if numerator % denominator != 0 {
            return Err(CoreError::NonIntegerRatio {
                numerator: self.to_string(),
                denominator: other.to_string(),
            });
        }

        u32::try_from(numerator / denominator).map_err(|_| {
            CoreError::invalid_period_reason(format!(
                "{self} divided by {other} overflows the coupon count"
            ))
        })
    }

    /// Compares the length of two periods.
    ///
    /// Fails with [`CoreError::Conversion`] under the same rule as
    /// [`Period::divide`].
    pub fn compare_span(&self, other: &Period) -> CoreResult<Ordering> {
        let (lhs, rhs) = self.common_spans(other)?;
        Ok(lhs.cmp(&rhs))
    }

    fn common_spans(&self, other: &Period) -> CoreResult<(u64, u64)> {
        match (self.span(), other.span()) {
            (Span::Weeks(a), Span::Weeks(b)) | (Span::Months(a), Span::Months(b)) => Ok((a, b)),
            _ => Err(CoreError::Conversion {
                numerator: self.to_string(),
                denominator: other.to_string(),
            }),
        }
    }

    fn span(&self) -> Span {
        match *self {
            Period::Weeks(n) => Span::Weeks(u64::from(n)),
            Period::Months(n) => Span::Months(u64::from(n)),
            Period::Years(n) => Span::Months(u64::from(n) * u64::from(MONTHS_PER_YEAR)),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count(), self.unit())
    }
}

/// Wire shape of a period: three optional fields, exactly one present.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PeriodSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weeks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    years: Option<u32>,
}

impl TryFrom<PeriodSpec> for Period {
    type Error = CoreError;

    fn try_from(spec: PeriodSpec) -> Result<Self, Self::Error> {
        Period::from_parts(spec.weeks, spec.months, spec.years)
    }
}

impl From<Period> for PeriodSpec {
    fn from(period: Period) -> Self {
        let mut spec = PeriodSpec::default();
        match period {
            Period::Weeks(n) => spec.weeks = Some(n),
            Period::Months(n) => spec.months = Some(n),
            Period::Years(n) => spec.years = Some(n),
        }
        spec
    }
}
