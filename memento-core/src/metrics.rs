use chrono::NaiveDate;
use thiserror::Error;

/// Weeks per grid row. The grid deliberately uses 52 weeks/year rather than
/// the astronomical 365.25/7 ≈ 52.18; the resulting undercount is part of
/// the visualization contract and must not be "corrected".
pub const WEEKS_PER_YEAR: u32 = 52;

/// Default assumed lifespan in years.
pub const DEFAULT_LIFE_EXPECTANCY: u32 = 80;
/// Lower bound accepted for a configured life expectancy.
pub const MIN_LIFE_EXPECTANCY: u32 = 50;
/// Upper bound accepted for a configured life expectancy.
pub const MAX_LIFE_EXPECTANCY: u32 = 120;

/// The only error the calculator can raise: a birth date after the
/// reference date. Deterministic and caller-correctable, never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("birth date {birth} is after reference date {reference}")]
    BirthDateInFuture {
        birth: NaiveDate,
        reference: NaiveDate,
    },
}

/// Snapshot of where a life stands on the week grid.
///
/// Recomputed fresh on every pipeline pass; plain value, no identity
/// beyond its fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarMetrics {
    pub weeks_lived: u32,
    pub total_weeks: u32,
    pub weeks_remaining: u32,
    /// 1-indexed row position: first year of life is 1.
    pub current_year_of_life: u32,
    /// 1-indexed column position in [1, 52].
    pub current_week_of_year: u32,
    pub life_expectancy_years: u32,
    pub percentage_lived: f64,
}

/// Count complete 7-day periods between `birth` and `reference`.
///
/// Whole-week counting: a week is complete only once 7 full days have
/// elapsed, i.e. floor of the day difference over 7.
pub fn weeks_lived(birth: NaiveDate, reference: NaiveDate) -> Result<u32, MetricsError> {
    if birth > reference {
        return Err(MetricsError::BirthDateInFuture { birth, reference });
    }
    let days = (reference - birth).num_days();
    Ok((days / 7) as u32)
}

/// Total grid cells for an assumed lifespan. Always `years * 52`.
pub fn total_weeks(life_expectancy_years: u32) -> u32 {
    life_expectancy_years * WEEKS_PER_YEAR
}

/// Whole calendar years elapsed plus one, minimum 1.
///
/// Anniversary-aware: the count only increments once the birthday has
/// passed in the reference year, so Feb 29 births behave like chrono's
/// `years_since` defines.
pub fn current_year_of_life(
    birth: NaiveDate,
    reference: NaiveDate,
) -> Result<u32, MetricsError> {
    let years = reference
        .years_since(birth)
        .ok_or(MetricsError::BirthDateInFuture { birth, reference })?;
    Ok(years + 1)
}

/// Column position on the current row: `(weeks_lived mod 52) + 1`.
pub fn current_week_of_year(
    birth: NaiveDate,
    reference: NaiveDate,
) -> Result<u32, MetricsError> {
    let lived = weeks_lived(birth, reference)?;
    Ok(((lived % WEEKS_PER_YEAR) + 1).clamp(1, WEEKS_PER_YEAR))
}

/// Compose the individual calculations into a full metrics snapshot.
pub fn calculate(
    birth: NaiveDate,
    life_expectancy_years: u32,
    reference: NaiveDate,
) -> Result<CalendarMetrics, MetricsError> {
    let weeks_lived = weeks_lived(birth, reference)?;
    let total_weeks = total_weeks(life_expectancy_years);
    let weeks_remaining = total_weeks.saturating_sub(weeks_lived);
    let percentage_lived =
        (weeks_lived as f64 / total_weeks as f64 * 100.0).clamp(0.0, 100.0);

    Ok(CalendarMetrics {
        weeks_lived,
        total_weeks,
        weeks_remaining,
        current_year_of_life: current_year_of_life(birth, reference)?,
        current_week_of_year: current_week_of_year(birth, reference)?,
        life_expectancy_years,
        percentage_lived,
    })
}
