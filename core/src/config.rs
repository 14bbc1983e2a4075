use crate::{
    error::{GenError, GenResult},
    segment::{default_segments, Bounds, FdAmountModel, Segment, SegmentProfile},
};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

/// Smallest customer count accepted. With 4 customers the segments
/// come out 0/1/1/2: the first segment may be empty.
pub const MIN_CUSTOMERS: usize = 4;

#[derive(Debug, Clone, Serialize)]
pub struct LargePaymentRule {
    /// Chance that a Payment is replaced by a large one.
    pub probability: f64,
    pub amount: Bounds,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub customer_count: usize,
    /// First day of the transaction window.
    pub window_start: NaiveDate,
    /// Last day of the window; also the reference "today" that
    /// account open dates are counted back from.
    pub window_end: NaiveDate,
    pub first_account_id: u64,
    pub first_transaction_id: u64,
    /// [Male, Female].
    pub gender_weights: [f64; 2],
    pub large_payment: LargePaymentRule,
    /// Population order. Account ids are assigned in this order.
    pub segments: Vec<SegmentProfile>,
    pub accounts_file: String,
    pub transactions_file: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            customer_count: 500,
            window_start: NaiveDate::from_ymd_opt(2025, 5, 16).expect("valid calendar date"),
            window_end: NaiveDate::from_ymd_opt(2025, 11, 16).expect("valid calendar date"),
            first_account_id: 1001,
            first_transaction_id: 100_001,
            gender_weights: [0.55, 0.45],
            large_payment: LargePaymentRule {
                probability: 0.03,
                amount: Bounds::new(10_000, 49_999),
            },
            segments: default_segments(),
            accounts_file: "account_holders.csv".into(),
            transactions_file: "transactions.csv".into(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_customer_count(mut self, n: usize) -> Self {
        self.customer_count = n;
        self
    }

    /// Number of days transaction dates are spread over.
    pub fn window_days(&self) -> i64 {
        (self.window_end - self.window_start).num_days()
    }

    /// Date an account opened `days_open` days before `window_end`.
    /// None when that falls before the earliest date chrono represents.
    pub fn open_date(&self, days_open: u64) -> Option<NaiveDate> {
        self.window_end.checked_sub_days(Days::new(days_open))
    }

    /// Parameter record for a segment.
    pub fn profile(&self, segment: Segment) -> GenResult<&SegmentProfile> {
        self.segments
            .iter()
            .find(|p| p.segment == segment)
            .ok_or_else(|| GenError::UnknownSegment {
                label: segment.label().to_string(),
            })
    }

    /// Split `customer_count` across the segment table.
    /// Every segment but the last gets floor(n * share); the last
    /// takes the remainder and is never rounded on its own.
    pub fn segment_counts(&self) -> Vec<(Segment, usize)> {
        let n = self.customer_count;
        let mut counts = Vec::with_capacity(self.segments.len());
        let mut assigned = 0usize;
        if let Some((last, head)) = self.segments.split_last() {
            for profile in head {
                let count = (n as f64 * profile.population_share).floor() as usize;
                assigned += count;
                counts.push((profile.segment, count));
            }
            counts.push((last.segment, n.saturating_sub(assigned)));
        }
        counts
    }

    /// Reject anything that would make generation ill-defined.
    /// Runs before any random draw.
    pub fn validate(&self) -> GenResult<()> {
        if self.customer_count < MIN_CUSTOMERS {
            return Err(GenError::invalid(
                "customer_count",
                format!("must be at least {MIN_CUSTOMERS}, got {}", self.customer_count),
            ));
        }
        if self.window_days() <= 0 {
            return Err(GenError::invalid(
                "window",
                format!(
                    "window_end {} must fall after window_start {}",
                    self.window_end, self.window_start
                ),
            ));
        }
        if self.accounts_file.is_empty() || self.transactions_file.is_empty() {
            return Err(GenError::invalid("output file", "file names must not be empty"));
        }
        if self.accounts_file == self.transactions_file {
            return Err(GenError::invalid("output file", "both tables would share one file"));
        }
        check_weights("gender_weights", &self.gender_weights)?;
        check_probability("large_payment.probability", self.large_payment.probability)?;
        check_amount("large_payment.amount", self.large_payment.amount)?;

        let mut seen = HashSet::new();
        for profile in &self.segments {
            if !seen.insert(profile.segment) {
                return Err(GenError::invalid(
                    "segments",
                    format!("{} appears more than once", profile.segment),
                ));
            }
            validate_profile(profile)?;
            if self.open_date(profile.account_age_days.max).is_none() {
                return Err(GenError::invalid(
                    format!("segments[{}].account_age_days", profile.segment),
                    format!(
                        "{} days before {} is out of calendar range",
                        profile.account_age_days.max, self.window_end
                    ),
                ));
            }
        }
        if let Some(missing) = Segment::ALL.iter().find(|s| !seen.contains(*s)) {
            return Err(GenError::invalid(
                "segments",
                format!("{missing} has no parameter record"),
            ));
        }

        let share_total: f64 = self.segments.iter().map(|p| p.population_share).sum();
        if (share_total - 1.0).abs() > 1e-9 {
            return Err(GenError::invalid(
                "segments.population_share",
                format!("shares must sum to 1.0, got {share_total}"),
            ));
        }
        Ok(())
    }
}

fn validate_profile(p: &SegmentProfile) -> GenResult<()> {
    let field = |name: &str| format!("segments[{}].{name}", p.segment);

    check_probability(&field("population_share"), p.population_share)?;
    check_probability(&field("fd_probability"), p.fd_probability)?;
    check_probability(&field("credit_card_probability"), p.credit_card_probability)?;

    check_bounds(&field("cibil_score"), p.cibil_score)?;
    check_bounds(&field("balance"), p.balance)?;
    check_bounds(&field("account_age_days"), p.account_age_days)?;
    check_bounds(&field("age"), p.age)?;
    check_bounds(&field("txn_count"), p.txn_count)?;
    check_amount(&field("inflow"), p.inflow)?;
    check_amount(&field("outflow"), p.outflow)?;
    for range in p.fd_amount.ranges() {
        check_amount(&field("fd_amount"), range)?;
    }
    if let FdAmountModel::Mixture { jumbo_probability, .. } = p.fd_amount {
        check_probability(&field("fd_amount.jumbo_probability"), jumbo_probability)?;
    }

    check_weights(&field("type_weights"), &p.type_weights.as_array())?;
    check_weights(&field("mode_weights"), &p.mode_weights.as_array())?;
    Ok(())
}

fn check_probability(field: &str, p: f64) -> GenResult<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(GenError::invalid(field, format!("probability {p} outside [0, 1]")));
    }
    Ok(())
}

fn check_bounds(field: &str, b: Bounds) -> GenResult<()> {
    if b.min > b.max {
        return Err(GenError::invalid(field, format!("inverted range {}..={}", b.min, b.max)));
    }
    Ok(())
}

/// Amounts must be strictly positive.
fn check_amount(field: &str, b: Bounds) -> GenResult<()> {
    check_bounds(field, b)?;
    if b.min == 0 {
        return Err(GenError::invalid(field, "amount range must start above zero"));
    }
    Ok(())
}

fn check_weights(field: &str, weights: &[f64]) -> GenResult<()> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(GenError::invalid(field, "weights must be finite and non-negative"));
    }
    let total: f64 = weights.iter().sum();
    if (total - 1.0).abs() > 1e-9 {
        return Err(GenError::invalid(field, format!("weights must sum to 1.0, got {total}")));
    }
    Ok(())
}
