//! Account table generation.
//!
//! Customers are generated segment by segment, in table order, so
//! account ids run contiguously through each segment. The segment is
//! handed back beside each account rather than stored on it.

use crate::{
    config::GeneratorConfig,
    error::{GenError, GenResult},
    record::{Account, Gender, Region},
    rng::GenRng,
    segment::{Segment, SegmentProfile},
    types::AccountId,
};

pub struct ProfileSampler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ProfileSampler<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate the whole account table.
    /// Returns Vec<(account, segment)>.
    pub fn sample_profiles(&self, rng: &mut GenRng) -> GenResult<Vec<(Account, Segment)>> {
        let counts = self.config.segment_counts();
        let mut profiles = Vec::with_capacity(self.config.customer_count);
        let mut next_id = self.config.first_account_id;

        for (segment, count) in counts {
            let params = self.config.profile(segment)?;
            for _ in 0..count {
                let account = self.sample_account(AccountId(next_id), params, rng)?;
                profiles.push((account, segment));
                next_id += 1;
            }
            log::debug!("profile: {segment}: {count} accounts");
        }

        log::info!("profile: sampled {} accounts", profiles.len());
        Ok(profiles)
    }

    /// One account. Draw order is fixed: has_fd, cibil, balance,
    /// fd amount, credit card, age, open date, region, gender.
    fn sample_account(
        &self,
        account_id: AccountId,
        params: &SegmentProfile,
        rng: &mut GenRng,
    ) -> GenResult<Account> {
        let has_fd = rng.chance(params.fd_probability);
        let cibil_score = rng.in_bounds(params.cibil_score);
        let current_balance = rng.in_bounds(params.balance);
        let total_fd_amount = if has_fd {
            params.fd_amount.sample(rng)
        } else {
            0
        };
        let has_credit_card = rng.chance(params.credit_card_probability);
        let age = rng.in_bounds(params.age);
        let days_open = rng.in_bounds(params.account_age_days);
        let account_open_date = self.config.open_date(days_open).ok_or_else(|| {
            GenError::invalid(
                format!("segments[{}].account_age_days", params.segment),
                format!("{days_open} days before {} is out of range", self.config.window_end),
            )
        })?;
        let region = Region::ALL[rng.below(Region::ALL.len() as u64) as usize];
        let gender = Gender::ALL[rng.pick_weighted(&self.config.gender_weights)];

        Ok(Account {
            account_id,
            region,
            age,
            gender,
            current_balance,
            has_fd,
            total_fd_amount,
            has_credit_card,
            cibil_score,
            account_open_date,
            loan_status: params.loan_status,
        })
    }
}
