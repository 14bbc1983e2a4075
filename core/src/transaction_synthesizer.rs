use crate::{
    config::GeneratorConfig,
    error::GenResult,
    record::{Account, Transaction, TransactionType},
    rng::GenRng,
    segment::{Segment, SegmentProfile},
    types::{AccountId, Amount, TransactionId},
};
use chrono::Duration;

/// Output of one synthesis pass, in generation order.
#[derive(Debug, Clone, Default)]
pub struct TransactionBatch {
    pub transactions: Vec<Transaction>,
    /// Payments whose amount came from the large-payment override.
    pub large_payments: usize,
}

pub struct TransactionSynthesizer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> TransactionSynthesizer<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Emit every account's transactions, accounts in table order.
    pub fn synthesize(
        &self,
        profiles: &[(Account, Segment)],
        rng: &mut GenRng,
    ) -> GenResult<TransactionBatch> {
        let mut batch = TransactionBatch::default();
        let mut next_id = self.config.first_transaction_id;

        for (account, segment) in profiles {
            // A segment missing from the table is fatal, never defaulted.
            let params = self.config.profile(*segment)?;
            let count = rng.in_bounds(params.txn_count);
            for _ in 0..count {
                let (txn, large) =
                    self.sample_transaction(TransactionId(next_id), account.account_id, params, rng);
                if large {
                    batch.large_payments += 1;
                }
                batch.transactions.push(txn);
                next_id += 1;
            }
        }

        log::info!(
            "txn: synthesized {} transactions for {} accounts ({} large payments)",
            batch.transactions.len(),
            profiles.len(),
            batch.large_payments
        );
        Ok(batch)
    }

    /// One transaction. Draw order is fixed: type, amount, large-payment
    /// roll (Payment only), date, payment mode.
    fn sample_transaction(
        &self,
        transaction_id: TransactionId,
        account_id: AccountId,
        params: &SegmentProfile,
        rng: &mut GenRng,
    ) -> (Transaction, bool) {
        let transaction_type = params.pick_type(rng);
        let (transaction_amount, large) = self.sample_amount(transaction_type, params, rng);
        let offset = rng.below(self.config.window_days() as u64);
        let transaction_date = self.config.window_start + Duration::days(offset as i64);
        let payment_mode = params.mode_weights.pick(rng);

        let txn = Transaction {
            transaction_id,
            account_id,
            transaction_date,
            transaction_type,
            transaction_amount,
            payment_mode,
        };
        (txn, large)
    }

    fn sample_amount(
        &self,
        txn_type: TransactionType,
        params: &SegmentProfile,
        rng: &mut GenRng,
    ) -> (Amount, bool) {
        let amount = rng.in_bounds(params.amount_bounds(txn_type));
        let rule = &self.config.large_payment;
        if txn_type == TransactionType::Payment && rng.chance(rule.probability) {
            return (rng.in_bounds(rule.amount), true);
        }
        (amount, false)
    }
}
