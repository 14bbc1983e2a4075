//! Transaction ledger tests.

use std::collections::{HashMap, HashSet};
use synthbank_core::{
    config::GeneratorConfig,
    engine::DatasetGenerator,
    profile_sampler::ProfileSampler,
    record::{Account, PaymentMode, TransactionType},
    rng::GenRng,
    segment::Segment,
    transaction_synthesizer::{TransactionBatch, TransactionSynthesizer},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn generate(config: &GeneratorConfig) -> (Vec<(Account, Segment)>, TransactionBatch) {
    let mut rng = GenRng::new(config.seed);
    let profiles = ProfileSampler::new(config).sample_profiles(&mut rng).unwrap();
    let batch = TransactionSynthesizer::new(config)
        .synthesize(&profiles, &mut rng)
        .unwrap();
    (profiles, batch)
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn every_transaction_references_an_account() {
    let dataset = DatasetGenerator::new(GeneratorConfig::default())
        .unwrap()
        .generate()
        .unwrap();
    let ids: HashSet<_> = dataset.accounts.iter().map(|a| a.account_id).collect();
    for txn in &dataset.transactions {
        assert!(ids.contains(&txn.account_id), "{} has dangling {}", txn.transaction_id, txn.account_id);
    }
}

#[test]
fn per_account_counts_within_segment_range() {
    let config = GeneratorConfig::default().with_seed(31);
    let (profiles, batch) = generate(&config);

    let mut per_account: HashMap<_, u64> = HashMap::new();
    for txn in &batch.transactions {
        *per_account.entry(txn.account_id).or_default() += 1;
    }
    for (account, segment) in &profiles {
        let range = config.profile(*segment).unwrap().txn_count;
        let n = per_account.get(&account.account_id).copied().unwrap_or(0);
        assert!(range.contains(n), "{} ({segment}) has {n} transactions", account.account_id);
    }
}

#[test]
fn dates_fall_inside_window() {
    let config = GeneratorConfig::default();
    let (_, batch) = generate(&config);
    for txn in &batch.transactions {
        assert!(
            txn.transaction_date >= config.window_start && txn.transaction_date <= config.window_end,
            "{} dated {}",
            txn.transaction_id,
            txn.transaction_date
        );
    }
}

#[test]
fn amounts_follow_direction_and_segment() {
    let config = GeneratorConfig::default().with_seed(5);
    let (profiles, batch) = generate(&config);
    let segment_of: HashMap<_, _> = profiles.iter().map(|(a, s)| (a.account_id, *s)).collect();
    let large = config.large_payment.amount;

    for txn in &batch.transactions {
        assert!(txn.transaction_amount > 0);
        let params = config.profile(segment_of[&txn.account_id]).unwrap();
        let normal = params.amount_bounds(txn.transaction_type);
        if normal.contains(txn.transaction_amount) {
            continue;
        }
        // Outside the normal range is only allowed for overridden payments.
        assert_eq!(
            txn.transaction_type,
            TransactionType::Payment,
            "{}: {:?} amount {} outside {:?}",
            txn.transaction_id,
            txn.transaction_type,
            txn.transaction_amount,
            normal
        );
        assert!(large.contains(txn.transaction_amount), "{}: {}", txn.transaction_id, txn.transaction_amount);
    }
}

#[test]
fn large_payments_are_rare() {
    let config = GeneratorConfig::default().with_customer_count(1_000);
    let (_, batch) = generate(&config);
    let payments = batch
        .transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Payment)
        .count();

    assert!(batch.large_payments > 0, "Expected some large payments");
    let rate = batch.large_payments as f64 / payments as f64;
    assert!((0.015..=0.045).contains(&rate), "large payment rate {rate:.4}");
}

#[test]
fn new_prospects_never_use_net_banking() {
    let config = GeneratorConfig::default();
    let (profiles, batch) = generate(&config);
    let new_prospects: HashSet<_> = profiles
        .iter()
        .filter(|(_, s)| *s == Segment::NewProspect)
        .map(|(a, _)| a.account_id)
        .collect();

    assert!(batch
        .transactions
        .iter()
        .filter(|t| new_prospects.contains(&t.account_id))
        .all(|t| t.payment_mode != PaymentMode::NetBanking));
}

#[test]
fn deposit_and_received_split_inflow_evenly() {
    let config = GeneratorConfig::default().with_customer_count(2_000);
    let (_, batch) = generate(&config);
    let count = |ty: TransactionType| batch.transactions.iter().filter(|t| t.transaction_type == ty).count() as f64;

    let deposits = count(TransactionType::Deposit);
    let received = count(TransactionType::Received);
    let ratio = deposits / received;
    assert!((0.93..=1.07).contains(&ratio), "deposit/received ratio {ratio:.3}");
}

#[test]
fn default_run_volume_is_tens_of_thousands() {
    let dataset = DatasetGenerator::new(GeneratorConfig::default())
        .unwrap()
        .generate()
        .unwrap();
    // Expected ≈ 50*34.5 + 150*44.5 + 175*27 + 125*74.5 ≈ 22k.
    assert!(
        (18_000..=26_000).contains(&dataset.transactions.len()),
        "got {} transactions",
        dataset.transactions.len()
    );
    let summed: usize = dataset.summary.segments.iter().map(|s| s.transactions).sum();
    assert_eq!(summed, dataset.summary.transactions);
}
