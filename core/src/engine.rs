//! The generation engine: runs the whole pipeline once.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Validate configuration   (before any random draw)
//!   2. Profile sampler          (account table + segment side channel)
//!   3. Transaction synthesizer  (keyed on each account's segment)
//!   4. Strip segments, summarize
//!   5. Exporter                 (only via generate_and_export)
//!
//! RULES:
//!   - One GenRng per run, seeded from config.seed.
//!   - Stages 2 and 3 share that stream, in that order.
//!   - Same seed and config => byte-identical output files.

use crate::{
    config::GeneratorConfig,
    error::GenResult,
    export::{ExportReport, Exporter},
    profile_sampler::ProfileSampler,
    record::{Account, Transaction, TransactionType},
    rng::GenRng,
    segment::Segment,
    transaction_synthesizer::{TransactionBatch, TransactionSynthesizer},
    types::AccountId,
};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSummary {
    pub segment: Segment,
    pub accounts: usize,
    pub transactions: usize,
    pub fd_holders: usize,
}

#[derive(Debug, Clone)]
pub struct GenerationSummary {
    pub seed: u64,
    pub accounts: usize,
    pub transactions: usize,
    pub large_payments: usize,
    pub segments: Vec<SegmentSummary>,
    pub by_type: BTreeMap<TransactionType, usize>,
}

/// Both tables, held in memory until export.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub summary: GenerationSummary,
}

pub struct DatasetGenerator {
    config: GeneratorConfig,
}

impl DatasetGenerator {
    /// Validates up front; an invalid config never reaches the RNG.
    pub fn new(config: GeneratorConfig) -> GenResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self) -> GenResult<Dataset> {
        let mut rng = GenRng::new(self.config.seed);
        log::info!(
            "engine: seed={} customers={} window={}..{}",
            self.config.seed,
            self.config.customer_count,
            self.config.window_start,
            self.config.window_end
        );

        let profiles = ProfileSampler::new(&self.config).sample_profiles(&mut rng)?;
        let batch = TransactionSynthesizer::new(&self.config).synthesize(&profiles, &mut rng)?;

        let summary = summarize(&self.config, &profiles, &batch);
        let accounts = profiles.into_iter().map(|(account, _)| account).collect();

        Ok(Dataset {
            accounts,
            transactions: batch.transactions,
            summary,
        })
    }
}

/// Validate, generate and write both files into `out_dir`.
pub fn generate_and_export(
    config: GeneratorConfig,
    out_dir: impl Into<PathBuf>,
) -> GenResult<(Dataset, ExportReport)> {
    let generator = DatasetGenerator::new(config)?;
    let mut dataset = generator.generate()?;
    let report = Exporter::new(out_dir, generator.config()).write_dataset(&mut dataset)?;
    log::info!(
        "engine: done, {} accounts, {} transactions, {} bytes",
        report.account_rows,
        report.transaction_rows,
        report.bytes_written
    );
    Ok((dataset, report))
}

fn summarize(
    config: &GeneratorConfig,
    profiles: &[(Account, Segment)],
    batch: &TransactionBatch,
) -> GenerationSummary {
    let mut segments: Vec<SegmentSummary> = config
        .segments
        .iter()
        .map(|p| SegmentSummary {
            segment: p.segment,
            accounts: 0,
            transactions: 0,
            fd_holders: 0,
        })
        .collect();
    let slot_of: HashMap<Segment, usize> = segments
        .iter()
        .enumerate()
        .map(|(i, s)| (s.segment, i))
        .collect();

    let mut segment_of: HashMap<AccountId, usize> = HashMap::with_capacity(profiles.len());
    for (account, segment) in profiles {
        if let Some(&slot) = slot_of.get(segment) {
            segment_of.insert(account.account_id, slot);
            segments[slot].accounts += 1;
            if account.has_fd {
                segments[slot].fd_holders += 1;
            }
        }
    }

    let mut by_type = BTreeMap::new();
    for txn in &batch.transactions {
        *by_type.entry(txn.transaction_type).or_insert(0) += 1;
        if let Some(&slot) = segment_of.get(&txn.account_id) {
            segments[slot].transactions += 1;
        }
    }

    GenerationSummary {
        seed: config.seed,
        accounts: profiles.len(),
        transactions: batch.transactions.len(),
        large_payments: batch.large_payments,
        segments,
        by_type,
    }
}
