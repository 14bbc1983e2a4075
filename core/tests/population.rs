//! Account table generation tests.

use std::collections::HashSet;
use synthbank_core::{
    config::GeneratorConfig,
    profile_sampler::ProfileSampler,
    record::{Account, Gender, LoanStatus, Region},
    rng::GenRng,
    segment::Segment,
};

fn sample(config: &GeneratorConfig) -> Vec<(Account, Segment)> {
    let mut rng = GenRng::new(config.seed);
    ProfileSampler::new(config).sample_profiles(&mut rng).unwrap()
}

#[test]
fn population_has_requested_count() {
    let config = GeneratorConfig::default();
    let profiles = sample(&config);
    assert_eq!(profiles.len(), 500, "Expected 500 accounts, got {}", profiles.len());
}

#[test]
fn minimum_population_splits_zero_one_one_two() {
    let config = GeneratorConfig::default().with_customer_count(4);
    let sizes: Vec<_> = config.segment_counts().into_iter().map(|(_, n)| n).collect();
    assert_eq!(sizes, vec![0, 1, 1, 2]);

    let profiles = sample(&config);
    let segments: Vec<_> = profiles.iter().map(|(_, s)| *s).collect();
    assert_eq!(
        segments,
        vec![
            Segment::GoodCustomer,
            Segment::PrimeProspect,
            Segment::NewProspect,
            Segment::NewProspect
        ]
    );
}

#[test]
fn last_segment_absorbs_rounding_remainder() {
    for n in [4usize, 7, 13, 99, 101, 333, 500, 1_001] {
        let config = GeneratorConfig::default().with_customer_count(n);
        let counts = config.segment_counts();
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, n, "segment counts must sum to {n}");

        let expected_head = [
            (n as f64 * 0.10).floor() as usize,
            (n as f64 * 0.30).floor() as usize,
            (n as f64 * 0.35).floor() as usize,
        ];
        for (i, want) in expected_head.iter().enumerate() {
            assert_eq!(counts[i].1, *want, "segment {i} for n={n}");
        }
        assert_eq!(counts[3].1, n - expected_head.iter().sum::<usize>());
    }
}

#[test]
fn account_ids_are_unique() {
    let profiles = sample(&GeneratorConfig::default());
    let ids: HashSet<_> = profiles.iter().map(|(a, _)| a.account_id).collect();
    assert_eq!(ids.len(), profiles.len());
}

#[test]
fn fd_amount_positive_iff_has_fd() {
    let profiles = sample(&GeneratorConfig::default().with_seed(7));
    for (a, _) in &profiles {
        assert_eq!(
            a.has_fd,
            a.total_fd_amount > 0,
            "{}: has_fd={} amount={}",
            a.account_id,
            a.has_fd,
            a.total_fd_amount
        );
    }
}

#[test]
fn attributes_stay_within_segment_bounds() {
    let config = GeneratorConfig::default().with_seed(123);
    for (a, segment) in sample(&config) {
        let p = config.profile(segment).unwrap();
        assert!(p.cibil_score.contains(a.cibil_score), "{}: cibil {}", a.account_id, a.cibil_score);
        assert!(p.balance.contains(a.current_balance), "{}: balance {}", a.account_id, a.current_balance);
        assert!(p.age.contains(a.age), "{}: age {}", a.account_id, a.age);
        assert_eq!(a.loan_status, p.loan_status);
        if a.has_fd {
            assert!(p.fd_amount.admits(a.total_fd_amount), "{}: fd {}", a.account_id, a.total_fd_amount);
        }

        let days_open = (config.window_end - a.account_open_date).num_days() as u64;
        assert!(
            p.account_age_days.contains(days_open),
            "{}: open {} days",
            a.account_id,
            days_open
        );
    }
}

#[test]
fn loan_status_is_fixed_per_segment() {
    let profiles = sample(&GeneratorConfig::default());
    for (a, segment) in &profiles {
        let expected = match segment {
            Segment::HighRisk => LoanStatus::Defaulted,
            Segment::GoodCustomer => LoanStatus::PaidOff,
            Segment::PrimeProspect | Segment::NewProspect => LoanStatus::NoLoan,
        };
        assert_eq!(a.loan_status, expected);
    }
}

#[test]
fn gender_split_leans_male() {
    let config = GeneratorConfig::default().with_customer_count(5_000);
    let profiles = sample(&config);
    let male = profiles.iter().filter(|(a, _)| a.gender == Gender::Male).count();
    let share = male as f64 / profiles.len() as f64;
    assert!((0.52..=0.58).contains(&share), "male share {share:.3}");
}

#[test]
fn prime_prospects_include_jumbo_deposits() {
    let config = GeneratorConfig::default().with_customer_count(2_000);
    let jumbo = sample(&config)
        .iter()
        .filter(|(a, s)| *s == Segment::PrimeProspect && a.total_fd_amount > 500_000)
        .count();
    assert!(jumbo > 0, "Expected some jumbo fixed deposits among prime prospects");
}

#[test]
fn credit_card_share_tracks_segment_probability() {
    let config = GeneratorConfig::default().with_customer_count(5_000);
    let profiles = sample(&config);
    for params in &config.segments {
        let members: Vec<_> = profiles
            .iter()
            .filter(|(_, s)| *s == params.segment)
            .collect();
        let holders = members.iter().filter(|(a, _)| a.has_credit_card).count();
        let share = holders as f64 / members.len() as f64;
        assert!(
            (share - params.credit_card_probability).abs() < 0.07,
            "{}: credit card share {share:.3}, expected about {}",
            params.segment,
            params.credit_card_probability
        );
    }
}

#[test]
fn regions_are_drawn_uniformly() {
    let config = GeneratorConfig::default().with_customer_count(5_000);
    let profiles = sample(&config);
    for region in Region::ALL {
        let count = profiles.iter().filter(|(a, _)| a.region == region).count();
        let share = count as f64 / profiles.len() as f64;
        assert!((0.22..=0.28).contains(&share), "{region:?} share {share:.3}");
    }
}
