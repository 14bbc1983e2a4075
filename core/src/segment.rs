//! Segment model: the one table both generation stages read.
//!
//! Each `Segment` maps to exactly one `SegmentProfile` holding its
//! account-attribute distributions and its transaction behavior.
//! Stages look parameters up through `GeneratorConfig::profile`;
//! they never branch on the segment themselves.

use crate::{
    record::{LoanStatus, PaymentMode, TransactionType},
    rng::GenRng,
    types::Amount,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Segment {
    #[serde(rename = "High-Risk")]
    HighRisk,
    #[serde(rename = "Good-Customer")]
    GoodCustomer,
    #[serde(rename = "Prime-Prospect")]
    PrimeProspect,
    #[serde(rename = "New-Prospect")]
    NewProspect,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::HighRisk,
        Segment::GoodCustomer,
        Segment::PrimeProspect,
        Segment::NewProspect,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::HighRisk      => "High-Risk",
            Self::GoodCustomer  => "Good-Customer",
            Self::PrimeProspect => "Prime-Prospect",
            Self::NewProspect   => "New-Prospect",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub min: u64,
    pub max: u64,
}

impl Bounds {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// How a fixed-deposit amount is drawn once `has_fd` came up true.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FdAmountModel {
    Uniform {
        range: Bounds,
    },
    /// Two-component mixture: the component is rolled first, then the
    /// amount inside it.
    Mixture {
        standard: Bounds,
        jumbo: Bounds,
        jumbo_probability: f64,
    },
}

impl FdAmountModel {
    pub fn sample(&self, rng: &mut GenRng) -> Amount {
        match self {
            Self::Uniform { range } => rng.in_bounds(*range),
            Self::Mixture { standard, jumbo, jumbo_probability } => {
                let component = if rng.chance(*jumbo_probability) { jumbo } else { standard };
                rng.in_bounds(*component)
            }
        }
    }

    /// True when `amount` could have come out of `sample`.
    pub fn admits(&self, amount: Amount) -> bool {
        match self {
            Self::Uniform { range } => range.contains(amount),
            Self::Mixture { standard, jumbo, .. } => {
                standard.contains(amount) || jumbo.contains(amount)
            }
        }
    }

    pub(crate) fn ranges(&self) -> Vec<Bounds> {
        match self {
            Self::Uniform { range } => vec![*range],
            Self::Mixture { standard, jumbo, .. } => vec![*standard, *jumbo],
        }
    }
}

/// Transaction-type weights. `inflow` covers Deposit and Received
/// together and is split evenly between them when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeWeights {
    pub inflow: f64,
    pub withdrawal: f64,
    pub payment: f64,
    pub transfer: f64,
}

impl TypeWeights {
    /// The five concrete outcomes in draw order.
    pub fn outcomes(&self) -> [(TransactionType, f64); 5] {
        [
            (TransactionType::Deposit, self.inflow / 2.0),
            (TransactionType::Withdrawal, self.withdrawal),
            (TransactionType::Payment, self.payment),
            (TransactionType::Received, self.inflow / 2.0),
            (TransactionType::Transfer, self.transfer),
        ]
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.inflow, self.withdrawal, self.payment, self.transfer]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeWeights {
    pub upi: f64,
    pub credit_card: f64,
    pub debit_card: f64,
    pub net_banking: f64,
}

impl ModeWeights {
    /// Aligned with `PaymentMode::ALL`.
    pub fn as_array(&self) -> [f64; 4] {
        [self.upi, self.credit_card, self.debit_card, self.net_banking]
    }

    pub fn pick(&self, rng: &mut GenRng) -> PaymentMode {
        PaymentMode::ALL[rng.pick_weighted(&self.as_array())]
    }
}

/// Every per-segment parameter, for both stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentProfile {
    pub segment: Segment,
    /// Share of the customer count. The last segment in the table
    /// takes whatever the others leave, so its share only matters
    /// for validation.
    pub population_share: f64,

    // ── Account attributes ─────────────────────────
    pub loan_status: LoanStatus,
    pub cibil_score: Bounds,
    pub balance: Bounds,
    pub fd_probability: f64,
    pub fd_amount: FdAmountModel,
    pub account_age_days: Bounds,
    pub credit_card_probability: f64,
    pub age: Bounds,

    // ── Transaction behavior ───────────────────────
    pub txn_count: Bounds,
    pub type_weights: TypeWeights,
    pub mode_weights: ModeWeights,
    pub inflow: Bounds,
    pub outflow: Bounds,
}

impl SegmentProfile {
    /// Normal amount range for a transaction of this type.
    pub fn amount_bounds(&self, txn_type: TransactionType) -> Bounds {
        if txn_type.is_inflow() {
            self.inflow
        } else {
            self.outflow
        }
    }

    pub fn pick_type(&self, rng: &mut GenRng) -> TransactionType {
        let outcomes = self.type_weights.outcomes();
        let weights = outcomes.map(|(_, w)| w);
        outcomes[rng.pick_weighted(&weights)].0
    }
}

/// The four built-in segments, in population order.
pub fn default_segments() -> Vec<SegmentProfile> {
    vec![
        SegmentProfile {
            segment: Segment::HighRisk,
            population_share: 0.10,
            loan_status: LoanStatus::Defaulted,
            cibil_score: Bounds::new(300, 679),
            balance: Bounds::new(500, 14_999),
            fd_probability: 0.10,
            fd_amount: FdAmountModel::Uniform { range: Bounds::new(5_000, 19_999) },
            account_age_days: Bounds::new(730, 1_999),
            credit_card_probability: 0.50,
            age: Bounds::new(28, 54),
            txn_count: Bounds::new(20, 49),
            // Low deposits, heavy withdrawals and payments.
            type_weights: TypeWeights { inflow: 0.20, withdrawal: 0.35, payment: 0.35, transfer: 0.10 },
            mode_weights: ModeWeights { upi: 0.4, credit_card: 0.1, debit_card: 0.4, net_banking: 0.1 },
            inflow: Bounds::new(500, 1_999),
            outflow: Bounds::new(100, 1_499),
        },
        SegmentProfile {
            segment: Segment::GoodCustomer,
            population_share: 0.30,
            loan_status: LoanStatus::PaidOff,
            cibil_score: Bounds::new(680, 849),
            balance: Bounds::new(15_000, 149_999),
            fd_probability: 0.60,
            fd_amount: FdAmountModel::Uniform { range: Bounds::new(50_000, 299_999) },
            account_age_days: Bounds::new(1_095, 3_649),
            credit_card_probability: 0.80,
            age: Bounds::new(30, 64),
            txn_count: Bounds::new(30, 59),
            type_weights: TypeWeights { inflow: 0.30, withdrawal: 0.20, payment: 0.30, transfer: 0.20 },
            mode_weights: ModeWeights { upi: 0.3, credit_card: 0.3, debit_card: 0.2, net_banking: 0.2 },
            // Salary-sized inflows.
            inflow: Bounds::new(1_000, 14_999),
            outflow: Bounds::new(100, 2_999),
        },
        SegmentProfile {
            segment: Segment::PrimeProspect,
            population_share: 0.35,
            loan_status: LoanStatus::NoLoan,
            cibil_score: Bounds::new(750, 899),
            balance: Bounds::new(50_000, 299_999),
            fd_probability: 0.70,
            fd_amount: FdAmountModel::Mixture {
                standard: Bounds::new(100_000, 500_000),
                jumbo: Bounds::new(500_001, 2_000_000),
                jumbo_probability: 0.20,
            },
            account_age_days: Bounds::new(1_825, 3_999),
            credit_card_probability: 0.60,
            age: Bounds::new(35, 69),
            txn_count: Bounds::new(15, 39),
            // Large inflows, frequent transfers out to deposits.
            type_weights: TypeWeights { inflow: 0.40, withdrawal: 0.10, payment: 0.20, transfer: 0.30 },
            mode_weights: ModeWeights { upi: 0.2, credit_card: 0.2, debit_card: 0.2, net_banking: 0.4 },
            inflow: Bounds::new(5_000, 49_999),
            outflow: Bounds::new(500, 9_999),
        },
        SegmentProfile {
            segment: Segment::NewProspect,
            population_share: 0.25,
            loan_status: LoanStatus::NoLoan,
            cibil_score: Bounds::new(600, 749),
            balance: Bounds::new(2_000, 39_999),
            fd_probability: 0.20,
            fd_amount: FdAmountModel::Uniform { range: Bounds::new(10_000, 49_999) },
            account_age_days: Bounds::new(365, 1_094),
            credit_card_probability: 0.70,
            age: Bounds::new(22, 34),
            // Very active, lots of small UPI payments.
            txn_count: Bounds::new(50, 99),
            type_weights: TypeWeights { inflow: 0.25, withdrawal: 0.25, payment: 0.30, transfer: 0.20 },
            mode_weights: ModeWeights { upi: 0.6, credit_card: 0.2, debit_card: 0.2, net_banking: 0.0 },
            inflow: Bounds::new(100, 999),
            outflow: Bounds::new(10, 499),
        },
    ]
}
