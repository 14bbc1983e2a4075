//! Row types for the two exported tables.
//!
//! Field order on `Account` and `Transaction` is the column order of
//! the CSV files. The segment never appears here; it travels beside
//! an `Account` as a separate value until the synthesizer is done.

use crate::types::{AccountId, Amount, TransactionId};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LoanStatus {
    Defaulted,
    #[serde(rename = "Paid Off")]
    PaidOff,
    #[serde(rename = "No Loan")]
    NoLoan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Region {
    North,
    South,
    East,
    West,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::North, Region::South, Region::East, Region::West];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Order matches `GeneratorConfig::gender_weights`.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Payment,
    Transfer,
    Received,
}

impl TransactionType {
    /// Deposits and received funds raise the nominal balance.
    pub fn is_inflow(&self) -> bool {
        matches!(self, Self::Deposit | Self::Received)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Deposit    => "Deposit",
            Self::Withdrawal => "Withdrawal",
            Self::Payment    => "Payment",
            Self::Transfer   => "Transfer",
            Self::Received   => "Received",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PaymentMode {
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Net Banking")]
    NetBanking,
}

impl PaymentMode {
    /// Order matches `ModeWeights::as_array`.
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Upi,
        PaymentMode::CreditCard,
        PaymentMode::DebitCard,
        PaymentMode::NetBanking,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub account_id:        AccountId,
    pub region:            Region,
    pub age:               u64,
    pub gender:            Gender,
    pub current_balance:   Amount,
    pub has_fd:            bool,
    pub total_fd_amount:   Amount,
    pub has_credit_card:   bool,
    pub cibil_score:       u64,
    pub account_open_date: NaiveDate,
    pub loan_status:       LoanStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub transaction_id:     TransactionId,
    pub account_id:         AccountId,
    pub transaction_date:   NaiveDate,
    pub transaction_type:   TransactionType,
    pub transaction_amount: Amount,
    pub payment_mode:       PaymentMode,
}
