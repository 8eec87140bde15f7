//! Settlement engine for a household of roommates.
//!
//! The engine turns a snapshot of income/expense entries into per-member
//! balances, prices a rent bill from its meter readings and splits the bill
//! into entries. Every function here is pure: no I/O, no shared state, and the
//! settlement operations never fail, malformed input just yields zeros.
//!
//! ```rust
//! use engine::{Money, RentBatch, Roster, compute_summary};
//!
//! let roster: Roster = [("an", "An"), ("binh", "Bình")].into_iter().collect();
//! let entries = RentBatch::builder()
//!     .content("Rent")
//!     .share("an", "-150,000")
//!     .share("binh", "50,000")
//!     .primary_member("an")
//!     .build()
//!     .distribute(&roster);
//!
//! let summary = compute_summary(&entries, &roster);
//! assert_eq!(summary.net_balance, Money::new(-100_000));
//! assert_eq!(summary.equal_share, Money::new(-50_000));
//! assert_eq!(summary.member("binh").unwrap().delta, Money::new(100_000));
//! ```
pub use batch::{RawAmount, RentBatch, RentBatchBuilder, SplitShare, distribute_batch};
pub use currency::Currency;
pub use entry::{Entry, EntryKind};
pub use error::EngineError;
pub use ledger::{
    entries_in_period, entries_of_owner, last_meter_reading, rent_batch_for_removal,
    summarize_period,
};
pub use money::Money;
pub use period::Period;
pub use rent::{MeterReading, Tariff, compute_rent_bill_total, rent_description};
pub use roster::Roster;
pub use summary::{MemberBalance, SettlementSummary, Standing, compute_summary};

mod batch;
mod currency;
mod entry;
mod error;
mod ledger;
mod money;
mod period;
mod rent;
mod roster;
mod summary;

pub type ResultEngine<T> = Result<T, EngineError>;
