//! Rent batches: one utility bill split into one entry per paying member.
//!
//! The bill total from [`compute_rent_bill_total`] is only a suggestion shown
//! to the user. What gets settled is whatever amount was typed for each row,
//! so the rows of a batch don't have to add up to the total.
//!
//! [`compute_rent_bill_total`]: crate::compute_rent_bill_total
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Entry, MeterReading, Money, Roster, rent_description};

/// Amount of a split row, either as typed in the form or already numeric.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Minor(i64),
    Text(String),
}

impl RawAmount {
    /// Signed amount of the row. Unparsable text is 0.
    #[must_use]
    pub fn parse(&self) -> Money {
        match self {
            Self::Minor(minor) => Money::new(*minor),
            Self::Text(text) => Money::parse_lenient(text),
        }
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        Self::Minor(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One row of the split form.
///
/// A leading `-` marks money the member paid for the bill, no sign marks money
/// they received. Rows with a blank member or a zero amount are skipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitShare {
    pub member_id: String,
    pub amount: RawAmount,
}

impl SplitShare {
    pub fn new(member_id: impl Into<String>, amount: impl Into<RawAmount>) -> Self {
        Self {
            member_id: member_id.into(),
            amount: amount.into(),
        }
    }

    /// The member and signed amount, or `None` if the row must be skipped.
    #[must_use]
    pub fn accepted(&self) -> Option<(&str, Money)> {
        let member_id = self.member_id.trim();
        if member_id.is_empty() {
            return None;
        }
        let amount = self.amount.parse();
        (!amount.is_zero()).then_some((member_id, amount))
    }
}

/// A rent bill ready to be split into entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RentBatch {
    batch_id: Uuid,
    content: String,
    total: Money,
    shares: Vec<SplitShare>,
    primary_member_id: String,
    meter: Option<MeterReading>,
    created_at: DateTime<Utc>,
}

impl RentBatch {
    /// Return a builder for `RentBatch`.
    pub fn builder() -> RentBatchBuilder {
        RentBatchBuilder::default()
    }

    #[must_use]
    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The computed bill total. Informational only.
    #[must_use]
    pub fn total(&self) -> Money {
        self.total
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Rows that survive filtering, in form order.
    pub fn accepted_shares(&self) -> impl Iterator<Item = (&str, Money)> {
        self.shares.iter().filter_map(SplitShare::accepted)
    }

    /// Sum of the accepted rows.
    #[must_use]
    pub fn allocated(&self) -> Money {
        self.accepted_shares().map(|(_, amount)| amount).sum()
    }

    /// Part of the bill not covered by expense rows: `total + allocated`.
    ///
    /// Zero when the paid rows exactly cover the bill.
    #[must_use]
    pub fn unallocated(&self) -> Money {
        self.total + self.allocated()
    }

    /// Member whose entry carries the meter block.
    ///
    /// That is `primary_member_id` when one of the accepted rows belongs to it,
    /// otherwise the first accepted row.
    #[must_use]
    pub fn primary_member(&self) -> Option<&str> {
        let primary = self.primary_member_id.trim();
        self.accepted_shares()
            .find(|(member_id, _)| *member_id == primary)
            .or_else(|| self.accepted_shares().next())
            .map(|(member_id, _)| member_id)
    }

    /// Produces one entry per accepted row.
    ///
    /// All entries share the timestamp, content and batch id; only the
    /// primary member's entry carries the meter reading. Owner names come
    /// from `roster`, falling back to the member id. No accepted rows yields
    /// an empty list.
    #[must_use]
    pub fn distribute(&self, roster: &Roster) -> Vec<Entry> {
        let primary = self.primary_member();
        let mut meter = self.meter;

        self.accepted_shares()
            .map(|(member_id, amount)| {
                let meter = if Some(member_id) == primary {
                    meter.take()
                } else {
                    None
                };
                Entry {
                    id: Uuid::new_v4().to_string(),
                    owner_id: member_id.to_string(),
                    owner_name: roster.name(member_id).unwrap_or(member_id).to_string(),
                    amount,
                    content: self.content.clone(),
                    created_at: self.created_at,
                    is_rent_batch: true,
                    batch_id: Some(self.batch_id),
                    meter,
                }
            })
            .collect()
    }
}

/// The builder for `RentBatch`.
#[derive(Default)]
pub struct RentBatchBuilder {
    batch_id: Option<Uuid>,
    content: Option<String>,
    total: Option<Money>,
    shares: Vec<SplitShare>,
    primary_member_id: String,
    meter: Option<MeterReading>,
    created_at: Option<DateTime<Utc>>,
}

impl RentBatchBuilder {
    /// Description of every entry. Defaults to a usage summary of the meter.
    pub fn content(mut self, content: &str) -> RentBatchBuilder {
        self.content = Some(content.trim().to_string());
        self
    }

    /// Bill total. Defaults to the meter's computed total.
    pub fn total(mut self, total: Money) -> RentBatchBuilder {
        self.total = Some(total);
        self
    }

    pub fn share(mut self, member_id: &str, amount: impl Into<RawAmount>) -> RentBatchBuilder {
        self.shares.push(SplitShare::new(member_id, amount));
        self
    }

    pub fn shares(mut self, shares: impl IntoIterator<Item = SplitShare>) -> RentBatchBuilder {
        self.shares.extend(shares);
        self
    }

    pub fn primary_member(mut self, member_id: &str) -> RentBatchBuilder {
        self.primary_member_id = member_id.to_string();
        self
    }

    pub fn meter(mut self, meter: MeterReading) -> RentBatchBuilder {
        self.meter = Some(meter);
        self
    }

    /// Timestamp of every entry. Defaults to now.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> RentBatchBuilder {
        self.created_at = Some(created_at);
        self
    }

    /// Batch identifier. Defaults to a fresh v4 UUID.
    pub fn batch_id(mut self, batch_id: Uuid) -> RentBatchBuilder {
        self.batch_id = Some(batch_id);
        self
    }

    /// Construct `RentBatch`
    pub fn build(self) -> RentBatch {
        let content = match (self.content, self.meter.as_ref()) {
            (Some(content), _) if !content.is_empty() => content,
            (_, Some(meter)) => rent_description(meter),
            (content, None) => content.unwrap_or_default(),
        };
        let total = self
            .total
            .or_else(|| self.meter.as_ref().map(MeterReading::total))
            .unwrap_or_default();

        RentBatch {
            batch_id: self.batch_id.unwrap_or_else(Uuid::new_v4),
            content,
            total,
            shares: self.shares,
            primary_member_id: self.primary_member_id,
            meter: self.meter,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Splits a rent bill into entries, one per accepted share.
///
/// See [`RentBatch::distribute`]. Entries are stamped with the current time.
#[must_use]
pub fn distribute_batch(
    content: &str,
    total: Money,
    shares: &[SplitShare],
    primary_member_id: &str,
    meter: Option<&MeterReading>,
) -> Vec<Entry> {
    let mut builder = RentBatch::builder()
        .content(content)
        .total(total)
        .shares(shares.iter().cloned())
        .primary_member(primary_member_id);
    if let Some(meter) = meter {
        builder = builder.meter(*meter);
    }
    builder.build().distribute(&Roster::new())
}
