//! The module contains the `Entry` type, one income or expense attributed to a
//! household member.
//!
//! Both expenses and income are represented by `Entry`; the sign of the amount
//! tells them apart.
use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MeterReading, Money, ResultEngine};

/// Direction of a single, manually entered entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Applies the kind's sign to a magnitude.
    #[must_use]
    pub fn signed(self, magnitude: Money) -> Money {
        match self {
            Self::Income => magnitude.abs(),
            Self::Expense => -magnitude.abs(),
        }
    }
}

/// One financial record.
///
/// `meter` is only set on the primary entry of a rent batch; `batch_id` ties
/// the entries of one batch together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub owner_id: String,
    #[serde(default)]
    pub owner_name: String,
    pub amount: Money,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_rent_batch: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter: Option<MeterReading>,
}

impl Entry {
    /// Creates a plain income/expense entry.
    ///
    /// `magnitude` must be strictly positive and `content` non-blank; the sign
    /// of the stored amount comes from `kind`.
    pub fn new(
        kind: EntryKind,
        owner_id: &str,
        owner_name: &str,
        magnitude: Money,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        let owner_id = owner_id.trim();
        if owner_id.is_empty() {
            return Err(EngineError::InvalidEntry(
                "owner id must not be empty".to_string(),
            ));
        }
        if !magnitude.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(EngineError::InvalidEntry(
                "content must not be empty".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            owner_name: owner_name.trim().to_string(),
            amount: kind.signed(magnitude),
            content: content.to_string(),
            created_at,
            is_rent_batch: false,
            batch_id: None,
            meter: None,
        })
    }

    #[must_use]
    pub fn kind(&self) -> EntryKind {
        if self.amount.is_negative() {
            EntryKind::Expense
        } else {
            EntryKind::Income
        }
    }

    /// Only the owner of an entry may edit it.
    pub fn ensure_owner(&self, user_id: &str) -> ResultEngine<()> {
        if self.owner_id.trim() != user_id.trim() {
            return Err(EngineError::NotOwner(user_id.to_string()));
        }
        Ok(())
    }

    /// Applies an edit from the owner: new content and a new magnitude, keeping
    /// the entry's direction.
    pub fn edit(&mut self, user_id: &str, content: &str, magnitude: Money) -> ResultEngine<()> {
        self.ensure_owner(user_id)?;
        let edited = Self::new(
            self.kind(),
            &self.owner_id,
            &self.owner_name,
            magnitude,
            content,
            self.created_at,
        )?;
        self.amount = edited.amount;
        self.content = edited.content;
        Ok(())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.created_at.format("%H:%M - %d/%m/%Y"),
            self.amount,
            self.owner_name,
            self.content
        )
    }
}
