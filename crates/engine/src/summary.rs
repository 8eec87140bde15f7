//! Monthly balance aggregation.
//!
//! [`compute_summary`] folds a snapshot of entries into household totals and a
//! per-member settlement against the equal share of the net balance.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Entry, Money, Roster};

/// Where a member stands against the equal share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    /// Contributed more than the share, the household owes them.
    Owed,
    /// Contributed less than the share.
    Owes,
    Settled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalance {
    /// Sum of the member's entry amounts.
    pub contributed: Money,
    /// `contributed - equal_share`.
    pub delta: Money,
}

impl MemberBalance {
    #[must_use]
    pub fn standing(&self) -> Standing {
        if self.delta.is_positive() {
            Standing::Owed
        } else if self.delta.is_negative() {
            Standing::Owes
        } else {
            Standing::Settled
        }
    }
}

/// Aggregated balances for a set of entries.
///
/// Invariants:
/// - `net_balance == total_income + total_expense` (`total_expense <= 0`)
/// - `equal_share == floor(net_balance / member_count)`
/// - `remainder == net_balance - equal_share * member_count`, in
///   `0..member_count`
/// - the `contributed` values sum to `net_balance`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    pub total_income: Money,
    pub total_expense: Money,
    pub net_balance: Money,
    pub member_count: usize,
    pub equal_share: Money,
    /// Floor-division residue. It is not assigned to any member.
    pub remainder: Money,
    pub per_member: BTreeMap<String, MemberBalance>,
}

impl SettlementSummary {
    #[must_use]
    pub fn member(&self, member_id: &str) -> Option<&MemberBalance> {
        self.per_member.get(member_id)
    }

    /// Sum of all deltas. Always equals `remainder`.
    #[must_use]
    pub fn delta_total(&self) -> Money {
        self.per_member.values().map(|balance| balance.delta).sum()
    }

    /// Members sorted from the most owed to the most owing, ties by id.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, &MemberBalance)> {
        let mut ranked: Vec<_> = self
            .per_member
            .iter()
            .map(|(id, balance)| (id.as_str(), balance))
            .collect();
        ranked.sort_by(|a, b| b.1.delta.cmp(&a.1.delta).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Computes the settlement of `entries` among the owners found in them and
/// every member of `roster`.
///
/// Members of the roster without entries appear with `contributed = 0`. Owner
/// ids are grouped trimmed. The member count is floored to 1, so an empty
/// snapshot yields the zero summary.
///
/// Sums are accumulated in `i128` and each reported figure is clamped to the
/// `i64` range once at the end, so the invariants of [`SettlementSummary`]
/// hold exactly whenever the reported figures fit in `i64`.
#[must_use]
pub fn compute_summary(entries: &[Entry], roster: &Roster) -> SettlementSummary {
    let mut total_income: i128 = 0;
    let mut total_expense: i128 = 0;
    let mut contributed: BTreeMap<String, i128> =
        roster.ids().map(|id| (id.to_string(), 0)).collect();

    for entry in entries {
        let amount = i128::from(entry.amount.minor());
        if amount > 0 {
            total_income += amount;
        } else {
            total_expense += amount;
        }
        *contributed
            .entry(entry.owner_id.trim().to_string())
            .or_default() += amount;
    }

    let net_balance = total_income + total_expense;
    let member_count = contributed.len().max(1);
    let divisor = i128::try_from(member_count).unwrap_or(i128::MAX);
    let equal_share = net_balance.div_euclid(divisor);
    let remainder = net_balance.rem_euclid(divisor);

    let per_member = contributed
        .into_iter()
        .map(|(id, contributed)| {
            let balance = MemberBalance {
                contributed: Money::clamp_wide(contributed),
                delta: Money::clamp_wide(contributed - equal_share),
            };
            (id, balance)
        })
        .collect();

    SettlementSummary {
        total_income: Money::clamp_wide(total_income),
        total_expense: Money::clamp_wide(total_expense),
        net_balance: Money::clamp_wide(net_balance),
        member_count,
        equal_share: Money::clamp_wide(equal_share),
        remainder: Money::clamp_wide(remainder),
        per_member,
    }
}
