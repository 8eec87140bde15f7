//! Selection helpers over an entry snapshot.
//!
//! The snapshot comes from the data store as-is; these helpers pick the
//! entries a view or an action works on.
use crate::{Entry, MeterReading, Period, Roster, SettlementSummary, compute_summary};

/// Entries created inside `period`.
pub fn entries_in_period(entries: &[Entry], period: Period) -> impl Iterator<Item = &Entry> {
    entries
        .iter()
        .filter(move |entry| period.contains(&entry.created_at))
}

pub fn entries_of_owner<'a>(
    entries: &'a [Entry],
    owner_id: &'a str,
) -> impl Iterator<Item = &'a Entry> {
    entries
        .iter()
        .filter(move |entry| entry.owner_id.trim() == owner_id.trim())
}

/// Settlement of the entries created inside `period`.
#[must_use]
pub fn summarize_period(entries: &[Entry], roster: &Roster, period: Period) -> SettlementSummary {
    let selected: Vec<Entry> = entries_in_period(entries, period).cloned().collect();
    compute_summary(&selected, roster)
}

/// Meter reading of the most recent rent entry that carries one.
///
/// Its new indexes are the old indexes of the next bill.
#[must_use]
pub fn last_meter_reading(entries: &[Entry]) -> Option<&MeterReading> {
    entries
        .iter()
        .filter(|entry| entry.is_rent_batch)
        .filter_map(|entry| entry.meter.as_ref().map(|meter| (entry.created_at, meter)))
        .max_by_key(|(created_at, _)| *created_at)
        .map(|(_, meter)| meter)
}

/// Entries removed together with `target`.
///
/// A plain entry goes alone. A rent entry takes its whole batch with it: the
/// entries sharing its batch id or, for entries recorded without one, every
/// rent entry of the same month.
#[must_use]
pub fn rent_batch_for_removal<'a>(entries: &'a [Entry], target: &Entry) -> Vec<&'a Entry> {
    if !target.is_rent_batch {
        return entries.iter().filter(|entry| entry.id == target.id).collect();
    }

    match target.batch_id {
        Some(batch_id) => entries
            .iter()
            .filter(|entry| entry.batch_id == Some(batch_id))
            .collect(),
        None => {
            let period = Period::of(&target.created_at);
            entries
                .iter()
                .filter(|entry| entry.is_rent_batch && period.contains(&entry.created_at))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::Money;

    fn entry(id: &str, owner: &str, month: u32, day: u32) -> Entry {
        Entry {
            id: id.to_string(),
            owner_id: owner.to_string(),
            owner_name: String::new(),
            amount: Money::new(-100),
            content: String::new(),
            created_at: Utc.with_ymd_and_hms(2025, month, day, 9, 0, 0).unwrap(),
            is_rent_batch: false,
            batch_id: None,
            meter: None,
        }
    }

    fn rent(id: &str, month: u32, batch_id: Option<Uuid>, meter: Option<MeterReading>) -> Entry {
        Entry {
            is_rent_batch: true,
            batch_id,
            meter,
            ..entry(id, "a", month, 5)
        }
    }

    #[test]
    fn period_selection_excludes_other_months() {
        let entries = [entry("1", "a", 2, 28), entry("2", "b", 3, 1), entry("3", "a", 3, 31)];
        let march = Period::new(2025, 3).unwrap();
        let ids: Vec<&str> = entries_in_period(&entries, march).map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["2", "3"]);

        let summary = summarize_period(&entries, &Roster::new(), march);
        assert_eq!(summary.net_balance, Money::new(-200));
        assert_eq!(entries_of_owner(&entries, "a").count(), 2);
    }

    #[test]
    fn last_meter_reading_picks_latest_primary() {
        let older = MeterReading {
            electricity_new: 100,
            ..MeterReading::default()
        };
        let newer = MeterReading {
            electricity_new: 180,
            ..MeterReading::default()
        };
        let entries = [
            rent("2", 2, None, Some(newer)),
            rent("1", 1, None, Some(older)),
            rent("3", 2, None, None),
        ];
        assert_eq!(last_meter_reading(&entries), Some(&newer));
        assert_eq!(last_meter_reading(&[entry("x", "a", 1, 1)]), None);
    }

    #[test]
    fn removal_takes_the_whole_batch() {
        let batch = Uuid::new_v4();
        let entries = [
            rent("1", 3, Some(batch), None),
            rent("2", 3, Some(batch), None),
            rent("3", 3, Some(Uuid::new_v4()), None),
            entry("4", "a", 3, 2),
        ];
        let ids = |selected: Vec<&Entry>| -> Vec<String> {
            selected.into_iter().map(|e| e.id.clone()).collect()
        };
        assert_eq!(ids(rent_batch_for_removal(&entries, &entries[0])), ["1", "2"]);
        assert_eq!(ids(rent_batch_for_removal(&entries, &entries[3])), ["4"]);
    }

    #[test]
    fn legacy_removal_takes_the_month() {
        let entries = [
            rent("1", 3, None, None),
            rent("2", 3, None, None),
            rent("3", 4, None, None),
            entry("4", "a", 3, 2),
        ];
        let selected = rent_batch_for_removal(&entries, &entries[1]);
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|e| e.is_rent_batch));
    }
}
