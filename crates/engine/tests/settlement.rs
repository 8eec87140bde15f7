use chrono::{DateTime, TimeZone, Utc};

use engine::{
    Entry, EntryKind, MeterReading, Money, Period, RentBatch, Roster, SplitShare, Tariff,
    compute_rent_bill_total, compute_summary, distribute_batch, last_meter_reading,
    rent_batch_for_removal, summarize_period,
};

fn at(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, 20, 15, 0).unwrap()
}

fn roster() -> Roster {
    [("an", "An"), ("binh", "Bình"), ("chi", "Chi")]
        .into_iter()
        .collect()
}

fn plain(kind: EntryKind, owner: &str, amount: i64, month: u32, day: u32) -> Entry {
    Entry::new(
        kind,
        owner,
        &owner.to_uppercase(),
        Money::new(amount),
        "shared",
        at(month, day),
    )
    .unwrap()
}

fn sample_month() -> Vec<Entry> {
    vec![
        plain(EntryKind::Expense, "an", 320_000, 3, 2),
        plain(EntryKind::Expense, "binh", 85_000, 3, 4),
        plain(EntryKind::Income, "an", 40_000, 3, 9),
        plain(EntryKind::Expense, "chi", 1_001, 3, 11),
        plain(EntryKind::Expense, "dung", 77_777, 3, 15),
    ]
}

fn bill() -> MeterReading {
    MeterReading {
        electricity_old: 100,
        electricity_new: 90,
        electricity_unit_price: Money::new(3_500),
        water_old: 50,
        water_new: 50,
        water_unit_price: Money::new(25_000),
        room_base_fee: Money::new(3_000_000),
        service_fee: Money::new(100_000),
    }
}

#[test]
fn contributions_add_up_to_net_balance() {
    let entries = sample_month();
    let summary = compute_summary(&entries, &roster());

    let contributed: Money = summary.per_member.values().map(|b| b.contributed).sum();
    assert_eq!(contributed, summary.net_balance);
    assert_eq!(
        summary.net_balance,
        summary.total_income + summary.total_expense
    );
    assert!(summary.total_expense.is_negative());
}

#[test]
fn empty_snapshot_with_roster_lists_zeroed_members() {
    let summary = compute_summary(&[], &roster());
    assert_eq!(summary.net_balance, Money::ZERO);
    assert_eq!(summary.equal_share, Money::ZERO);
    assert_eq!(summary.member_count, 3);
    assert!(
        summary
            .per_member
            .values()
            .all(|b| b.contributed.is_zero() && b.delta.is_zero())
    );

    let bare = compute_summary(&[], &Roster::new());
    assert!(bare.per_member.is_empty());
    assert_eq!(bare.equal_share, Money::ZERO);
}

#[test]
fn deltas_leave_only_the_rounding_residue() {
    let entries = sample_month();
    let summary = compute_summary(&entries, &roster());

    // an, binh, chi from the roster plus dung from the entries.
    assert_eq!(summary.member_count, 4);
    let count = i64::try_from(summary.member_count).unwrap();
    for balance in summary.per_member.values() {
        assert_eq!(balance.delta, balance.contributed - summary.equal_share);
    }
    let residue = summary.net_balance - summary.equal_share.saturating_mul(count);
    assert_eq!(summary.delta_total(), residue);
    assert_eq!(summary.remainder, residue);
    assert!(residue.minor() >= 0 && residue.minor() < count);
}

#[test]
fn regressing_meters_bill_only_fixed_fees() {
    assert_eq!(compute_rent_bill_total(&bill()), Money::new(3_100_000));
}

#[test]
fn batch_drops_zero_and_unparsable_rows() {
    let shares = [
        SplitShare::new("A", "-150000"),
        SplitShare::new("B", "50000"),
        SplitShare::new("C", "0"),
        SplitShare::new("D", ""),
    ];
    let entries = distribute_batch("Rent", Money::new(3_100_000), &shares, "A", Some(&bill()));

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].owner_id, "A");
    assert_eq!(entries[0].amount, Money::new(-150_000));
    assert_eq!(entries[1].owner_id, "B");
    assert_eq!(entries[1].amount, Money::new(50_000));
}

#[test]
fn only_the_primary_entry_carries_the_meter() {
    let entries = RentBatch::builder()
        .total(compute_rent_bill_total(&bill()))
        .share("an", "-1,000,000")
        .share("binh", "-1,000,000")
        .share("chi", "-1,100,000")
        .primary_member("binh")
        .meter(bill())
        .created_at(at(2, 28))
        .build()
        .distribute(&roster());

    assert_eq!(entries.len(), 3);
    let with_meter: Vec<&Entry> = entries.iter().filter(|e| e.meter.is_some()).collect();
    assert_eq!(with_meter.len(), 1);
    assert_eq!(with_meter[0].owner_id, "binh");
    assert_eq!(with_meter[0].owner_name, "Bình");

    let batch_id = entries[0].batch_id;
    assert!(batch_id.is_some());
    assert!(entries.iter().all(|e| {
        e.is_rent_batch
            && e.batch_id == batch_id
            && e.created_at == at(2, 28)
            && e.content == "Rent (electricity: 0, water: 0)"
    }));
}

#[test]
fn batch_without_survivors_is_empty() {
    let shares = [SplitShare::new("", "-10"), SplitShare::new("a", "-")];
    assert!(distribute_batch("Rent", Money::ZERO, &shares, "a", None).is_empty());
}

#[test]
fn summary_is_idempotent() {
    let entries = sample_month();
    let roster = roster();
    let first = compute_summary(&entries, &roster);
    let second = compute_summary(&entries, &roster);
    assert_eq!(first, second);
}

#[test]
fn rent_cycle_over_two_months() {
    let roster = roster();
    let february = RentBatch::builder()
        .meter(MeterReading {
            electricity_old: 1_000,
            electricity_new: 1_120,
            water_old: 30,
            water_new: 35,
            ..MeterReading::from_tariff(&Default::default())
        })
        .share("an", "-2,000,000")
        .share("binh", "-1,945,000")
        .primary_member("an")
        .created_at(at(2, 27))
        .build();
    // 3_000_000 + 100_000 + 120 * 3_500 + 5 * 25_000
    assert_eq!(february.total(), Money::new(3_645_000));
    assert_eq!(february.unallocated(), Money::new(-300_000));

    let mut entries = february.distribute(&roster);
    entries.extend(sample_month());

    let previous = last_meter_reading(&entries).copied().unwrap();
    let march_meter = MeterReading {
        electricity_new: 1_200,
        water_new: 39,
        ..MeterReading::from_tariff(&Tariff::default()).continuing(&previous)
    };
    assert_eq!(march_meter.electricity_used(), 80);
    assert_eq!(march_meter.water_used(), 4);

    let summary = summarize_period(&entries, &roster, Period::new(2025, 2).unwrap());
    assert_eq!(summary.net_balance, Money::new(-3_945_000));
    assert_eq!(summary.member("chi").unwrap().contributed, Money::ZERO);

    let removed = rent_batch_for_removal(&entries, &entries[1]);
    assert_eq!(removed.len(), 2);
}

#[test]
fn sums_stay_exact_near_the_i64_bounds() {
    let entries = [
        plain(EntryKind::Income, "a", i64::MAX, 3, 1),
        plain(EntryKind::Expense, "a", 1, 3, 2),
        plain(EntryKind::Income, "b", 1, 3, 3),
    ];
    let summary = compute_summary(&entries, &Roster::new());
    let contributed: i128 = summary
        .per_member
        .values()
        .map(|b| i128::from(b.contributed.minor()))
        .sum();
    assert_eq!(contributed, i128::from(summary.net_balance.minor()));
    assert_eq!(summary.net_balance, Money::new(i64::MAX));
    let deltas: i128 = summary
        .per_member
        .values()
        .map(|b| i128::from(b.delta.minor()))
        .sum();
    assert_eq!(deltas, i128::from(summary.remainder.minor()));
    assert_eq!(summary.remainder, Money::new(1));

    let floor = [
        plain(EntryKind::Expense, "a", i64::MAX, 3, 1),
        plain(EntryKind::Expense, "a", 1, 3, 2),
        plain(EntryKind::Expense, "b", i64::MAX, 3, 3),
        plain(EntryKind::Expense, "b", 1, 3, 4),
    ];
    let summary = compute_summary(&floor, &Roster::new());
    assert_eq!(summary.equal_share, Money::new(i64::MIN));
    assert_eq!(summary.remainder, Money::ZERO);
    assert_eq!(summary.delta_total(), summary.remainder);
    assert!(summary.per_member.values().all(|b| b.delta.is_zero()));
}
