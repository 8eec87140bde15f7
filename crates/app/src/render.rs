//! Plain-text rendering of engine results.
use std::fmt::Write;

use engine::{Currency, Entry, MeterReading, Period, SettlementSummary, Standing};

use crate::snapshot::Snapshot;

const NAME_WIDTH: usize = 16;
const AMOUNT_WIDTH: usize = 16;

fn standing_label(standing: Standing) -> &'static str {
    match standing {
        Standing::Owed => "to receive",
        Standing::Owes => "to pay",
        Standing::Settled => "settled",
    }
}

fn row(out: &mut String, name: &str, contributed: String, delta: String, note: &str) {
    let _ = writeln!(
        out,
        "{name:<NAME_WIDTH$}{contributed:>AMOUNT_WIDTH$}{delta:>AMOUNT_WIDTH$}  {note}"
    );
}

/// Monthly totals table, most owed member first. With `member` set only that
/// member's row is shown.
pub fn summary(
    summary: &SettlementSummary,
    snapshot: &Snapshot,
    period: Option<Period>,
    member: Option<&str>,
    currency: Currency,
) -> String {
    let mut out = String::new();
    match period {
        Some(period) => {
            let _ = writeln!(out, "Totals for {period}");
        }
        None => out.push_str("Totals\n"),
    }

    if summary.per_member.is_empty() {
        out.push_str("No transactions\n");
        return out;
    }

    row(
        &mut out,
        "Name",
        "Total".to_string(),
        "Delta".to_string(),
        "",
    );
    for (member_id, balance) in summary.ranked() {
        if member.is_some_and(|wanted| wanted != member_id) {
            continue;
        }
        row(
            &mut out,
            snapshot.member_name(member_id),
            balance.contributed.format(currency),
            balance.delta.format(currency),
            standing_label(balance.standing()),
        );
    }

    let _ = writeln!(out, "{}", "-".repeat(NAME_WIDTH + 2 * AMOUNT_WIDTH));
    let _ = writeln!(
        out,
        "Income {}  Expense {}  Net {}",
        summary.total_income.format(currency),
        summary.total_expense.format(currency),
        summary.net_balance.format(currency)
    );
    let _ = writeln!(
        out,
        "Equal share {} over {} members",
        summary.equal_share.format(currency),
        summary.member_count
    );
    if !summary.remainder.is_zero() {
        let _ = writeln!(
            out,
            "Unassigned remainder {}",
            summary.remainder.format(currency)
        );
    }
    out
}

pub fn bill(meter: &MeterReading, currency: Currency) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Electricity {} -> {} ({} x {}) = {}",
        meter.electricity_old,
        meter.electricity_new,
        meter.electricity_used(),
        meter.electricity_unit_price.format(currency),
        meter.electricity_cost().format(currency)
    );
    let _ = writeln!(
        out,
        "Water       {} -> {} ({} x {}) = {}",
        meter.water_old,
        meter.water_new,
        meter.water_used(),
        meter.water_unit_price.format(currency),
        meter.water_cost().format(currency)
    );
    let _ = writeln!(out, "Room        {}", meter.room_base_fee.format(currency));
    let _ = writeln!(out, "Service     {}", meter.service_fee.format(currency));
    let _ = writeln!(out, "Total bill  {}", meter.total().format(currency));
    out
}

pub fn entries(entries: &[Entry], currency: Currency) -> String {
    let mut out = String::new();
    for entry in entries {
        let marker = if entry.meter.is_some() { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {name:<NAME_WIDTH$}{amount:>AMOUNT_WIDTH$}  {content}",
            name = entry.owner_name,
            amount = entry.amount.format(currency),
            content = entry.content,
        );
    }
    out
}
