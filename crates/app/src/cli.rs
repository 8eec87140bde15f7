use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use engine::{MeterReading, Money, Period, SplitShare};

#[derive(Parser, Debug)]
#[command(name = "roomsplit")]
#[command(about = "Settle shared expenses and rent bills between roommates")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the configured log level.
    #[arg(long, global = true)]
    pub level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Per-member balances of a snapshot.
    Summary(SummaryArgs),
    /// Price a rent bill from its meter readings.
    RentTotal(RentTotalArgs),
    /// Split a rent bill into one entry per member.
    Batch(BatchArgs),
    /// Recompute the summary for every snapshot of a JSON-lines feed.
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Snapshot file (JSON with `roster` and `entries`).
    #[arg(long)]
    pub snapshot: PathBuf,
    /// Month to summarize, `YYYY-MM` or `MM/YYYY`. All entries if omitted.
    #[arg(long)]
    pub period: Option<Period>,
    /// Only show this member's row.
    #[arg(long)]
    pub member: Option<String>,
    #[arg(long)]
    pub json: bool,
}

/// Meter readings and prices. Prices default to the configured tariff and
/// old readings to the last bill found in `--snapshot`.
#[derive(Args, Debug, Default)]
pub struct MeterArgs {
    #[arg(long)]
    pub electricity_old: Option<i64>,
    #[arg(long)]
    pub electricity_new: Option<i64>,
    #[arg(long)]
    pub electricity_price: Option<Money>,
    #[arg(long)]
    pub water_old: Option<i64>,
    #[arg(long)]
    pub water_new: Option<i64>,
    #[arg(long)]
    pub water_price: Option<Money>,
    #[arg(long)]
    pub room_fee: Option<Money>,
    #[arg(long)]
    pub service_fee: Option<Money>,
}

impl MeterArgs {
    /// Applies the values given on the command line over `base`.
    pub fn apply(&self, base: MeterReading) -> MeterReading {
        MeterReading {
            electricity_old: self.electricity_old.unwrap_or(base.electricity_old),
            electricity_new: self.electricity_new.unwrap_or(base.electricity_new),
            electricity_unit_price: self
                .electricity_price
                .unwrap_or(base.electricity_unit_price),
            water_old: self.water_old.unwrap_or(base.water_old),
            water_new: self.water_new.unwrap_or(base.water_new),
            water_unit_price: self.water_price.unwrap_or(base.water_unit_price),
            room_base_fee: self.room_fee.unwrap_or(base.room_base_fee),
            service_fee: self.service_fee.unwrap_or(base.service_fee),
        }
    }
}

#[derive(Args, Debug)]
pub struct RentTotalArgs {
    #[command(flatten)]
    pub meter: MeterArgs,
    /// Snapshot to take the previous readings from.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    #[command(flatten)]
    pub meter: MeterArgs,
    /// Snapshot to take member names and previous readings from.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    /// Description of the entries. Defaults to a usage summary.
    #[arg(long)]
    pub content: Option<String>,
    /// Member whose entry keeps the meter readings.
    #[arg(long)]
    pub primary: String,
    /// `MEMBER=AMOUNT`, repeatable. `-` marks a payment, e.g. `an=-1,500,000`.
    #[arg(long = "share", value_parser = parse_share, required = true)]
    pub shares: Vec<SplitShare>,
    /// Month the bill belongs to. Defaults to the previous month.
    #[arg(long)]
    pub period: Option<Period>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// JSON-lines feed. Reads stdin if omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,
    #[arg(long)]
    pub period: Option<Period>,
}

fn parse_share(raw: &str) -> Result<SplitShare, String> {
    let (member_id, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected MEMBER=AMOUNT, got {raw:?}"))?;
    Ok(SplitShare::new(member_id.trim(), amount.trim()))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_batch_shares() {
        let cli = Cli::try_parse_from([
            "roomsplit",
            "batch",
            "--primary",
            "an",
            "--share",
            "an=-1,500,000",
            "--share",
            "binh=200000",
            "--electricity-new",
            "1350",
        ])
        .unwrap();
        let Command::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.shares.len(), 2);
        assert_eq!(args.shares[0].amount.parse(), Money::new(-1_500_000));
        assert_eq!(args.meter.electricity_new, Some(1350));
    }

    #[test]
    fn rejects_share_without_amount() {
        assert!(parse_share("an").is_err());
    }

    #[test]
    fn meter_args_override_base() {
        let args = MeterArgs {
            water_new: Some(12),
            ..MeterArgs::default()
        };
        let base = MeterReading {
            water_old: 10,
            water_new: 10,
            ..MeterReading::default()
        };
        assert_eq!(args.apply(base).water_used(), 2);
    }
}
