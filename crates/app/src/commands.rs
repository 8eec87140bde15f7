use std::path::Path;

use chrono::Utc;
use engine::{
    MeterReading, Period, RentBatch, compute_summary, last_meter_reading, summarize_period,
};
use tokio::io::{AsyncBufRead, BufReader};

use crate::{
    cli::{BatchArgs, Command, MeterArgs, RentTotalArgs, SummaryArgs, WatchArgs},
    error::{AppError, Result},
    feed, render,
    settings::Settings,
    snapshot::Snapshot,
};

pub async fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Summary(args) => summary(args, settings),
        Command::RentTotal(args) => rent_total(args, settings),
        Command::Batch(args) => batch(args, settings),
        Command::Watch(args) => watch(args, settings).await,
    }
}

fn load_optional(path: Option<&Path>) -> Result<Snapshot> {
    match path {
        Some(path) => Snapshot::load(path),
        None => Ok(Snapshot::default()),
    }
}

/// Prices a new bill from the tariff, continuing from the last reading of the
/// snapshot, then applies the command-line values.
fn meter_reading(args: &MeterArgs, snapshot: &Snapshot, settings: &Settings) -> MeterReading {
    let mut base = MeterReading::from_tariff(&settings.tariff);
    if let Some(previous) = last_meter_reading(&snapshot.entries) {
        tracing::debug!(
            "continuing from electricity {} water {}",
            previous.electricity_new,
            previous.water_new
        );
        base = base.continuing(previous);
    }
    args.apply(base)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn summary(args: SummaryArgs, settings: &Settings) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let summary = match args.period {
        Some(period) => summarize_period(&snapshot.entries, &snapshot.roster, period),
        None => compute_summary(&snapshot.entries, &snapshot.roster),
    };

    if let Some(member) = args.member.as_deref()
        && summary.member(member).is_none()
    {
        return Err(AppError::Input(format!("unknown member: {member}")));
    }

    if args.json {
        return print_json(&summary);
    }
    print!(
        "{}",
        render::summary(
            &summary,
            &snapshot,
            args.period,
            args.member.as_deref(),
            settings.currency
        )
    );
    Ok(())
}

fn rent_total(args: RentTotalArgs, settings: &Settings) -> Result<()> {
    let snapshot = load_optional(args.snapshot.as_deref())?;
    let meter = meter_reading(&args.meter, &snapshot, settings);

    if args.json {
        return print_json(&meter);
    }
    print!("{}", render::bill(&meter, settings.currency));
    Ok(())
}

fn batch(args: BatchArgs, settings: &Settings) -> Result<()> {
    let snapshot = load_optional(args.snapshot.as_deref())?;
    let meter = meter_reading(&args.meter, &snapshot, settings);
    let period = args.period.unwrap_or_else(Period::rent_default);

    let mut builder = RentBatch::builder()
        .meter(meter)
        .shares(args.shares)
        .primary_member(&args.primary)
        .created_at(period.shift_into(Utc::now()));
    if let Some(content) = args.content.as_deref() {
        builder = builder.content(content);
    }
    let batch = builder.build();

    let unallocated = batch.unallocated();
    if !unallocated.is_zero() {
        tracing::warn!(
            "rows don't cover the bill of {}: {} left",
            batch.total().format(settings.currency),
            unallocated.format(settings.currency)
        );
    }

    let entries = batch.distribute(&snapshot.roster);
    if entries.is_empty() {
        return Err(AppError::Input("no share with a member and an amount".to_string()));
    }
    tracing::info!(
        "split {} into {} entries for {period}",
        batch.batch_id(),
        entries.len()
    );

    if args.json {
        return print_json(&entries);
    }
    print!("{}", render::bill(&meter, settings.currency));
    print!("{}", render::entries(&entries, settings.currency));
    Ok(())
}

async fn watch(args: WatchArgs, settings: &Settings) -> Result<()> {
    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match args.input.as_deref() {
        Some(path) => Box::new(BufReader::new(tokio::fs::File::open(path).await?)),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let (tx, rx) = feed::channel();
    let reader = tokio::spawn(feed::read_snapshots(reader, tx));

    let currency = settings.currency;
    let period = args.period;
    let consumer = feed::drain(rx, period, |snapshot, summary| {
        print!(
            "{}",
            render::summary(&summary, snapshot, period, None, currency)
        );
    });

    tokio::select! {
        () = consumer => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, stop watching");
            reader.abort();
            return Ok(());
        }
    }

    match reader.await {
        Ok(result) => {
            let forwarded = result?;
            tracing::info!("feed closed after {forwarded} snapshots");
            Ok(())
        }
        Err(err) => Err(AppError::Input(format!("feed reader failed: {err}"))),
    }
}
