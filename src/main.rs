use anyhow::Result;
use log::warn;

use vmlens::cli::{Args, OutputFormat};
use vmlens::{
    aggregate, load_csv, normalize, normalize_lossy, AggregateResult, GroupBy, InventoryStore,
    Metric, RecordFilter, VmDataset,
};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse_args();

    let raw_rows = load_csv(&args.input)?;

    let records = if args.strict {
        normalize(&raw_rows)?
    } else {
        let (records, failures) = normalize_lossy(&raw_rows);
        for failure in &failures {
            warn!("skipping {failure}");
        }
        records
    };

    // The store plays the role it would in a serving layer: one active
    // generation, queries read a snapshot of it.
    let store = InventoryStore::new();
    store.install(VmDataset::from_records(records));
    let dataset = store.snapshot();

    if dataset.is_empty() {
        println!("no data");
        return Ok(());
    }

    let filter = build_filter(&args);

    if args.list_groups {
        print_groups(&dataset, &filter);
        return Ok(());
    }

    // group_by is mandatory unless --list-groups; clap enforces that.
    let group_by: GroupBy = args.group_by.as_deref().unwrap_or("").parse()?;
    let metrics = args
        .metrics
        .iter()
        .map(|m| m.parse::<Metric>())
        .collect::<Result<Vec<_>, _>>()?;

    let result = aggregate(&dataset, group_by, &filter, &metrics)?;

    match args.format {
        OutputFormat::Table => print_table(group_by, &result),
        OutputFormat::Json => print_json(group_by, &result)?,
    }
    Ok(())
}

fn build_filter(args: &Args) -> RecordFilter {
    let mut filter = if args.online_only {
        RecordFilter::online()
    } else {
        RecordFilter::all()
    };
    if let Some(owner) = &args.owner {
        filter = filter.with_owner(owner.clone());
    }
    if let Some(purpose) = &args.purpose {
        filter = filter.with_purpose(purpose.clone());
    }
    filter
}

fn print_groups(dataset: &VmDataset, filter: &RecordFilter) {
    println!("owners:   {}", dataset.owners_matching(filter).join(", "));
    println!("purposes: {}", dataset.purposes_matching(filter).join(", "));
}

fn print_table(group_by: GroupBy, result: &AggregateResult) {
    let width = result
        .groups
        .iter()
        .map(|g| g.label().len())
        .chain([group_by.to_string().len()])
        .max()
        .unwrap_or(0);

    print!("{:<width$}", group_by);
    for metric in &result.metrics {
        print!("  {:>12}", format!("{metric} (GB)"));
    }
    println!();

    for group in &result.groups {
        print!("{:<width$}", group.label());
        for total in &group.totals {
            print!("  {total:>12}");
        }
        println!();
    }
}

fn print_json(group_by: GroupBy, result: &AggregateResult) -> Result<()> {
    let mut series = serde_json::Map::new();
    for &metric in &result.metrics {
        let pairs = result
            .series(metric)
            .unwrap_or_default()
            .into_iter()
            .map(|(label, value)| serde_json::json!({ "label": label, "value": value }))
            .collect::<Vec<_>>();
        series.insert(metric.to_string(), serde_json::Value::Array(pairs));
    }
    let doc = serde_json::json!({
        "group_by": group_by.to_string(),
        "series": series,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
