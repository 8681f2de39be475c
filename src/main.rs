use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;

use repair_desk::cli::{self, Command};
use repair_desk::config::Paths;
use repair_desk::record::{RecordPatch, RecordTable, ServiceRecord};
use repair_desk::report::{self, ReportKind};
use repair_desk::stats;
use repair_desk::store::RecordStore;
use repair_desk::ui;
use repair_desk::StoreError;

fn main() {
    env_logger::init();

    let args = cli::CliArgs::parse_args();
    let paths = Paths::resolve(args.data_file.clone());
    let store = RecordStore::new(paths.data_file.clone(), paths.archive_dir.clone());

    let result = match args.command {
        Command::List { filter, limit } => cmd_list(&store, &filter, limit),
        Command::Add {
            customer,
            item,
            serial,
            part_number,
            warranty,
            status,
            date_in,
            service_date,
            date_out,
            problem,
            location,
        } => cmd_add(
            &store,
            ServiceRecord {
                no: 0,
                customer,
                item,
                serial,
                part_number,
                warranty,
                status,
                date_in,
                service_date,
                date_out,
                problem,
                location,
            },
        ),
        Command::Update {
            index,
            customer,
            item,
            serial,
            part_number,
            warranty,
            status,
            date_in,
            service_date,
            date_out,
            problem,
            location,
        } => cmd_update(
            &store,
            index,
            RecordPatch {
                customer,
                item,
                serial,
                part_number,
                warranty,
                status,
                date_in: date_in.map(Some),
                service_date: service_date.map(Some),
                date_out: date_out.map(Some),
                problem,
                location,
            },
        ),
        Command::Stats { top, json } => cmd_stats(&store, top, json),
        Command::Export { filter, output } => cmd_export(&store, &paths, &filter, output),
        Command::Report { kind, output } => cmd_report(&store, &paths, kind, output),
        Command::Import { input, confirm, preview } => cmd_import(&store, &input, confirm, preview),
    };

    if let Err(e) = result {
        ui::print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn load_or_empty(store: &RecordStore) -> Result<RecordTable, StoreError> {
    Ok(store.load()?.unwrap_or_default())
}

fn cmd_list(store: &RecordStore, filter: &cli::FilterArgs, limit: usize) -> Result<(), StoreError> {
    let table = load_or_empty(store)?;
    let filtered = table.filtered(&filter.to_filter());
    let shown = filtered.records().iter().take(limit).cloned().collect::<Vec<_>>();
    ui::print_record_table(&shown);
    if filtered.len() > shown.len() {
        println!("... and {} more (use --limit to show them)", filtered.len() - shown.len());
    }
    println!("{} of {} records", filtered.len(), table.len());
    Ok(())
}

fn cmd_add(store: &RecordStore, record: ServiceRecord) -> Result<(), StoreError> {
    let assigned = store.insert(record)?;
    ui::print_success(&format!("Added record #{}", assigned));
    Ok(())
}

fn cmd_update(store: &RecordStore, index: usize, patch: RecordPatch) -> Result<(), StoreError> {
    if patch.is_empty() {
        ui::print_warning("No fields given; nothing to update");
        return Ok(());
    }
    store.update(index, &patch)?;
    ui::print_success(&format!("Updated record at index {}", index));
    Ok(())
}

fn cmd_stats(store: &RecordStore, top: usize, json: bool) -> Result<(), StoreError> {
    let table = store.load()?;
    let dashboard = stats::dashboard_statistics(table.as_ref(), top);

    if json {
        let rendered = serde_json::to_string_pretty(&dashboard)
            .map_err(|e| StoreError::Render(e.to_string()))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("Total units in: {}", dashboard.total_units_in);
    println!();
    println!("Top models:");
    for (i, entry) in dashboard.top_models.iter().enumerate() {
        println!("  {}. {}: {}", i + 1, entry.value, entry.count);
    }
    println!("Top customers:");
    for (i, entry) in dashboard.top_customers.iter().enumerate() {
        println!("  {}. {}: {}", i + 1, entry.value, entry.count);
    }
    println!();
    println!("Daily intake (last {} days):", stats::DAILY_WINDOW);
    for (label, count) in &dashboard.units_in_trend.daily {
        println!("  {}  {}", label, count);
    }
    Ok(())
}

fn cmd_export(
    store: &RecordStore,
    paths: &Paths,
    filter: &cli::FilterArgs,
    output: Option<PathBuf>,
) -> Result<(), StoreError> {
    let table = load_or_empty(store)?;
    let filtered = table.filtered(&filter.to_filter());
    let bytes = store.export_snapshot(&filtered)?;

    let dest = match output {
        Some(path) => path,
        None => {
            fs::create_dir_all(&paths.export_dir)?;
            paths.export_dir.join(format!("service_report_{}.xlsx", Local::now().format("%Y%m%d")))
        }
    };
    fs::write(&dest, bytes)?;
    info!("Exported {} records", filtered.len());
    ui::print_success(&format!("Exported {} records to {}", filtered.len(), dest.display()));
    Ok(())
}

fn cmd_report(
    store: &RecordStore,
    paths: &Paths,
    kind: ReportKind,
    output: Option<PathBuf>,
) -> Result<(), StoreError> {
    let table = load_or_empty(store)?;
    let bytes = report::generate_pdf(&table, kind, Local::now().naive_local())?;

    let dest = match output {
        Some(path) => path,
        None => {
            fs::create_dir_all(&paths.export_dir)?;
            paths.export_dir.join(format!(
                "service_report_{}_{}.pdf",
                kind.slug(),
                Local::now().format("%Y%m%d_%H%M%S")
            ))
        }
    };
    fs::write(&dest, bytes)?;
    ui::print_success(&format!("Wrote {} report to {}", kind.slug(), dest.display()));
    Ok(())
}

fn cmd_import(store: &RecordStore, input: &Path, confirm: bool, preview: usize) -> Result<(), StoreError> {
    let sample = store.import_preview(input, preview)?;
    println!("Preview of {}:", input.display());
    ui::print_record_table(sample.records());

    if !confirm {
        ui::print_warning("Dry run only; pass --confirm to replace the current table");
        return Ok(());
    }

    let count = store.import_replace(input)?;
    ui::print_success(&format!("Imported {} records (previous file archived)", count));
    Ok(())
}
