//! `ipprov hardcoded` - Addresses reached without a DNS lookup.

use anyhow::{Context as _, Result};
use colored::Colorize;
use ipprov_core::{read_observed, read_resolved, reconcile_report, IgnoreList, ReconcileReport};
use std::io::{self, Write};

use super::{open_input, Context};
use crate::cli::args::HardcodedArgs;
use crate::output::{print_structured, OutputFormat};

pub fn execute(ctx: &Context, args: HardcodedArgs) -> Result<()> {
    let resolved = read_resolved(open_input(&args.dns_log)?)
        .with_context(|| format!("failed to read DNS log {}", args.dns_log.display()))?;
    let observed = read_observed(open_input(&args.connections_log)?).with_context(|| {
        format!(
            "failed to read connection log {}",
            args.connections_log.display()
        )
    })?;

    let mut ignore = if args.no_default_ignore {
        IgnoreList::empty()
    } else {
        ctx.config.ignore_list()
    };
    ignore.extend(args.ignore);

    let report = reconcile_report(&observed, &resolved, &ignore);

    match ctx.format_or(OutputFormat::Pretty) {
        format if format.is_structured() => print_structured(format, &report)?,
        OutputFormat::Csv => write_csv(&report, io::stdout().lock())?,
        _ => print_pretty(&report, &ignore, ctx.verbose),
    }

    Ok(())
}

fn print_pretty(report: &ReconcileReport, ignore: &IgnoreList, verbose: bool) {
    if report.hardcoded.is_empty() {
        println!("{}", "No hard-coded IPs detected after filtering.".green());
    } else {
        println!("{}", "Hard-coded IPs (filtered):".bold());
        for addr in &report.hardcoded {
            println!("{}", addr.to_string().cyan());
        }
    }

    if verbose {
        let excluded = &report.excluded;
        println!();
        println!(
            "{}",
            format!(
                "{} observed, {} resolved, {} unresolved; excluded {} unspecified, {} multicast, {} reserved, {} private, {} ignored",
                report.observed,
                report.resolved,
                report.unresolved,
                excluded.unspecified,
                excluded.multicast,
                excluded.reserved,
                excluded.private,
                excluded.ignored
            )
            .dimmed()
        );
        if !ignore.is_empty() {
            let entries: Vec<String> = ignore.sorted().iter().map(ToString::to_string).collect();
            println!("{}", format!("ignore list: {}", entries.join(", ")).dimmed());
        }
    }
}

fn write_csv<W: Write>(report: &ReconcileReport, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["ip"])?;
    for addr in &report.hardcoded {
        writer.write_record([addr.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
