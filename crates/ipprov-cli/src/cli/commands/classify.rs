//! `ipprov classify` - PTR/WHOIS attribution and BPF filter generation.

use anyhow::{Context as _, Result};
use colored::Colorize;
use ipprov_core::{read_address_list, Address};
use ipprov_recon::attribution::CSV_HEADER;
use ipprov_recon::{attribute, attribute_with, Attribution, AttributionRecord, FilterExpression, SuffixRule};
use serde::Serialize;
use std::io::{self, Write};
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, info};

use super::{open_input, Context};
use crate::cli::args::ClassifyArgs;
use crate::output::{print_structured, OutputFormat};

/// Structured result of a classify run.
#[derive(Debug, Serialize)]
struct ClassifyOutput<'a> {
    suffix: &'a SuffixRule,
    records: &'a [AttributionRecord],
    matched: &'a [Address],
    filter: &'a str,
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "PTR")]
    ptr: String,
    #[tabled(rename = "Org")]
    org: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Match")]
    matched: String,
}

pub async fn execute(ctx: &Context, args: ClassifyArgs) -> Result<()> {
    let suffix = args.suffix.as_deref().unwrap_or(&ctx.config.suffix);
    let rule = SuffixRule::new(suffix)?;

    let addresses = read_address_list(open_input(&args.ips_file)?)
        .with_context(|| format!("failed to read {}", args.ips_file.display()))?;
    let lookup = ctx.config.lookup_service();
    let format = ctx.format_or(OutputFormat::Csv);
    debug!(addresses = addresses.len(), suffix = %rule, ?format, "classifying");

    let result = if format == OutputFormat::Csv {
        stream_csv(&addresses, &rule, &lookup, io::stdout().lock()).await?
    } else {
        attribute(&addresses, &rule, &lookup).await
    };

    let filter = FilterExpression::from_matches(&result.matched);
    filter
        .write_to(&args.bpf_file)
        .with_context(|| format!("failed to write {}", args.bpf_file.display()))?;
    info!(path = %args.bpf_file.display(), matched = result.matched.len(), "filter file rewritten");

    match format {
        format if format.is_structured() => print_structured(
            format,
            &ClassifyOutput {
                suffix: &rule,
                records: &result.records,
                matched: &result.matched,
                filter: filter.as_str(),
            },
        )?,
        OutputFormat::Pretty => print_pretty(&result, &rule, &filter),
        OutputFormat::Csv | OutputFormat::Json | OutputFormat::Yaml => {}
    }

    Ok(())
}

/// Write each row as soon as its lookups finish, so an interrupted run keeps
/// the rows already produced.
async fn stream_csv<W: Write>(
    addresses: &[Address],
    rule: &SuffixRule,
    lookup: &ipprov_recon::CommandLookup,
    out: W,
) -> Result<Attribution> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    writer.flush()?;

    let result = attribute_with(addresses, rule, lookup, |record| -> csv::Result<()> {
        writer.write_record(record.csv_fields())?;
        writer.flush()?;
        Ok(())
    })
    .await?;

    Ok(result)
}

fn print_pretty(result: &Attribution, rule: &SuffixRule, filter: &FilterExpression) {
    if result.records.is_empty() {
        println!("No addresses to classify.");
    } else {
        let rows = result.records.iter().map(|record| Row {
            ip: record.address.to_string(),
            ptr: record.ptr_names().join("\n"),
            org: record.organization().to_string(),
            net: record.network().to_string(),
            matched: if record.matches(rule) { "yes" } else { "" }.to_string(),
        });
        println!("{}", Table::new(rows).with(Style::rounded()));
    }

    println!();
    if filter.is_empty() {
        println!("{} no PTR names end with {}", "Filter:".bold(), rule.to_string().cyan());
    } else {
        println!("{} {}", "Filter:".bold(), filter.as_str().green());
    }
}
