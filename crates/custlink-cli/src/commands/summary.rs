use crate::commands::{print_json, Context};
use crate::util::format_optional_datetime;
use anyhow::Result;
use custlink_core::BuildStats;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SummaryDto<'a> {
    profiles: usize,
    built_at: i64,
    stats: &'a BuildStats,
}

pub fn summary(ctx: &Context<'_>) -> Result<()> {
    let catalog = ctx.catalog;
    let stats = catalog.stats();

    if ctx.json {
        return print_json(&SummaryDto {
            profiles: catalog.count(),
            built_at: catalog.built_at(),
            stats,
        });
    }

    let offset = ctx.config.catalog.utc_offset;
    println!(
        "as of {}",
        format_optional_datetime(Some(catalog.built_at()), offset)
    );
    println!(
        "sdr rows: {} ({} distinct phones, {} unusable)",
        stats.sdr_rows, stats.sdr_keys, stats.sdr_unmatchable
    );
    println!(
        "order rows: {} ({} distinct phones, {} unusable)",
        stats.order_rows, stats.order_keys, stats.order_unmatchable
    );
    if catalog.is_empty() {
        println!("no phone numbers appear in both sources");
    } else {
        println!("matched customers: {}", catalog.count());
    }
    if !stats.warnings.is_empty() {
        println!("row warnings: {} (run with --verbose for details)", stats.warnings.len());
    }
    Ok(())
}
