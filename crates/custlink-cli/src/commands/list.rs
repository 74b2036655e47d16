use crate::commands::{print_json, Context};
use crate::util::{or_dash, round_cents};
use anyhow::Result;
use clap::Args;
use custlink_core::rules::ActivityStatus;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
}

#[derive(Debug, Serialize)]
struct ListItemDto<'a> {
    page: usize,
    phone: &'a str,
    customer_name: Option<&'a str>,
    total_orders: usize,
    average_order_value: f64,
    primary_city: Option<&'a str>,
    activity_status: ActivityStatus,
}

pub fn list_profiles(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(usize::MAX);
    let items: Vec<ListItemDto<'_>> = ctx
        .catalog
        .iter()
        .enumerate()
        .skip(args.offset)
        .take(limit)
        .map(|(index, profile)| ListItemDto {
            page: index + 1,
            phone: &profile.display_phone,
            customer_name: profile.customer_name.as_deref(),
            total_orders: profile.summary.total_orders,
            average_order_value: round_cents(profile.summary.average_order_value),
            primary_city: profile.summary.primary_city.as_deref(),
            activity_status: profile.summary.activity_status,
        })
        .collect();

    if ctx.json {
        return print_json(&items);
    }

    if ctx.catalog.is_empty() {
        println!("no phone numbers appear in both sources");
        return Ok(());
    }

    for item in items {
        println!(
            "{:>4}  {:<14}  {:<20}  {:>3} orders  {:<14}  {}",
            item.page,
            item.phone,
            or_dash(item.customer_name),
            item.total_orders,
            or_dash(item.primary_city),
            item.activity_status.as_str()
        );
    }
    Ok(())
}
