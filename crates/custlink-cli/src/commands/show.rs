use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::{format_amount, format_optional_datetime, or_dash};
use anyhow::Result;
use chrono::FixedOffset;
use clap::Args;
use custlink_core::time::format_timestamp_datetime;
use custlink_core::{CoreError, CustomerProfile, OrderRecord};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// 1-based page number
    #[arg(allow_negative_numbers = true)]
    pub page: i64,
}

#[derive(Debug, Serialize)]
struct ProfilePageDto<'a> {
    page: i64,
    total_pages: usize,
    profile: &'a CustomerProfile,
}

pub fn show_profile(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let catalog = ctx.catalog;
    if catalog.is_empty() {
        return Err(not_found("no phone numbers appear in both sources"));
    }

    let profile = catalog.page(args.page).map_err(|err| match err {
        CoreError::PageOutOfRange { page, count } => {
            not_found(format!("page {page} does not exist (1..={count})"))
        }
        other => other.into(),
    })?;

    if ctx.json {
        return print_json(&ProfilePageDto {
            page: args.page,
            total_pages: catalog.count(),
            profile,
        });
    }

    let offset = ctx.config.catalog.utc_offset;
    print!(
        "{}",
        render_profile(profile, args.page, catalog.count(), offset)
    );
    Ok(())
}

fn render_profile(
    profile: &CustomerProfile,
    page: i64,
    total_pages: usize,
    offset: FixedOffset,
) -> String {
    let summary = &profile.summary;
    let mut out = String::new();
    out.push_str(&format!("customer {page} of {total_pages}\n"));
    out.push_str(&format!("phone: {}\n", profile.display_phone));
    out.push_str(&format!(
        "name: {}\n",
        or_dash(profile.customer_name.as_deref())
    ));
    out.push_str(&format!(
        "status: {} (last order {})\n",
        summary.activity_status.as_str(),
        format_optional_datetime(summary.last_order_at, offset)
    ));
    out.push_str(&format!(
        "orders: {}, total {}, average {}\n",
        summary.total_orders,
        format_amount(summary.total_order_value),
        format_amount(summary.average_order_value)
    ));
    out.push_str(&format!(
        "primary city: {}\n",
        or_dash(summary.primary_city.as_deref())
    ));

    out.push_str("\nsdr records:\n");
    for contact in &profile.contacts {
        out.push_str(&format!("  row {}\n", contact.row));
        out.push_str(&format!(
            "    present address: {}\n",
            or_dash(contact.present_address.as_deref())
        ));
        out.push_str(&format!(
            "    permanent address: {}\n",
            or_dash(contact.permanent_address.as_deref())
        ));
        out.push_str(&format!(
            "    alternate number: {}\n",
            or_dash(contact.alt_number.as_deref())
        ));
        for (field, value) in &contact.extra {
            out.push_str(&format!("    {field}: {value}\n"));
        }
    }

    out.push_str("\norders:\n");
    for order in &profile.orders {
        out.push_str(&render_order(order, offset));
    }
    out
}

fn render_order(order: &OrderRecord, offset: FixedOffset) -> String {
    let when = match order.ordered_at {
        Some(ts) => format_timestamp_datetime(ts, offset),
        None => or_dash(Some(order.order_time_raw.as_str())).to_string(),
    };
    let mut line = format!(
        "  {}  {}  {}\n      {}",
        when,
        or_dash(Some(order.restaurant.as_str())),
        format_amount(order.order_value),
        or_dash(Some(order.delivery_address.as_str()))
    );
    if let (Some(lat), Some(lon)) = (order.latitude, order.longitude) {
        line.push_str(&format!(" ({lat:.5}, {lon:.5})"));
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::render_profile;
    use custlink_core::time::utc;
    use custlink_core::{normalize_phone, Catalog, CatalogOptions, ContactRecord, OrderRecord};

    #[test]
    fn render_profile_lists_contacts_and_orders() {
        let mut contact = ContactRecord::new(0, "06364682957");
        contact.name = Some("Asha".to_string());
        contact
            .extra
            .insert("DISTRICT".to_string(), "Mysuru".to_string());
        let mut order = OrderRecord::new(0, "6364682957", 200.0)
            .at(1_704_110_400)
            .delivered_to("Lane 1, Mysuru");
        order.restaurant = "Dosa Corner".to_string();
        order.latitude = Some(12.3);
        order.longitude = Some(76.6);

        let catalog = Catalog::build(
            vec![contact],
            vec![order],
            1_704_110_400,
            &CatalogOptions::default(),
        )
        .unwrap();
        let profile = catalog.page(1).unwrap();
        assert_eq!(profile.key, normalize_phone("6364682957"));

        let text = render_profile(profile, 1, catalog.count(), utc());
        assert!(text.contains("customer 1 of 1"));
        assert!(text.contains("phone: +916364682957"));
        assert!(text.contains("name: Asha"));
        assert!(text.contains("status: active (last order 2024-01-01 12:00)"));
        assert!(text.contains("primary city: Mysuru"));
        assert!(text.contains("DISTRICT: Mysuru"));
        assert!(text.contains("2024-01-01 12:00  Dosa Corner  ₹200.00"));
        assert!(text.contains("(12.30000, 76.60000)"));
    }
}
