use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use anyhow::Result;
use clap::Args;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub phone: String,
}

#[derive(Debug, Serialize)]
struct SearchResultDto<'a> {
    page: usize,
    total_pages: usize,
    phone: &'a str,
}

pub fn search(ctx: &Context<'_>, args: SearchArgs) -> Result<()> {
    let query = args.phone.trim();
    if query.is_empty() {
        return Err(invalid_input("phone number cannot be empty"));
    }

    let catalog = ctx.catalog;
    let index = catalog
        .position_of_phone(query)
        .ok_or_else(|| not_found(format!("no matched customer with phone {query}")))?;
    let profile = &catalog.profiles()[index];
    let page = index + 1;

    if ctx.json {
        print_json(&SearchResultDto {
            page,
            total_pages: catalog.count(),
            phone: &profile.display_phone,
        })?;
    } else {
        println!("page {} of {}: {}", page, catalog.count(), profile.display_phone);
    }
    Ok(())
}
