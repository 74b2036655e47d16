use crate::domain::OrderRecord;

pub const DEFAULT_CITY_DELIMITER: char = ',';
pub const DEFAULT_CITY_SEGMENT: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRule {
    pub prefer_city_column: bool,
    pub delimiter: char,
    pub segment: i32,
}

impl Default for CityRule {
    fn default() -> Self {
        Self {
            prefer_city_column: true,
            delimiter: DEFAULT_CITY_DELIMITER,
            segment: DEFAULT_CITY_SEGMENT,
        }
    }
}

impl CityRule {
    pub fn address_only(delimiter: char, segment: i32) -> Self {
        Self {
            prefer_city_column: false,
            delimiter,
            segment,
        }
    }

    pub fn extract(&self, order: &OrderRecord) -> Option<String> {
        if self.prefer_city_column {
            if let Some(city) = order.city.as_deref().map(str::trim) {
                if !city.is_empty() {
                    return Some(city.to_string());
                }
            }
        }
        self.address_segment(&order.delivery_address)
    }

    pub fn address_segment(&self, address: &str) -> Option<String> {
        let segments: Vec<&str> = address.split(self.delimiter).collect();
        let index = if self.segment >= 0 {
            usize::try_from(self.segment).ok()?
        } else {
            let back = usize::try_from(self.segment.unsigned_abs()).ok()?;
            segments.len().checked_sub(back)?
        };

        let value = segments.get(index)?.trim();
        if value.is_empty() {
            return None;
        }
        Some(value.to_string())
    }
}

// `orders` must be chronological: ties go to the city seen first.
pub fn primary_city<'a, I>(rule: &CityRule, orders: I) -> Option<String>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut tally: Vec<(String, String, usize)> = Vec::new();
    for order in orders {
        let Some(city) = rule.extract(order) else {
            continue;
        };
        let folded = city.to_lowercase();
        match tally.iter_mut().find(|(seen, _, _)| *seen == folded) {
            Some((_, _, count)) => *count += 1,
            None => tally.push((folded, city, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (_, display, count) in tally {
        match &best {
            Some((_, best_count)) if count <= *best_count => {}
            _ => best = Some((display, count)),
        }
    }
    best.map(|(city, _)| city)
}
