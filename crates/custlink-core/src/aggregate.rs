use crate::domain::{ContactRecord, CustomerProfile, OrderRecord, PhoneKey, PhoneRule, SummaryMetrics};
use crate::error::{CoreError, MissingSide};
use crate::rules::{primary_city, ActivityPolicy, CityRule};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatePolicy {
    pub phone: PhoneRule,
    pub city: CityRule,
    pub activity: ActivityPolicy,
}

pub fn aggregate(
    key: PhoneKey,
    contacts: Vec<ContactRecord>,
    mut orders: Vec<OrderRecord>,
    now_utc: i64,
    policy: &AggregatePolicy,
) -> Result<CustomerProfile, CoreError> {
    if contacts.is_empty() {
        return Err(CoreError::AggregationInvariant {
            key,
            missing: MissingSide::Contact,
        });
    }
    if orders.is_empty() {
        return Err(CoreError::AggregationInvariant {
            key,
            missing: MissingSide::Order,
        });
    }

    sort_chronologically(&mut orders);

    let total_orders = orders.len();
    let total_order_value: f64 = orders.iter().map(|order| order.order_value).sum();
    let first_order_at = orders.iter().filter_map(|order| order.ordered_at).min();
    let last_order_at = orders.iter().filter_map(|order| order.ordered_at).max();

    let summary = SummaryMetrics {
        total_orders,
        total_order_value,
        average_order_value: total_order_value / total_orders as f64,
        primary_city: primary_city(&policy.city, &orders),
        first_order_at,
        last_order_at,
        activity_status: policy.activity.classify(now_utc, last_order_at),
    };

    let customer_name = contacts
        .iter()
        .filter_map(|contact| contact.name.as_deref())
        .chain(orders.iter().filter_map(|order| order.customer_name.as_deref()))
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_string);

    Ok(CustomerProfile {
        display_phone: policy.phone.display(&key),
        key,
        customer_name,
        contacts,
        orders,
        summary,
    })
}

// Stable: undated orders keep their input order after every dated one.
fn sort_chronologically(orders: &mut [OrderRecord]) {
    orders.sort_by_key(|order| (order.ordered_at.is_none(), order.ordered_at));
}

#[cfg(test)]
mod tests {
    use super::{aggregate, AggregatePolicy};
    use crate::domain::{normalize_phone, ContactRecord, OrderRecord};
    use crate::error::{CoreError, MissingSide};
    use crate::rules::{ActivityPolicy, ActivityStatus, CityRule};

    const DAY: i64 = 86_400;
    const T0: i64 = 1_704_067_200; // 2024-01-01T00:00:00Z

    fn policy() -> AggregatePolicy {
        AggregatePolicy {
            city: CityRule::address_only(',', 0),
            activity: ActivityPolicy::new(30).unwrap(),
            ..AggregatePolicy::default()
        }
    }

    fn order(row: usize, value: f64, at: i64, address: &str) -> OrderRecord {
        OrderRecord::new(row, "6364682957", value)
            .at(at)
            .delivered_to(address)
    }

    #[test]
    fn two_orders_in_one_city() {
        let key = normalize_phone("06364682957");
        let profile = aggregate(
            key.clone(),
            vec![ContactRecord::new(0, "06364682957")],
            vec![
                order(0, 200.0, T0, "City A, Sector 4"),
                order(1, 300.0, T0 + DAY, "City A, Sector 9"),
            ],
            T0 + 2 * DAY,
            &policy(),
        )
        .unwrap();

        assert_eq!(profile.key, key);
        assert_eq!(profile.display_phone, "+916364682957");
        assert_eq!(profile.summary.total_orders, 2);
        assert_eq!(profile.summary.total_order_value, 500.0);
        assert_eq!(profile.summary.average_order_value, 250.0);
        assert_eq!(profile.summary.primary_city.as_deref(), Some("City A"));
        assert_eq!(profile.summary.first_order_at, Some(T0));
        assert_eq!(profile.summary.last_order_at, Some(T0 + DAY));
        assert_eq!(profile.summary.activity_status, ActivityStatus::Active);
    }

    #[test]
    fn city_tie_goes_to_earliest_order() {
        let profile = aggregate(
            normalize_phone("6364682957"),
            vec![ContactRecord::new(0, "6364682957")],
            vec![
                order(0, 100.0, T0 + 5 * DAY, "City B, Main St"),
                order(1, 100.0, T0, "City A, Main St"),
            ],
            T0,
            &policy(),
        )
        .unwrap();
        assert_eq!(profile.summary.primary_city.as_deref(), Some("City A"));
        let rows: Vec<usize> = profile.orders.iter().map(|order| order.row).collect();
        assert_eq!(rows, vec![1, 0]);
    }

    #[test]
    fn stale_history_is_inactive() {
        let profile = aggregate(
            normalize_phone("6364682957"),
            vec![ContactRecord::new(0, "6364682957")],
            vec![order(0, 100.0, T0, "City A")],
            T0 + 31 * DAY,
            &policy(),
        )
        .unwrap();
        assert_eq!(profile.summary.activity_status, ActivityStatus::Inactive);
    }

    #[test]
    fn undated_orders_trail_dated_ones() {
        let undated = OrderRecord::new(0, "6364682957", 80.0).delivered_to("City C");
        let profile = aggregate(
            normalize_phone("6364682957"),
            vec![ContactRecord::new(0, "6364682957")],
            vec![undated, order(1, 120.0, T0, "City A")],
            T0,
            &policy(),
        )
        .unwrap();
        let rows: Vec<usize> = profile.orders.iter().map(|order| order.row).collect();
        assert_eq!(rows, vec![1, 0]);
        assert_eq!(profile.summary.average_order_value, 100.0);
        assert_eq!(profile.summary.first_order_at, Some(T0));
    }

    #[test]
    fn duplicate_contacts_are_kept_and_name_falls_back_to_orders() {
        let mut from_orders = order(0, 100.0, T0, "City A");
        from_orders.customer_name = Some("Asha K".to_string());
        let profile = aggregate(
            normalize_phone("6364682957"),
            vec![
                ContactRecord::new(3, "6364682957"),
                ContactRecord::new(9, "+91 6364682957"),
            ],
            vec![from_orders],
            T0,
            &policy(),
        )
        .unwrap();
        assert_eq!(profile.contacts.len(), 2);
        assert_eq!(profile.customer_name.as_deref(), Some("Asha K"));
    }

    #[test]
    fn sdr_name_wins_over_order_name() {
        let mut contact = ContactRecord::new(0, "6364682957");
        contact.name = Some("Asha".to_string());
        let mut from_orders = order(0, 100.0, T0, "City A");
        from_orders.customer_name = Some("Asha K".to_string());
        let profile = aggregate(
            normalize_phone("6364682957"),
            vec![contact],
            vec![from_orders],
            T0,
            &policy(),
        )
        .unwrap();
        assert_eq!(profile.customer_name.as_deref(), Some("Asha"));
    }

    #[test]
    fn empty_sides_violate_the_invariant() {
        let key = normalize_phone("6364682957");
        let err = aggregate(
            key.clone(),
            Vec::new(),
            vec![order(0, 1.0, T0, "City A")],
            T0,
            &policy(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::AggregationInvariant {
                key: key.clone(),
                missing: MissingSide::Contact,
            }
        );

        let err = aggregate(
            key.clone(),
            vec![ContactRecord::new(0, "6364682957")],
            Vec::new(),
            T0,
            &policy(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::AggregationInvariant {
                key,
                missing: MissingSide::Order,
            }
        );
    }
}
