use custlink_core::rules::CityRule;
use custlink_core::{
    normalize_phone, Catalog, CatalogOptions, ContactRecord, CoreError, OrderRecord, RawRow,
};

const DAY: i64 = 86_400;
const T0: i64 = 1_704_067_200; // 2024-01-01T00:00:00Z

fn address_city_options() -> CatalogOptions {
    let mut options = CatalogOptions::default();
    options.policy.city = CityRule::address_only(',', 0);
    options
}

fn sample_contacts() -> Vec<ContactRecord> {
    vec![
        ContactRecord::new(0, "06364682957"),
        ContactRecord::new(1, "+91 98450 12345"),
        ContactRecord::new(2, ""),
        ContactRecord::new(3, "7000000000"),
    ]
}

fn sample_orders() -> Vec<OrderRecord> {
    vec![
        OrderRecord::new(0, "6364682957", 200.0)
            .at(T0)
            .delivered_to("City A, Lane 1"),
        OrderRecord::new(1, "9845012345", 90.0)
            .at(T0 + DAY)
            .delivered_to("City B, Lane 2"),
        OrderRecord::new(2, "6364682957", 300.0)
            .at(T0 + 2 * DAY)
            .delivered_to("City A, Lane 3"),
        OrderRecord::new(3, "", 55.0).at(T0),
        OrderRecord::new(4, "8888888888", 40.0).at(T0),
    ]
}

#[test]
fn sdr_and_zomato_scenario_builds_one_profile_per_shared_phone() {
    let catalog = Catalog::build(
        sample_contacts(),
        sample_orders(),
        T0 + 3 * DAY,
        &address_city_options(),
    )
    .expect("build catalog");

    assert_eq!(catalog.count(), 2);
    let profile = catalog
        .iter()
        .find(|profile| profile.key == normalize_phone("6364682957"))
        .expect("profile for 6364682957");
    assert_eq!(profile.summary.total_orders, 2);
    assert_eq!(profile.summary.average_order_value, 250.0);
    assert_eq!(profile.summary.primary_city.as_deref(), Some("City A"));

    let stats = catalog.stats();
    assert_eq!(stats.sdr_rows, 4);
    assert_eq!(stats.order_rows, 5);
    assert_eq!(stats.sdr_unmatchable, 1);
    assert_eq!(stats.order_unmatchable, 1);
    assert_eq!(stats.matched, 2);
}

#[test]
fn every_profile_is_backed_by_both_sources() {
    let contacts = sample_contacts();
    let orders = sample_orders();
    let catalog = Catalog::build(
        contacts.clone(),
        orders.clone(),
        T0,
        &CatalogOptions::default(),
    )
    .expect("build catalog");

    for profile in &catalog {
        assert!(profile.summary.total_orders >= 1);
        assert!(!profile.key.is_empty());
        assert!(contacts
            .iter()
            .any(|contact| normalize_phone(&contact.phone) == profile.key));

        let mut expected: Vec<usize> = orders
            .iter()
            .filter(|order| normalize_phone(&order.phone) == profile.key)
            .map(|order| order.row)
            .collect();
        let mut actual: Vec<usize> = profile.orders.iter().map(|order| order.row).collect();
        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(actual, expected);
        assert_eq!(profile.summary.total_orders, expected.len());
    }
}

#[test]
fn building_twice_gives_identical_catalogs() {
    let options = CatalogOptions::default();
    let first = Catalog::build(sample_contacts(), sample_orders(), T0, &options).expect("first");
    let second = Catalog::build(sample_contacts(), sample_orders(), T0, &options).expect("second");

    assert_eq!(first.count(), second.count());
    for index in 0..first.count() as i64 {
        assert_eq!(first.get(index).unwrap(), second.get(index).unwrap());
    }
    assert_eq!(first, second);
}

#[test]
fn pages_follow_key_string_order_not_numeric_order() {
    let catalog = Catalog::build(
        vec![ContactRecord::new(0, "99"), ContactRecord::new(1, "100")],
        vec![
            OrderRecord::new(0, "99", 10.0).at(T0),
            OrderRecord::new(1, "100", 20.0).at(T0),
        ],
        T0,
        &CatalogOptions::default(),
    )
    .expect("build catalog");

    let keys: Vec<&str> = catalog.iter().map(|profile| profile.key.as_str()).collect();
    assert_eq!(keys, vec!["100", "99"]);
    assert_eq!(catalog.page(1).expect("first page").key.as_str(), "100");
    assert_eq!(catalog.position_of_phone("99"), Some(1));
}

#[test]
fn index_bounds_are_enforced() {
    let catalog = Catalog::build(sample_contacts(), sample_orders(), T0, &CatalogOptions::default())
        .expect("build catalog");
    let count = catalog.count() as i64;

    assert!(matches!(
        catalog.get(-1),
        Err(CoreError::IndexOutOfRange { index: -1, .. })
    ));
    assert!(matches!(
        catalog.get(count),
        Err(CoreError::IndexOutOfRange { .. })
    ));
    assert!(catalog.get(count - 1).is_ok());
}

#[test]
fn disjoint_sources_give_an_empty_catalog() {
    let catalog = Catalog::build(
        vec![ContactRecord::new(0, "9999999999")],
        vec![OrderRecord::new(0, "8888888888", 10.0).at(T0)],
        T0,
        &CatalogOptions::default(),
    )
    .expect("build catalog");

    assert_eq!(catalog.count(), 0);
    assert!(catalog.is_empty());
    assert!(catalog.get(0).is_err());
}

#[test]
fn empty_phones_never_join_each_other() {
    let catalog = Catalog::build(
        vec![ContactRecord::new(0, ""), ContactRecord::new(1, "----")],
        vec![OrderRecord::new(0, "", 10.0), OrderRecord::new(1, "n/a", 10.0)],
        T0,
        &CatalogOptions::default(),
    )
    .expect("build catalog");
    assert_eq!(catalog.count(), 0);
    assert_eq!(catalog.stats().sdr_unmatchable, 2);
    assert_eq!(catalog.stats().order_unmatchable, 2);
}

#[test]
fn from_rows_uses_sheet_headers_and_keeps_warnings() {
    let sdr_rows: Vec<RawRow> = vec![[
        ("MOBILE NO", "06364682957"),
        ("FIRST NAME", "Asha"),
        ("PRESENT ADDRESS", "12 Temple Rd"),
    ]
    .into_iter()
    .collect()];
    let order_rows: Vec<RawRow> = vec![
        [
            ("user_phone_number", "6364682957.0"),
            ("restaurant_name", "Dosa Corner"),
            ("order_value", "₹200"),
            ("order_time", "2024-01-01 12:00"),
            ("delivery_address", "Lane 1, Mysuru"),
            ("city_name", "Mysuru"),
        ]
        .into_iter()
        .collect(),
        [
            ("user_phone_number", "916364682957"),
            ("restaurant_name", "Idli House"),
            ("order_value", "300"),
            ("order_time", "not a time"),
            ("delivery_address", "Lane 2, Mysuru"),
            ("city_name", "Mysuru"),
        ]
        .into_iter()
        .collect(),
    ];

    let catalog = Catalog::from_rows(&sdr_rows, &order_rows, T0, &CatalogOptions::default())
        .expect("build catalog");
    assert_eq!(catalog.count(), 1);

    let profile = catalog.page(1).expect("first page");
    assert_eq!(profile.customer_name.as_deref(), Some("Asha"));
    assert_eq!(profile.summary.total_orders, 2);
    assert_eq!(profile.summary.total_order_value, 500.0);
    assert_eq!(profile.summary.primary_city.as_deref(), Some("Mysuru"));
    assert_eq!(profile.orders[1].order_time_raw, "not a time");
    assert_eq!(catalog.stats().warnings.len(), 1);
}
