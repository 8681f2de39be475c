/// Tests for the statistics engine
#[cfg(test)]
mod tests {
    use crate::record::{RecordTable, RepairStatus, ServiceRecord, WarrantyStatus};
    use crate::stats::{
        DashboardStatistics, Granularity, GroupField, dashboard_statistics, distribution_by, top_n, trend,
    };
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn record(customer: &str, item: &str, date_in: Option<NaiveDate>) -> ServiceRecord {
        ServiceRecord {
            no: 0,
            customer: customer.to_string(),
            item: item.to_string(),
            serial: "SN".to_string(),
            part_number: String::new(),
            warranty: WarrantyStatus::No,
            status: RepairStatus::Received,
            date_in,
            service_date: None,
            date_out: None,
            problem: "p".to_string(),
            location: String::new(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_empty_dashboard_is_all_zero() {
        let stats = dashboard_statistics(None, 5);
        assert_eq!(stats.total_units_in, 0);
        assert!(stats.units_in_trend.daily.is_empty());
        assert!(stats.units_in_trend.weekly.is_empty());
        assert!(stats.units_in_trend.monthly.is_empty());
        assert!(stats.units_by_model.is_empty());
        assert!(stats.units_by_company.is_empty());
        assert!(stats.top_models.is_empty());
        assert!(stats.top_customers.is_empty());

        // Empty table and absent table produce the identical response.
        let empty = RecordTable::new();
        assert_eq!(dashboard_statistics(Some(&empty), 5), DashboardStatistics::default());
    }

    #[test]
    fn test_three_record_scenario() {
        let table = RecordTable::from_records(vec![
            record("Acme", "X100", day(2024, 1, 5)),
            record("Globex", "X100", day(2024, 1, 5)),
            record("Acme", "Y200", day(2024, 2, 10)),
        ]);

        let by_model = distribution_by(&table, GroupField::Model);
        assert_eq!(by_model.get("X100"), Some(&2));
        assert_eq!(by_model.get("Y200"), Some(&1));
        assert_eq!(by_model.len(), 2);

        let top_models = top_n(&table, GroupField::Model, 1);
        assert_eq!(top_models.len(), 1);
        assert_eq!(top_models[0].value, "X100");
        assert_eq!(top_models[0].count, 2);

        let monthly = trend(&table, Granularity::Monthly, 12);
        let expected: BTreeMap<String, u64> =
            [("2024-01".to_string(), 2), ("2024-02".to_string(), 1)].into_iter().collect();
        assert_eq!(monthly, expected);
    }

    #[test]
    fn test_trend_skips_missing_date_in() {
        let table = RecordTable::from_records(vec![
            record("Acme", "X100", day(2024, 1, 5)),
            record("Globex", "X100", None),
        ]);
        let daily = trend(&table, Granularity::Daily, 30);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily.get("2024-01-05"), Some(&1));
    }

    #[test]
    fn test_trend_window_keeps_most_recent_periods() {
        let mut records = Vec::new();
        for d in 1..=31 {
            records.push(record("Acme", "X100", day(2024, 1, d)));
        }
        let table = RecordTable::from_records(records);

        let daily = trend(&table, Granularity::Daily, 30);
        assert_eq!(daily.len(), 30);
        // The oldest day fell out of the window; order is ascending.
        assert!(!daily.contains_key("2024-01-01"));
        let labels: Vec<&String> = daily.keys().collect();
        assert_eq!(labels.first().map(|s| s.as_str()), Some("2024-01-02"));
        assert_eq!(labels.last().map(|s| s.as_str()), Some("2024-01-31"));
    }

    // Sunday-start convention: 2024-01-07 is the year's first Sunday, so
    // earlier days belong to week 00.
    #[test]
    fn test_weekly_label_before_first_sunday_is_week_zero() {
        assert_eq!(Granularity::Weekly.label(day(2024, 1, 3).unwrap()), "2024-W00");
        assert_eq!(Granularity::Weekly.label(day(2024, 1, 7).unwrap()), "2024-W01");
        assert_eq!(Granularity::Weekly.label(day(2024, 1, 13).unwrap()), "2024-W01");
        assert_eq!(Granularity::Weekly.label(day(2024, 1, 14).unwrap()), "2024-W02");
    }

    #[test]
    fn test_weekly_trend_groups_by_sunday_start_week() {
        let table = RecordTable::from_records(vec![
            record("Acme", "X100", day(2024, 1, 2)),
            record("Acme", "X100", day(2024, 1, 6)),
            record("Acme", "X100", day(2024, 1, 8)),
        ]);
        let weekly = trend(&table, Granularity::Weekly, 12);
        assert_eq!(weekly.get("2024-W00"), Some(&2));
        assert_eq!(weekly.get("2024-W01"), Some(&1));
    }

    #[test]
    fn test_top_n_bounds_and_ordering() {
        let mut records = Vec::new();
        for (customer, repeats) in [("A", 4), ("B", 2), ("C", 7), ("D", 1), ("E", 2), ("F", 3)] {
            for _ in 0..repeats {
                records.push(record(customer, "X100", None));
            }
        }
        let table = RecordTable::from_records(records);

        let top = top_n(&table, GroupField::Customer, 5);
        assert_eq!(top.len(), 5);
        // Counts are non-increasing.
        for pair in top.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
        // Every returned count >= every excluded count (only D with 1 is out).
        assert!(top.iter().all(|e| e.count >= 1));
        assert!(!top.iter().any(|e| e.value == "D"));
        assert_eq!(top[0].value, "C");
    }

    #[test]
    fn test_top_n_tie_break_is_first_encountered() {
        let table = RecordTable::from_records(vec![
            record("Beta", "X100", None),
            record("Alpha", "X100", None),
            record("Beta", "X100", None),
            record("Alpha", "X100", None),
        ]);
        let top = top_n(&table, GroupField::Customer, 2);
        // Both count 2; Beta appeared first in the table.
        assert_eq!(top[0].value, "Beta");
        assert_eq!(top[1].value, "Alpha");
    }

    #[test]
    fn test_distribution_counts_empty_values() {
        let table = RecordTable::from_records(vec![
            record("Acme", "", None),
            record("Acme", "X100", None),
        ]);
        let by_model = distribution_by(&table, GroupField::Model);
        assert_eq!(by_model.get(""), Some(&1));
        assert_eq!(by_model.get("X100"), Some(&1));
    }

    #[test]
    fn test_dashboard_uses_requested_top_n() {
        let table = RecordTable::from_records(vec![
            record("A", "X", None),
            record("B", "Y", None),
            record("C", "Z", None),
        ]);
        let stats = dashboard_statistics(Some(&table), 2);
        assert_eq!(stats.total_units_in, 3);
        assert_eq!(stats.top_models.len(), 2);
        assert_eq!(stats.top_customers.len(), 2);
        assert_eq!(stats.units_by_model.len(), 3);
    }
}
