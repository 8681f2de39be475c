/// Tests for record types, filters, and patches
#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::record::{RecordFilter, RecordPatch, RepairStatus, ServiceRecord, WarrantyStatus};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn record() -> ServiceRecord {
        ServiceRecord {
            no: 7,
            customer: "Acme Industrial".to_string(),
            item: "X100".to_string(),
            serial: "SN-0042".to_string(),
            part_number: String::new(),
            warranty: WarrantyStatus::Registered,
            status: RepairStatus::InRepair,
            date_in: NaiveDate::from_ymd_opt(2024, 1, 15),
            service_date: None,
            date_out: None,
            problem: "No display output".to_string(),
            location: "Main workshop".to_string(),
        }
    }

    #[test]
    fn test_status_enums_roundtrip_their_labels() {
        for warranty in WarrantyStatus::ALL {
            assert_eq!(WarrantyStatus::from_str(warranty.as_str()).unwrap(), warranty);
        }
        for status in RepairStatus::ALL {
            assert_eq!(RepairStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_values_are_rejected() {
        assert!(matches!(WarrantyStatus::from_str("Maybe"), Err(StoreError::Validation(_))));
        assert!(matches!(RepairStatus::from_str("Pending"), Err(StoreError::Validation(_))));
        // Close-but-wrong labels must not slip through.
        assert!(RepairStatus::from_str("InRepair").is_err());
        assert!(WarrantyStatus::from_str("yes").is_err());
    }

    #[test]
    fn test_validate_requires_core_fields() {
        assert!(record().validate().is_ok());
        for wipe in [
            |r: &mut ServiceRecord| r.customer.clear(),
            |r: &mut ServiceRecord| r.item.clear(),
            |r: &mut ServiceRecord| r.serial.clear(),
            |r: &mut ServiceRecord| r.problem = "  ".to_string(),
        ] {
            let mut r = record();
            wipe(&mut r);
            assert!(matches!(r.validate(), Err(StoreError::Validation(_))));
        }
        // Part number and location stay optional.
        let mut r = record();
        r.part_number.clear();
        r.location.clear();
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_patch_overwrites_only_supplied_fields() {
        let mut r = record();
        let patch = RecordPatch {
            status: Some(RepairStatus::Done),
            service_date: Some(NaiveDate::from_ymd_opt(2024, 1, 20)),
            ..RecordPatch::default()
        };
        patch.apply(&mut r);

        assert_eq!(r.status, RepairStatus::Done);
        assert_eq!(r.service_date, NaiveDate::from_ymd_opt(2024, 1, 20));
        assert_eq!(r.customer, "Acme Industrial");
        assert_eq!(r.no, 7, "patches never renumber");
    }

    #[test]
    fn test_patch_can_clear_a_date() {
        let mut r = record();
        let patch = RecordPatch { date_in: Some(None), ..RecordPatch::default() };
        patch.apply(&mut r);
        assert_eq!(r.date_in, None);
    }

    #[test]
    fn test_empty_patch_is_detectable() {
        assert!(RecordPatch::default().is_empty());
        let patch = RecordPatch { item: Some("Y200".to_string()), ..RecordPatch::default() };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_filter_text_match_is_case_insensitive_substring() {
        let filter = RecordFilter { customer: Some("acme".to_string()), ..RecordFilter::default() };
        assert!(filter.matches(&record()));
        let filter = RecordFilter { customer: Some("Globex".to_string()), ..RecordFilter::default() };
        assert!(!filter.matches(&record()));
    }

    #[test]
    fn test_filter_date_range_excludes_missing_date_in() {
        let filter = RecordFilter {
            date_in_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            date_in_to: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..RecordFilter::default()
        };
        assert!(filter.matches(&record()));

        let mut no_date = record();
        no_date.date_in = None;
        assert!(!filter.matches(&no_date));

        let mut later = record();
        later.date_in = NaiveDate::from_ymd_opt(2024, 2, 1);
        assert!(!filter.matches(&later));
    }

    #[test]
    fn test_filter_combines_criteria() {
        let filter = RecordFilter {
            item: Some("x1".to_string()),
            status: Some(RepairStatus::InRepair),
            ..RecordFilter::default()
        };
        assert!(filter.matches(&record()));

        let filter = RecordFilter {
            item: Some("x1".to_string()),
            status: Some(RepairStatus::Done),
            ..RecordFilter::default()
        };
        assert!(!filter.matches(&record()));
    }
}
