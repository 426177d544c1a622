use summary_widget_core::errors::CoreError;
use summary_widget_core::models::chart::{ChartVariant, ValueFormat};
use summary_widget_core::models::record::{FieldValue, RawAmount, SummaryField, SummaryRecord};
use summary_widget_core::models::request::SummaryRequest;
use summary_widget_core::models::settings::WidgetSettings;
use summary_widget_core::models::summary::{FiscalYear, PeriodKind};

// ═══════════════════════════════════════════════════════════════════
//  SummaryRecord
// ═══════════════════════════════════════════════════════════════════

mod summary_record {
    use super::*;

    #[test]
    fn decodes_numbers_and_numeric_strings() {
        let json = r#"{
            "report_date": "2025-03-31",
            "curr_fyqtr_value": 12.5,
            "prev_fyqtr_value": "10.25",
            "curr_fyytd_value": "40",
            "prev_fyytd_value": 38,
            "prev_three_fy_avg_value": "7.5"
        }"#;
        let record: SummaryRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.report_date(), Some("2025-03-31"));
        assert_eq!(record.value(SummaryField::CurrFyQtr), FieldValue::Present(12.5));
        assert_eq!(record.value(SummaryField::PrevFyQtr), FieldValue::Present(10.25));
        assert_eq!(record.value(SummaryField::CurrFyYtd), FieldValue::Present(40.0));
        assert_eq!(record.value(SummaryField::PrevFyYtd), FieldValue::Present(38.0));
        assert_eq!(record.value(SummaryField::PrevThreeFyAvg), FieldValue::Present(7.5));
    }

    #[test]
    fn missing_and_null_fields_are_absent() {
        let json = r#"{ "curr_fyqtr_value": null }"#;
        let record: SummaryRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.report_date(), None);
        for field in SummaryField::ALL {
            assert_eq!(record.value(field), FieldValue::Absent, "{field}");
        }
    }

    #[test]
    fn garbage_values_do_not_fail_decoding() {
        let json = r#"{ "curr_fyqtr_value": "n/a", "prev_fyqtr_value": true }"#;
        let record: SummaryRecord = serde_json::from_str(json).unwrap();

        assert_eq!(
            record.value(SummaryField::CurrFyQtr),
            FieldValue::Malformed("n/a".into())
        );
        assert!(matches!(
            record.value(SummaryField::PrevFyQtr),
            FieldValue::Malformed(_)
        ));
    }

    #[test]
    fn blank_report_date_counts_as_missing() {
        let record = SummaryRecord::default().with_report_date("   ");
        assert_eq!(record.report_date(), None);
    }

    #[test]
    fn builder_sets_fields() {
        let record = SummaryRecord::default()
            .with(SummaryField::CurrFyYtd, 10.0)
            .with(SummaryField::PrevFyYtd, "4.5");

        assert_eq!(record.raw(SummaryField::CurrFyYtd), Some(&RawAmount::Number(10.0)));
        assert_eq!(record.value(SummaryField::PrevFyYtd).or_zero(), 4.5);
        assert_eq!(record.value(SummaryField::CurrFyQtr).or_zero(), 0.0);
    }

    #[test]
    fn malformed_contributes_zero() {
        assert_eq!(FieldValue::Malformed("x".into()).or_zero(), 0.0);
    }

    #[test]
    fn field_wire_names() {
        assert_eq!(SummaryField::CurrFyQtr.to_string(), "curr_fyqtr_value");
        assert_eq!(SummaryField::PrevThreeFyAvg.to_string(), "prev_three_fy_avg_value");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FiscalYear
// ═══════════════════════════════════════════════════════════════════

mod fiscal_year {
    use super::*;

    #[test]
    fn from_full_date() {
        let fy = FiscalYear::from_report_date("2025-06-30").unwrap();
        assert_eq!(fy.year, 2025);
        assert_eq!(fy.suffix(), "25");
        assert_eq!(fy.label(), "FY25");
    }

    #[test]
    fn from_year_prefix_only() {
        assert_eq!(FiscalYear::from_report_date("2024-Q3"), Some(FiscalYear::new(2024)));
        assert_eq!(FiscalYear::from_report_date("2024"), Some(FiscalYear::new(2024)));
    }

    #[test]
    fn rejects_dates_without_year_prefix() {
        assert_eq!(FiscalYear::from_report_date("06/30/2025"), None);
        assert_eq!(FiscalYear::from_report_date("abcd-01-01"), None);
        assert_eq!(FiscalYear::from_report_date(""), None);
    }

    #[test]
    fn previous_wraps_century_suffix() {
        let fy = FiscalYear::new(2000);
        assert_eq!(fy.previous().label(), "FY99");
        assert_eq!(FiscalYear::new(2009).suffix(), "09");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  SummaryRequest
// ═══════════════════════════════════════════════════════════════════

mod summary_request {
    use super::*;

    #[test]
    fn serializes_wire_keys() {
        let request = SummaryRequest::for_widget(&WidgetSettings::default(), "2025-03-31");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["widget_id"], "THM_12%");
        assert_eq!(json["report_date"], "2025-03-31");
        assert_eq!(json["org_code"], "WB");
        assert_eq!(json["module"], "thema5c");
        assert_eq!(json["displaytype"], "widget");
        assert!(json.get("display_type").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  WidgetSettings
// ═══════════════════════════════════════════════════════════════════

mod widget_settings {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = WidgetSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.categories.len(), 5);
        assert_eq!(settings.current_series_field, SummaryField::CurrFyYtd);
        assert_eq!(settings.prior_series_field, SummaryField::PrevFyYtd);
        assert_eq!(settings.headline_period, PeriodKind::Qtr);
    }

    #[test]
    fn json_overrides_only_given_keys() {
        let settings = WidgetSettings::from_json_str(
            r#"{ "widget_id": "THM_13%", "categories": ["A", "B"], "headline_period": "ytd" }"#,
        )
        .unwrap();

        assert_eq!(settings.widget_id, "THM_13%");
        assert_eq!(settings.categories, vec!["A", "B"]);
        assert_eq!(settings.headline_period, PeriodKind::Ytd);
        assert_eq!(settings.org_code, "WB");
        assert_eq!(settings.chart_height, 300);
    }

    #[test]
    fn toml_settings() {
        let settings = WidgetSettings::from_toml_str(
            r##"
            module = "thema6"
            current_series_field = "CurrFyQtr"
            prior_series_field = "PrevFyQtr"
            current_color = "#123456"
            "##,
        )
        .unwrap();

        assert_eq!(settings.module, "thema6");
        assert_eq!(settings.current_series_field, SummaryField::CurrFyQtr);
        assert_eq!(settings.current_color, "#123456");
    }

    #[test]
    fn empty_categories_rejected() {
        let err = WidgetSettings::from_json_str(r#"{ "categories": [] }"#).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn same_series_fields_rejected() {
        let settings = WidgetSettings {
            prior_series_field: SummaryField::CurrFyYtd,
            ..WidgetSettings::default()
        };
        assert!(matches!(settings.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn zero_height_rejected() {
        let settings = WidgetSettings {
            chart_height: 0,
            ..WidgetSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn invalid_json_is_config_error() {
        let err = WidgetSettings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn load_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget.json");
        std::fs::write(&path, r#"{ "title": "Thematic summary" }"#).unwrap();

        let settings = WidgetSettings::load_from_file(&path).unwrap();
        assert_eq!(settings.title, "Thematic summary");
    }

    #[test]
    fn load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget.toml");
        std::fs::write(&path, "chart_height = 420\n").unwrap();

        let settings = WidgetSettings::load_from_file(&path).unwrap();
        assert_eq!(settings.chart_height, 420);
    }

    #[test]
    fn unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget.yaml");
        std::fs::write(&path, "title: x\n").unwrap();

        assert!(matches!(
            WidgetSettings::load_from_file(&path),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            WidgetSettings::load_from_file("/nonexistent/widget.json"),
            Err(CoreError::FileIO(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Chart models
// ═══════════════════════════════════════════════════════════════════

mod chart_models {
    use super::*;

    #[test]
    fn variant_parsing() {
        assert_eq!("charts".parse::<ChartVariant>().unwrap(), ChartVariant::Charts);
        assert_eq!(" Table ".parse::<ChartVariant>().unwrap(), ChartVariant::Table);
        assert!(matches!(
            "pie".parse::<ChartVariant>(),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn variant_default_is_charts() {
        assert_eq!(ChartVariant::default(), ChartVariant::Charts);
        assert_eq!(ChartVariant::Table.to_string(), "table");
    }

    #[test]
    fn value_format_strings() {
        let format = ValueFormat {
            decimals: 1,
            suffix: "M".into(),
        };
        assert_eq!(format.format_string(), "{point.y:.1f}M");
    }
}
