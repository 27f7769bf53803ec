use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use pos_analytics_core::models::analytics::{
    GrowthDirection, GrowthResult, PaymentGroup, ProductRankEntry, SalesTotals,
};
use pos_analytics_core::models::chart::{DailyBucket, DayWindow};
use pos_analytics_core::models::settings::{AnalyticsSettings, MAX_WINDOW_DAYS};
use pos_analytics_core::models::transaction::{LineItem, ProductSnapshot, Transaction};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn at(y: i32, m: u32, day: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, day, h, min, 0).unwrap()
}

fn coffee(quantity: u32) -> LineItem {
    LineItem::new(ProductSnapshot::new("Kopi Susu", 18000.0), quantity)
}

// ═══════════════════════════════════════════════════════════════════
//  LineItem
// ═══════════════════════════════════════════════════════════════════

mod line_item {
    use super::*;

    #[test]
    fn effective_price_falls_back_to_sell_price() {
        assert_eq!(coffee(1).effective_unit_price(), 18000.0);
    }

    #[test]
    fn effective_price_prefers_final_price() {
        let item = coffee(1).with_final_price(15000.0);
        assert_eq!(item.effective_unit_price(), 15000.0);
    }

    #[test]
    fn explicit_zero_final_price_is_used() {
        let item = coffee(3).with_final_price(0.0);
        assert_eq!(item.effective_unit_price(), 0.0);
        assert_eq!(item.line_revenue(), 0.0);
    }

    #[test]
    fn line_revenue_multiplies_by_quantity() {
        assert_eq!(coffee(3).line_revenue(), 54000.0);
        assert_eq!(coffee(2).with_final_price(12500.0).line_revenue(), 25000.0);
    }

    #[test]
    fn final_price_defaults_when_missing_in_json() {
        let json = r#"{"product":{"name":"Teh Manis","sell_price":5000.0},"quantity":2}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.final_price, None);
        assert_eq!(item.line_revenue(), 10000.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn new_has_no_method_and_no_items() {
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), 25000.0);
        assert_eq!(tx.payment_method, None);
        assert!(tx.items.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let a = Transaction::new(at(2025, 1, 15, 9, 0), 1.0);
        let b = Transaction::new(at(2025, 1, 15, 9, 0), 1.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn missing_method_uses_default() {
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), 1.0);
        assert_eq!(tx.payment_method_or("Cash"), "Cash");
    }

    #[test]
    fn empty_method_uses_default() {
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), 1.0).with_payment_method("");
        assert_eq!(tx.payment_method_or("Cash"), "Cash");
    }

    #[test]
    fn present_method_is_kept_verbatim() {
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), 1.0).with_payment_method("QRIS");
        assert_eq!(tx.payment_method_or("Cash"), "QRIS");

        let tx = Transaction::new(at(2025, 1, 15, 9, 0), 1.0).with_payment_method("cash");
        assert_eq!(tx.payment_method_or("Cash"), "cash");
    }

    #[test]
    fn items_keep_insertion_order() {
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), 23000.0)
            .with_item(coffee(1))
            .with_item(LineItem::new(ProductSnapshot::new("Roti", 5000.0), 1));
        let names: Vec<&str> = tx.items.iter().map(|i| i.product.name.as_str()).collect();
        assert_eq!(names, vec!["Kopi Susu", "Roti"]);
    }

    #[test]
    fn optional_fields_default_in_json() {
        let json = r#"{
            "id": "6f1c9a52-3c3e-4a57-9f53-1d2b3c4d5e6f",
            "timestamp": "2025-01-15T09:30:00Z",
            "total": 42000.0
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.payment_method, None);
        assert!(tx.items.is_empty());
        assert_eq!(tx.timestamp, at(2025, 1, 15, 9, 30));
    }

    #[test]
    fn validate_accepts_well_formed_record() {
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), 36000.0).with_item(coffee(2));
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn validate_accepts_zero_total() {
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), 0.0);
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_total() {
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), -1.0);
        let err = tx.validate().unwrap_err();
        assert!(err.to_string().contains("invalid total"));
    }

    #[test]
    fn validate_rejects_non_finite_total() {
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), f64::NAN);
        assert!(tx.validate().is_err());
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), f64::INFINITY);
        assert!(tx.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_quantity() {
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), 0.0).with_item(coffee(0));
        let err = tx.validate().unwrap_err();
        assert!(err.to_string().contains("zero quantity"));
    }

    #[test]
    fn validate_rejects_negative_effective_price() {
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), 0.0)
            .with_item(coffee(1).with_final_price(-500.0));
        let err = tx.validate().unwrap_err();
        assert!(err.to_string().contains("invalid unit price"));
    }

    #[test]
    fn validate_checks_effective_not_catalog_price() {
        // A negative catalog price is irrelevant when an override is present.
        let item = LineItem::new(ProductSnapshot::new("Promo", -1.0), 1).with_final_price(0.0);
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), 0.0).with_item(item);
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_product_name() {
        let item = LineItem::new(ProductSnapshot::new("", 1000.0), 1);
        let tx = Transaction::new(at(2025, 1, 15, 9, 0), 1000.0).with_item(item);
        let err = tx.validate().unwrap_err();
        assert!(err.to_string().contains("empty product name"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  SalesTotals
// ═══════════════════════════════════════════════════════════════════

mod sales_totals {
    use super::*;

    #[test]
    fn default_is_zero() {
        let totals = SalesTotals::default();
        assert_eq!(totals.sales, 0.0);
        assert_eq!(totals.transaction_count, 0);
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(SalesTotals::default().average_transaction(), 0.0);
    }

    #[test]
    fn average_divides_sales_by_count() {
        let totals = SalesTotals {
            sales: 90000.0,
            transaction_count: 4,
        };
        assert_eq!(totals.average_transaction(), 22500.0);
    }

    #[test]
    fn merge_adds_both_fields() {
        let a = SalesTotals {
            sales: 1000.0,
            transaction_count: 2,
        };
        let b = SalesTotals {
            sales: 500.0,
            transaction_count: 1,
        };
        assert_eq!(
            a.merge(b),
            SalesTotals {
                sales: 1500.0,
                transaction_count: 3
            }
        );
    }

    #[test]
    fn merge_with_default_is_identity() {
        let a = SalesTotals {
            sales: 1234.0,
            transaction_count: 7,
        };
        assert_eq!(a.merge(SalesTotals::default()), a);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Growth types
// ═══════════════════════════════════════════════════════════════════

mod growth {
    use super::*;

    #[test]
    fn direction_display() {
        assert_eq!(GrowthDirection::Up.to_string(), "up");
        assert_eq!(GrowthDirection::Down.to_string(), "down");
        assert_eq!(GrowthDirection::Flat.to_string(), "flat");
    }

    #[test]
    fn flat_constant() {
        assert_eq!(GrowthResult::FLAT.percent, 0.0);
        assert_eq!(GrowthResult::FLAT.direction, GrowthDirection::Flat);
    }

    #[test]
    fn serde_roundtrip_json() {
        let g = GrowthResult {
            percent: -12.5,
            direction: GrowthDirection::Down,
        };
        let json = serde_json::to_string(&g).unwrap();
        let back: GrowthResult = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DayWindow / DailyBucket
// ═══════════════════════════════════════════════════════════════════

mod day_window {
    use super::*;

    fn window() -> DayWindow {
        DayWindow {
            date: d(2025, 1, 15),
            start: at(2025, 1, 15, 0, 0),
            end: at(2025, 1, 16, 0, 0) - chrono::Duration::nanoseconds(1),
        }
    }

    #[test]
    fn contains_is_inclusive_at_both_ends() {
        let w = window();
        assert!(w.contains(&w.start));
        assert!(w.contains(&w.end));
        assert!(w.contains(&at(2025, 1, 15, 12, 0)));
    }

    #[test]
    fn excludes_neighbouring_days() {
        let w = window();
        assert!(!w.contains(&(w.start - chrono::Duration::nanoseconds(1))));
        assert!(!w.contains(&at(2025, 1, 16, 0, 0)));
    }

    #[test]
    fn empty_bucket_labels() {
        // 2025-01-15 is a Wednesday
        let bucket = DailyBucket::empty(&window());
        assert_eq!(bucket.label, "Wed");
        assert_eq!(bucket.full_label, "15 Jan");
        assert_eq!(bucket.sales, 0.0);
        assert_eq!(bucket.transaction_count, 0);
    }

    #[test]
    fn bucket_window_roundtrip() {
        let w = window();
        assert_eq!(DailyBucket::empty(&w).window(), w);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Output entries
// ═══════════════════════════════════════════════════════════════════

mod entries {
    use super::*;

    #[test]
    fn product_entry_json_field_names() {
        let entry = ProductRankEntry {
            name: "Kopi Susu".into(),
            quantity: 3,
            revenue: 54000.0,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["name"], "Kopi Susu");
        assert_eq!(value["quantity"], 3);
        assert_eq!(value["revenue"], 54000.0);
    }

    #[test]
    fn payment_group_json_field_names() {
        let group = PaymentGroup {
            label: "QRIS".into(),
            revenue: 10000.0,
        };
        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(value["label"], "QRIS");
        assert_eq!(value["revenue"], 10000.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  AnalyticsSettings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = AnalyticsSettings::default();
        assert_eq!(s.window_days, 7);
        assert_eq!(s.top_products, 5);
        assert_eq!(s.default_payment_method, "Cash");
        assert_eq!(s.timezone, Tz::UTC);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(AnalyticsSettings::default().validate().is_ok());
    }

    #[test]
    fn zero_window_and_zero_top_are_valid() {
        let s = AnalyticsSettings {
            window_days: 0,
            top_products: 0,
            ..AnalyticsSettings::default()
        };
        assert!(s.validate().is_ok());
    }

    #[test]
    fn window_at_maximum_is_valid() {
        let s = AnalyticsSettings {
            window_days: MAX_WINDOW_DAYS,
            ..AnalyticsSettings::default()
        };
        assert!(s.validate().is_ok());
    }

    #[test]
    fn window_above_maximum_is_rejected() {
        let s = AnalyticsSettings {
            window_days: MAX_WINDOW_DAYS + 1,
            ..AnalyticsSettings::default()
        };
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));
    }

    #[test]
    fn blank_payment_label_is_rejected() {
        let s = AnalyticsSettings {
            default_payment_method: "   ".into(),
            ..AnalyticsSettings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let s = AnalyticsSettings::from_json(r#"{"timezone":"Asia/Jakarta"}"#).unwrap();
        assert_eq!(s.timezone, chrono_tz::Asia::Jakarta);
        assert_eq!(s.window_days, 7);
        assert_eq!(s.top_products, 5);
        assert_eq!(s.default_payment_method, "Cash");
    }

    #[test]
    fn from_json_empty_object_is_default() {
        let s = AnalyticsSettings::from_json("{}").unwrap();
        assert_eq!(s, AnalyticsSettings::default());
    }

    #[test]
    fn from_json_custom_values() {
        let s = AnalyticsSettings::from_json(
            r#"{"window_days":30,"top_products":10,"default_payment_method":"Tunai"}"#,
        )
        .unwrap();
        assert_eq!(s.window_days, 30);
        assert_eq!(s.top_products, 10);
        assert_eq!(s.default_payment_method, "Tunai");
    }

    #[test]
    fn from_json_unknown_timezone_fails() {
        assert!(AnalyticsSettings::from_json(r#"{"timezone":"Mars/Olympus"}"#).is_err());
    }

    #[test]
    fn from_json_validates() {
        let json = format!(r#"{{"window_days":{}}}"#, MAX_WINDOW_DAYS + 1);
        assert!(AnalyticsSettings::from_json(&json).is_err());
    }

    #[test]
    fn serde_roundtrip_json() {
        let s = AnalyticsSettings {
            window_days: 14,
            top_products: 3,
            default_payment_method: "Tunai".into(),
            timezone: chrono_tz::Asia::Jakarta,
        };
        let json = serde_json::to_string(&s).unwrap();
        let back = AnalyticsSettings::from_json(&json).unwrap();
        assert_eq!(s, back);
    }
}
