use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::Value;

use crpt_gate::document::to_json_bytes;
use crpt_gate::limiters::AdmissionPool;
use crpt_gate::{Description, Document, Product};

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i32..=9999, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn any_product() -> impl Strategy<Value = Product> {
    (
        proptest::option::of("[A-Z0-9]{1,12}"),
        proptest::option::of(any_date()),
        proptest::option::of("[0-9]{10}"),
        proptest::option::of(any_date()),
    )
        .prop_map(|(code, cert_date, inn, production_date)| Product {
            uit_code: code,
            certificate_document_date: cert_date,
            owner_inn: inn,
            production_date,
            ..Product::default()
        })
}

fn any_document() -> impl Strategy<Value = Document> {
    (
        proptest::option::of("[0-9]{10}"),
        proptest::option::of("[A-Za-z0-9_]{1,16}"),
        any::<bool>(),
        proptest::option::of(any_date()),
        proptest::option::of(any_date()),
        proptest::collection::vec(any_product(), 0..4),
    )
        .prop_map(|(inn, doc_id, import_request, production_date, reg_date, products)| {
            Document {
                description: inn.clone().map(Description::new),
                doc_id,
                import_request,
                participant_inn: inn,
                production_date,
                reg_date,
                products,
                ..Document::default()
            }
        })
}

fn check_date(value: &Value, expected: Option<NaiveDate>) -> Result<(), TestCaseError> {
    match expected {
        None => prop_assert_eq!(value, &Value::Null),
        Some(date) => {
            let raw = value.as_str().unwrap_or_default();
            prop_assert_eq!(raw.len(), 10);
            prop_assert_eq!(raw.to_string(), date.format("%Y-%m-%d").to_string());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_document_round_trip_property(document in any_document()) {
        let bytes = to_json_bytes(&document).unwrap();

        let value: Value = serde_json::from_slice(&bytes).unwrap();
        prop_assert_eq!(&value["importRequest"], &Value::Bool(document.import_request));
        prop_assert_eq!(
            value["doc_id"].as_str().map(str::to_string),
            document.doc_id.clone()
        );
        check_date(&value["production_date"], document.production_date)?;
        check_date(&value["reg_date"], document.reg_date)?;
        let products = value["products"].as_array().unwrap();
        prop_assert_eq!(products.len(), document.products.len());
        for (raw, product) in products.iter().zip(&document.products) {
            check_date(&raw["certificate_document_date"], product.certificate_document_date)?;
            check_date(&raw["production_date"], product.production_date)?;
        }

        let parsed: Document = serde_json::from_slice(&bytes).unwrap();
        prop_assert_eq!(parsed, document);
    }

    #[test]
    fn test_admission_capacity_bounded_property(
        limit in 1u32..50,
        rounds in proptest::collection::vec(0u32..80, 1..20)
    ) {
        let pool = AdmissionPool::new(limit);

        for attempts in rounds {
            let mut admitted = 0;
            for _ in 0..attempts {
                if pool.try_admit().unwrap() {
                    admitted += 1;
                }
                prop_assert!(pool.available() <= limit);
            }
            // never more than the limit per window
            prop_assert!(admitted <= limit);
            prop_assert!(pool.admitted_in_window() <= limit);

            pool.replenish();
            prop_assert_eq!(pool.available(), limit);
            prop_assert_eq!(pool.admitted_in_window(), 0);
        }
    }
}
