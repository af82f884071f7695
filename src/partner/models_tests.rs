//! Tests for partner record decoding.

use serde_json::json;

use super::models::{License, Tenant, Webhook};

mod null_values {
    use super::*;

    #[test]
    fn null_branding_reads_as_empty() {
        let tenant: Tenant =
            serde_json::from_str(r#"{"id":"t1","name":"Acme","branding":null}"#).unwrap();

        assert!(tenant.branding.is_empty());
        assert!(tenant.extra.is_empty());
    }

    #[test]
    fn null_lists_read_as_empty() {
        let license: License = serde_json::from_value(json!({
            "key": "LIC-1",
            "features": null,
            "maxUsers": null
        }))
        .unwrap();
        let webhook: Webhook = serde_json::from_value(json!({
            "id": "wh-1",
            "url": "https://hooks.example.com/mesh",
            "events": null
        }))
        .unwrap();

        assert!(license.features.is_empty());
        assert_eq!(license.max_users, None);
        assert!(webhook.events.is_empty());
    }
}

mod unknown_fields {
    use super::*;

    #[test]
    fn tenant_keeps_unmodelled_fields() {
        let tenant: Tenant = serde_json::from_value(json!({
            "id": "t1",
            "name": "Acme",
            "branding": {"color": "#0044ff"},
            "seats": 40
        }))
        .unwrap();

        assert_eq!(tenant.branding["color"], "#0044ff");
        assert_eq!(tenant.extra["seats"], 40);
    }
}
