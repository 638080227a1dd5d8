//! # Gateway Flows
//!
//! Requests driven through the full boundary: routing, pricing, the
//! payment gate, JSON decoding and the registry underneath.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Harness, Identity};
    use ld_02_registry::{
        BatchOperation, InMemoryKVStore, KeyValueStore, ManualClock, SECONDS_PER_DAY,
    };
    use ld_03_gateway::{
        status, AcceptAllGate, ApiResponse, Gateway, Headers, PriceSchedule, ResponseBody,
        StaticTokenGate, PAYMENT_TOKEN_HEADER, SIGNATURE_HEADER,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct Rig {
        gateway: Gateway,
        store: Arc<InMemoryKVStore>,
        clock: Arc<ManualClock>,
    }

    fn rig() -> Rig {
        let Harness {
            service,
            store,
            clock,
        } = Harness::in_memory();
        Rig {
            gateway: Gateway::new(
                Arc::new(service),
                Arc::new(AcceptAllGate),
                PriceSchedule::default(),
            ),
            store,
            clock,
        }
    }

    fn json_body(resp: ApiResponse) -> Value {
        match resp.body {
            ResponseBody::Json(v) => v,
            ResponseBody::Text(t) => panic!("expected json, got text {t:?}"),
        }
    }

    async fn post(gw: &Gateway, path: &str, body: &str, signer: Option<&Identity>) -> ApiResponse {
        let headers = match signer {
            Some(id) => Headers::new().with(SIGNATURE_HEADER, id.sign(body.as_bytes())),
            None => Headers::new(),
        };
        gw.handle(path, &headers, body.as_bytes().to_vec()).await
    }

    #[tokio::test]
    async fn register_lookup_update_delete() {
        let rig = rig();
        let owner = Identity::random();

        let body = format!(
            r#"{{"name":"example","days":7,"pkh":"{}","hosts":[{{"ttl":60,"rec_type":"A","address":"10.0.0.1"}}]}}"#,
            owner.pkh
        );
        assert!(post(&rig.gateway, "/host.register", &body, None).await.is_success());

        let info = json_body(post(&rig.gateway, "/host.info", r#"{"name":"example"}"#, None).await);
        assert_eq!(info["lease"]["owner"], owner.pkh.as_str());
        assert_eq!(info["records"][0]["rec_type"], "A");

        let update = r#"{"name":"example","records":[{"ttl":300,"rec_type":"AAAA","address":"2001:DB8::1"}]}"#;
        assert!(post(&rig.gateway, "/host.update", update, Some(&owner)).await.is_success());

        let info = json_body(post(&rig.gateway, "/host.info", r#"{"name":"example"}"#, None).await);
        assert_eq!(info["records"], json!([{
            "name": "example",
            "rec_type": "AAAA",
            "address": "2001:db8::1",
            "ttl": 300
        }]));

        let delete = format!(r#"{{"name":"example","pkh":"{}"}}"#, owner.pkh);
        assert!(post(&rig.gateway, "/host.delete", &delete, Some(&owner)).await.is_success());
        assert!(rig.store.is_empty());
    }

    #[tokio::test]
    async fn domains_lists_every_stored_name() {
        let rig = rig();
        for name in ["zeta", "alpha", "mid"] {
            let body = format!(r#"{{"name":"{name}"}}"#);
            assert!(post(&rig.gateway, "/host.register", &body, None).await.is_success());
        }
        rig.clock.advance(10 * SECONDS_PER_DAY);

        let names = json_body(post(&rig.gateway, "/domains", "", None).await);
        assert_eq!(names, json!(["alpha", "mid", "zeta"]));

        let resp = post(&rig.gateway, "/host.info", r#"{"name":"alpha"}"#, None).await;
        assert_eq!(resp.status, status::NOT_FOUND);
    }

    #[tokio::test]
    async fn stranger_update_is_forbidden() {
        let rig = rig();
        let owner = Identity::random();
        let stranger = Identity::random();

        let body = format!(r#"{{"name":"example","pkh":"{}"}}"#, owner.pkh);
        assert!(post(&rig.gateway, "/host.register", &body, None).await.is_success());

        let update = r#"{"name":"example","hosts":[{"ttl":60,"rec_type":"A","address":"10.6.6.6"}]}"#;
        let resp = post(&rig.gateway, "/host.update", update, Some(&stranger)).await;
        assert_eq!(resp.status, status::FORBIDDEN);

        let info = json_body(post(&rig.gateway, "/host.info", r#"{"name":"example"}"#, None).await);
        assert_eq!(info["records"], json!([]));
    }

    #[tokio::test]
    async fn unknown_fields_are_rejected() {
        let rig = rig();
        let resp = post(
            &rig.gateway,
            "/host.register",
            r#"{"name":"example","color":"blue"}"#,
            None,
        )
        .await;
        assert_eq!(resp.status, status::BAD_REQUEST);
        assert!(rig.store.is_empty());
    }

    #[tokio::test]
    async fn payment_gate_runs_before_decoding() {
        let Harness { service, store, .. } = Harness::in_memory();
        let gw = Gateway::new(
            Arc::new(service),
            Arc::new(StaticTokenGate::new("secret")),
            PriceSchedule::default(),
        );

        // Flat-priced route with a malformed body: the gate answers first
        let resp = gw.handle("/host.update", &Headers::new(), b"{oops".to_vec()).await;
        assert_eq!(resp.status, status::PAYMENT_REQUIRED);

        // An unreadable register body prices at zero and fails validation
        let resp = gw.handle("/host.register", &Headers::new(), b"{oops".to_vec()).await;
        assert_eq!(resp.status, status::BAD_REQUEST);

        let wrong = Headers::new().with(PAYMENT_TOKEN_HEADER, "guess");
        let resp = gw
            .handle("/host.register", &wrong, br#"{"name":"example"}"#.to_vec())
            .await;
        assert_eq!(resp.status, status::PAYMENT_REQUIRED);
        assert!(store.is_empty());

        // Free routes pass without a token
        let resp = gw.handle("/domains", &Headers::new(), Vec::new()).await;
        assert!(resp.is_success());
        let resp = gw.handle("/", &Headers::new(), Vec::new()).await;
        assert!(resp.is_success());
    }

    #[tokio::test]
    async fn storage_failures_do_not_leak_details() {
        let rig = rig();
        rig.store
            .atomic_batch_write(vec![BatchOperation::put(
                b"lease:example".to_vec(),
                b"\xff\xff".to_vec(),
            )])
            .unwrap();

        let resp = post(&rig.gateway, "/host.info", r#"{"name":"example"}"#, None).await;
        assert_eq!(resp, ApiResponse::internal_error());
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_gateway() {
        let rig = rig();
        let gw = Arc::new(rig.gateway);

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let gw = Arc::clone(&gw);
                tokio::spawn(async move {
                    let body = format!(r#"{{"name":"name-{i}"}}"#);
                    gw.handle("/host.register", &Headers::new(), body.into_bytes())
                        .await
                })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().is_success());
        }

        let names = json_body(gw.handle("/domains", &Headers::new(), Vec::new()).await);
        assert_eq!(names.as_array().unwrap().len(), 16);
    }
}
