//! # Registration Scenarios
//!
//! End-to-end walks through the name lifecycle on the registry API.

#[cfg(test)]
mod tests {
    use crate::fixtures::{a, aaaa, Harness, Identity, T0};
    use ld_02_registry::{
        AuthError, ErrorKind, RecordType, RegisterCommand, RegistrationApi, RegistryError,
        SignedPayload, UpdateCommand, SECONDS_PER_DAY,
    };
    use proptest::prelude::*;

    #[test]
    fn anonymous_registration_is_read_only() {
        let h = Harness::in_memory();

        let lease = h
            .service
            .register(
                RegisterCommand::new("example").days(30),
                SignedPayload::unsigned(br#"{"name":"example","days":30}"#),
            )
            .unwrap();
        assert_eq!(lease.expires_at, T0 + 30 * SECONDS_PER_DAY);
        assert!(h.service.lookup_host("example").unwrap().records.is_empty());

        let someone = Identity::random();
        let body = br#"{"name":"example","hosts":[{"ttl":60,"rec_type":"A","address":"10.0.0.1"}]}"#;
        let sig = someone.sign(body);
        let err = h
            .service
            .update(
                UpdateCommand {
                    name: "example".into(),
                    records: vec![a("10.0.0.1")],
                },
                SignedPayload::new(body, Some(&sig)),
            )
            .unwrap_err();
        assert_eq!(err, RegistryError::Auth(AuthError::AnonymousLease));
    }

    #[test]
    fn owner_replaces_records() {
        let h = Harness::in_memory();
        let owner = Identity::random();
        h.service
            .register(
                RegisterCommand::new("example")
                    .owner(owner.pkh.as_str())
                    .records(vec![a("10.0.0.1")]),
                SignedPayload::unsigned(b"{}"),
            )
            .unwrap();

        let body = br#"{"name":"example","hosts":[{"ttl":120,"rec_type":"AAAA","address":"::1"}]}"#;
        let sig = owner.sign(body);
        h.service
            .update(
                UpdateCommand {
                    name: "example".into(),
                    records: vec![aaaa("::1")],
                },
                SignedPayload::new(body, Some(&sig)),
            )
            .unwrap();

        let records = h.service.lookup_host("example").unwrap().records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rec_type, RecordType::Aaaa);
        assert_eq!(records[0].address.to_string(), "::1");
        assert_eq!(records[0].ttl, 120);
    }

    #[test]
    fn foreign_signature_changes_nothing() {
        let h = Harness::in_memory();
        let owner = Identity::random();
        let stranger = Identity::random();
        h.service
            .register(
                RegisterCommand::new("example")
                    .owner(owner.pkh.as_str())
                    .records(vec![a("10.0.0.1")]),
                SignedPayload::unsigned(b"{}"),
            )
            .unwrap();
        let before = h.service.lookup_host("example").unwrap();

        let body = br#"{"name":"example","hosts":[]}"#;
        let sig = stranger.sign(body);
        let err = h
            .service
            .update(
                UpdateCommand {
                    name: "example".into(),
                    records: vec![],
                },
                SignedPayload::new(body, Some(&sig)),
            )
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(h.service.lookup_host("example").unwrap(), before);
    }

    #[test]
    fn unknown_and_just_expired_both_not_found() {
        let h = Harness::in_memory();
        let lease = h
            .service
            .register(RegisterCommand::new("example"), SignedPayload::unsigned(b"{}"))
            .unwrap();

        h.clock.set(lease.expires_at + 1);

        assert_eq!(h.service.lookup("ghost"), Err(RegistryError::not_found("ghost")));
        assert_eq!(h.service.lookup("example"), Err(RegistryError::not_found("example")));
        assert_eq!(h.service.list_names().unwrap(), vec!["example".to_string()]);
    }

    #[test]
    fn bad_name_rejected_before_storage() {
        let h = Harness::in_memory();
        let err = h
            .service
            .register(
                RegisterCommand::new("bad name!").days(10),
                SignedPayload::unsigned(b"{}"),
            )
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(h.store.is_empty());
    }

    #[test]
    fn lookup_tracks_liveness_window() {
        let h = Harness::in_memory();
        let lease = h
            .service
            .register(RegisterCommand::new("example").days(2), SignedPayload::unsigned(b"{}"))
            .unwrap();

        for t in [lease.created_at, lease.created_at + 1, lease.expires_at - 1] {
            h.clock.set(t);
            assert_eq!(h.service.lookup("example").unwrap(), lease);
        }
        for t in [lease.expires_at, lease.expires_at + SECONDS_PER_DAY] {
            h.clock.set(t);
            assert!(h.service.lookup("example").is_err());
        }
    }

    proptest! {
        #[test]
        fn registered_records_read_back_in_order(
            octets in prop::collection::vec(any::<[u8; 4]>(), 0..12),
            days in 1i64..=365,
        ) {
            let h = Harness::in_memory();
            let raw: Vec<_> = octets
                .iter()
                .map(|o| a(&std::net::Ipv4Addr::from(*o).to_string()))
                .collect();
            h.service
                .register(
                    RegisterCommand::new("example").days(days).records(raw.clone()),
                    SignedPayload::unsigned(b"{}"),
                )
                .unwrap();

            let info = h.service.lookup_host("example").unwrap();
            let read: Vec<_> = info.records.iter().map(|r| r.address.to_string()).collect();
            let sent: Vec<_> = raw.iter().map(|r| r.address.clone()).collect();
            prop_assert_eq!(read, sent);
            prop_assert_eq!(info.lease.expires_at, T0 + days as u64 * SECONDS_PER_DAY);
        }
    }
}
