//! # Update Preconditions
//!
//! An update succeeds only when the name is live, owned, signed by its
//! owner and carries a valid record set. Each test breaks exactly one of
//! those and checks that the stored records are untouched.

#[cfg(test)]
mod tests {
    use crate::fixtures::{a, aaaa, Harness, Identity};
    use ld_02_registry::{
        AuthError, ErrorKind, InMemoryKVStore, RawRecord, RegisterCommand, RegistrationApi,
        RegistryError, SignedPayload, UpdateCommand, ValidationError,
    };

    const BODY: &[u8] = br#"{"name":"example","hosts":[{"ttl":120,"rec_type":"AAAA","address":"::1"}]}"#;

    struct Setup {
        h: Harness<InMemoryKVStore>,
        owner: Identity,
    }

    fn owned() -> Setup {
        let h = Harness::in_memory();
        let owner = Identity::random();
        h.service
            .register(
                RegisterCommand::new("example")
                    .days(1)
                    .owner(owner.pkh.as_str())
                    .records(vec![a("10.0.0.1"), a("10.0.0.2")]),
                SignedPayload::unsigned(b"{}"),
            )
            .unwrap();
        Setup { h, owner }
    }

    fn update(records: Vec<RawRecord>) -> UpdateCommand {
        UpdateCommand {
            name: "example".into(),
            records,
        }
    }

    fn assert_untouched(h: &Harness<InMemoryKVStore>) {
        let records = h.service.lookup_host("example").unwrap().records;
        let addresses: Vec<_> = records.iter().map(|r| r.address.to_string()).collect();
        assert_eq!(addresses, vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn all_conditions_met() {
        let Setup { h, owner } = owned();
        let sig = owner.sign(BODY);
        h.service
            .update(update(vec![aaaa("::1")]), SignedPayload::new(BODY, Some(&sig)))
            .unwrap();
        assert_eq!(h.service.lookup_host("example").unwrap().records.len(), 1);
    }

    #[test]
    fn missing_signature() {
        let Setup { h, .. } = owned();
        let err = h
            .service
            .update(update(vec![aaaa("::1")]), SignedPayload::unsigned(BODY))
            .unwrap_err();
        assert_eq!(err, RegistryError::Auth(AuthError::InvalidSignature));
        assert_untouched(&h);
    }

    #[test]
    fn garbage_signature() {
        let Setup { h, .. } = owned();
        let err = h
            .service
            .update(
                update(vec![aaaa("::1")]),
                SignedPayload::new(BODY, Some("not base64 at all")),
            )
            .unwrap_err();
        assert_eq!(err, RegistryError::Auth(AuthError::InvalidSignature));
        assert_untouched(&h);
    }

    #[test]
    fn signature_over_other_body() {
        let Setup { h, owner } = owned();
        let sig = owner.sign(br#"{"name":"example","hosts":[]}"#);
        let err = h
            .service
            .update(update(vec![aaaa("::1")]), SignedPayload::new(BODY, Some(&sig)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_untouched(&h);
    }

    #[test]
    fn invalid_record_in_batch() {
        let Setup { h, owner } = owned();
        let sig = owner.sign(BODY);
        let err = h
            .service
            .update(
                update(vec![aaaa("::1"), RawRecord::new(5, "A", "10.0.0.9")]),
                SignedPayload::new(BODY, Some(&sig)),
            )
            .unwrap_err();
        assert_eq!(err, RegistryError::Validation(ValidationError::InvalidTtl(5)));
        assert_untouched(&h);
    }

    #[test]
    fn expired_lease() {
        let Setup { h, owner } = owned();
        let lease = h.service.lookup("example").unwrap();
        h.clock.set(lease.expires_at);

        let sig = owner.sign(BODY);
        let err = h
            .service
            .update(update(vec![aaaa("::1")]), SignedPayload::new(BODY, Some(&sig)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn unknown_name() {
        let h = Harness::in_memory();
        let someone = Identity::random();
        let sig = someone.sign(BODY);
        let err = h
            .service
            .update(update(vec![aaaa("::1")]), SignedPayload::new(BODY, Some(&sig)))
            .unwrap_err();
        assert_eq!(err, RegistryError::not_found("example"));
        assert!(h.store.is_empty());
    }

    #[test]
    fn anonymous_lease_is_immutable() {
        let h = Harness::in_memory();
        h.service
            .register(
                RegisterCommand::new("example").records(vec![a("10.0.0.1"), a("10.0.0.2")]),
                SignedPayload::unsigned(b"{}"),
            )
            .unwrap();
        let someone = Identity::random();
        let sig = someone.sign(BODY);
        let err = h
            .service
            .update(update(vec![aaaa("::1")]), SignedPayload::new(BODY, Some(&sig)))
            .unwrap_err();
        assert_eq!(err, RegistryError::Auth(AuthError::AnonymousLease));
        assert_untouched(&h);
    }

    #[test]
    fn empty_update_clears_records() {
        let Setup { h, owner } = owned();
        let body = br#"{"name":"example","hosts":[]}"#;
        let sig = owner.sign(body);
        h.service
            .update(update(vec![]), SignedPayload::new(body, Some(&sig)))
            .unwrap();
        let info = h.service.lookup_host("example").unwrap();
        assert!(info.records.is_empty());
        assert_eq!(info.lease.owner, Some(owner.pkh));
    }
}
