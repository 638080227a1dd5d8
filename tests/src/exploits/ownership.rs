//! # Ownership Attacks
//!
//! Attempts to modify or release a name without holding its key.

#[cfg(test)]
mod tests {
    use crate::fixtures::{a, Harness, Identity};
    use ld_02_registry::{
        AuthError, CollisionPolicy, DeleteCommand, ErrorKind, RegisterCommand, RegistrationApi,
        RegistryConfig, RegistryError, SignedPayload, UpdateCommand,
    };

    fn owned_by(h: &Harness<ld_02_registry::InMemoryKVStore>, owner: &Identity) {
        h.service
            .register(
                RegisterCommand::new("victim")
                    .days(30)
                    .owner(owner.pkh.as_str())
                    .records(vec![a("10.0.0.1")]),
                SignedPayload::unsigned(b"{}"),
            )
            .unwrap();
    }

    #[test]
    fn delete_with_own_key_but_victims_name() {
        let h = Harness::in_memory();
        let victim = Identity::random();
        let attacker = Identity::random();
        owned_by(&h, &victim);

        // Valid signature, but by the attacker's own pkh
        let body = format!(r#"{{"name":"victim","pkh":"{}"}}"#, attacker.pkh);
        let sig = attacker.sign(body.as_bytes());
        let err = h
            .service
            .delete(
                DeleteCommand {
                    name: "victim".into(),
                    owner: attacker.pkh.to_string(),
                },
                SignedPayload::new(body.as_bytes(), Some(&sig)),
            )
            .unwrap_err();

        assert_eq!(err, RegistryError::Auth(AuthError::OwnerMismatch));
        assert!(h.service.lookup("victim").is_ok());
    }

    #[test]
    fn delete_claiming_victims_pkh() {
        let h = Harness::in_memory();
        let victim = Identity::random();
        let attacker = Identity::random();
        owned_by(&h, &victim);

        let body = format!(r#"{{"name":"victim","pkh":"{}"}}"#, victim.pkh);
        let sig = attacker.sign(body.as_bytes());
        let err = h
            .service
            .delete(
                DeleteCommand {
                    name: "victim".into(),
                    owner: victim.pkh.to_string(),
                },
                SignedPayload::new(body.as_bytes(), Some(&sig)),
            )
            .unwrap_err();

        assert_eq!(err, RegistryError::Auth(AuthError::InvalidSignature));
        assert_eq!(h.service.lookup_host("victim").unwrap().records.len(), 1);
    }

    #[test]
    fn replayed_signature_over_different_request() {
        let h = Harness::in_memory();
        let victim = Identity::random();
        owned_by(&h, &victim);

        // A signature the victim once produced for a harmless update
        let seen = br#"{"name":"victim","hosts":[{"ttl":60,"rec_type":"A","address":"10.0.0.1"}]}"#;
        let captured = victim.sign(seen);

        let forged = br#"{"name":"victim","hosts":[{"ttl":60,"rec_type":"A","address":"10.6.6.6"}]}"#;
        let err = h
            .service
            .update(
                UpdateCommand {
                    name: "victim".into(),
                    records: vec![a("10.6.6.6")],
                },
                SignedPayload::new(forged, Some(&captured)),
            )
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Auth);
        let records = h.service.lookup_host("victim").unwrap().records;
        assert_eq!(records[0].address.to_string(), "10.0.0.1");
    }

    #[test]
    fn reregistering_a_live_name_needs_the_owners_key() {
        let h = Harness::in_memory();
        let victim = Identity::random();
        let attacker = Identity::random();
        owned_by(&h, &victim);

        let body = b"takeover";
        let sig = attacker.sign(body);
        let err = h
            .service
            .register(
                RegisterCommand::new("victim")
                    .owner(attacker.pkh.as_str())
                    .records(vec![a("10.6.6.6")]),
                SignedPayload::new(body, Some(&sig)),
            )
            .unwrap_err();

        assert_eq!(err, RegistryError::Auth(AuthError::InvalidSignature));
        let lease = h.service.lookup("victim").unwrap();
        assert_eq!(lease.owner, Some(victim.pkh.clone()));

        // The owner may renew and reassign
        let sig = victim.sign(body);
        let lease = h
            .service
            .register(
                RegisterCommand::new("victim")
                    .days(60)
                    .owner(victim.pkh.as_str()),
                SignedPayload::new(body, Some(&sig)),
            )
            .unwrap();
        assert_eq!(lease.owner, Some(victim.pkh));
    }

    #[test]
    fn reject_policy_refuses_even_the_owner() {
        let h = Harness::with_config(RegistryConfig {
            collision_policy: CollisionPolicy::Reject,
            ..RegistryConfig::default()
        });
        let owner = Identity::random();
        owned_by(&h, &owner);

        let sig = owner.sign(b"renew");
        let err = h
            .service
            .register(
                RegisterCommand::new("victim").owner(owner.pkh.as_str()),
                SignedPayload::new(b"renew", Some(&sig)),
            )
            .unwrap_err();
        assert_eq!(err, RegistryError::Auth(AuthError::NameTaken));
    }

    #[test]
    fn anonymous_lease_cannot_be_claimed_or_deleted() {
        let h = Harness::in_memory();
        h.service
            .register(
                RegisterCommand::new("squat").days(365),
                SignedPayload::unsigned(b"{}"),
            )
            .unwrap();
        let attacker = Identity::random();

        let sig = attacker.sign(b"claim");
        let err = h
            .service
            .register(
                RegisterCommand::new("squat").owner(attacker.pkh.as_str()),
                SignedPayload::new(b"claim", Some(&sig)),
            )
            .unwrap_err();
        assert_eq!(err, RegistryError::Auth(AuthError::AnonymousLease));

        let body = format!(r#"{{"name":"squat","pkh":"{}"}}"#, attacker.pkh);
        let sig = attacker.sign(body.as_bytes());
        let err = h
            .service
            .delete(
                DeleteCommand {
                    name: "squat".into(),
                    owner: attacker.pkh.to_string(),
                },
                SignedPayload::new(body.as_bytes(), Some(&sig)),
            )
            .unwrap_err();
        assert_eq!(err, RegistryError::Auth(AuthError::AnonymousLease));
        assert!(h.service.lookup("squat").unwrap().is_anonymous());
    }
}
