//! Stress test: identities issued from many threads against one tenant.
//!
//! Issuance holds no shared state, so every thread must get valid tokens
//! with unique ephemeral keys and identical deterministic fields.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use trustchain_identity::{
    create_identity, create_provisional_identity, get_public_identity, upgrade_identity,
    AppCredentials, Identity, ProvisionalIdentity,
};

const THREADS: usize = 8;
const PER_THREAD: usize = 50;

#[test]
fn stress_concurrent_user_identities() {
    let credentials = AppCredentials::generate().expect("tenant generation should succeed");
    let tenant_key = credentials.public_signature_key();
    let config = Arc::new(credentials.to_config());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|_| {
                        create_identity(&config, "shared-user").expect("issuance should succeed")
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let envelopes: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("thread should not panic"))
        .collect();
    assert_eq!(envelopes.len(), THREADS * PER_THREAD);

    let mut ephemeral_keys = HashSet::new();
    let mut values = HashSet::new();
    let mut secrets = HashSet::new();
    for envelope in &envelopes {
        let identity = Identity::from_envelope(envelope).unwrap();
        identity
            .verify_delegation(&tenant_key)
            .expect("every delegation should verify");
        assert!(
            ephemeral_keys.insert(*identity.ephemeral_public_signature_key()),
            "ephemeral key reused across calls"
        );
        values.insert(identity.value().to_string());
        secrets.insert(*identity.user_secret());
    }
    assert_eq!(values.len(), 1);
    assert_eq!(secrets.len(), 1);
}

#[test]
fn stress_concurrent_provisional_pipeline() {
    let config = Arc::new(AppCredentials::generate().unwrap().to_config());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let (target, value) = if i % 2 == 0 {
                        ("email", format!("user{t}-{i}@example.com"))
                    } else {
                        ("phone_number", format!("+3361{t:02}{i:05}"))
                    };
                    let private = create_provisional_identity(&config, target, &value).unwrap();
                    let provisional = ProvisionalIdentity::from_envelope(&private).unwrap();
                    let public = get_public_identity(&private).unwrap();
                    assert_eq!(
                        public,
                        provisional.to_public().unwrap().to_envelope().unwrap()
                    );
                    assert_eq!(upgrade_identity(&public).unwrap(), public);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }
}

#[test]
fn stress_1000_sequential_identities_unique_keys() {
    let config = AppCredentials::generate().unwrap().to_config();
    let mut seen = HashSet::new();

    for i in 0..1000 {
        let identity =
            Identity::from_envelope(&create_identity(&config, &format!("user-{i}")).unwrap())
                .unwrap();
        assert!(
            seen.insert(*identity.ephemeral_public_signature_key()),
            "duplicate ephemeral key at iteration {i}"
        );
    }
    assert_eq!(seen.len(), 1000);
}
