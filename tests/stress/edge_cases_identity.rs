//! Edge case tests: malformed envelopes, odd subjects, credential errors,
//! and forward compatibility of the upgrade transform.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use trustchain_identity::{
    create_identity, create_provisional_identity, get_public_identity, upgrade_identity,
    AnyPublicIdentity, AppCredentials, Config, Document, Identity, IdentityError,
    ProvisionalIdentity, PublicIdentity, PublicProvisionalIdentity, Target,
};

fn config() -> Config {
    AppCredentials::generate().unwrap().to_config()
}

fn envelope_of(json: &str) -> String {
    STANDARD.encode(json.as_bytes())
}

// === Subjects ===

#[test]
fn edge_unicode_and_empty_user_ids() {
    let config = config();
    for user_id in ["", "Zoë", "用户", "a\u{0}b", "x".repeat(4096).as_str()] {
        let envelope = create_identity(&config, user_id).expect("any string is a valid user id");
        let identity = Identity::from_envelope(&envelope).unwrap();
        assert_eq!(identity.user_id().unwrap().len(), 32);
    }
    let a = Identity::from_envelope(&create_identity(&config, "").unwrap()).unwrap();
    let b = Identity::from_envelope(&create_identity(&config, " ").unwrap()).unwrap();
    assert_ne!(a.value(), b.value());
}

#[test]
fn edge_provisional_value_kept_verbatim() {
    let value = "Mixed.Case+tag@Example.COM";
    let envelope = create_provisional_identity(&config(), "email", value).unwrap();
    assert_eq!(ProvisionalIdentity::from_envelope(&envelope).unwrap().value(), value);
}

#[test]
fn edge_unknown_provisional_target() {
    for target in ["user", "hashed_email", "fax", ""] {
        let err = create_provisional_identity(&config(), target, "x").unwrap_err();
        assert!(
            matches!(err, IdentityError::UnsupportedTarget(ref t) if t == target),
            "target {target:?} gave {err}"
        );
    }
}

// === Credentials ===

#[test]
fn edge_credentials_checked_before_target() {
    let bad = Config::new("###", "###");
    assert!(matches!(
        create_provisional_identity(&bad, "fax", "x"),
        Err(IdentityError::Decode { .. })
    ));
}

#[test]
fn edge_secret_with_trailing_newline_not_leaked() {
    let credentials = AppCredentials::generate().unwrap();
    let valid = credentials.to_config();
    let secret = valid.app_secret.clone();
    let config = Config::new(valid.app_id.clone(), format!("{secret}\n"));

    let err = create_identity(&config, "alice").unwrap_err();
    assert!(matches!(err, IdentityError::Decode { ref field, .. } if field == "app_secret"));
    assert!(!err.to_string().contains(&secret));
    assert!(!format!("{err:?}").contains(&secret));
}

#[test]
fn edge_swapped_tenant_secret_is_mismatch() {
    let a = AppCredentials::generate().unwrap().to_config();
    let b = AppCredentials::generate().unwrap().to_config();
    let mixed = Config::new(a.app_id, b.app_secret);
    assert!(matches!(
        create_identity(&mixed, "alice"),
        Err(IdentityError::Mismatch)
    ));
    // Provisional identities do not check the pair.
    assert!(create_provisional_identity(&mixed, "email", "a@b.com").is_ok());
}

// === Envelopes ===

#[test]
fn edge_malformed_envelopes_are_decode_errors() {
    for envelope in [
        "",
        "%%%",
        envelope_of("not json").as_str(),
        envelope_of("[]").as_str(),
        envelope_of("\"user\"").as_str(),
    ] {
        assert!(matches!(
            get_public_identity(envelope),
            Err(IdentityError::Decode { .. })
        ));
        assert!(matches!(
            upgrade_identity(envelope),
            Err(IdentityError::Decode { .. })
        ));
    }
}

#[test]
fn edge_non_string_target() {
    let envelope = envelope_of(r#"{"trustchain_id":"AA==","target":7,"value":"x"}"#);
    assert!(matches!(
        get_public_identity(&envelope),
        Err(IdentityError::UnsupportedTarget(ref t)) if t == "7"
    ));
    // Upgrade only acts on the email target; anything else passes through.
    assert_eq!(upgrade_identity(&envelope).unwrap(), envelope);
}

#[test]
fn edge_bad_trustchain_id_in_public_derivation() {
    let envelope = envelope_of(r#"{"trustchain_id":"AAAA","target":"user","value":"x"}"#);
    assert!(matches!(
        get_public_identity(&envelope),
        Err(IdentityError::Decode { .. })
    ));
}

#[test]
fn edge_typed_decoding_rejects_wrong_shapes() {
    let config = config();
    let user = create_identity(&config, "alice").unwrap();
    let provisional = create_provisional_identity(&config, "email", "a@b.com").unwrap();

    assert!(ProvisionalIdentity::from_envelope(&user).is_err());
    assert!(Identity::from_envelope(&provisional).is_err());

    // A private provisional identity relabelled as a user is refused.
    let mut document = Document::decode(&provisional).unwrap();
    document.set("target", "user");
    assert!(matches!(
        ProvisionalIdentity::from_envelope(&document.encode().unwrap()),
        Err(IdentityError::InvalidIdentity(_))
    ));
}

#[test]
fn edge_every_record_round_trips() {
    let config = config();
    let user = Identity::from_envelope(&create_identity(&config, "alice").unwrap()).unwrap();
    let provisional = ProvisionalIdentity::from_envelope(
        &create_provisional_identity(&config, "phone_number", "+33611111111").unwrap(),
    )
    .unwrap();

    let public = user.public().clone();
    assert_eq!(
        PublicIdentity::from_envelope(&public.to_envelope().unwrap()).unwrap(),
        public
    );

    let public_provisional = provisional.public_provisional().clone();
    assert_eq!(
        PublicProvisionalIdentity::from_envelope(&public_provisional.to_envelope().unwrap())
            .unwrap(),
        public_provisional
    );

    let any = provisional.to_public().unwrap();
    assert_eq!(any.public.target, Target::HashedPhoneNumber);
    assert_eq!(
        AnyPublicIdentity::from_envelope(&any.to_envelope().unwrap()).unwrap(),
        any
    );

    assert_eq!(
        Identity::from_envelope(&user.to_envelope().unwrap()).unwrap(),
        user
    );
    assert_eq!(
        ProvisionalIdentity::from_envelope(&provisional.to_envelope().unwrap()).unwrap(),
        provisional
    );
}

// === Upgrade forward compatibility ===

#[test]
fn edge_upgrade_preserves_unknown_fields_in_order() {
    let json = r#"{"version":3,"target":"email","extensions":{"b":1,"a":2},"value":"a@b.com","zz":[]}"#;
    let upgraded = upgrade_identity(&envelope_of(json)).unwrap();
    let document = Document::decode(&upgraded).unwrap();
    assert_eq!(
        document.keys().collect::<Vec<_>>(),
        vec!["version", "target", "extensions", "value", "zz"]
    );
    assert_eq!(document.get_str("target"), Some("hashed_email"));
    assert_eq!(
        document.get("extensions"),
        Some(&serde_json::json!({"b": 1, "a": 2}))
    );
}

#[test]
fn edge_upgrade_non_string_email_value() {
    let envelope = envelope_of(r#"{"target":"email","value":42}"#);
    assert!(matches!(
        upgrade_identity(&envelope),
        Err(IdentityError::InvalidIdentity(_))
    ));
}

#[test]
fn edge_envelope_whitespace_tolerated() {
    let envelope = create_identity(&config(), "alice").unwrap();
    let padded = format!("  {envelope}\n");
    assert!(get_public_identity(&padded).is_ok());
    assert_eq!(upgrade_identity(&padded).unwrap(), envelope);
}
