//! End-to-end generate and verify through the public API.

use domainlock::{
    ChecksumCodec, ExpirationRejection, FixedHardwareId, IssuerConfig, LicenseError,
    LicenseIssuer, LicenseKey, MockClock,
};
use std::sync::Arc;

fn issuer() -> LicenseIssuer {
    LicenseIssuer::with_hardware_id(
        IssuerConfig::default(),
        Arc::new(FixedHardwareId::new("abc123")),
    )
    .unwrap()
}

fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

#[test]
fn generated_key_has_wire_shape() {
    let key = issuer().generate("example.com", "2099-12-31").unwrap();

    assert_eq!(key.len(), 106);
    let parts: Vec<&str> = key.split('.').collect();
    assert_eq!(parts.len(), 3);
    assert!(is_lower_hex(parts[0], 32));
    assert!(is_lower_hex(parts[1], 64));
    assert!(is_lower_hex(parts[2], 8));
}

#[test]
fn verify_echoes_generated_parts() {
    let issuer = issuer();
    let key = issuer.generate("example.com", "2099-12-31").unwrap();
    let parts: Vec<&str> = key.split('.').collect();

    let report = issuer.verify(&key).unwrap();
    assert!(report.valid);
    assert_eq!(report.salt, parts[0]);
    assert_eq!(report.digest, parts[1]);
    assert_eq!(report.checksum, parts[2]);
}

#[test]
fn identical_inputs_give_independent_keys() {
    let issuer = issuer();
    let a = issuer.generate("example.com", "2099-12-31").unwrap();
    let b = issuer.generate("example.com", "2099-12-31").unwrap();

    let a = LicenseKey::split(&a).unwrap();
    let b = LicenseKey::split(&b).unwrap();
    assert_ne!(a.salt(), b.salt());
    assert_ne!(a.digest(), b.digest());
    assert!(issuer.verify(&a.to_string()).is_ok());
    assert!(issuer.verify(&b.to_string()).is_ok());
}

#[test]
fn standalone_codec_accepts_issued_key() {
    let key = issuer().generate("example.co.uk", "2099-12-31").unwrap();
    assert!(ChecksumCodec::default().verify_checksum(&key).unwrap());
}

#[test]
fn truncated_key_is_malformed() {
    let issuer = issuer();
    let key = issuer.generate("example.com", "2099-12-31").unwrap();
    let (core, _) = key.rsplit_once('.').unwrap();

    assert!(matches!(
        issuer.verify(core),
        Err(LicenseError::MalformedKey { parts: 2 })
    ));
}

#[test]
fn extra_part_is_malformed() {
    let issuer = issuer();
    let key = issuer.generate("example.com", "2099-12-31").unwrap();

    assert!(matches!(
        issuer.verify(&format!("{}.00", key)),
        Err(LicenseError::MalformedKey { parts: 4 })
    ));
}

#[test]
fn deadbeef_is_checksum_mismatch() {
    assert!(matches!(
        issuer().verify("deadbeef.cafebabe.00000000"),
        Err(LicenseError::ChecksumMismatch)
    ));
}

#[test]
fn single_character_edits_are_detected() {
    let issuer = issuer();
    let key = issuer.generate("example.com", "2099-12-31").unwrap();

    for (i, c) in key.char_indices() {
        if c == '.' {
            continue;
        }
        let replacement = if c == '0' { '1' } else { '0' };
        let mut mutated = key.clone();
        mutated.replace_range(i..i + 1, &replacement.to_string());

        assert!(
            matches!(issuer.verify(&mutated), Err(LicenseError::ChecksumMismatch)),
            "mutation at {} went undetected",
            i
        );
    }
}

#[test]
fn generation_rejects_bad_domain() {
    for domain in ["-example.com", "example-.com", "example", "a.com", "ex_ample.com"] {
        assert!(
            matches!(
                issuer().generate(domain, "2099-12-31"),
                Err(LicenseError::InvalidDomain { .. })
            ),
            "{}",
            domain
        );
    }
}

#[test]
fn generation_rejects_lenient_date() {
    assert!(matches!(
        issuer().generate("example.com", "2099-1-1"),
        Err(LicenseError::InvalidExpiration {
            reason: ExpirationRejection::Format,
            ..
        })
    ));
}

#[test]
fn generation_rejects_past_date() {
    assert!(matches!(
        issuer().generate("example.com", "2000-01-01"),
        Err(LicenseError::InvalidExpiration {
            reason: ExpirationRejection::NotInFuture,
            ..
        })
    ));
}

#[test]
fn custom_clock_drives_expiration_gate() {
    let mut clock = MockClock::at_local("2030-06-15 12:00:00");

    assert!(!domainlock::is_valid_expiration_date("2030-06-15", &clock));
    assert!(domainlock::is_valid_expiration_date("2030-06-16", &clock));

    clock.advance(chrono::Duration::days(1));
    assert!(!domainlock::is_valid_expiration_date("2030-06-16", &clock));
}

#[test]
fn issuer_with_mock_clock_gates_generation() {
    let issuer = LicenseIssuer::new_with_clock(
        IssuerConfig::default(),
        Arc::new(MockClock::at_local("2030-06-15 12:00:00")),
        Arc::new(FixedHardwareId::new("abc123")),
    )
    .unwrap();

    assert!(matches!(
        issuer.generate("example.com", "2030-06-15"),
        Err(LicenseError::InvalidExpiration {
            reason: ExpirationRejection::NotInFuture,
            ..
        })
    ));
    let key = issuer.generate("example.com", "2030-06-16").unwrap();
    assert!(issuer.verify(&key).is_ok());
}

#[test]
fn hmac_keys_need_the_secret() {
    let hardware = Arc::new(FixedHardwareId::new("abc123"));
    let signer =
        LicenseIssuer::with_hardware_id(IssuerConfig::with_hmac_secret("k1"), hardware.clone())
            .unwrap();
    let other =
        LicenseIssuer::with_hardware_id(IssuerConfig::with_hmac_secret("k2"), hardware).unwrap();

    let key = signer.generate("example.com", "2099-12-31").unwrap();
    assert_eq!(key.len(), 106);
    assert!(signer.verify(&key).is_ok());
    assert!(matches!(
        other.verify(&key),
        Err(LicenseError::ChecksumMismatch)
    ));
}

#[test]
fn report_serializes_to_json() {
    let issuer = issuer();
    let key = issuer.generate("example.com", "2099-12-31").unwrap();
    let report = issuer.verify(&key).unwrap();

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["canonical"], true);
    assert_eq!(json["salt"].as_str().unwrap().len(), 32);
}
