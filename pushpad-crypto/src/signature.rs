//! Uid signatures.
//!
//! ```text
//! uid_signature = hex(HMAC-SHA1(auth_token, uid))
//! ```
//!
//! The same `(token, uid)` always yields the same 40-character lowercase
//! hex string, so links built from it are stable and verifiable server-side.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;

use pushpad_core::constants::{UID_PARAM, UID_SIGNATURE_PARAM};
use pushpad_core::error::Result;
use pushpad_core::{PushpadConfig, QueryParams};

type HmacSha1 = Hmac<Sha1>;

/// Computes the hex HMAC-SHA1 of `data` keyed with `secret`.
pub fn signature_for(secret: &str, data: &str) -> String {
    // HMAC accepts keys of any length
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Signs `data` with the configured auth token.
pub fn sign(config: &PushpadConfig, data: &str) -> Result<String> {
    let token = config.require_auth_token()?;
    Ok(signature_for(token, data))
}

/// Checks a signature in constant time.
pub fn verify_signature(secret: &str, data: &str, signature: &str) -> bool {
    let expected = signature_for(secret, data);
    let candidate = signature.to_ascii_lowercase();
    expected.as_bytes().ct_eq(candidate.as_bytes()).into()
}

/// Builds the signed link where `uid` can manage its subscription.
///
/// `<base>/projects/<pid>/subscription/edit?uid=<uid>&uid_signature=<hex>`
pub fn subscription_edit_url(
    config: &PushpadConfig,
    uid: &str,
    project_id: Option<u64>,
) -> Result<String> {
    let signature = sign(config, uid)?;
    let project_id = config.resolve_project_id(project_id)?;

    let mut params = QueryParams::new();
    params.push(UID_PARAM, uid);
    params.push(UID_SIGNATURE_PARAM, signature);

    let base = config.url(&format!("/projects/{project_id}/subscription/edit"));
    Ok(params.apply_to(&base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_vector() {
        assert_eq!(
            signature_for("abc123", "myuid1"),
            "27fbe136f5a4aa0b6be74c0e18fa8ce81ad91b60"
        );
    }

    #[test]
    fn test_sign_requires_token() {
        let err = sign(&PushpadConfig::default(), "myuid1").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_sign_uses_config_token() {
        let config = PushpadConfig::new("abc123");
        assert_eq!(sign(&config, "myuid1").unwrap(), signature_for("abc123", "myuid1"));
    }

    #[test]
    fn test_edit_url() {
        let config = PushpadConfig::new("abc123").with_project_id(123);
        let url = subscription_edit_url(&config, "myuid1", None).unwrap();
        assert_eq!(
            url,
            "https://pushpad.xyz/projects/123/subscription/edit?uid=myuid1&uid_signature=27fbe136f5a4aa0b6be74c0e18fa8ce81ad91b60"
        );
    }

    #[test]
    fn test_edit_url_project_override_and_encoding() {
        let config = PushpadConfig::new("abc123");
        let url = subscription_edit_url(&config, "a b", Some(7)).unwrap();
        let expected_sig = signature_for("abc123", "a b");
        assert_eq!(
            url,
            format!("https://pushpad.xyz/projects/7/subscription/edit?uid=a%20b&uid_signature={expected_sig}")
        );
    }

    #[test]
    fn test_edit_url_requires_project() {
        let err = subscription_edit_url(&PushpadConfig::new("abc123"), "u", None).unwrap_err();
        assert!(err.to_string().contains("must set project_id"));
    }

    #[test]
    fn test_verify_signature() {
        let sig = signature_for("abc123", "myuid1");
        assert!(verify_signature("abc123", "myuid1", &sig));
        assert!(verify_signature("abc123", "myuid1", &sig.to_uppercase()));
        assert!(!verify_signature("abc123", "myuid2", &sig));
        assert!(!verify_signature("abc123", "myuid1", &sig[..39]));
    }

    proptest! {
        #[test]
        fn prop_deterministic(secret in ".{1,64}", data in ".{0,64}") {
            let a = signature_for(&secret, &data);
            let b = signature_for(&secret, &data);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.len(), 40);
            prop_assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }

        #[test]
        fn prop_data_change_changes_output(secret in "[a-z0-9]{1,32}", data in "[a-z0-9]{1,32}") {
            let mut other = data.clone();
            other.push('x');
            prop_assert_ne!(signature_for(&secret, &data), signature_for(&secret, &other));
        }

        #[test]
        fn prop_secret_change_changes_output(secret in "[a-z0-9]{1,32}", data in "[a-z0-9]{0,32}") {
            let other = format!("{secret}x");
            prop_assert_ne!(signature_for(&secret, &data), signature_for(&other, &data));
        }
    }
}
