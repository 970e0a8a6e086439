// Sync code generation and validation
//
// A sync code is the only secret tying an upload to a download: 10 random
// base-36 digits shown as two 5-character groups, e.g. "K3F9A-02XQZ".
// Codes are typed by hand on the other device, so the alphabet is limited
// to digits and uppercase letters and input is normalized before checking.

use rand::Rng;
use regex::Regex;

/// Base-36 digit alphabet used by sync codes
pub const CODE_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Total length of a formatted code, separator included
pub const CODE_LEN: usize = 11;

/// Code format regex - 5 alphabet chars, dash, 5 alphabet chars
fn code_regex() -> Regex {
    Regex::new(r"^[0-9A-Z]{5}-[0-9A-Z]{5}$").unwrap()
}

/// Generate a fresh sync code from a cryptographically secure random value.
pub fn generate_code() -> String {
    encode_code(rand::rng().random::<u64>())
}

/// Encode a raw 64-bit value as a sync code.
///
/// Digits are emitted least-significant first, ten of them, with a dash
/// after the fifth. Deterministic, so tests can pin a known value.
pub fn encode_code(raw: u64) -> String {
    let mut value = raw;
    let mut code = String::with_capacity(CODE_LEN);

    for i in 0..10 {
        if i == 5 {
            code.push('-');
        }
        code.push(CODE_ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }

    code
}

/// Trim and uppercase user input before validation.
pub fn normalize_code(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Check that a candidate code is well-formed.
///
/// Does not check whether the code corresponds to any remote copy - that
/// is only discovered at download time via a not-found response.
pub fn validate_code(candidate: &str) -> bool {
    candidate.len() == CODE_LEN && code_regex().is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_validate() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LEN);
            assert!(validate_code(&code), "generated code failed: {}", code);
        }
    }

    #[test]
    fn test_encode_deterministic() {
        assert_eq!(encode_code(0), "00000-00000");
        assert_eq!(encode_code(1), "10000-00000");
        assert_eq!(encode_code(35), "Z0000-00000");
        assert_eq!(encode_code(36), "01000-00000");
        assert_eq!(encode_code(42), "61000-00000");
        assert_eq!(encode_code(1234), "AY000-00000"); // 1234 = 34 * 36 + 10
        assert!(validate_code(&encode_code(u64::MAX)));
    }

    #[test]
    fn test_validate_accepts_wellformed() {
        assert!(validate_code("ABCDE-12345"));
        assert!(validate_code("00000-00000"));
        assert!(validate_code("ZZZZZ-ZZZZZ"));
    }

    #[test]
    fn test_validate_rejects_malformed() {
        assert!(!validate_code(""));
        assert!(!validate_code("ABCDE12345")); // no dash
        assert!(!validate_code("ABCDEF12345")); // dash missing, right length
        assert!(!validate_code("ABCD-E12345")); // dash in wrong place
        assert!(!validate_code("abcde-12345")); // lowercase
        assert!(!validate_code("ABCDE-1234")); // too short
        assert!(!validate_code("ABCDE-123456")); // too long
        assert!(!validate_code("ABC!E-12345")); // symbol outside alphabet
        assert!(!validate_code("ABCDE 12345")); // space instead of dash
    }

    #[test]
    fn test_normalize_then_validate() {
        assert!(!validate_code("abcde-12345"));
        assert!(validate_code(&normalize_code("abcde-12345")));
        assert!(validate_code(&normalize_code("  ABCDE-12345\n")));
    }
}
