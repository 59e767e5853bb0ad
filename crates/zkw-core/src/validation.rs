//! Validation of user-supplied key, address and amount text.
//!
//! Each parser returns the typed value the rest of the wallet consumes, so a spend request can
//! only be built from input that already passed these checks.

use num_bigint::BigUint;

use crate::base::{
    ADDRESS_HEX_LEN, ADDRESS_SIZE, AMOUNT_DECIMALS, Amount, FIELD_MODULUS, FieldElement,
    MIN_PRIVATE_KEY_BITS, PrivateKey, RecipientAddress,
};

/// Recoverable input errors; the message is meant to be shown next to the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Private key cannot be empty")]
    EmptyPrivateKey,
    #[error("Invalid private key format")]
    InvalidPrivateKeyFormat,
    #[error("Private key is too short; must be at least 128 bits")]
    PrivateKeyTooShort,
    #[error("Private key is too large")]
    PrivateKeyTooLarge,
    #[error("Recipient address cannot be empty")]
    EmptyAddress,
    #[error("Recipient address must be 40 hex characters (20 bytes)")]
    AddressLength,
    #[error("Recipient address contains invalid characters")]
    AddressCharacters,
    #[error("Amount cannot be empty")]
    EmptyAmount,
    #[error("Invalid amount format")]
    InvalidAmountFormat,
    #[error("Amount must be positive")]
    AmountNotPositive,
    #[error("Amount cannot have more than 18 decimal places")]
    TooManyDecimals,
}

fn strip_hex_prefix(input: &str) -> Option<&str> {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
}

fn split_minus(digits: &str) -> (bool, &str) {
    digits
        .strip_prefix('-')
        .map_or((false, digits), |rest| (true, rest))
}

/// Parse a private key given in decimal or `0x`-prefixed hex.
///
/// # Errors
/// If the input is empty, not a number, below `2^127`, or not below the field modulus.
pub fn parse_private_key(input: &str) -> Result<PrivateKey, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::EmptyPrivateKey);
    }

    let (negative, value) = match strip_hex_prefix(input) {
        Some(digits) => {
            let (negative, digits) = split_minus(digits);
            let value = (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()))
                .then(|| BigUint::parse_bytes(digits.as_bytes(), 16))
                .flatten();
            (negative, value)
        }
        None => {
            let (negative, digits) = split_minus(input);
            (negative, crate::base::parse_decimal(digits))
        }
    };
    let value = value.ok_or(ValidationError::InvalidPrivateKeyFormat)?;

    // A negative number is below the minimum key size.
    if negative || value.bits() <= MIN_PRIVATE_KEY_BITS {
        return Err(ValidationError::PrivateKeyTooShort);
    }
    if value >= *FIELD_MODULUS {
        return Err(ValidationError::PrivateKeyTooLarge);
    }

    let scalar = FieldElement::new(value).map_err(|_| ValidationError::PrivateKeyTooLarge)?;
    Ok(PrivateKey::from_validated(scalar))
}

/// Parse a 20-byte recipient address given as 40 hex characters, with or without `0x`.
///
/// # Errors
/// If the input is empty, has the wrong length, or contains non-hex characters.
pub fn parse_recipient_address(input: &str) -> Result<RecipientAddress, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::EmptyAddress);
    }

    let digits = strip_hex_prefix(input).unwrap_or(input);
    if digits.chars().count() != ADDRESS_HEX_LEN {
        return Err(ValidationError::AddressLength);
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ValidationError::AddressCharacters);
    }

    let mut bytes = [0_u8; ADDRESS_SIZE];
    hex::decode_to_slice(digits, &mut bytes).map_err(|_| ValidationError::AddressCharacters)?;
    Ok(RecipientAddress::from_bytes(bytes))
}

/// Parse a positive decimal coin amount and scale it to the smallest unit.
///
/// Accepts an optional sign, digits, and at most one decimal point. Trailing fractional zeros
/// count towards the 18-digit limit.
///
/// # Errors
/// If the input is empty, malformed, not positive, or has more than 18 fractional digits.
pub fn parse_amount(input: &str) -> Result<Amount, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }

    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    let (integer, fraction) = body.split_once('.').unwrap_or((body, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (integer.is_empty() && fraction.is_empty()) || !is_digits(integer) || !is_digits(fraction)
    {
        return Err(ValidationError::InvalidAmountFormat);
    }

    let is_zero = integer.bytes().chain(fraction.bytes()).all(|b| b == b'0');
    if negative || is_zero {
        return Err(ValidationError::AmountNotPositive);
    }
    if fraction.len() > AMOUNT_DECIMALS {
        return Err(ValidationError::TooManyDecimals);
    }

    let mut scaled = String::with_capacity(integer.len().saturating_add(AMOUNT_DECIMALS));
    scaled.push_str(integer);
    scaled.push_str(fraction);
    scaled.extend(std::iter::repeat_n('0', AMOUNT_DECIMALS.saturating_sub(fraction.len())));

    let units = BigUint::parse_bytes(scaled.as_bytes(), 10)
        .ok_or(ValidationError::InvalidAmountFormat)?;
    Ok(Amount::from_units(units))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::arithmetic_side_effects, reason = "Tests")]

    use super::*;

    fn two_pow_127() -> BigUint {
        BigUint::from(1_u8) << 127_u32
    }

    mod private_key {
        use super::*;

        #[test]
        fn accepts_lower_bound_in_decimal_and_hex() {
            let min = two_pow_127();
            let decimal = parse_private_key(&min.to_string()).expect("2^127 is valid");
            let hex = parse_private_key(&format!("0x{min:x}")).expect("hex 2^127 is valid");
            assert_eq!(decimal, hex);
            assert_eq!(decimal.scalar().as_biguint(), &min);
        }

        #[test]
        fn accepts_upper_bound() {
            let max = FIELD_MODULUS.clone() - 1_u32;
            assert!(parse_private_key(&max.to_string()).is_ok());
            assert!(parse_private_key(&format!("0X{max:X}")).is_ok());
        }

        #[test]
        fn accepts_example_key() {
            let key = format!("5{}", "0".repeat(75));
            assert!(parse_private_key(&key).is_ok());
        }

        #[test]
        fn rejects_short_keys() {
            let below = two_pow_127() - 1_u32;
            assert_eq!(
                parse_private_key(&below.to_string()),
                Err(ValidationError::PrivateKeyTooShort)
            );
            assert_eq!(
                parse_private_key("12345"),
                Err(ValidationError::PrivateKeyTooShort)
            );
            assert_eq!(
                parse_private_key("0x01"),
                Err(ValidationError::PrivateKeyTooShort)
            );
        }

        #[test]
        fn rejects_modulus_and_above() {
            assert_eq!(
                parse_private_key(&FIELD_MODULUS.to_string()),
                Err(ValidationError::PrivateKeyTooLarge)
            );
            let above = FIELD_MODULUS.clone() * 2_u32;
            assert_eq!(
                parse_private_key(&format!("0x{above:x}")),
                Err(ValidationError::PrivateKeyTooLarge)
            );
        }

        #[test]
        fn rejects_non_numeric_input() {
            assert_eq!(parse_private_key(""), Err(ValidationError::EmptyPrivateKey));
            for bad in ["abc", "0x", "0xzz", "12 34", "-", "--5", "0x-", "-0x5"] {
                assert_eq!(
                    parse_private_key(bad),
                    Err(ValidationError::InvalidPrivateKeyFormat),
                    "{bad:?}"
                );
            }
        }

        #[test]
        fn negative_keys_are_too_short() {
            let min = two_pow_127();
            for negative in [format!("-{min}"), format!("0x-{min:x}"), "-0".to_owned()] {
                assert_eq!(
                    parse_private_key(&negative),
                    Err(ValidationError::PrivateKeyTooShort),
                    "{negative:?}"
                );
            }
        }
    }

    mod address {
        use super::*;

        #[test]
        fn accepts_forty_hex_characters() {
            let plain = format!("{}abc", "0".repeat(37));
            let parsed = parse_recipient_address(&plain).expect("valid address");
            assert_eq!(parsed.to_string(), format!("0x{plain}"));
            assert_eq!(
                parse_recipient_address(&format!("0x{plain}")),
                Ok(parsed)
            );
            assert!(parse_recipient_address("0XABCDEFabcdef0123456789ABCDEFabcdef012345").is_ok());
        }

        #[test]
        fn rejects_wrong_length() {
            assert_eq!(parse_recipient_address(""), Err(ValidationError::EmptyAddress));
            let candidates = [
                "0x".to_owned(),
                "abc".to_owned(),
                "a".repeat(39),
                "a".repeat(41),
                format!("0x{}", "a".repeat(42)),
            ];
            for bad in &candidates {
                assert_eq!(
                    parse_recipient_address(bad),
                    Err(ValidationError::AddressLength),
                    "{bad:?}"
                );
            }
        }

        #[test]
        fn rejects_non_hex_characters() {
            let bad = format!("{}g", "0".repeat(39));
            assert_eq!(
                parse_recipient_address(&bad),
                Err(ValidationError::AddressCharacters)
            );
        }
    }

    mod amount {
        use super::*;

        #[test]
        fn scales_exactly() {
            let amount = parse_amount("0.01").expect("valid amount");
            assert_eq!(amount.to_units_string(), "10000000000000000");

            let amount = parse_amount("12").expect("valid amount");
            assert_eq!(amount.to_units_string(), "12000000000000000000");

            let smallest = parse_amount("0.000000000000000001").expect("18 decimals is valid");
            assert_eq!(smallest.to_units_string(), "1");

            assert_eq!(
                parse_amount(".5").expect("leading point").to_units_string(),
                "500000000000000000"
            );
            assert!(parse_amount("5.").is_ok());
            assert!(parse_amount("+1.5").is_ok());
        }

        #[test]
        fn rejects_non_positive() {
            for bad in ["0", "0.000", "-1", "-0.5", "-0"] {
                assert_eq!(
                    parse_amount(bad),
                    Err(ValidationError::AmountNotPositive),
                    "{bad:?}"
                );
            }
        }

        #[test]
        fn rejects_too_many_decimals() {
            assert_eq!(
                parse_amount("0.0000000000000000001"),
                Err(ValidationError::TooManyDecimals)
            );
            assert_eq!(
                parse_amount("1.0000000000000000000"),
                Err(ValidationError::TooManyDecimals)
            );
        }

        #[test]
        fn rejects_malformed_input() {
            assert_eq!(parse_amount(""), Err(ValidationError::EmptyAmount));
            for bad in [".", "abc", "1.2.3", "1,5", "1e3", " 1", "--1"] {
                assert_eq!(
                    parse_amount(bad),
                    Err(ValidationError::InvalidAmountFormat),
                    "{bad:?}"
                );
            }
        }
    }
}
