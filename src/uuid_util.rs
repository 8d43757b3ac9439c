use std::fmt::Write;

use rand::RngCore;

/// Checks that a user id is a UUID v4 string (with or without dashes) with
/// the RFC 4122 variant, as the external tool requires for vmess ids.
pub fn validate_user_id(id: &str) -> std::io::Result<()> {
    let mut bytes = Vec::with_capacity(16);
    let mut first_nibble: Option<u8> = None;
    for &c in id.as_bytes() {
        let hex = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            b'-' => continue,
            _ => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Invalid uuid: {id}"),
                ));
            }
        };
        if let Some(first) = first_nibble.take() {
            bytes.push((first << 4) | hex);
        } else {
            first_nibble = Some(hex);
        }
    }
    if first_nibble.is_some() || bytes.len() != 16 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Invalid uuid: {id}"),
        ));
    }

    // Version 4: upper nibble of byte 6 must be 4.
    if (bytes[6] >> 4) != 4 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("UUID is not version 4: {id}"),
        ));
    }

    // RFC 4122 variant: upper 2 bits of byte 8 must be 10.
    if (bytes[8] >> 6) != 2 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("UUID does not have RFC 4122 variant: {id}"),
        ));
    }

    Ok(())
}

/// Generates a random UUID v4 as a formatted string, for minting user ids.
pub fn generate_uuid() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);

    // Version (4) in bits 12-15 of byte 6.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;

    // Variant (RFC 4122) in bits 6-7 of byte 8.
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let mut s = String::with_capacity(36);
    for (i, &b) in bytes.iter().enumerate() {
        if i == 4 || i == 6 || i == 8 || i == 10 {
            s.push('-');
        }
        let _ = write!(s, "{:02x}", b);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_uuid_format() {
        let uuid = generate_uuid();
        assert_eq!(uuid.len(), 36);
        assert_eq!(uuid.chars().nth(8), Some('-'));
        assert_eq!(uuid.chars().nth(13), Some('-'));
        assert_eq!(uuid.chars().nth(18), Some('-'));
        assert_eq!(uuid.chars().nth(23), Some('-'));

        // Version nibble.
        assert_eq!(uuid.chars().nth(14), Some('4'));

        // Variant nibble must be 8, 9, a, or b.
        let variant_char = uuid.chars().nth(19).unwrap();
        assert!(matches!(variant_char, '8' | '9' | 'a' | 'b'));
    }

    #[test]
    fn test_generate_uuid_validates() {
        let uuid = generate_uuid();
        validate_user_id(&uuid).unwrap();
    }

    #[test]
    fn test_validate_with_and_without_dashes() {
        validate_user_id("550e8400-e29b-41d4-a716-446655440000").unwrap();
        validate_user_id("550e8400e29b41d4a716446655440000").unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        // Wrong length.
        assert!(validate_user_id("550e8400").is_err());
        // Non-hex character.
        assert!(validate_user_id("550e8400-e29b-41d4-a716-44665544000z").is_err());
        // Version 1.
        assert!(validate_user_id("550e8400-e29b-11d4-a716-446655440000").is_err());
        // Wrong variant.
        assert!(validate_user_id("550e8400-e29b-41d4-c716-446655440000").is_err());
    }
}
