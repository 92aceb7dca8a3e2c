//! Character classification helpers.
//!
//! Classification operates on decoded code points (`u32`) because the
//! tokenizer's character fetch returns scalars, not `char`s. Identifiers,
//! digits and keywords are ASCII-only in this dialect; the only non-ASCII
//! code points with lexical meaning are U+2295 and U+2297.

/// True for characters that may start an identifier: `[A-Za-z_]`.
#[inline]
pub fn is_ident_start(c: u32) -> bool {
    matches!(c, 0x41..=0x5A | 0x61..=0x7A) || c == b'_' as u32
}

/// True for characters that may continue an identifier: `[A-Za-z0-9_]`.
#[inline]
pub fn is_ident_continue(c: u32) -> bool {
    is_ident_start(c) || is_digit(c)
}

/// True for ASCII decimal digits.
#[inline]
pub fn is_digit(c: u32) -> bool {
    matches!(c, 0x30..=0x39)
}

/// True for ASCII hexadecimal digits.
#[inline]
pub fn is_hex_digit(c: u32) -> bool {
    is_digit(c) || matches!(c, 0x41..=0x46 | 0x61..=0x66)
}

/// True for ASCII octal digits.
#[inline]
pub fn is_octal_digit(c: u32) -> bool {
    matches!(c, 0x30..=0x37)
}

/// True for binary digits.
#[inline]
pub fn is_binary_digit(c: u32) -> bool {
    c == b'0' as u32 || c == b'1' as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_start() {
        assert!(is_ident_start(b'a' as u32));
        assert!(is_ident_start(b'Z' as u32));
        assert!(is_ident_start(b'_' as u32));
        assert!(!is_ident_start(b'1' as u32));
        assert!(!is_ident_start(0x2295));
    }

    #[test]
    fn test_ident_continue() {
        assert!(is_ident_continue(b'x' as u32));
        assert!(is_ident_continue(b'9' as u32));
        assert!(!is_ident_continue(b'-' as u32));
    }

    #[test]
    fn test_digits() {
        assert!(is_digit(b'0' as u32));
        assert!(is_digit(b'9' as u32));
        assert!(!is_digit(b'a' as u32));

        assert!(is_hex_digit(b'f' as u32));
        assert!(is_hex_digit(b'A' as u32));
        assert!(!is_hex_digit(b'g' as u32));

        assert!(is_octal_digit(b'7' as u32));
        assert!(!is_octal_digit(b'8' as u32));

        assert!(is_binary_digit(b'1' as u32));
        assert!(!is_binary_digit(b'2' as u32));
    }
}
