//! ASCII case folding shared by the index and the matcher.
//!
//! Only `A-Z` are folded. Every other byte, including UTF-8 continuation
//! bytes, is kept as-is so non-ASCII names compare byte for byte.

/// Lowercase the ASCII letters of `text`, returning the folded bytes
#[inline]
pub fn fold_ascii(text: &str) -> Vec<u8> {
    text.bytes().map(|b| b.to_ascii_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_ascii() {
        assert_eq!(fold_ascii("Report_Final.PDF"), b"report_final.pdf");
        assert_eq!(fold_ascii(""), b"");
    }

    #[test]
    fn test_fold_leaves_non_ascii_alone() {
        // 'É' is two bytes in UTF-8 and must not be touched
        let folded = fold_ascii("CAFÉ");
        assert_eq!(folded, "cafÉ".as_bytes());
    }
}
