use quickcheck::QuickCheck;

use super::{arbitrary::Utf8Soup, test_count};
use crate::{NO_LIMIT, U_SPECIAL, sanitize};

/// Property: sanitizing leaves well-formed UTF-8 free of C0 controls, keeps
/// the length, reports exactly the bytes it changed, and a second pass finds
/// nothing left to do.
#[test]
fn sanitize_repairs_quickcheck() {
    fn prop(soup: Utf8Soup) -> bool {
        let original = soup.0;
        let mut buf = original.clone();

        let count = sanitize(&mut buf, NO_LIMIT, U_SPECIAL);
        let changed = original.iter().zip(&buf).filter(|(a, b)| a != b).count();

        buf.len() == original.len()
            && count == changed
            && core::str::from_utf8(&buf).is_ok()
            && buf.iter().all(|&b| b >= b' ')
            && sanitize(&mut buf, NO_LIMIT, U_SPECIAL) == 0
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Utf8Soup) -> bool);
}

/// Property: sanitizing never touches bytes past `max_bytes`.
#[test]
fn sanitize_respects_limit_quickcheck() {
    fn prop(soup: Utf8Soup, limit: usize) -> bool {
        let original = soup.0;
        let limit = limit % (original.len() + 1);
        let mut buf = original.clone();

        sanitize(&mut buf, limit, U_SPECIAL);
        buf[limit..] == original[limit..]
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Utf8Soup, usize) -> bool);
}
