//! Reusable element fixtures and comparators.
//!
//! - [`Padded`]: a `#[repr(C)]` element with interior padding, for checking
//!   byte-identity behavior.
//! - [`cmp_le_u32`]: three-way comparator over little-endian `u32` bytes,
//!   for byte-erased sorting.
//! - [`by_key_desc`]: descending comparator for typed sorting.

use std::cmp::Ordering;

/// A 16-byte element with 7 bytes of padding after `tag`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Padded {
    pub tag: u8,
    pub value: u64,
}

impl Padded {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn new(tag: u8, value: u64) -> Self {
        Self { tag, value }
    }

    /// Bytes with deterministic (zeroed) padding.
    pub fn to_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[0] = self.tag;
        out[8..].copy_from_slice(&self.value.to_le_bytes());
        out
    }

    /// Inverse of [`to_bytes`](Self::to_bytes); padding is ignored.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut value = [0u8; 8];
        value.copy_from_slice(&bytes[8..16]);
        Self {
            tag: bytes[0],
            value: u64::from_le_bytes(value),
        }
    }
}

/// Compare two 4-byte little-endian integers.
pub fn cmp_le_u32(a: &[u8], b: &[u8]) -> Ordering {
    let read = |s: &[u8]| u32::from_le_bytes([s[0], s[1], s[2], s[3]]);
    read(a).cmp(&read(b))
}

/// Descending order on an `Ord` key.
pub fn by_key_desc<T, K: Ord>(key: impl Fn(&T) -> K) -> impl Fn(&T, &T) -> Ordering {
    move |a: &T, b: &T| key(b).cmp(&key(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_layout() {
        assert_eq!(Padded::SIZE, 16);
        let p = Padded::new(3, 0xDEAD_BEEF);
        assert_eq!(Padded::from_bytes(&p.to_bytes()), p);
        assert!(p.to_bytes()[1..8].iter().all(|&b| b == 0));
    }

    #[test]
    fn le_comparator() {
        assert_eq!(
            cmp_le_u32(&256u32.to_le_bytes(), &255u32.to_le_bytes()),
            Ordering::Greater
        );
    }

    #[test]
    fn descending_key() {
        let mut v = vec![Padded::new(1, 5), Padded::new(2, 9)];
        v.sort_by(by_key_desc(|p: &Padded| p.value));
        assert_eq!(v[0].value, 9);
    }
}
