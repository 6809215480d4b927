//! Growable byte buffer used for inputs, outputs and scratch space.

use std::ops::{Deref, DerefMut};
use std::str;

/// Any single buffer growth request above this is refused.
const MAX_GROWTH: usize = 16 * 1024 * 1024;

/// A growable byte sequence.
///
/// Mirrors the `hoedown_buffer` data model: a size, a capacity, and a
/// reallocation unit. Growth is best-effort — a request that would exceed
/// the per-buffer cap is a silent no-op rather than a panic or an error,
/// matching the source's truncate-on-exhaustion semantics.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    data: Vec<u8>,
    unit: usize,
}

impl Buffer {
    /// Construct a buffer that grows in chunks of `unit` bytes.
    ///
    /// `unit == 0` marks a read-only/volatile view: such a buffer is never
    /// grown by `append`-family methods.
    pub fn new(unit: usize) -> Buffer {
        Buffer {
            data: Vec::new(),
            unit,
        }
    }

    /// Wrap existing bytes as an owned buffer with the given growth unit.
    pub fn from_bytes(bytes: &[u8], unit: usize) -> Buffer {
        Buffer {
            data: bytes.to_vec(),
            unit,
        }
    }

    /// `true` for a read-only/volatile view, which `append` refuses to grow.
    pub fn is_volatile(&self) -> bool {
        self.unit == 0
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reset to empty without releasing capacity. Used by the scratch pool
    /// to recycle a buffer for a new acquisition.
    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// Append raw bytes, respecting the growth cap and the volatile flag.
    pub fn append(&mut self, bytes: &[u8]) {
        if self.unit == 0 {
            log::warn!("append into a volatile buffer ignored");
            return;
        }

        if self.data.len().saturating_add(bytes.len()) > MAX_GROWTH {
            log::warn!(
                "buffer growth to {} bytes exceeds the {} byte cap; truncating append",
                self.data.len() + bytes.len(),
                MAX_GROWTH
            );
            let room = MAX_GROWTH.saturating_sub(self.data.len());
            self.data.extend_from_slice(&bytes[..room.min(bytes.len())]);
            return;
        }

        self.data.extend_from_slice(bytes);
    }

    pub fn append_byte(&mut self, byte: u8) {
        self.append(&[byte]);
    }

    pub fn append_str(&mut self, s: &str) {
        self.append(s.as_bytes());
    }

    /// Copy another buffer's contents into this one ("pipe" in the source).
    pub fn pipe(&mut self, other: &Buffer) {
        self.append(other.as_bytes());
    }

    /// Remove the first `n` bytes by shifting the remainder down.
    pub fn slurp(&mut self, n: usize) {
        let n = n.min(self.data.len());
        self.data.drain(0..n);
    }

    /// Truncate to `size` bytes. `size` must not exceed the current length.
    pub fn truncate(&mut self, size: usize) {
        self.data.truncate(size);
    }

    /// Lexicographic comparison of this buffer's first `prefix.len()` bytes
    /// against `prefix`. Returns `0` on equality, otherwise the sign of the
    /// first differing byte.
    pub fn prefix(&self, prefix: &[u8]) -> i32 {
        let n = prefix.len().min(self.data.len());
        for i in 0..n {
            let diff = self.data[i] as i32 - prefix[i] as i32;
            if diff != 0 {
                return diff;
            }
        }
        if self.data.len() < prefix.len() {
            -1
        } else {
            0
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn to_str(&self) -> Result<&str, str::Utf8Error> {
        str::from_utf8(&self.data)
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl<'a> From<&'a [u8]> for Buffer {
    fn from(bytes: &'a [u8]) -> Buffer {
        Buffer::from_bytes(bytes, 64)
    }
}

impl<'a> From<&'a str> for Buffer {
    fn from(s: &'a str) -> Buffer {
        Buffer::from(s.as_bytes())
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for Buffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_pipe() {
        let mut buf = Buffer::new(16);
        buf.append(b"hello");
        buf.append_byte(b' ');
        buf.append_str("world");
        assert_eq!(buf.to_str().unwrap(), "hello world");

        let mut out = Buffer::new(16);
        out.pipe(&buf);
        assert_eq!(out.as_bytes(), buf.as_bytes());
    }

    #[test]
    fn volatile_append_is_noop() {
        let mut buf = Buffer::new(0);
        buf.append(b"ignored");
        assert!(buf.is_empty());
    }

    #[test]
    fn slurp_removes_prefix() {
        let mut buf = Buffer::from("abcdef");
        buf.slurp(3);
        assert_eq!(buf.to_str().unwrap(), "def");
    }

    #[test]
    fn prefix_comparison() {
        let buf = Buffer::from("abcdef");
        assert_eq!(buf.prefix(b"abc"), 0);
        assert!(buf.prefix(b"abd") < 0);
        assert!(buf.prefix(b"aba") > 0);
    }

    #[test]
    fn growth_cap_truncates_silently() {
        let mut buf = Buffer::new(16);
        let chunk = vec![b'x'; 16 * 1024 * 1024 + 10];
        buf.append(&chunk);
        assert_eq!(buf.len(), 16 * 1024 * 1024);
    }
}
