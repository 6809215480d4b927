//! Scratch-buffer pools.
//!
//! A pool is used as a stack: acquiring a buffer reuses one previously
//! released (its size reset to zero) or allocates a fresh one at the pool's
//! unit size. Recognizers that acquire a scratch buffer must release it
//! before returning, even on early exit — the pool's `active` counter is a
//! runtime check of that discipline, asserted to be zero once a render
//! completes.
//!
//! Buffers are cached rather than freed between acquisitions: safe because
//! a pool is only ever touched by one thread at a time and its depth is
//! bounded by the parser's configured nesting limit.

use crate::buffer::Buffer;

pub struct ScratchPool {
    unit: usize,
    free: Vec<Buffer>,
    active: usize,
}

impl ScratchPool {
    pub fn new(unit: usize) -> ScratchPool {
        ScratchPool {
            unit,
            free: Vec::new(),
            active: 0,
        }
    }

    /// Acquire a scratch buffer, reusing a cached one if available.
    pub fn acquire(&mut self) -> Buffer {
        self.active += 1;
        match self.free.pop() {
            Some(mut buf) => {
                buf.reset();
                buf
            }
            None => Buffer::new(self.unit),
        }
    }

    /// Return a buffer to the pool for reuse.
    pub fn release(&mut self, buf: Buffer) {
        debug_assert!(self.active > 0, "scratch pool released more than acquired");
        self.active = self.active.saturating_sub(1);
        self.free.push(buf);
    }

    /// Number of buffers currently checked out. Must be zero once a
    /// document finishes rendering.
    pub fn active(&self) -> usize {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_released_buffers() {
        let mut pool = ScratchPool::new(64);
        let mut buf = pool.acquire();
        buf.append(b"scratch");
        assert_eq!(pool.active(), 1);
        pool.release(buf);
        assert_eq!(pool.active(), 0);

        let reused = pool.acquire();
        assert!(reused.is_empty(), "released buffer must come back reset");
        pool.release(reused);
    }

    #[test]
    fn nested_acquisitions_track_depth() {
        let mut pool = ScratchPool::new(64);
        let a = pool.acquire();
        let b = pool.acquire();
        assert_eq!(pool.active(), 2);
        pool.release(b);
        pool.release(a);
        assert_eq!(pool.active(), 0);
    }
}
