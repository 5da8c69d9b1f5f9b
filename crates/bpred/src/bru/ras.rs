//! Return Address Stack (RAS).
//!
//! Pushes return addresses on calls and pops them on returns so the front-end
//! can predict the target of a return before it resolves. When full, a push
//! overwrites the top entry and keeps the older frames.

use crate::common::ConfigError;

/// Return Address Stack structure.
#[derive(Debug, Clone)]
pub struct Ras {
    /// The stack storage.
    stack: Vec<u64>,
    /// Number of live entries.
    ptr: usize,
}

impl Ras {
    /// Creates a new Return Address Stack with the specified capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Zero`] for a zero capacity.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::Zero {
                field: "return address stack size",
            });
        }
        Ok(Self {
            stack: vec![0; capacity],
            ptr: 0,
        })
    }

    /// Pushes a return address onto the stack.
    ///
    /// If the stack is full, the top entry is overwritten.
    pub fn push(&mut self, addr: u64) {
        if self.ptr < self.stack.len() {
            self.stack[self.ptr] = addr;
            self.ptr += 1;
        } else if let Some(top) = self.stack.last_mut() {
            *top = addr;
        }
    }

    /// Pops a return address, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<u64> {
        if self.ptr == 0 {
            None
        } else {
            self.ptr -= 1;
            Some(self.stack[self.ptr])
        }
    }

    /// Peeks at the top of the stack without removing the entry.
    pub fn top(&self) -> Option<u64> {
        self.ptr.checked_sub(1).map(|i| self.stack[i])
    }

    /// Live entries.
    pub const fn len(&self) -> usize {
        self.ptr
    }

    /// True if nothing has been pushed since the last reset.
    pub const fn is_empty(&self) -> bool {
        self.ptr == 0
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.stack.len()
    }

    /// Drops every entry.
    pub fn reset(&mut self) {
        self.stack.fill(0);
        self.ptr = 0;
    }
}
