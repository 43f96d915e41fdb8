use std::collections::BTreeMap;

use crate::{
    core::constants::{DENSE_GAP, MEMORY_HEADROOM},
    error::Error,
};

/// The [`Memory`] struct represents the auto-extending memory of an Intcode interpreter.
///
/// Addresses that have never been written read as zero. Memory is held as a dense region
/// starting at address 0, which grows with zero-fill when a write lands within [`DENSE_GAP`]
/// words of its end, plus a sparse map for writes further out. Any address representable as a
/// `usize` can be written without allocating the words in between.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    /// Contiguous words starting at address 0
    dense: Vec<i64>,

    /// Words written far past the end of the dense region
    sparse: BTreeMap<usize, i64>,

    /// Optional ceiling on the number of addressable words
    limit: Option<usize>,
}

impl Memory {
    /// Creates a new, empty [`Memory`]
    pub fn new() -> Memory {
        Memory::default()
    }

    /// Creates a [`Memory`] holding the given program image at addresses `0..program.len()`.
    ///
    /// ```
    /// use intcode_vm::core::memory::Memory;
    ///
    /// let memory = Memory::from_program(&[1, 0, 0, 0, 99]);
    /// assert_eq!(memory.size(), 5);
    /// assert_eq!(memory.read(4), 99);
    /// ```
    pub fn from_program(program: &[i64]) -> Memory {
        let mut dense = Vec::with_capacity(program.len() + MEMORY_HEADROOM);
        dense.extend_from_slice(program);
        Memory { dense, sparse: BTreeMap::new(), limit: None }
    }

    /// Sets a ceiling on the number of addressable words. Writes at or beyond the ceiling fail
    /// with [`Error::OutOfBounds`].
    pub fn with_limit(mut self, limit: Option<usize>) -> Memory {
        self.limit = limit;
        self
    }

    /// Returns the configured ceiling, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Gets the size of the dense region in words.
    ///
    /// ```
    /// use intcode_vm::core::memory::Memory;
    ///
    /// let memory = Memory::new();
    /// assert_eq!(memory.size(), 0);
    /// ```
    pub fn size(&self) -> usize {
        self.dense.len()
    }

    /// Grows the dense region so that `address` is backed, if `address` is close enough to its
    /// end. Returns whether `address` now lies in the dense region.
    ///
    /// ```
    /// use intcode_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// assert!(memory.extend(31).unwrap());
    /// assert_eq!(memory.size(), 32);
    ///
    /// assert!(!memory.extend(1 << 40).unwrap());
    /// assert_eq!(memory.size(), 32);
    /// ```
    pub fn extend(&mut self, address: usize) -> Result<bool, Error> {
        if let Some(limit) = self.limit {
            if address >= limit {
                return Err(Error::OutOfBounds { address, limit });
            }
        }

        let len = self.dense.len();
        if address < len {
            return Ok(true);
        }
        if address - len > DENSE_GAP {
            return Ok(false);
        }

        let new_len = address + 1;
        self.dense
            .try_reserve(new_len - len)
            .map_err(|_| Error::MemoryExhausted { address })?;
        self.dense.resize(new_len, 0);

        // pull sparse words now covered by the dense region back into it
        let far = self.sparse.split_off(&new_len);
        for (address, value) in std::mem::replace(&mut self.sparse, far) {
            self.dense[address] = value;
        }
        Ok(true)
    }

    /// Store a value at the given address, extending the memory if necessary.
    ///
    /// ```
    /// use intcode_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.store(3, 42).unwrap();
    /// assert_eq!(memory.as_slice(), &[0, 0, 0, 42]);
    /// ```
    pub fn store(&mut self, address: usize, value: i64) -> Result<(), Error> {
        if self.extend(address)? {
            self.dense[address] = value;
        } else {
            self.sparse.insert(address, value);
        }
        Ok(())
    }

    /// Read the word at the given address. Addresses that were never written read as zero.
    ///
    /// ```
    /// use intcode_vm::core::memory::Memory;
    ///
    /// let memory = Memory::from_program(&[7]);
    /// assert_eq!(memory.read(0), 7);
    /// assert_eq!(memory.read(1_000_000), 0);
    /// ```
    pub fn read(&self, address: usize) -> i64 {
        match self.dense.get(address) {
            Some(&value) => value,
            None => self.sparse.get(&address).copied().unwrap_or(0),
        }
    }

    /// Returns the dense region as a slice.
    pub fn as_slice(&self) -> &[i64] {
        &self.dense
    }

    /// Returns the words held outside the dense region, in address order.
    pub fn sparse_words(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.sparse.iter().map(|(&address, &value)| (address, value))
    }
}
