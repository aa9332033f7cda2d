//! Integration test harness.
//!
//! `SparseBus` backs the Memory adapter contract with a `HashMap<u32, u8>`,
//! for fixtures that touch addresses scattered across the 32-bit space.

use std::collections::HashMap;

use thumb0_core::{Access, Memory, MemoryError};

#[derive(Default)]
pub struct SparseBus {
    bytes: HashMap<u32, u8>,
    pub fail_addrs: Vec<u32>,
}

impl SparseBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_byte(&mut self, addr: u32, value: u8) {
        self.bytes.insert(addr, value);
    }

    fn get_byte(&self, addr: u32) -> u8 {
        *self.bytes.get(&addr).unwrap_or(&0)
    }

    /// Load a vector-table entry (a 32-bit little-endian word) at `4 * vector_num`.
    pub fn set_vector(&mut self, vector_num: u32, addr: u32) {
        self.write_halfwords(vector_num * 4, addr);
    }

    fn write_halfwords(&mut self, addr: u32, value: u32) {
        let bytes = value.to_le_bytes();
        for (i, b) in bytes.iter().enumerate() {
            self.set_byte(addr + i as u32, *b);
        }
    }

    /// Load a program (sequence of 16-bit words) at `base`.
    pub fn load_program(&mut self, base: u32, words: &[u16]) {
        for (i, word) in words.iter().enumerate() {
            let addr = base + (i as u32) * 2;
            let bytes = word.to_le_bytes();
            self.set_byte(addr, bytes[0]);
            self.set_byte(addr + 1, bytes[1]);
        }
    }

    fn word_at(&self, addr: u32) -> u32 {
        u32::from_le_bytes([
            self.get_byte(addr),
            self.get_byte(addr + 1),
            self.get_byte(addr + 2),
            self.get_byte(addr + 3),
        ])
    }

    pub fn read_word_direct(&self, addr: u32) -> u32 {
        self.word_at(addr)
    }
}

impl Memory for SparseBus {
    fn fetch_halfword(&mut self, addr: u32) -> Result<u16, MemoryError> {
        if self.fail_addrs.contains(&addr) {
            return Err(MemoryError::at(addr));
        }
        Ok(u16::from_le_bytes([self.get_byte(addr), self.get_byte(addr + 1)]))
    }

    fn access_word(&mut self, addr: u32, value: &mut u32, dir: Access) -> Result<(), MemoryError> {
        if self.fail_addrs.contains(&addr) {
            return Err(MemoryError::at(addr));
        }
        match dir {
            Access::Read => {
                *value = self.word_at(addr);
                Ok(())
            }
            Access::Write => {
                self.write_halfwords(addr, *value);
                Ok(())
            }
        }
    }
}
