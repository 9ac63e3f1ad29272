//
//   Copyright 2016 Andrew Hunter
//
//   Licensed under the Apache License, Version 2.0 (the "License");
//   you may not use this file except in compliance with the License.
//   You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
//   Unless required by applicable law or agreed to in writing, software
//   distributed under the License is distributed on an "AS IS" BASIS,
//   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//   See the License for the specific language governing permissions and
//   limitations under the License.
//

//!
//! # Compact bit vector
//!
//! A fixed-length ordered set of booleans packed into 64-bit words. The length is declared at construction and never
//! changes; bits at indices at or beyond the length may exist in the backing storage but are logically absent, so
//! every length-sensitive read (`count`, enumeration, equality, `get_lowest`) masks the final partial word before
//! using it. `all_set` is the deliberate exception: it compares the final word against the length-derived mask
//! *exactly*, so residual garbage planted beyond the length makes it report false rather than being quietly ignored.
//!
//! The word-level algebra comes in two flavours. The allocating operations (`and`, `or`, `xor`, `not`) build a new
//! vector sized to the longer operand, treating the shorter operand as zero-extended. The local operations
//! (`and_local` and friends) mutate in place over the overlapping word range only and do not re-mask the tail;
//! `not_local` in particular can set phantom bits beyond the length, which the masking readers then disregard.
//!
//! Any finite collection of indices can be used with the set-style operations (`union_with`, `is_subset_of`, ...);
//! a temporary vector of the same shape is materialized for them. Containers that already expose 64-bit blocks
//! (other bit vectors, the 8×8 tile) skip that step via the `_blocks` variants, which work purely through the
//! `BitBlockSource` capability.
//!

use std::fmt;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use super::bit_block::*;
use super::bit_utils::*;

///
/// A fixed-length bit set packed into 64-bit words
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompactBitVector {
    /// Number of bits this vector represents
    length: usize,

    /// Backing words; the final word may carry residual bits beyond `length`
    words: Vec<u64>
}

///
/// Error produced when parsing a bit vector from a string of '0's and '1's fails
///
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid bit character {character:?} at position {position}")]
pub struct ParseBitVectorError {
    /// Offset of the offending character
    pub position: usize,

    /// The character that was neither '0' nor '1'
    pub character: char
}

impl CompactBitVector {
    ///
    /// Creates a vector of the given length with every bit clear
    ///
    pub fn new(length: usize) -> CompactBitVector {
        CompactBitVector { length: length, words: vec![0; blocks_for(length)] }
    }

    ///
    /// Creates a vector over an existing word array
    ///
    /// The words are taken over as-is: residual bits beyond `length` in the final word are kept in storage (and
    /// treated as absent by the masking readers). The array must contain exactly the number of words the length
    /// calls for.
    ///
    pub fn from_words(length: usize, words: Vec<u64>) -> CompactBitVector {
        assert!(words.len() == blocks_for(length), "word count does not match the declared length");

        CompactBitVector { length: length, words: words }
    }

    ///
    /// Creates a vector of the given length with the listed bit indices set
    ///
    pub fn from_indices<Indices: IntoIterator<Item = usize>>(length: usize, indices: Indices) -> CompactBitVector {
        let mut vector = CompactBitVector::new(length);

        for index in indices {
            assert!(index < length, "bit index beyond the declared length");
            vector.set(index, true);
        }

        vector
    }

    ///
    /// Creates a vector from a sequence of booleans (the length is the number of items)
    ///
    pub fn from_bools<Bits: IntoIterator<Item = bool>>(bits: Bits) -> CompactBitVector {
        let mut words = vec![];
        let mut length = 0;

        for bit in bits {
            if length % 64 == 0 {
                words.push(0);
            }
            if bit {
                words[length / 64] |= 1u64 << (length % 64);
            }
            length += 1;
        }

        CompactBitVector { length: length, words: words }
    }

    ///
    /// The number of bits this vector represents
    ///
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    ///
    /// True if the vector has zero length
    ///
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    ///
    /// The number of 64-bit words in the backing storage
    ///
    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    ///
    /// Read-only view of the backing words
    ///
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    ///
    /// Mutable view of the backing words
    ///
    /// Writing to indices at or beyond the declared length plants residual bits: the masking readers disregard
    /// them but `all_set` will report false until they are cleared again.
    ///
    #[inline]
    pub fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }

    // The final word masked down to the live bits; interior words are returned whole
    #[inline]
    fn masked_word(&self, index: usize) -> u64 {
        let word = self.words[index];

        if index + 1 == self.words.len() {
            word & final_block_mask(self.length)
        } else {
            word
        }
    }

    ///
    /// Reads the bit at the given index
    ///
    /// Indices in `[length, word_count()*64)` read residual storage; indices beyond the backing storage panic.
    ///
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    ///
    /// Writes the bit at the given index
    ///
    /// Indices in `[length, word_count()*64)` write residual storage; indices beyond the backing storage panic.
    ///
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        let mask = 1u64 << (index % 64);

        if value {
            self.words[index / 64] |= mask;
        } else {
            self.words[index / 64] &= !mask;
        }
    }

    ///
    /// True iff every bit in `[0, len)` is set
    ///
    /// Interior words must be all-ones and the final word must equal the length-derived mask exactly, so residual
    /// bits planted beyond the length make this report false.
    ///
    pub fn all_set(&self) -> bool {
        if self.length == 0 {
            return true;
        }

        let last = self.words.len() - 1;

        for index in 0..last {
            if self.words[index] != !0 {
                return false;
            }
        }

        self.words[last] == final_block_mask(self.length)
    }

    ///
    /// The number of set bits in `[0, len)`
    ///
    pub fn count(&self) -> usize {
        let mut total = 0;

        for index in 0..self.words.len() {
            total += pop_count(self.masked_word(index)) as usize;
        }

        total
    }

    // Allocating combination: the result takes the longer length, the shorter operand is zero-extended
    fn combine(&self, other: &CompactBitVector, op: fn(u64, u64) -> u64) -> CompactBitVector {
        let length = self.length.max(other.length);
        let mut words = Vec::with_capacity(blocks_for(length));

        for index in 0..blocks_for(length) {
            let left = if index < self.words.len() { self.masked_word(index) } else { 0 };
            let right = if index < other.words.len() { other.masked_word(index) } else { 0 };

            words.push(op(left, right));
        }

        CompactBitVector { length: length, words: words }
    }

    ///
    /// Bitwise AND into a new vector sized to the longer operand
    ///
    pub fn and(&self, other: &CompactBitVector) -> CompactBitVector {
        self.combine(other, |left, right| left & right)
    }

    ///
    /// Bitwise OR into a new vector sized to the longer operand
    ///
    pub fn or(&self, other: &CompactBitVector) -> CompactBitVector {
        self.combine(other, |left, right| left | right)
    }

    ///
    /// Bitwise XOR into a new vector sized to the longer operand
    ///
    pub fn xor(&self, other: &CompactBitVector) -> CompactBitVector {
        self.combine(other, |left, right| left ^ right)
    }

    ///
    /// Bitwise complement into a new vector of the same length (tail masked)
    ///
    pub fn not(&self) -> CompactBitVector {
        let mut words: Vec<u64> = self.words.iter().map(|word| !word).collect();

        if let Some(last) = words.last_mut() {
            *last &= final_block_mask(self.length);
        }

        CompactBitVector { length: self.length, words: words }
    }

    ///
    /// In-place AND over the overlapping word range; words beyond the shorter operand are left untouched
    ///
    pub fn and_local(&mut self, other: &CompactBitVector) {
        let overlap = self.words.len().min(other.words.len());

        for index in 0..overlap {
            self.words[index] &= other.words[index];
        }
    }

    ///
    /// In-place OR over the overlapping word range; the tail is not re-masked
    ///
    pub fn or_local(&mut self, other: &CompactBitVector) {
        let overlap = self.words.len().min(other.words.len());

        for index in 0..overlap {
            self.words[index] |= other.words[index];
        }
    }

    ///
    /// In-place XOR over the overlapping word range; the tail is not re-masked
    ///
    pub fn xor_local(&mut self, other: &CompactBitVector) {
        let overlap = self.words.len().min(other.words.len());

        for index in 0..overlap {
            self.words[index] ^= other.words[index];
        }
    }

    ///
    /// In-place complement of every backing word
    ///
    /// The tail is not re-masked: this sets phantom bits beyond the length, which the masking readers disregard
    /// (but which `all_set` will notice).
    ///
    pub fn not_local(&mut self) {
        for word in self.words.iter_mut() {
            *word = !*word;
        }
    }

    ///
    /// Sets every bit in the inclusive range `[lower, upper]`
    ///
    pub fn set_range(&mut self, lower: usize, upper: usize) {
        assert!(lower <= upper && upper < self.length, "range outside the vector");

        let first_word = lower / 64;
        let last_word = upper / 64;
        let first_mask = !0u64 << (lower % 64);
        let last_mask = !0u64 >> (63 - (upper % 64));

        if first_word == last_word {
            // Both edge masks apply to the same word, so they are intersected
            self.words[first_word] |= first_mask & last_mask;
        } else {
            self.words[first_word] |= first_mask;
            for word in (first_word + 1)..last_word {
                self.words[word] = !0;
            }
            self.words[last_word] |= last_mask;
        }
    }

    ///
    /// Clears every bit in the inclusive range `[lower, upper]`
    ///
    pub fn reset_range(&mut self, lower: usize, upper: usize) {
        assert!(lower <= upper && upper < self.length, "range outside the vector");

        let first_word = lower / 64;
        let last_word = upper / 64;
        let first_mask = !0u64 << (lower % 64);
        let last_mask = !0u64 >> (63 - (upper % 64));

        if first_word == last_word {
            self.words[first_word] &= !(first_mask & last_mask);
        } else {
            self.words[first_word] &= !first_mask;
            for word in (first_word + 1)..last_word {
                self.words[word] = 0;
            }
            self.words[last_word] &= !last_mask;
        }
    }

    ///
    /// The smallest set index at or above `lower_bound`, or `None` if there is none below the length
    ///
    pub fn get_lowest(&self, lower_bound: usize) -> Option<usize> {
        if lower_bound >= self.length {
            return None;
        }

        let mut word_index = lower_bound / 64;
        let mut word = self.masked_word(word_index) & (!0u64 << (lower_bound % 64));

        loop {
            if let Some(bit) = lowest_set_bit(word) {
                return Some(word_index * 64 + bit as usize);
            }

            word_index += 1;
            if word_index >= self.words.len() {
                return None;
            }

            word = self.masked_word(word_index);
        }
    }

    ///
    /// Raw read of a backing word
    ///
    #[inline]
    pub fn get_block64(&self, index: usize) -> u64 {
        self.words[index]
    }

    ///
    /// Raw write of a backing word
    ///
    #[inline]
    pub fn set_block64(&mut self, index: usize, word: u64) {
        self.words[index] = word;
    }

    ///
    /// Iterates over the set bit indices in ascending order
    ///
    /// Each call starts a fresh enumeration. The iterator borrows the vector, so the borrow checker rules out
    /// mutation while an enumeration is in progress.
    ///
    pub fn iter(&self) -> SetBits {
        SetBits { vector: self, word_index: 0, remaining: if self.words.is_empty() { 0 } else { self.masked_word(0) } }
    }

    // Materializes an index collection as a vector of the same shape as this one; the flag reports whether any
    // index fell outside the universe
    fn materialize<Indices: IntoIterator<Item = usize>>(&self, indices: Indices) -> (CompactBitVector, bool) {
        let mut vector = CompactBitVector::new(self.length);
        let mut outside = false;

        for index in indices {
            if index < self.length {
                vector.set(index, true);
            } else {
                outside = true;
            }
        }

        (vector, outside)
    }

    // In-place combination against any block source, confined to this vector's universe: the source's final block
    // is masked to its own length, blocks beyond the source are zero, and this vector's tail is re-masked afterwards
    fn apply_blocks<Source: BitBlockSource + ?Sized>(&mut self, source: &Source, op: fn(u64, u64) -> u64) {
        for index in 0..self.words.len() {
            self.words[index] = op(self.masked_word(index), source_block(source, index));
        }

        if let Some(last) = self.words.last_mut() {
            *last &= final_block_mask(self.length);
        }
    }

    ///
    /// Adds every bit of a block-exposing container to this vector (bits beyond this vector's length are dropped)
    ///
    pub fn union_blocks<Source: BitBlockSource + ?Sized>(&mut self, source: &Source) {
        self.apply_blocks(source, |left, right| left | right);
    }

    ///
    /// Keeps only the bits also present in a block-exposing container
    ///
    pub fn intersect_blocks<Source: BitBlockSource + ?Sized>(&mut self, source: &Source) {
        self.apply_blocks(source, |left, right| left & right);
    }

    ///
    /// Removes every bit present in a block-exposing container
    ///
    pub fn except_blocks<Source: BitBlockSource + ?Sized>(&mut self, source: &Source) {
        self.apply_blocks(source, |left, right| left & !right);
    }

    ///
    /// Toggles every bit present in a block-exposing container (within this vector's universe)
    ///
    pub fn symmetric_except_blocks<Source: BitBlockSource + ?Sized>(&mut self, source: &Source) {
        self.apply_blocks(source, |left, right| left ^ right);
    }

    ///
    /// True if this vector and the container share at least one set bit
    ///
    pub fn overlaps_blocks<Source: BitBlockSource + ?Sized>(&self, source: &Source) -> bool {
        for index in 0..self.words.len() {
            if self.masked_word(index) & source_block(source, index) != 0 {
                return true;
            }
        }

        false
    }

    ///
    /// True if every set bit of this vector is also set in the container
    ///
    pub fn is_subset_of_blocks<Source: BitBlockSource + ?Sized>(&self, source: &Source) -> bool {
        for index in 0..self.words.len() {
            if self.masked_word(index) & !source_block(source, index) != 0 {
                return false;
            }
        }

        true
    }

    ///
    /// True if every set bit of the container is also set in this vector
    ///
    pub fn is_superset_of_blocks<Source: BitBlockSource + ?Sized>(&self, source: &Source) -> bool {
        let source_blocks = blocks_for(source.bit_length());

        for index in 0..source_blocks {
            let mine = if index < self.words.len() { self.masked_word(index) } else { 0 };

            if source_block(source, index) & !mine != 0 {
                return false;
            }
        }

        true
    }

    ///
    /// True if this vector and the container represent exactly the same set of bits
    ///
    pub fn set_equals_blocks<Source: BitBlockSource + ?Sized>(&self, source: &Source) -> bool {
        let blocks = self.words.len().max(blocks_for(source.bit_length()));

        for index in 0..blocks {
            let mine = if index < self.words.len() { self.masked_word(index) } else { 0 };

            if mine != source_block(source, index) {
                return false;
            }
        }

        true
    }

    ///
    /// Adds every index of a finite collection to this vector (indices beyond the length are dropped)
    ///
    pub fn union_with<Indices: IntoIterator<Item = usize>>(&mut self, indices: Indices) {
        let (other, _) = self.materialize(indices);
        self.union_blocks(&other);
    }

    ///
    /// Keeps only the indices also present in a finite collection
    ///
    pub fn intersect_with<Indices: IntoIterator<Item = usize>>(&mut self, indices: Indices) {
        let (other, _) = self.materialize(indices);
        self.intersect_blocks(&other);
    }

    ///
    /// Removes every index present in a finite collection
    ///
    pub fn except_with<Indices: IntoIterator<Item = usize>>(&mut self, indices: Indices) {
        let (other, _) = self.materialize(indices);
        self.except_blocks(&other);
    }

    ///
    /// Toggles every index present in a finite collection (indices beyond the length are dropped)
    ///
    pub fn symmetric_except_with<Indices: IntoIterator<Item = usize>>(&mut self, indices: Indices) {
        let (other, _) = self.materialize(indices);
        self.symmetric_except_blocks(&other);
    }

    ///
    /// True if this vector and the collection share at least one index
    ///
    pub fn overlaps<Indices: IntoIterator<Item = usize>>(&self, indices: Indices) -> bool {
        let (other, _) = self.materialize(indices);
        self.overlaps_blocks(&other)
    }

    ///
    /// True if every set bit of this vector appears in the collection
    ///
    pub fn is_subset_of<Indices: IntoIterator<Item = usize>>(&self, indices: Indices) -> bool {
        let (other, _) = self.materialize(indices);
        self.is_subset_of_blocks(&other)
    }

    ///
    /// True if every index of the collection is set in this vector
    ///
    pub fn is_superset_of<Indices: IntoIterator<Item = usize>>(&self, indices: Indices) -> bool {
        let (other, outside) = self.materialize(indices);

        !outside && self.is_superset_of_blocks(&other)
    }

    ///
    /// True if the set bits of this vector are exactly the indices in the collection
    ///
    pub fn set_equals<Indices: IntoIterator<Item = usize>>(&self, indices: Indices) -> bool {
        let (other, outside) = self.materialize(indices);

        !outside && self.set_equals_blocks(&other)
    }
}

// Reads a masked block out of any source: the final block is masked to the source's length, blocks beyond it are zero
#[inline]
fn source_block<Source: BitBlockSource + ?Sized>(source: &Source, index: usize) -> u64 {
    let blocks = blocks_for(source.bit_length());

    if index >= blocks {
        0
    } else {
        let block = source.block64(index);

        if index + 1 == blocks {
            block & final_block_mask(source.bit_length())
        } else {
            block
        }
    }
}

impl BitBlockSource for CompactBitVector {
    #[inline]
    fn bit_length(&self) -> usize {
        self.length
    }

    #[inline]
    fn block64(&self, index: usize) -> u64 {
        self.words[index]
    }
}

///
/// Two vectors are equal when they have the same length and the same live bits (residual tail bits are ignored)
///
impl PartialEq for CompactBitVector {
    fn eq(&self, other: &CompactBitVector) -> bool {
        if self.length != other.length {
            return false;
        }

        (0..self.words.len()).all(|index| self.masked_word(index) == other.masked_word(index))
    }
}

impl Eq for CompactBitVector {}

///
/// Iterator over the set bit indices of a vector, in ascending order
///
pub struct SetBits<'a> {
    vector: &'a CompactBitVector,
    word_index: usize,
    remaining: u64
}

impl<'a> Iterator for SetBits<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if let Some(bit) = lowest_set_bit(self.remaining) {
                self.remaining &= self.remaining - 1;
                return Some(self.word_index * 64 + bit as usize);
            }

            self.word_index += 1;
            if self.word_index >= self.vector.words.len() {
                return None;
            }

            self.remaining = self.vector.masked_word(self.word_index);
        }
    }
}

///
/// Prints the vector as one character per bit, lowest index first (length 7 over the word `0x09` prints `1001000`)
///
impl fmt::Display for CompactBitVector {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        for index in 0..self.length {
            formatter.write_str(if self.get(index) { "1" } else { "0" })?;
        }

        Ok(())
    }
}

///
/// Parses the form `Display` produces: one '0' or '1' per bit, lowest index first
///
impl FromStr for CompactBitVector {
    type Err = ParseBitVectorError;

    fn from_str(text: &str) -> Result<CompactBitVector, ParseBitVectorError> {
        let mut bits = vec![];

        for (position, character) in text.chars().enumerate() {
            match character {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return Err(ParseBitVectorError { position: position, character: character })
            }
        }

        Ok(CompactBitVector::from_bools(bits))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn printer_matches_the_fixture() {
        let vector = CompactBitVector::from_words(7, vec![0x09]);

        assert!(vector.to_string() == "1001000");
    }

    #[test]
    fn parser_round_trips_the_fixture() {
        let vector: CompactBitVector = "1001000".parse().unwrap();

        assert!(vector.len() == 7);
        assert!(vector.get(0) && vector.get(3));
        assert!(vector.count() == 2);
        assert!(vector.to_string() == "1001000");
    }

    #[test]
    fn parser_rejects_other_characters() {
        let result = "10x1".parse::<CompactBitVector>();

        assert!(result == Err(ParseBitVectorError { position: 2, character: 'x' }));
    }

    #[test]
    fn enumeration_is_ascending() {
        let vector = CompactBitVector::from_indices(200, vec![5, 64, 3, 199, 63]);

        let indices: Vec<usize> = vector.iter().collect();
        assert!(indices == vec![3, 5, 63, 64, 199]);
    }

    #[test]
    fn all_set_requires_an_exact_tail() {
        let mut vector = CompactBitVector::new(70);
        vector.set_range(0, 69);

        assert!(vector.all_set());

        // Planting a residual bit beyond the length breaks the exact comparison
        vector.words_mut()[1] |= 1u64 << 10;
        assert!(!vector.all_set());
    }

    #[test]
    fn masking_readers_ignore_residual_bits() {
        let mut vector = CompactBitVector::from_indices(70, vec![1, 69]);
        vector.words_mut()[1] |= 1u64 << 40;

        assert!(vector.count() == 2);
        assert!(vector.iter().collect::<Vec<usize>>() == vec![1, 69]);
        assert!(vector.get_lowest(69) == Some(69));
        assert!(vector == CompactBitVector::from_indices(70, vec![1, 69]));
    }

    #[test]
    fn count_spans_multiple_words() {
        let mut vector = CompactBitVector::new(130);
        vector.set_range(60, 129);

        assert!(vector.count() == 70);
    }

    #[test]
    fn not_twice_is_identity() {
        let vector = CompactBitVector::from_indices(100, vec![0, 17, 64, 99]);

        assert!(vector.not().not() == vector);
    }

    #[test]
    fn or_zero_extends_the_shorter_operand() {
        let long = CompactBitVector::from_indices(100, vec![80, 99]);
        let short = CompactBitVector::from_indices(10, vec![2]);

        let union = long.or(&short);

        assert!(union.len() == 100);
        assert!(union.iter().collect::<Vec<usize>>() == vec![2, 80, 99]);
    }

    #[test]
    fn and_clears_beyond_the_shorter_operand() {
        let long = CompactBitVector::from_indices(100, vec![2, 80]);
        let short = CompactBitVector::from_indices(10, vec![2, 5]);

        let intersection = long.and(&short);

        assert!(intersection.len() == 100);
        assert!(intersection.iter().collect::<Vec<usize>>() == vec![2]);
    }

    #[test]
    fn local_operations_only_touch_the_overlap() {
        let mut vector = CompactBitVector::from_indices(130, vec![1, 70, 128]);
        let other = CompactBitVector::from_indices(64, vec![1, 2]);

        vector.xor_local(&other);

        assert!(!vector.get(1));
        assert!(vector.get(2));
        assert!(vector.get(70));
        assert!(vector.get(128));
    }

    #[test]
    fn local_not_plants_phantom_bits() {
        let mut vector = CompactBitVector::new(7);
        vector.not_local();

        // Readers mask, so the phantom tail is invisible to them
        assert!(vector.count() == 7);

        // The exact comparison in all_set notices the phantom tail
        assert!(!vector.all_set());

        vector.words_mut()[0] &= 0x7f;
        assert!(vector.all_set());
    }

    #[test]
    fn single_word_range_intersects_both_edge_masks() {
        let mut vector = CompactBitVector::new(64);
        vector.set_range(3, 5);

        assert!(vector.iter().collect::<Vec<usize>>() == vec![3, 4, 5]);

        vector.set_range(0, 63);
        vector.reset_range(1, 62);
        assert!(vector.iter().collect::<Vec<usize>>() == vec![0, 63]);
    }

    #[test]
    fn range_spanning_words_fills_the_interior() {
        let mut vector = CompactBitVector::new(200);
        vector.set_range(10, 190);

        assert!(vector.count() == 181);
        assert!(!vector.get(9));
        assert!(vector.get(10) && vector.get(190));
        assert!(!vector.get(191));

        vector.reset_range(11, 189);
        assert!(vector.iter().collect::<Vec<usize>>() == vec![10, 190]);
    }

    #[test]
    fn lowest_respects_the_bound() {
        let vector = CompactBitVector::from_indices(150, vec![4, 70, 149]);

        assert!(vector.get_lowest(0) == Some(4));
        assert!(vector.get_lowest(4) == Some(4));
        assert!(vector.get_lowest(5) == Some(70));
        assert!(vector.get_lowest(71) == Some(149));
        assert!(vector.get_lowest(150) == None);

        let empty = CompactBitVector::new(150);
        assert!(empty.get_lowest(0) == None);
    }

    #[test]
    fn set_operations_against_index_collections() {
        let mut vector = CompactBitVector::from_indices(90, vec![1, 5, 70]);

        vector.union_with(vec![5, 6]);
        assert!(vector.iter().collect::<Vec<usize>>() == vec![1, 5, 6, 70]);

        vector.except_with(vec![1, 99]);
        assert!(vector.iter().collect::<Vec<usize>>() == vec![5, 6, 70]);

        vector.intersect_with(vec![5, 70, 80]);
        assert!(vector.iter().collect::<Vec<usize>>() == vec![5, 70]);

        vector.symmetric_except_with(vec![70, 71]);
        assert!(vector.iter().collect::<Vec<usize>>() == vec![5, 71]);
    }

    #[test]
    fn subset_and_superset_predicates() {
        let vector = CompactBitVector::from_indices(90, vec![5, 70]);

        assert!(vector.is_subset_of(vec![5, 70, 80]));
        assert!(!vector.is_subset_of(vec![5]));
        assert!(vector.is_superset_of(vec![5]));
        assert!(!vector.is_superset_of(vec![5, 71]));
        assert!(!vector.is_superset_of(vec![5, 1000]));
        assert!(vector.set_equals(vec![70, 5]));
        assert!(!vector.set_equals(vec![70, 5, 1000]));
        assert!(vector.overlaps(vec![70, 80]));
        assert!(!vector.overlaps(vec![80]));
    }

    #[test]
    fn mixed_algebra_against_a_tile() {
        use super::super::bit_tile::*;

        let mut vector = CompactBitVector::from_indices(64, vec![0, 20]);
        let tile = BitTile::from_row_mask(0x01);

        // Row 0 of the tile is bits 0..7
        vector.union_blocks(&tile);
        assert!(vector.count() == 9);
        assert!(vector.overlaps_blocks(&tile));

        vector.intersect_blocks(&tile);
        assert!(vector.iter().collect::<Vec<usize>>() == vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert!(vector.is_subset_of_blocks(&tile));
        assert!(vector.set_equals_blocks(&tile));
    }

    #[test]
    fn union_confines_to_the_universe() {
        let mut vector = CompactBitVector::new(7);
        let wide = CompactBitVector::from_indices(64, vec![3, 40]);

        vector.union_blocks(&wide);

        assert!(vector.iter().collect::<Vec<usize>>() == vec![3]);
        // The out-of-universe bit was dropped rather than left in the tail
        assert!(vector.words()[0] == 0x08);
    }

    #[test]
    fn equality_is_masked_and_length_aware() {
        let mut left = CompactBitVector::from_indices(70, vec![1]);
        let right = CompactBitVector::from_indices(70, vec![1]);

        left.words_mut()[1] |= 1u64 << 30;
        assert!(left == right);

        let longer = CompactBitVector::from_indices(71, vec![1]);
        assert!(left != longer);
    }

    #[test]
    fn from_bools_preserves_order_and_length() {
        let vector = CompactBitVector::from_bools(vec![true, false, false, true]);

        assert!(vector.len() == 4);
        assert!(vector.to_string() == "1001");
    }

    #[test]
    #[should_panic]
    fn from_words_rejects_a_mismatched_word_count() {
        CompactBitVector::from_words(7, vec![0x09, 0x00]);
    }

    #[test]
    fn zero_length_vector_is_trivially_full() {
        let vector = CompactBitVector::new(0);

        assert!(vector.all_set());
        assert!(vector.count() == 0);
        assert!(vector.iter().next() == None);
        assert!(vector.to_string() == "");
    }
}
