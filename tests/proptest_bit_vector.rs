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
//! Property tests for the compact bit vector, checked against naive `BTreeSet` models.
//!

use std::collections::BTreeSet;

use proptest::prelude::*;

use tagged_automata::*;

// A universe size plus a set of indices inside it
fn universe() -> impl Strategy<Value = (usize, BTreeSet<usize>)> {
    (1usize..=200).prop_flat_map(|length| {
        let indices = prop::collection::btree_set(0..length, 0..=length.min(40));
        (Just(length), indices)
    })
}

fn vector_of(length: usize, indices: &BTreeSet<usize>) -> CompactBitVector {
    CompactBitVector::from_indices(length, indices.iter().cloned())
}

proptest! {
    #[test]
    fn enumeration_round_trips_in_ascending_order((length, indices) in universe()) {
        let vector = vector_of(length, &indices);

        let listed: Vec<usize> = vector.iter().collect();
        let expected: Vec<usize> = indices.iter().cloned().collect();

        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn count_matches_the_model((length, indices) in universe()) {
        let vector = vector_of(length, &indices);

        prop_assert_eq!(vector.count(), indices.len());
    }

    #[test]
    fn complementing_twice_is_the_identity((length, indices) in universe()) {
        let vector = vector_of(length, &indices);

        prop_assert_eq!(vector.not().not(), vector);
    }

    #[test]
    fn complement_flips_every_live_bit((length, indices) in universe()) {
        let vector = vector_of(length, &indices);
        let complement = vector.not();

        for index in 0..length {
            prop_assert_eq!(complement.get(index), !vector.get(index));
        }
    }

    #[test]
    fn display_and_parse_round_trip((length, indices) in universe()) {
        let vector = vector_of(length, &indices);
        let parsed: CompactBitVector = vector.to_string().parse().unwrap();

        prop_assert_eq!(parsed, vector);
    }

    #[test]
    fn lowest_matches_the_model((length, indices) in universe(), bound in 0usize..=220) {
        let vector = vector_of(length, &indices);
        let expected = indices.iter().cloned().find(|&index| index >= bound);

        prop_assert_eq!(vector.get_lowest(bound), expected);
    }

    #[test]
    fn lowest_is_monotonic_in_its_bound((length, indices) in universe(), first in 0usize..=200, second in 0usize..=200) {
        let vector = vector_of(length, &indices);
        let (low, high) = if first <= second { (first, second) } else { (second, first) };

        if let (Some(from_low), Some(from_high)) = (vector.get_lowest(low), vector.get_lowest(high)) {
            prop_assert!(from_low <= from_high);
        }
    }

    #[test]
    fn union_matches_the_model((length, first) in universe(), second in prop::collection::btree_set(0usize..200, 0..20)) {
        let mut vector = vector_of(length, &first);
        vector.union_with(second.iter().cloned());

        // Indices beyond the universe are dropped by the same-shape materialization
        let expected: BTreeSet<usize> = first.union(&second).cloned().filter(|&index| index < length).collect();
        prop_assert_eq!(vector.iter().collect::<BTreeSet<usize>>(), expected);
    }

    #[test]
    fn intersection_matches_the_model((length, first) in universe(), second in prop::collection::btree_set(0usize..200, 0..20)) {
        let mut vector = vector_of(length, &first);
        vector.intersect_with(second.iter().cloned());

        let expected: BTreeSet<usize> = first.intersection(&second).cloned().collect();
        prop_assert_eq!(vector.iter().collect::<BTreeSet<usize>>(), expected);
    }

    #[test]
    fn difference_matches_the_model((length, first) in universe(), second in prop::collection::btree_set(0usize..200, 0..20)) {
        let mut vector = vector_of(length, &first);
        vector.except_with(second.iter().cloned());

        let expected: BTreeSet<usize> = first.difference(&second).cloned().collect();
        prop_assert_eq!(vector.iter().collect::<BTreeSet<usize>>(), expected);
    }

    #[test]
    fn symmetric_difference_matches_the_model((length, first) in universe(), second in prop::collection::btree_set(0usize..200, 0..20)) {
        let mut vector = vector_of(length, &first);
        vector.symmetric_except_with(second.iter().cloned());

        let expected: BTreeSet<usize> = first.symmetric_difference(&second).cloned().filter(|&index| index < length).collect();
        prop_assert_eq!(vector.iter().collect::<BTreeSet<usize>>(), expected);
    }

    #[test]
    fn predicates_match_the_model((length, first) in universe(), second in prop::collection::btree_set(0usize..200, 0..20)) {
        let vector = vector_of(length, &first);

        prop_assert_eq!(vector.overlaps(second.iter().cloned()), !first.is_disjoint(&second));
        prop_assert_eq!(vector.is_subset_of(second.iter().cloned()), first.is_subset(&second));
        prop_assert_eq!(vector.is_superset_of(second.iter().cloned()), first.is_superset(&second));
        prop_assert_eq!(vector.set_equals(second.iter().cloned()), first == second);
    }

    #[test]
    fn allocating_algebra_zero_extends((long_length, long_indices) in universe(), (short_length, short_indices) in universe()) {
        let (long_length, short_length) = (long_length.max(short_length), long_length.min(short_length));
        let long_indices: BTreeSet<usize> = long_indices.into_iter().filter(|&index| index < long_length).collect();
        let short_indices: BTreeSet<usize> = short_indices.into_iter().filter(|&index| index < short_length).collect();

        let long = vector_of(long_length, &long_indices);
        let short = vector_of(short_length, &short_indices);

        let union = long.or(&short);
        let intersection = long.and(&short);
        let toggled = long.xor(&short);

        prop_assert_eq!(union.len(), long_length);
        prop_assert_eq!(union.iter().collect::<BTreeSet<usize>>(), long_indices.union(&short_indices).cloned().collect::<BTreeSet<usize>>());
        prop_assert_eq!(intersection.iter().collect::<BTreeSet<usize>>(), long_indices.intersection(&short_indices).cloned().collect::<BTreeSet<usize>>());
        prop_assert_eq!(toggled.iter().collect::<BTreeSet<usize>>(), long_indices.symmetric_difference(&short_indices).cloned().collect::<BTreeSet<usize>>());
    }

    #[test]
    fn ranges_match_the_model(length in 1usize..=200, split in 0usize..=199, width in 0usize..=199) {
        let lower = split.min(length - 1);
        let upper = (lower + width).min(length - 1);

        let mut vector = CompactBitVector::new(length);
        vector.set_range(lower, upper);

        let expected: Vec<usize> = (lower..=upper).collect();
        prop_assert_eq!(vector.iter().collect::<Vec<usize>>(), expected);

        vector.set_range(0, length - 1);
        vector.reset_range(lower, upper);

        let remaining: Vec<usize> = (0..length).filter(|index| *index < lower || *index > upper).collect();
        prop_assert_eq!(vector.iter().collect::<Vec<usize>>(), remaining);
    }
}
