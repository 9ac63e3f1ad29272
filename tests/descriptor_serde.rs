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
//! Round trips for the serde surface: descriptors and bit-vector snapshots.
//!

use tagged_automata::*;

#[test]
fn descriptor_round_trips_through_json() {
    let mut descriptor: NdfaDescriptor<u32, char> = NdfaDescriptor::new(0);
    descriptor.states.push(5);
    descriptor.edges.push((0, 'a', 1));
    descriptor.edges.push((1, 'b', 2));
    descriptor.accepting.push(2);

    let json = serde_json::to_string(&descriptor).unwrap();
    let parsed: NdfaDescriptor<u32, char> = serde_json::from_str(&json).unwrap();

    assert!(parsed == descriptor);
}

#[test]
fn parsed_descriptor_builds_the_same_language() {
    let mut descriptor: NdfaDescriptor<u32, char> = NdfaDescriptor::new(0);
    descriptor.edges.push((0, 'a', 1));
    descriptor.edges.push((1, 'b', 2));
    descriptor.accepting.push(2);

    let json = serde_json::to_string(&descriptor).unwrap();
    let parsed: NdfaDescriptor<u32, char> = serde_json::from_str(&json).unwrap();

    let ndfa = Ndfa::from_descriptor(parsed);

    assert!(ndfa.accepts("ab".chars(), &'ε'));
    assert!(!ndfa.accepts("a".chars(), &'ε'));
    assert!(!ndfa.accepts("ba".chars(), &'ε'));
}

#[test]
fn omitted_descriptor_fields_default_to_empty() {
    let parsed: NdfaDescriptor<u32, char> = serde_json::from_str(r#"{ "initial": 3 }"#).unwrap();

    assert!(parsed == NdfaDescriptor::new(3));

    let ndfa = Ndfa::from_descriptor(parsed);
    assert!(ndfa.count_states() == 1);
}

#[test]
fn bit_vector_round_trips_through_json() {
    let vector = CompactBitVector::from_indices(70, vec![0, 3, 69]);

    let json = serde_json::to_string(&vector).unwrap();
    let parsed: CompactBitVector = serde_json::from_str(&json).unwrap();

    assert!(parsed == vector);
    assert!(parsed.len() == 70);
    assert!(parsed.iter().collect::<Vec<usize>>() == vec![0, 3, 69]);
}
