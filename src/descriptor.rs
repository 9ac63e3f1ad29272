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
//! # Descriptor
//!
//! The bulk construction input for an automaton: an initial-state tag, an optional explicit state list, the edges
//! as `(from, tag, to)` triples, and a best-effort accepting list. Descriptors are plain data - they serialize with
//! serde, so an automaton shape can be stored or exchanged and rebuilt later:
//!
//! ```
//! # use tagged_automata::*;
//! let mut descriptor = NdfaDescriptor::new(0);
//! descriptor.edges.push((0, 'a', 1));
//! descriptor.accepting.push(1);
//!
//! let ndfa: Ndfa<u32, char> = Ndfa::from_descriptor(descriptor);
//! # assert!(ndfa.count_states() == 2);
//! ```
//!

use serde_derive::{Deserialize, Serialize};

///
/// Bulk description of an automaton's shape
///
/// Accepting tags that never appear as a state degrade softly when the automaton is built: they are skipped, not
/// reported, so partially-known accepting lists can be imported as-is.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NdfaDescriptor<StateTag, EdgeTag> {
    /// Tag of the initial state (created if no edge mentions it)
    pub initial: StateTag,

    /// Tags of states that must exist even if no edge touches them
    #[serde(default = "Vec::new")]
    pub states: Vec<StateTag>,

    /// The transitions, as (from-state, edge, to-state) tag triples
    #[serde(default = "Vec::new")]
    pub edges: Vec<(StateTag, EdgeTag, StateTag)>,

    /// Tags of the accepting states (best effort: unknown tags are skipped)
    #[serde(default = "Vec::new")]
    pub accepting: Vec<StateTag>
}

impl<StateTag, EdgeTag> NdfaDescriptor<StateTag, EdgeTag> {
    ///
    /// Creates a descriptor with just an initial state
    ///
    pub fn new(initial: StateTag) -> NdfaDescriptor<StateTag, EdgeTag> {
        NdfaDescriptor { initial: initial, states: vec![], edges: vec![], accepting: vec![] }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_descriptor_is_bare() {
        let descriptor: NdfaDescriptor<u32, char> = NdfaDescriptor::new(7);

        assert!(descriptor.initial == 7);
        assert!(descriptor.states.is_empty());
        assert!(descriptor.edges.is_empty());
        assert!(descriptor.accepting.is_empty());
    }
}
