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
//! # State
//!
//! A state is a tagged vertex owning a tag-indexed multimap of its outgoing edges. The tag identifies the state
//! within an automaton's tables but is not a unique handle: two distinct state objects may carry the same tag and
//! will be enumerated together. States are shared by handle across automata, so a state acquired from one automaton
//! and mutated there is seen mutated by every other automaton holding it.
//!

use std::cell::RefCell;
use std::hash::Hash;
use std::rc::Rc;

use super::edge::*;
use super::register::*;

///
/// Shared handle to a state
///
pub type StateRef<StateTag, EdgeTag> = Rc<RefCell<State<StateTag, EdgeTag>>>;

///
/// A tagged vertex with a tag-indexed multimap of outgoing edges
///
pub struct State<StateTag, EdgeTag> {
    /// The tag of this state (immutable for the lifetime of the state)
    tag: StateTag,

    /// Outgoing edges, filed under their edge tags
    edges: Register<EdgeTag, EdgeRef<StateTag, EdgeTag>>
}

impl<StateTag, EdgeTag: Clone + Eq + Hash> State<StateTag, EdgeTag> {
    ///
    /// Creates a state with no outgoing edges
    ///
    pub fn new(tag: StateTag) -> State<StateTag, EdgeTag> {
        State { tag: tag, edges: Register::new(edge_tag_of) }
    }

    ///
    /// Creates a shared state handle
    ///
    pub fn new_shared(tag: StateTag) -> StateRef<StateTag, EdgeTag> {
        Rc::new(RefCell::new(State::new(tag)))
    }

    ///
    /// The tag of this state
    ///
    #[inline]
    pub fn tag(&self) -> &StateTag {
        &self.tag
    }

    ///
    /// Files an edge under its tag
    ///
    /// Appending is unconditional: two distinct edges sharing a tag both stay (that is the nondeterministic case),
    /// and registering the same edge object twice produces a duplicate entry. Deduplication by destination is the
    /// business of the automaton's edge registration, not of the state.
    ///
    pub fn add_edge(&mut self, edge: EdgeRef<StateTag, EdgeTag>) {
        self.edges.add(edge);
    }

    ///
    /// The edges filed under exactly the given tag (empty if there are none)
    ///
    pub fn tagged_edges(&self, tag: &EdgeTag) -> &[EdgeRef<StateTag, EdgeTag>] {
        self.edges.items(tag)
    }

    ///
    /// The distinct tags of the outgoing edges, in first-seen order
    ///
    pub fn edge_tags(&self) -> impl Iterator<Item = &EdgeTag> {
        self.edges.tags()
    }

    ///
    /// Every outgoing edge, grouped by tag in first-seen order
    ///
    pub fn edges(&self) -> impl Iterator<Item = &EdgeRef<StateTag, EdgeTag>> {
        self.edges.iter()
    }

    ///
    /// The number of outgoing edge entries (a shared edge filed twice counts twice)
    ///
    pub fn count_edges(&self) -> usize {
        self.edges.len()
    }
}

// Extracts the tag a state handle is filed under in a register
pub(crate) fn state_tag_of<StateTag: Clone, EdgeTag>(state: &StateRef<StateTag, EdgeTag>) -> StateTag {
    state.borrow().tag.clone()
}
