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
//! # Edge
//!
//! An edge is a tagged transition with a *set* of destination states: a single edge reaching more than one state is
//! what makes the automaton nondeterministic even before two same-tagged edges come into it. Edges are shared by
//! handle - the same edge object can hang off several states, or appear in several automata at once, which trades
//! aliasing (mutating a shared edge is visible everywhere it is referenced) for not deep-copying graphs.
//!

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use super::state::*;

///
/// Shared handle to an edge
///
pub type EdgeRef<StateTag, EdgeTag> = Rc<RefCell<Edge<StateTag, EdgeTag>>>;

///
/// A tagged transition to a set of destination states
///
pub struct Edge<StateTag, EdgeTag> {
    /// The tag this edge matches (immutable for the lifetime of the edge)
    tag: EdgeTag,

    /// Destination states, with set semantics keyed by state identity
    destinations: SmallVec<[StateRef<StateTag, EdgeTag>; 2]>
}

impl<StateTag, EdgeTag> Edge<StateTag, EdgeTag> {
    ///
    /// Creates an edge with no destinations yet
    ///
    pub fn new(tag: EdgeTag) -> Edge<StateTag, EdgeTag> {
        Edge { tag: tag, destinations: SmallVec::new() }
    }

    ///
    /// Creates a shared edge with a single destination
    ///
    pub fn with_destination(tag: EdgeTag, destination: StateRef<StateTag, EdgeTag>) -> EdgeRef<StateTag, EdgeTag> {
        let mut edge = Edge::new(tag);
        edge.add(destination);

        Rc::new(RefCell::new(edge))
    }

    ///
    /// The tag of this edge
    ///
    #[inline]
    pub fn tag(&self) -> &EdgeTag {
        &self.tag
    }

    ///
    /// Adds a destination state, returning true if the set changed (adding a state that is already present is a
    /// no-op)
    ///
    pub fn add(&mut self, destination: StateRef<StateTag, EdgeTag>) -> bool {
        if self.contains(&destination) {
            false
        } else {
            self.destinations.push(destination);
            true
        }
    }

    ///
    /// True if the given state (by identity, not by tag) is a destination of this edge
    ///
    pub fn contains(&self, state: &StateRef<StateTag, EdgeTag>) -> bool {
        self.destinations.iter().any(|destination| Rc::ptr_eq(destination, state))
    }

    ///
    /// Removes a destination state, returning true if the set changed
    ///
    pub fn remove(&mut self, state: &StateRef<StateTag, EdgeTag>) -> bool {
        let before = self.destinations.len();
        self.destinations.retain(|destination| !Rc::ptr_eq(destination, state));

        self.destinations.len() != before
    }

    ///
    /// The destination states of this edge
    ///
    #[inline]
    pub fn destinations(&self) -> &[StateRef<StateTag, EdgeTag>] {
        &self.destinations
    }

    ///
    /// The number of destination states
    ///
    #[inline]
    pub fn count_destinations(&self) -> usize {
        self.destinations.len()
    }
}

// Extracts the tag an edge handle is filed under in a register
pub(crate) fn edge_tag_of<StateTag, EdgeTag: Clone>(edge: &EdgeRef<StateTag, EdgeTag>) -> EdgeTag {
    edge.borrow().tag().clone()
}
