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
//! # Nondeterministic finite automaton
//!
//! The acronym NDFA stands for 'Non-Deterministic Finite Automaton': a state machine whose states can have several
//! outgoing transitions for the same tag, so it can be in more than one state at once. This implementation keys
//! states and edges by caller-supplied tags and shares the graph nodes themselves by handle, so automata derived
//! from one another (by the combination operators, or by cloning) reference the same `State` and `Edge` objects
//! rather than deep copies.
//!
//! An automaton is built by registering `(from-tag, edge-tag, to-tag)` triples; states spring into being the first
//! time their tag is mentioned:
//!
//! ```
//! # use tagged_automata::*;
//! let mut ndfa: Ndfa<u32, char> = Ndfa::new(0);
//! ndfa.register_edge(0, 'a', 1);
//! ndfa.register_accepting_tag(&1);
//!
//! assert!(ndfa.accepts(vec!['a'], &'ε'));
//! ```
//!
//! The combination operators - `concatenate`, `disjunction` and `kleene_star` - build the languages of compound
//! patterns out of existing automata by splicing in epsilon edges, synthesising fresh states where needed.
//!

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use tracing::{debug, trace};

use super::compact_bit_vector::*;
use super::descriptor::*;
use super::edge::*;
use super::register::*;
use super::state::*;

///
/// A nondeterministic finite automaton over tag-identified states and edges
///
/// The automaton owns three things: the table of every registered state, the table of accepting states (a subset of
/// the former, by reference) and the single initial state fixed at construction. Tags are identities but not unique
/// handles: two distinct state objects may carry the same tag, in which case single-result lookups resolve to the
/// one registered first.
///
/// Cloning is shallow by design: the clone gets tables of its own (so registering further states in it does not
/// affect the original) but the `State` and `Edge` objects are shared, so mutating a shared state's edges is
/// visible through every automaton holding it.
///
#[derive(Clone)]
pub struct Ndfa<StateTag, EdgeTag> {
    /// Every registered state, keyed by tag
    states: Register<StateTag, StateRef<StateTag, EdgeTag>>,

    /// The accepting states (always a by-reference subset of the state table)
    accepting: Register<StateTag, StateRef<StateTag, EdgeTag>>,

    /// The single initial state
    initial: StateRef<StateTag, EdgeTag>
}

impl<StateTag: Clone + Eq + Hash, EdgeTag: Clone + Eq + Hash> Ndfa<StateTag, EdgeTag> {
    ///
    /// Creates an automaton whose initial state carries the given tag
    ///
    pub fn new(initial_tag: StateTag) -> Ndfa<StateTag, EdgeTag> {
        Ndfa::with_initial(State::new_shared(initial_tag))
    }

    // Wraps an already-built state as the initial state of a fresh automaton
    fn with_initial(initial: StateRef<StateTag, EdgeTag>) -> Ndfa<StateTag, EdgeTag> {
        let mut states = Register::new(state_tag_of);
        states.add(initial.clone());

        Ndfa { states: states, accepting: Register::new(state_tag_of), initial: initial }
    }

    ///
    /// Builds an automaton from a bulk descriptor
    ///
    /// States listed explicitly or mentioned by an edge are created as needed; accepting tags that match no state
    /// are skipped (best effort, so partially-known accepting lists import cleanly).
    ///
    pub fn from_descriptor(descriptor: NdfaDescriptor<StateTag, EdgeTag>) -> Ndfa<StateTag, EdgeTag> {
        let mut ndfa = Ndfa::new(descriptor.initial);

        for tag in descriptor.states {
            ndfa.register_state(tag);
        }

        for (from, edge, to) in descriptor.edges {
            ndfa.register_edge(from, edge, to);
        }

        for tag in descriptor.accepting {
            ndfa.register_accepting_tag(&tag);
        }

        ndfa
    }

    ///
    /// The initial state of this automaton
    ///
    #[inline]
    pub fn initial_state(&self) -> &StateRef<StateTag, EdgeTag> {
        &self.initial
    }

    ///
    /// Resolves the state for a tag, creating and storing a new one if the tag is unknown
    ///
    /// This is idempotent: the state registered earliest under the tag is returned on every later call.
    ///
    pub fn register_state(&mut self, tag: StateTag) -> StateRef<StateTag, EdgeTag> {
        if let Some(existing) = self.states.first(&tag) {
            return existing.clone();
        }

        let state = State::new_shared(tag);
        self.states.add(state.clone());

        state
    }

    ///
    /// Unconditionally inserts an already-built state object (with whatever edges it carries) into the state table
    ///
    pub fn adopt_state(&mut self, state: &StateRef<StateTag, EdgeTag>) {
        self.states.add(state.clone());
    }

    ///
    /// Registers a transition as a `(from-tag, edge-tag, to-tag)` triple
    ///
    /// Both endpoint states are resolved or created. If the 'from' state already has an edge with this tag that
    /// reaches the resolved 'to' state, that edge is returned unchanged; otherwise a fresh single-destination edge
    /// is created and attached. Registering the same triple twice therefore never grows the graph.
    ///
    pub fn register_edge(&mut self, from_tag: StateTag, edge_tag: EdgeTag, to_tag: StateTag) -> EdgeRef<StateTag, EdgeTag> {
        let from = self.register_state(from_tag);
        let to = self.register_state(to_tag);

        trace!(states = self.count_states(), "registering edge");

        Ndfa::link(&from, edge_tag, &to)
    }

    // Reuses or creates an edge with the given tag from one state to another (the idempotent core of
    // `register_edge`, also used by the combination operators to splice in epsilon edges)
    fn link(from: &StateRef<StateTag, EdgeTag>, edge_tag: EdgeTag, to: &StateRef<StateTag, EdgeTag>) -> EdgeRef<StateTag, EdgeTag> {
        {
            let from_state = from.borrow();

            for edge in from_state.tagged_edges(&edge_tag) {
                if edge.borrow().contains(to) {
                    return edge.clone();
                }
            }
        }

        let edge = Edge::with_destination(edge_tag, to.clone());
        from.borrow_mut().add_edge(edge.clone());

        edge
    }

    ///
    /// Marks a state as accepting, returning whether the marking succeeded
    ///
    /// Only states already present in this automaton's state table (the same object, not merely the same tag) can
    /// be marked; anything else is silently rejected with `false`. Marking a state that is already accepting is a
    /// no-op reporting success, so the accepting table stays a duplicate-free subset of the state table.
    ///
    pub fn register_accepting_state(&mut self, state: &StateRef<StateTag, EdgeTag>) -> bool {
        let tag = state.borrow().tag().clone();

        if !self.states.contains_by(&tag, |candidate| Rc::ptr_eq(candidate, state)) {
            return false;
        }

        if !self.accepting.contains_by(&tag, |candidate| Rc::ptr_eq(candidate, state)) {
            self.accepting.add(state.clone());
        }

        true
    }

    ///
    /// Marks the first state registered under a tag as accepting, returning whether the marking succeeded
    ///
    /// A tag unknown to this automaton is silently rejected with `false` rather than raising an error.
    ///
    pub fn register_accepting_tag(&mut self, tag: &StateTag) -> bool {
        let state = match self.states.first(tag) {
            Some(state) => state.clone(),
            None => return false
        };

        self.register_accepting_state(&state)
    }

    ///
    /// True if this exact state object is in the accepting table
    ///
    pub fn is_accepting_state(&self, state: &StateRef<StateTag, EdgeTag>) -> bool {
        let tag = state.borrow().tag().clone();

        self.accepting.contains_by(&tag, |candidate| Rc::ptr_eq(candidate, state))
    }

    ///
    /// True if any state with the given tag is accepting
    ///
    pub fn is_accepting_tag(&self, tag: &StateTag) -> bool {
        self.accepting.contains_tag(tag)
    }

    ///
    /// The number of state entries in the table
    ///
    pub fn count_states(&self) -> usize {
        self.states.len()
    }

    ///
    /// The number of edge entries across every registered state
    ///
    /// An edge object filed under two states (or filed twice under one) counts once per entry.
    ///
    pub fn count_edges(&self) -> usize {
        self.states.iter().map(|state| state.borrow().count_edges()).sum()
    }

    ///
    /// The distinct state tags, in first-seen order
    ///
    pub fn state_tags(&self) -> Vec<StateTag> {
        self.states.tags().cloned().collect()
    }

    ///
    /// The distinct accepting-state tags, in first-seen order
    ///
    pub fn accepting_state_tags(&self) -> Vec<StateTag> {
        self.accepting.tags().cloned().collect()
    }

    ///
    /// Every registered state, in first-seen tag order
    ///
    pub fn states(&self) -> impl Iterator<Item = &StateRef<StateTag, EdgeTag>> {
        self.states.iter()
    }

    ///
    /// Every accepting state, in first-seen tag order
    ///
    pub fn accepting_states(&self) -> impl Iterator<Item = &StateRef<StateTag, EdgeTag>> {
        self.accepting.iter()
    }

    ///
    /// The distinct tags of the edges originating from the state(s) carrying the given tag
    ///
    /// States that do not match the tag contribute nothing, and an unknown tag produces an empty result.
    ///
    pub fn edge_tags_for_state(&self, tag: &StateTag) -> Vec<EdgeTag> {
        let mut tags = vec![];

        for state in self.states.items(tag) {
            let state = state.borrow();

            for edge_tag in state.edge_tags() {
                if !tags.contains(edge_tag) {
                    tags.push(edge_tag.clone());
                }
            }
        }

        tags
    }

    // Adopts every state of another automaton that is not already present (by identity) in this one's table
    fn merge_states_from(&mut self, other: &Ndfa<StateTag, EdgeTag>) {
        for state in other.states.iter() {
            let tag = state.borrow().tag().clone();

            if !self.states.contains_by(&tag, |candidate| Rc::ptr_eq(candidate, state)) {
                self.states.add(state.clone());
            }
        }
    }

    ///
    /// Builds the automaton accepting a sequence iff it splits into a prefix this automaton accepts and a suffix
    /// `other` accepts
    ///
    /// The graph of this automaton is shared (shallow clone), `other`'s states are merged in, and an epsilon edge
    /// (tagged `epsilon_tag`) is spliced from every accepting state of the first operand to `other`'s initial
    /// state. The result starts at this automaton's initial state and accepts exactly where `other` does. With no
    /// `other` the result is simply a shallow clone of this automaton.
    ///
    /// Because the graph is shared, the spliced epsilon edges are visible through the operands as well - that is
    /// the documented aliasing contract of the shared graph model.
    ///
    pub fn concatenate(&self, other: Option<&Ndfa<StateTag, EdgeTag>>, epsilon_tag: EdgeTag) -> Ndfa<StateTag, EdgeTag> {
        let mut result = self.clone();

        let other = match other {
            Some(other) => other,
            None => return result
        };

        debug!(left_states = self.count_states(), right_states = other.count_states(), "concatenating automata");

        result.merge_states_from(other);

        for state in self.accepting.iter() {
            Ndfa::link(state, epsilon_tag.clone(), other.initial_state());
        }

        result.accepting = other.accepting.clone();

        result
    }

    ///
    /// Builds the automaton accepting a sequence iff this automaton or `other` accepts it
    ///
    /// A fresh initial state carrying `new_start_tag` is synthesised with epsilon edges to both operands' initial
    /// states; the accepting states are the union of both operands'. With no `other` the result is a shallow clone
    /// of this automaton (and no fresh state is synthesised).
    ///
    pub fn disjunction(&self, other: Option<&Ndfa<StateTag, EdgeTag>>, epsilon_tag: EdgeTag, new_start_tag: StateTag) -> Ndfa<StateTag, EdgeTag> {
        let other = match other {
            Some(other) => other,
            None => return self.clone()
        };

        debug!(left_states = self.count_states(), right_states = other.count_states(), "building disjunction");

        let fresh = State::new_shared(new_start_tag);
        let mut result = Ndfa::with_initial(fresh.clone());

        result.merge_states_from(self);
        result.merge_states_from(other);

        Ndfa::link(&fresh, epsilon_tag.clone(), self.initial_state());
        Ndfa::link(&fresh, epsilon_tag, other.initial_state());

        for state in self.accepting.iter() {
            result.register_accepting_state(state);
        }
        for state in other.accepting.iter() {
            result.register_accepting_state(state);
        }

        result
    }

    ///
    /// Builds the automaton accepting zero or more concatenations of sequences this automaton accepts
    ///
    /// A fresh state carrying `new_start_tag` is synthesised as both initial and accepting, with an epsilon edge to
    /// this automaton's initial state; every accepting state of this automaton gets an epsilon edge back to the
    /// fresh state, enabling repetition. The fresh state being accepting covers the zero-repetition case.
    ///
    pub fn kleene_star(&self, epsilon_tag: EdgeTag, new_start_tag: StateTag) -> Ndfa<StateTag, EdgeTag> {
        debug!(states = self.count_states(), "building kleene star");

        let fresh = State::new_shared(new_start_tag);
        let mut result = Ndfa::with_initial(fresh.clone());

        result.merge_states_from(self);

        Ndfa::link(&fresh, epsilon_tag.clone(), self.initial_state());

        for state in self.accepting.iter() {
            Ndfa::link(state, epsilon_tag.clone(), &fresh);
        }

        for state in self.accepting.iter() {
            result.register_accepting_state(state);
        }
        result.register_accepting_state(&fresh);

        result
    }

    ///
    /// Runs the automaton over a sequence of edge tags, treating `epsilon_tag` edges as consuming nothing
    ///
    /// The simulation tracks the set of states reachable after each symbol (current sets are compact bit vectors
    /// over the states in first-seen order) and accepts iff an accepting state is reachable once the input is
    /// exhausted. Edge destinations that were never registered in this automaton's table are ignored, mirroring the
    /// traversal rules of the graph export.
    ///
    pub fn accepts<Input: IntoIterator<Item = EdgeTag>>(&self, input: Input, epsilon_tag: &EdgeTag) -> bool {
        let states: Vec<StateRef<StateTag, EdgeTag>> = self.states.iter().cloned().collect();

        let mut index_of: HashMap<*const RefCell<State<StateTag, EdgeTag>>, usize> = HashMap::new();
        for (index, state) in states.iter().enumerate() {
            index_of.entry(Rc::as_ptr(state)).or_insert(index);
        }

        let mut current = CompactBitVector::new(states.len());
        current.set(index_of[&Rc::as_ptr(&self.initial)], true);
        Ndfa::epsilon_close(&states, &index_of, &mut current, epsilon_tag);

        for symbol in input {
            let mut next = CompactBitVector::new(states.len());

            for index in current.iter() {
                let state = states[index].borrow();

                for edge in state.tagged_edges(&symbol) {
                    for destination in edge.borrow().destinations() {
                        if let Some(&destination_index) = index_of.get(&Rc::as_ptr(destination)) {
                            next.set(destination_index, true);
                        }
                    }
                }
            }

            Ndfa::epsilon_close(&states, &index_of, &mut next, epsilon_tag);
            current = next;
        }

        current.iter().any(|index| self.is_accepting_state(&states[index]))
    }

    // Extends a state set with everything reachable over epsilon edges alone
    fn epsilon_close(states: &[StateRef<StateTag, EdgeTag>], index_of: &HashMap<*const RefCell<State<StateTag, EdgeTag>>, usize>, set: &mut CompactBitVector, epsilon_tag: &EdgeTag) {
        let mut stack: Vec<usize> = set.iter().collect();

        while let Some(index) = stack.pop() {
            let state = states[index].borrow();

            for edge in state.tagged_edges(epsilon_tag) {
                for destination in edge.borrow().destinations() {
                    if let Some(&destination_index) = index_of.get(&Rc::as_ptr(destination)) {
                        if !set.get(destination_index) {
                            set.set(destination_index, true);
                            stack.push(destination_index);
                        }
                    }
                }
            }
        }
    }
}
