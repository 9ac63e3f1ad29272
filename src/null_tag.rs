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
//! # Null-tag automata
//!
//! The combination operators are parameterised by an epsilon tag - the edge tag that consumes nothing. A call site
//! composing many automata (a regex-style builder, say) would have to thread that tag through every call, so these
//! variants bind one `EdgeTag` value as "the" epsilon at construction and forward to the base operators with it.
//!
//! `NullTagNdfa` wraps the plain engine (operators that synthesise states still take an explicit tag for them);
//! `NullTagDispatcherNdfa` wraps the dispatcher-backed engine, making the operator calls entirely tag-free.
//!

use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use super::automaton::*;
use super::descriptor::*;
use super::dispatcher::*;

///
/// An automaton with a bound epsilon tag
///
/// Dereferences to the wrapped `Ndfa`; the operators here rebind the same epsilon tag on their results.
///
#[derive(Clone)]
pub struct NullTagNdfa<StateTag, EdgeTag> {
    /// The wrapped automaton
    automaton: Ndfa<StateTag, EdgeTag>,

    /// The edge tag that consumes nothing
    null_tag: EdgeTag
}

impl<StateTag: Clone + Eq + Hash, EdgeTag: Clone + Eq + Hash> NullTagNdfa<StateTag, EdgeTag> {
    ///
    /// Creates an automaton with the given initial-state tag and epsilon tag
    ///
    pub fn new(initial_tag: StateTag, null_tag: EdgeTag) -> NullTagNdfa<StateTag, EdgeTag> {
        NullTagNdfa { automaton: Ndfa::new(initial_tag), null_tag: null_tag }
    }

    ///
    /// Binds an epsilon tag to an existing automaton
    ///
    pub fn from_automaton(automaton: Ndfa<StateTag, EdgeTag>, null_tag: EdgeTag) -> NullTagNdfa<StateTag, EdgeTag> {
        NullTagNdfa { automaton: automaton, null_tag: null_tag }
    }

    ///
    /// Builds an automaton from a bulk descriptor with the given epsilon tag
    ///
    pub fn from_descriptor(descriptor: NdfaDescriptor<StateTag, EdgeTag>, null_tag: EdgeTag) -> NullTagNdfa<StateTag, EdgeTag> {
        NullTagNdfa { automaton: Ndfa::from_descriptor(descriptor), null_tag: null_tag }
    }

    ///
    /// The bound epsilon tag
    ///
    pub fn null_tag(&self) -> &EdgeTag {
        &self.null_tag
    }

    ///
    /// The wrapped automaton
    ///
    pub fn automaton(&self) -> &Ndfa<StateTag, EdgeTag> {
        &self.automaton
    }

    ///
    /// Concatenation using the bound epsilon tag (see `Ndfa::concatenate`)
    ///
    pub fn concatenate(&self, other: Option<&Ndfa<StateTag, EdgeTag>>) -> NullTagNdfa<StateTag, EdgeTag> {
        NullTagNdfa { automaton: self.automaton.concatenate(other, self.null_tag.clone()), null_tag: self.null_tag.clone() }
    }

    ///
    /// Disjunction using the bound epsilon tag (see `Ndfa::disjunction`)
    ///
    pub fn disjunction(&self, other: Option<&Ndfa<StateTag, EdgeTag>>, new_start_tag: StateTag) -> NullTagNdfa<StateTag, EdgeTag> {
        NullTagNdfa { automaton: self.automaton.disjunction(other, self.null_tag.clone(), new_start_tag), null_tag: self.null_tag.clone() }
    }

    ///
    /// Kleene star using the bound epsilon tag (see `Ndfa::kleene_star`)
    ///
    pub fn kleene_star(&self, new_start_tag: StateTag) -> NullTagNdfa<StateTag, EdgeTag> {
        NullTagNdfa { automaton: self.automaton.kleene_star(self.null_tag.clone(), new_start_tag), null_tag: self.null_tag.clone() }
    }

    ///
    /// Runs the automaton over a sequence of edge tags, treating the bound epsilon tag as consuming nothing
    ///
    pub fn matches<Input: IntoIterator<Item = EdgeTag>>(&self, input: Input) -> bool {
        self.automaton.accepts(input, &self.null_tag)
    }
}

impl<StateTag, EdgeTag> Deref for NullTagNdfa<StateTag, EdgeTag> {
    type Target = Ndfa<StateTag, EdgeTag>;

    fn deref(&self) -> &Ndfa<StateTag, EdgeTag> {
        &self.automaton
    }
}

impl<StateTag, EdgeTag> DerefMut for NullTagNdfa<StateTag, EdgeTag> {
    fn deref_mut(&mut self) -> &mut Ndfa<StateTag, EdgeTag> {
        &mut self.automaton
    }
}

///
/// A dispatcher-backed automaton with a bound epsilon tag: the operator calls need no tags at all
///
pub struct NullTagDispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
    /// The wrapped dispatcher-backed automaton
    automaton: DispatcherNdfa<StateTag, EdgeTag, Dispatcher>,

    /// The edge tag that consumes nothing
    null_tag: EdgeTag
}

impl<StateTag: Clone + Eq + Hash, EdgeTag: Clone + Eq + Hash, Dispatcher: TagDispatcher<StateTag>> NullTagDispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
    ///
    /// Creates an automaton with the given initial-state tag, epsilon tag and dispatcher
    ///
    pub fn new(initial_tag: StateTag, null_tag: EdgeTag, dispatcher: Dispatcher) -> NullTagDispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        NullTagDispatcherNdfa { automaton: DispatcherNdfa::new(initial_tag, dispatcher), null_tag: null_tag }
    }

    ///
    /// Binds an epsilon tag to an existing dispatcher-backed automaton
    ///
    pub fn from_automaton(automaton: DispatcherNdfa<StateTag, EdgeTag, Dispatcher>, null_tag: EdgeTag) -> NullTagDispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        NullTagDispatcherNdfa { automaton: automaton, null_tag: null_tag }
    }

    ///
    /// The bound epsilon tag
    ///
    pub fn null_tag(&self) -> &EdgeTag {
        &self.null_tag
    }

    ///
    /// Concatenation using the bound epsilon tag
    ///
    pub fn concatenate(&self, other: Option<&Ndfa<StateTag, EdgeTag>>) -> NullTagDispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        NullTagDispatcherNdfa { automaton: self.automaton.concatenate(other, self.null_tag.clone()), null_tag: self.null_tag.clone() }
    }

    ///
    /// Disjunction using the bound epsilon tag and a dispatched start state
    ///
    pub fn disjunction(&self, other: Option<&Ndfa<StateTag, EdgeTag>>) -> NullTagDispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        NullTagDispatcherNdfa { automaton: self.automaton.disjunction(other, self.null_tag.clone()), null_tag: self.null_tag.clone() }
    }

    ///
    /// Kleene star using the bound epsilon tag and a dispatched hub state
    ///
    pub fn kleene_star(&self) -> NullTagDispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        NullTagDispatcherNdfa { automaton: self.automaton.kleene_star(self.null_tag.clone()), null_tag: self.null_tag.clone() }
    }

    ///
    /// Runs the automaton over a sequence of edge tags, treating the bound epsilon tag as consuming nothing
    ///
    pub fn matches<Input: IntoIterator<Item = EdgeTag>>(&self, input: Input) -> bool {
        self.automaton.accepts(input, &self.null_tag)
    }
}

impl<StateTag, EdgeTag, Dispatcher> Clone for NullTagDispatcherNdfa<StateTag, EdgeTag, Dispatcher>
where StateTag: Clone, EdgeTag: Clone {
    fn clone(&self) -> NullTagDispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        NullTagDispatcherNdfa { automaton: self.automaton.clone(), null_tag: self.null_tag.clone() }
    }
}

impl<StateTag, EdgeTag, Dispatcher> Deref for NullTagDispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
    type Target = DispatcherNdfa<StateTag, EdgeTag, Dispatcher>;

    fn deref(&self) -> &DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        &self.automaton
    }
}

impl<StateTag, EdgeTag, Dispatcher> DerefMut for NullTagDispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
    fn deref_mut(&mut self) -> &mut DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        &mut self.automaton
    }
}
