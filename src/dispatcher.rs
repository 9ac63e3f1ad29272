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
//! # Tag dispatcher
//!
//! The combination operators sometimes need to synthesise states the caller never named: the fresh initial state of
//! a disjunction, the hub state of a Kleene star. A `TagDispatcher` hands out fresh state tags for them on demand,
//! and `DispatcherNdfa` is the automaton variant that carries one so those operators can be called without
//! supplying a tag.
//!
//! The dispatcher is shared (not copied) by the automata derived from combination operators: correctness depends on
//! every automaton drawing from the same sequence, so a tag is never handed out twice.
//!

use std::cell::RefCell;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use tracing::debug;

use super::automaton::*;
use super::descriptor::*;

///
/// Trait implemented by objects that can produce fresh state tags
///
/// The contract: a tag returned by `next_tag` must never equal a tag already used as a state tag in any automaton
/// sharing this dispatcher. The combination operators rely on the synthesised states being collision-free.
///
pub trait TagDispatcher<Tag> {
    ///
    /// Produces a tag that has never been handed out before
    ///
    fn next_tag(&mut self) -> Tag;
}

///
/// A dispatcher handing out monotonically increasing integers
///
#[derive(Clone, Debug)]
pub struct CountingDispatcher {
    next: u32
}

impl CountingDispatcher {
    ///
    /// Creates a dispatcher counting up from zero
    ///
    pub fn new() -> CountingDispatcher {
        CountingDispatcher { next: 0 }
    }

    ///
    /// Creates a dispatcher counting up from the given value
    ///
    /// The floor should sit above every tag the caller intends to use by hand.
    ///
    pub fn starting_at(next: u32) -> CountingDispatcher {
        CountingDispatcher { next: next }
    }
}

impl Default for CountingDispatcher {
    fn default() -> CountingDispatcher {
        CountingDispatcher::new()
    }
}

impl TagDispatcher<u32> for CountingDispatcher {
    fn next_tag(&mut self) -> u32 {
        let tag = self.next;
        self.next += 1;

        tag
    }
}

///
/// An automaton carrying a tag dispatcher for the states its combination operators synthesise
///
/// Dereferences to the wrapped `Ndfa`, so every base operation (registration, lookups, the explicit-tag operator
/// overloads, simulation) is available directly. Automata produced by the operators share this automaton's
/// dispatcher.
///
pub struct DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
    /// The wrapped automaton
    automaton: Ndfa<StateTag, EdgeTag>,

    /// Source of fresh state tags, shared with derived automata
    dispatcher: Rc<RefCell<Dispatcher>>
}

impl<StateTag: Clone + Eq + Hash, EdgeTag: Clone + Eq + Hash, Dispatcher: TagDispatcher<StateTag>> DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
    ///
    /// Creates an automaton with the given initial-state tag, owning the dispatcher
    ///
    pub fn new(initial_tag: StateTag, dispatcher: Dispatcher) -> DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        DispatcherNdfa { automaton: Ndfa::new(initial_tag), dispatcher: Rc::new(RefCell::new(dispatcher)) }
    }

    ///
    /// Creates an automaton whose initial-state tag is itself drawn from the dispatcher
    ///
    pub fn with_fresh_initial(dispatcher: Dispatcher) -> DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        let dispatcher = Rc::new(RefCell::new(dispatcher));
        let initial_tag = dispatcher.borrow_mut().next_tag();

        DispatcherNdfa { automaton: Ndfa::new(initial_tag), dispatcher: dispatcher }
    }

    ///
    /// Creates an automaton sharing an existing dispatcher
    ///
    pub fn with_shared_dispatcher(initial_tag: StateTag, dispatcher: Rc<RefCell<Dispatcher>>) -> DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        DispatcherNdfa { automaton: Ndfa::new(initial_tag), dispatcher: dispatcher }
    }

    ///
    /// Builds an automaton from a bulk descriptor, owning the dispatcher
    ///
    pub fn from_descriptor(descriptor: NdfaDescriptor<StateTag, EdgeTag>, dispatcher: Dispatcher) -> DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        DispatcherNdfa { automaton: Ndfa::from_descriptor(descriptor), dispatcher: Rc::new(RefCell::new(dispatcher)) }
    }

    ///
    /// The wrapped automaton
    ///
    pub fn automaton(&self) -> &Ndfa<StateTag, EdgeTag> {
        &self.automaton
    }

    ///
    /// The shared dispatcher handle
    ///
    pub fn dispatcher(&self) -> Rc<RefCell<Dispatcher>> {
        self.dispatcher.clone()
    }

    ///
    /// Concatenation (see `Ndfa::concatenate`); the result shares this automaton's dispatcher
    ///
    pub fn concatenate(&self, other: Option<&Ndfa<StateTag, EdgeTag>>, epsilon_tag: EdgeTag) -> DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        DispatcherNdfa { automaton: self.automaton.concatenate(other, epsilon_tag), dispatcher: self.dispatcher.clone() }
    }

    ///
    /// Disjunction with the fresh initial-state tag drawn from the dispatcher (see `Ndfa::disjunction`)
    ///
    pub fn disjunction(&self, other: Option<&Ndfa<StateTag, EdgeTag>>, epsilon_tag: EdgeTag) -> DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        let automaton = match other {
            Some(_) => {
                let start_tag = self.dispatcher.borrow_mut().next_tag();
                debug!("dispatched a fresh disjunction start state");

                self.automaton.disjunction(other, epsilon_tag, start_tag)
            }

            // No operand, no synthesised state: keep the dispatcher unconsumed
            None => self.automaton.clone()
        };

        DispatcherNdfa { automaton: automaton, dispatcher: self.dispatcher.clone() }
    }

    ///
    /// Kleene star with the hub-state tag drawn from the dispatcher (see `Ndfa::kleene_star`)
    ///
    pub fn kleene_star(&self, epsilon_tag: EdgeTag) -> DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        let start_tag = self.dispatcher.borrow_mut().next_tag();
        debug!("dispatched a fresh kleene star hub state");

        DispatcherNdfa { automaton: self.automaton.kleene_star(epsilon_tag, start_tag), dispatcher: self.dispatcher.clone() }
    }
}

impl<StateTag, EdgeTag, Dispatcher> Clone for DispatcherNdfa<StateTag, EdgeTag, Dispatcher>
where StateTag: Clone, EdgeTag: Clone {
    fn clone(&self) -> DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
        DispatcherNdfa { automaton: self.automaton.clone(), dispatcher: self.dispatcher.clone() }
    }
}

impl<StateTag, EdgeTag, Dispatcher> Deref for DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
    type Target = Ndfa<StateTag, EdgeTag>;

    fn deref(&self) -> &Ndfa<StateTag, EdgeTag> {
        &self.automaton
    }
}

impl<StateTag, EdgeTag, Dispatcher> DerefMut for DispatcherNdfa<StateTag, EdgeTag, Dispatcher> {
    fn deref_mut(&mut self) -> &mut Ndfa<StateTag, EdgeTag> {
        &mut self.automaton
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counting_dispatcher_is_monotonic() {
        let mut dispatcher = CountingDispatcher::starting_at(10);

        assert!(dispatcher.next_tag() == 10);
        assert!(dispatcher.next_tag() == 11);
        assert!(dispatcher.next_tag() == 12);
    }

    #[test]
    fn kleene_star_draws_its_hub_tag_from_the_dispatcher() {
        let mut ndfa: DispatcherNdfa<u32, char, CountingDispatcher> = DispatcherNdfa::new(0, CountingDispatcher::starting_at(100));
        ndfa.register_edge(0, 'a', 1);
        ndfa.register_accepting_tag(&1);

        let star = ndfa.kleene_star('ε');

        assert!(star.initial_state().borrow().tag() == &100);
        assert!(star.state_tags() == vec![100, 0, 1]);
    }

    #[test]
    fn derived_automata_share_the_dispatcher() {
        let mut left: DispatcherNdfa<u32, char, CountingDispatcher> = DispatcherNdfa::new(0, CountingDispatcher::starting_at(100));
        left.register_edge(0, 'a', 1);
        left.register_accepting_tag(&1);

        let mut right: Ndfa<u32, char> = Ndfa::new(10);
        right.register_edge(10, 'b', 11);
        right.register_accepting_tag(&11);

        let either = left.disjunction(Some(&right), 'ε');
        let star = either.kleene_star('ε');

        // The second synthesised tag continues where the first left off
        assert!(either.initial_state().borrow().tag() == &100);
        assert!(star.initial_state().borrow().tag() == &101);
    }

    #[test]
    fn disjunction_without_an_operand_consumes_no_tag() {
        let ndfa: DispatcherNdfa<u32, char, CountingDispatcher> = DispatcherNdfa::new(0, CountingDispatcher::starting_at(100));

        let clone = ndfa.disjunction(None, 'ε');
        let star = clone.kleene_star('ε');

        assert!(clone.initial_state().borrow().tag() == &0);
        assert!(star.initial_state().borrow().tag() == &100);
    }

    #[test]
    fn fresh_initial_tags_come_from_the_dispatcher_too() {
        let ndfa: DispatcherNdfa<u32, char, CountingDispatcher> = DispatcherNdfa::with_fresh_initial(CountingDispatcher::starting_at(5));

        assert!(ndfa.initial_state().borrow().tag() == &5);
    }
}
