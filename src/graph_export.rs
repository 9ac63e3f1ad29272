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
//! # Graph export
//!
//! Read-only traversal of an automaton's graph for visualisation collaborators. The traversal assigns each state a
//! stable sequential identifier in first-seen order, reports its tag and whether it accepts, then walks the edges;
//! an edge whose destination never showed up in the state pass (a dangling edge pointing outside the automaton's
//! tables) is silently omitted rather than reported as an error.
//!
//! A Graphviz emitter is included as the canonical consumer: accepting states are drawn with a double circle.
//!

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Display;
use std::fmt::Write as FmtWrite;
use std::hash::Hash;
use std::io;
use std::rc::Rc;

use super::automaton::*;
use super::state::*;

///
/// Trait implemented by objects that consume an automaton's graph
///
/// `visit_state` is called once per state, in identifier order, before any `visit_edge` call mentioning that
/// identifier.
///
pub trait GraphVisitor<StateTag, EdgeTag> {
    ///
    /// Reports a state with its assigned identifier, its tag and whether it is accepting
    ///
    fn visit_state(&mut self, id: usize, tag: &StateTag, accepting: bool);

    ///
    /// Reports an edge between two previously reported states
    ///
    fn visit_edge(&mut self, from: usize, tag: &EdgeTag, to: usize);
}

impl<StateTag: Clone + Eq + Hash, EdgeTag: Clone + Eq + Hash> Ndfa<StateTag, EdgeTag> {
    ///
    /// Walks the graph, feeding states and then edges to the visitor
    ///
    pub fn visit_graph<Visitor: GraphVisitor<StateTag, EdgeTag>>(&self, visitor: &mut Visitor) {
        let states: Vec<StateRef<StateTag, EdgeTag>> = self.states().cloned().collect();

        // First-seen order decides the identifiers; a state filed twice keeps its first one
        let mut ids: HashMap<*const RefCell<State<StateTag, EdgeTag>>, usize> = HashMap::new();
        for (id, state) in states.iter().enumerate() {
            ids.entry(Rc::as_ptr(state)).or_insert(id);
        }

        for (id, state) in states.iter().enumerate() {
            if ids[&Rc::as_ptr(state)] != id {
                continue;
            }

            let state = state.borrow();
            visitor.visit_state(id, state.tag(), self.is_accepting_state(&states[id]));
        }

        for (id, state) in states.iter().enumerate() {
            if ids[&Rc::as_ptr(state)] != id {
                continue;
            }

            let state = state.borrow();

            for edge in state.edges() {
                let edge = edge.borrow();

                for destination in edge.destinations() {
                    // Dangling destinations were never discovered in the state pass: leave them out
                    if let Some(&to) = ids.get(&Rc::as_ptr(destination)) {
                        visitor.visit_edge(id, edge.tag(), to);
                    }
                }
            }
        }
    }
}

impl<StateTag: Clone + Eq + Hash + Display, EdgeTag: Clone + Eq + Hash + Display> Ndfa<StateTag, EdgeTag> {
    ///
    /// Renders the graph in Graphviz dot form
    ///
    pub fn to_dot(&self) -> String {
        let mut writer = DotWriter::new();
        self.visit_graph(&mut writer);

        writer.finish()
    }

    ///
    /// Writes the graph in Graphviz dot form to an output stream
    ///
    pub fn write_dot<Writer: io::Write>(&self, writer: &mut Writer) -> io::Result<()> {
        writer.write_all(self.to_dot().as_bytes())
    }
}

///
/// Graph visitor that renders Graphviz dot text
///
pub struct DotWriter {
    body: String
}

impl DotWriter {
    ///
    /// Creates a writer with an empty graph body
    ///
    pub fn new() -> DotWriter {
        DotWriter { body: String::new() }
    }

    ///
    /// The finished dot document
    ///
    pub fn finish(self) -> String {
        format!("digraph ndfa {{\n    rankdir=LR;\n{}}}\n", self.body)
    }
}

impl Default for DotWriter {
    fn default() -> DotWriter {
        DotWriter::new()
    }
}

impl<StateTag: Display, EdgeTag: Display> GraphVisitor<StateTag, EdgeTag> for DotWriter {
    fn visit_state(&mut self, id: usize, tag: &StateTag, accepting: bool) {
        let shape = if accepting { "doublecircle" } else { "circle" };

        writeln!(self.body, "    s{} [label=\"{}\", shape={}];", id, tag, shape).unwrap();
    }

    fn visit_edge(&mut self, from: usize, tag: &EdgeTag, to: usize) {
        writeln!(self.body, "    s{} -> s{} [label=\"{}\"];", from, to, tag).unwrap();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::edge::*;

    struct Recording {
        states: Vec<(usize, u32, bool)>,
        edges: Vec<(usize, char, usize)>
    }

    impl GraphVisitor<u32, char> for Recording {
        fn visit_state(&mut self, id: usize, tag: &u32, accepting: bool) {
            self.states.push((id, *tag, accepting));
        }

        fn visit_edge(&mut self, from: usize, tag: &char, to: usize) {
            self.edges.push((from, *tag, to));
        }
    }

    #[test]
    fn identifiers_follow_first_seen_order() {
        let mut ndfa: Ndfa<u32, char> = Ndfa::new(0);
        ndfa.register_edge(0, 'a', 1);
        ndfa.register_edge(1, 'b', 0);
        ndfa.register_accepting_tag(&1);

        let mut recording = Recording { states: vec![], edges: vec![] };
        ndfa.visit_graph(&mut recording);

        assert!(recording.states == vec![(0, 0, false), (1, 1, true)]);
        assert!(recording.edges == vec![(0, 'a', 1), (1, 'b', 0)]);
    }

    #[test]
    fn dangling_edges_are_omitted() {
        let mut ndfa: Ndfa<u32, char> = Ndfa::new(0);
        ndfa.register_edge(0, 'a', 1);

        // An edge to a state that was never registered in the automaton's tables
        let dangling: StateRef<u32, char> = State::new_shared(9);
        ndfa.initial_state().borrow_mut().add_edge(Edge::with_destination('x', dangling));

        let mut recording = Recording { states: vec![], edges: vec![] };
        ndfa.visit_graph(&mut recording);

        assert!(recording.states.len() == 2);
        assert!(recording.edges == vec![(0, 'a', 1)]);
    }

    #[test]
    fn dot_output_marks_accepting_states() {
        let mut ndfa: Ndfa<u32, char> = Ndfa::new(0);
        ndfa.register_edge(0, 'a', 1);
        ndfa.register_accepting_tag(&1);

        let dot = ndfa.to_dot();

        assert!(dot.starts_with("digraph ndfa {"));
        assert!(dot.contains("s0 [label=\"0\", shape=circle];"));
        assert!(dot.contains("s1 [label=\"1\", shape=doublecircle];"));
        assert!(dot.contains("s0 -> s1 [label=\"a\"];"));
        assert!(dot.ends_with("}\n"));
    }
}
