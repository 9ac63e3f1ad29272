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
//! # Tagged automata
//!
//! tagged-automata is a library for building and combining nondeterministic finite automata whose states and edges
//! are identified by caller-supplied tags, together with the compact bit-vector engine that represents state sets
//! efficiently during simulation.
//!
//! Automata are built by registering `(from-tag, edge-tag, to-tag)` triples (or a bulk descriptor) and combined
//! with the classic operators - concatenation, disjunction and Kleene star - which splice graphs together using
//! epsilon edges. Graph nodes are shared by handle rather than copied, so combining large automata stays cheap;
//! the price is that mutating a shared state or edge is visible through every automaton that references it.
//!
//! ```
//! # use tagged_automata::*;
//! let mut matches_a: Ndfa<u32, char> = Ndfa::new(0);
//! matches_a.register_edge(0, 'a', 1);
//! matches_a.register_accepting_tag(&1);
//!
//! let mut matches_b: Ndfa<u32, char> = Ndfa::new(10);
//! matches_b.register_edge(10, 'b', 11);
//! matches_b.register_accepting_tag(&11);
//!
//! let either = matches_a.disjunction(Some(&matches_b), 'ε', 20);
//! let any_amount = either.kleene_star('ε', 21);
//!
//! assert!(any_amount.accepts(vec!['a', 'b', 'a'], &'ε'));
//! ```
//!
//! The bit-vector side of the library is a fixed-length packed boolean set with word-level Boolean algebra, range
//! updates and set-style operations over arbitrary index collections, plus the word kernels and the 8×8 tile type
//! it is built from.
//!

pub use self::automaton::*;
pub use self::bit_block::*;
pub use self::bit_tile::*;
pub use self::bit_utils::*;
pub use self::compact_bit_vector::*;
pub use self::descriptor::*;
pub use self::dispatcher::*;
pub use self::edge::*;
pub use self::graph_export::*;
pub use self::null_tag::*;
pub use self::register::*;
pub use self::state::*;

pub mod automaton;
pub mod bit_block;
pub mod bit_tile;
pub mod bit_utils;
pub mod compact_bit_vector;
pub mod descriptor;
pub mod dispatcher;
pub mod edge;
pub mod graph_export;
pub mod null_tag;
pub mod register;
pub mod state;
