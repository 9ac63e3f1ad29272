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
//! # Register
//!
//! A `Register` is a tag-keyed multimap: it maps a tag to one or many items carrying that tag. Tags are not unique
//! keys - registering a second item with an existing tag keeps both, and they are enumerated together. This is the
//! structure behind the automaton's state table, its accepting-state table and each state's outgoing edge map.
//!
//! The tag of an item is computed by a tag-extractor function injected at construction, so the register can hold
//! shared handles (an `Rc` to a state, say) and still file them under the tag of the thing they point at.
//!

use std::collections::HashMap;
use std::hash::Hash;

///
/// A tag-keyed multimap with an injected tag extractor
///
/// Lookups that produce a single item use the "first match" policy: the item that was registered earliest under
/// that tag wins. Enumeration visits buckets in the order their tags were first seen, and items within a bucket in
/// insertion order, so iteration is deterministic.
///
#[derive(Clone)]
pub struct Register<Tag, Item> {
    /// Computes the tag an item is filed under
    extract: fn(&Item) -> Tag,

    /// Items grouped by tag
    buckets: HashMap<Tag, Vec<Item>>,

    /// Tags in the order they were first seen
    order: Vec<Tag>
}

impl<Tag: Clone + Eq + Hash, Item> Register<Tag, Item> {
    ///
    /// Creates an empty register with the given tag extractor
    ///
    pub fn new(extract: fn(&Item) -> Tag) -> Register<Tag, Item> {
        Register { extract: extract, buckets: HashMap::new(), order: vec![] }
    }

    ///
    /// Files an item under its computed tag, creating the bucket on first use
    ///
    pub fn add(&mut self, item: Item) {
        let tag = (self.extract)(&item);

        match self.buckets.get_mut(&tag) {
            Some(bucket) => {
                bucket.push(item);
            }

            None => {
                self.order.push(tag.clone());
                self.buckets.insert(tag, vec![item]);
            }
        }
    }

    ///
    /// All items filed under a tag, in insertion order (empty if the tag is unknown)
    ///
    pub fn items(&self, tag: &Tag) -> &[Item] {
        self.buckets.get(tag).map(|bucket| bucket.as_slice()).unwrap_or(&[])
    }

    ///
    /// The earliest item filed under a tag, if any
    ///
    pub fn first(&self, tag: &Tag) -> Option<&Item> {
        self.items(tag).first()
    }

    ///
    /// True if at least one item is filed under the tag
    ///
    pub fn contains_tag(&self, tag: &Tag) -> bool {
        self.buckets.contains_key(tag)
    }

    ///
    /// True if an item matching the predicate is filed under the tag
    ///
    pub fn contains_by<Predicate: Fn(&Item) -> bool>(&self, tag: &Tag, predicate: Predicate) -> bool {
        self.items(tag).iter().any(predicate)
    }

    ///
    /// The tags in first-seen order
    ///
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.order.iter()
    }

    ///
    /// Every item: buckets in first-seen tag order, items in insertion order within a bucket
    ///
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().flat_map(move |tag| self.buckets.get(tag).into_iter().flatten())
    }

    ///
    /// The total number of items across all buckets
    ///
    pub fn len(&self) -> usize {
        self.order.iter().map(|tag| self.items(tag).len()).sum()
    }

    ///
    /// True if no item has been registered
    ///
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
