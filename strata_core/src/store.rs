// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side-table of size-dependent style state.
//!
//! Transform and clip both depend on the element's own size, which is not
//! known when the style is set and changes over the element's lifetime. The
//! [`StyleStore`] remembers, per element, the last transform list and whether
//! overflow clipping is on, so both can be recomputed whenever layout reports
//! new dimensions.
//!
//! An entry is created lazily by the first transform or `overflow: hidden`
//! write and removed when the element is detached. Elements that never use
//! either property never get an entry.

use alloc::vec::Vec;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::clip::{self, Overflow};
use crate::compose::{classify, compose};
use crate::config::StylerConfig;
use crate::dimensions::Dimensions;
use crate::ops::TransformOp;
use crate::slots::{OwnedSlots, SlotWriter};
use crate::trace::{EntryChange, EntryEvent, ResizeEvent, Tracer};
use crate::visual::{ElementKey, StyleTarget};

/// Size-dependent style state for one element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DimensionBoundState {
    overflow_hidden: bool,
    transform: Option<Vec<TransformOp>>,
    slots: OwnedSlots,
}

impl DimensionBoundState {
    /// Whether the element clips to its bounds.
    #[must_use]
    pub const fn overflow_hidden(&self) -> bool {
        self.overflow_hidden
    }

    /// The last transform list set on the element, if any.
    #[must_use]
    pub fn transform(&self) -> Option<&[TransformOp]> {
        self.transform.as_deref()
    }

    /// The slot objects Strata installed on the element.
    #[must_use]
    pub const fn slots(&self) -> &OwnedSlots {
        &self.slots
    }
}

/// Per-element side-table keyed by element identity.
#[derive(Debug)]
pub struct StyleStore<K: ElementKey> {
    entries: HashMap<K, DimensionBoundState>,
    writer: SlotWriter,
}

impl<K: ElementKey> Default for StyleStore<K> {
    fn default() -> Self {
        Self::new(StylerConfig::default())
    }
}

impl<K: ElementKey> StyleStore<K> {
    /// Creates an empty store.
    #[must_use]
    pub fn new(config: StylerConfig) -> Self {
        Self {
            entries: HashMap::new(),
            writer: SlotWriter::new(config.foreign_slots),
        }
    }

    /// Number of elements with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no element has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` has an entry.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.entries.contains_key(&key)
    }

    /// Returns the entry for `key`, if any.
    #[must_use]
    pub fn get(&self, key: K) -> Option<&DimensionBoundState> {
        self.entries.get(&key)
    }

    /// Sets (`Some`) or clears (`None`) the element's transform.
    ///
    /// Setting records the list and applies it against the element's current
    /// dimensions. An empty list is a real transform: it composes to identity
    /// and installs a zero offset. Clearing restores both slots to their
    /// defaults if a transform had been applied, and is a no-op otherwise.
    ///
    /// # Panics
    ///
    /// Panics if a transform slot holds a foreign object and the configured
    /// policy is [`Fatal`](crate::config::ForeignSlotPolicy::Fatal).
    pub fn set_transform<V>(
        &mut self,
        target: &mut V,
        ops: Option<&[TransformOp]>,
        tracer: &mut Tracer<'_>,
    ) where
        V: StyleTarget<Key = K>,
    {
        let key = target.key();
        match ops {
            Some(ops) => {
                let state = entry_mut(&mut self.entries, key, tracer);
                state.transform = Some(ops.to_vec());
                let dims = target.dimensions();
                let classification = classify(compose(ops, dims));
                self.writer
                    .apply(target, &mut state.slots, classification, dims, tracer);
            }
            None => {
                let Some(state) = self.entries.get_mut(&key) else {
                    return;
                };
                if state.transform.take().is_some() {
                    self.writer.clear(target, &mut state.slots, tracer);
                }
            }
        }
    }

    /// Sets the element's overflow behavior.
    ///
    /// [`Overflow::Hidden`] clips to the current dimensions (or clears the
    /// clip while they are unknown). Any other value removes a clip this
    /// store set earlier.
    pub fn set_overflow<V>(&mut self, target: &mut V, overflow: Overflow, tracer: &mut Tracer<'_>)
    where
        V: StyleTarget<Key = K>,
    {
        let key = target.key();
        if overflow.is_hidden() {
            entry_mut(&mut self.entries, key, tracer).overflow_hidden = true;
            let dims = target.dimensions();
            clip::set_clip(target, dims, tracer);
        } else if let Some(state) = self.entries.get_mut(&key)
            && state.overflow_hidden
        {
            state.overflow_hidden = false;
            clip::clear_clip(target, tracer);
        }
    }

    /// Recomputes size-dependent state after layout reports `dims`.
    ///
    /// `dims` is recorded on the target first, so later transform and
    /// overflow writes use the same size. The transform is then recomposed
    /// around the new center and the clip is resized. Elements without an
    /// entry get no other update.
    ///
    /// # Panics
    ///
    /// Panics if a transform slot holds a foreign object and the configured
    /// policy is [`Fatal`](crate::config::ForeignSlotPolicy::Fatal).
    pub fn on_dimensions_changed<V>(
        &mut self,
        target: &mut V,
        dims: Dimensions,
        tracer: &mut Tracer<'_>,
    ) where
        V: StyleTarget<Key = K>,
    {
        target.set_dimensions(dims);
        let key = target.key();
        let state = self.entries.get_mut(&key);
        tracer.resize(&ResizeEvent {
            element: key.trace_id(),
            dimensions: dims,
            tracked: state.is_some(),
        });
        let Some(state) = state else {
            return;
        };

        if let Some(ops) = &state.transform {
            let classification = classify(compose(ops, dims));
            self.writer
                .apply(target, &mut state.slots, classification, dims, tracer);
        }
        if state.overflow_hidden {
            clip::set_clip(target, dims, tracer);
        }
    }

    /// Removes the element's entry. Returns `true` if there was one.
    ///
    /// The visual itself is not touched; a detached element's slots and clip
    /// go away with the element.
    pub fn on_detach(&mut self, key: K, tracer: &mut Tracer<'_>) -> bool {
        let removed = self.entries.remove(&key).is_some();
        if removed {
            tracer.entry(&EntryEvent {
                element: key.trace_id(),
                change: EntryChange::Removed,
            });
        }
        removed
    }
}

fn entry_mut<'m, K: ElementKey>(
    entries: &'m mut HashMap<K, DimensionBoundState>,
    key: K,
    tracer: &mut Tracer<'_>,
) -> &'m mut DimensionBoundState {
    match entries.entry(key) {
        Entry::Occupied(o) => o.into_mut(),
        Entry::Vacant(v) => {
            tracer.entry(&EntryEvent {
                element: key.trace_id(),
                change: EntryChange::Created,
            });
            v.insert(DimensionBoundState::default())
        }
    }
}
