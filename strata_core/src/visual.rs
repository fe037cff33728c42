// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability contract for platform visuals.
//!
//! Strata never talks to a platform tree directly. Each backend wraps its
//! native node (a XAML `FrameworkElement`, a DOM element, a `CALayer`, or the
//! in-memory [`HeadlessVisual`](crate::headless::HeadlessVisual)) in a type
//! implementing [`StyleTarget`], and every operation in this crate is generic
//! over that trait.
//!
//! # Slots
//!
//! A visual carries two mutually exclusive transform slots:
//!
//! - the **render transform** slot, holding an [`OffsetTransform`] (a cheap
//!   2-D translation that does not engage 3-D compositing);
//! - the **projection** slot, holding a [`Projection`] (a full 4×4 matrix).
//!
//! Slot occupants carry an [`ObjectId`]. Strata remembers the identities of
//! the objects it installed and refuses to touch an occupant it did not
//! install (see [`ForeignSlotPolicy`](crate::config::ForeignSlotPolicy)).

use core::fmt;
use core::hash::Hash;

use kurbo::{Rect, Vec2};

use crate::dimensions::Dimensions;
use crate::transform::Transform3d;

/// Identity of a native transform or projection object.
///
/// Ids handed out by Strata are unique within the process.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

/// A 2-D offset transform for the render-transform slot.
///
/// Only the offset is ever assigned, so every other component stays at
/// identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetTransform {
    /// Identity of the native object.
    pub id: ObjectId,
    /// X/Y offset in layout units.
    pub offset: Vec2,
}

/// A 3-D projection for the projection slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Identity of the native object.
    pub id: ObjectId,
    /// The full projection matrix in the visual's local space.
    pub matrix: Transform3d,
}

/// Which transform slot an event or error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// The 2-D render-transform slot.
    RenderTransform,
    /// The 3-D projection slot.
    Projection,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RenderTransform => "render-transform",
            Self::Projection => "projection",
        })
    }
}

/// How assistive technology announces changes to an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LiveSetting {
    /// Changes are not announced.
    #[default]
    Off,
    /// Changes are announced when the user is idle.
    Polite,
    /// Changes are announced immediately.
    Assertive,
}

impl LiveSetting {
    /// Resolves a style value; anything other than `"polite"` or
    /// `"assertive"` (including absence) is [`Off`](Self::Off).
    #[must_use]
    pub fn from_style(value: Option<&str>) -> Self {
        match value {
            Some("polite") => Self::Polite,
            Some("assertive") => Self::Assertive,
            _ => Self::Off,
        }
    }

    /// Returns the ARIA token for this setting.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// Identity of an element as seen by the style side-table.
///
/// Keys compare by identity, not by value of the underlying node. A key must
/// not be handed out for a new element while the side-table still holds an
/// entry for the old one.
pub trait ElementKey: Copy + Eq + Hash + fmt::Debug {
    /// A stable number identifying the element in trace output.
    fn trace_id(self) -> u64;
}

impl ElementKey for u32 {
    #[inline]
    fn trace_id(self) -> u64 {
        u64::from(self)
    }
}

impl ElementKey for u64 {
    #[inline]
    fn trace_id(self) -> u64 {
        self
    }
}

/// The set of native capabilities style application needs.
///
/// All methods are plain property accessors on the native node. Backends do
/// not interpret the values beyond forwarding them.
pub trait StyleTarget {
    /// Identity key for the side-table.
    type Key: ElementKey;

    /// Returns this element's key.
    fn key(&self) -> Self::Key;

    /// Returns the element's current content-box size, NaN where unknown.
    fn dimensions(&self) -> Dimensions;

    /// Records the content-box size layout reported for the element.
    ///
    /// Later reads of [`dimensions`](Self::dimensions) return it.
    fn set_dimensions(&mut self, dimensions: Dimensions);

    /// Returns the identity of the object in the render-transform slot.
    fn render_transform(&self) -> Option<ObjectId>;

    /// Installs or updates (`Some`) or restores the default of (`None`) the
    /// render-transform slot.
    fn set_render_transform(&mut self, transform: Option<OffsetTransform>);

    /// Returns the identity of the object in the projection slot.
    fn projection(&self) -> Option<ObjectId>;

    /// Installs or updates (`Some`) or restores the default of (`None`) the
    /// projection slot.
    fn set_projection(&mut self, projection: Option<Projection>);

    /// Sets or clears the rectangular clip, in local coordinates.
    fn set_clip(&mut self, clip: Option<Rect>);

    /// Sets the element's own opacity.
    fn set_opacity(&mut self, opacity: f64);

    /// Sets the stacking order among siblings.
    fn set_z_index(&mut self, z_index: i32);

    /// Sets whether the element takes part in rendering and hit testing.
    fn set_visible(&mut self, visible: bool);

    /// Sets the accessible name.
    fn set_accessible_name(&mut self, name: &str);

    /// Sets the accessible help text.
    fn set_accessible_hint(&mut self, hint: &str);

    /// Sets how changes are announced.
    fn set_live_setting(&mut self, setting: LiveSetting);

    /// Sets the automation (test) identifier.
    fn set_automation_id(&mut self, id: &str);

    /// Starts observing pointer enter/exit on the element.
    fn register_pointer_handlers(&mut self) {}

    /// Stops observing pointer enter/exit on the element.
    fn unregister_pointer_handlers(&mut self) {}
}
