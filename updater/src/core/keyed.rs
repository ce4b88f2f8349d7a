//! Identifier access for records.

use std::rc::Rc;
use std::sync::Arc;

/// A record that exposes its identifier.
///
/// Ids are compared with `PartialEq` only; uniqueness within a sequence is a
/// caller precondition (see [`crate::core::invariants::validate_unique_ids`]).
pub trait Keyed {
    type Id: PartialEq + ?Sized;

    fn id(&self) -> &Self::Id;
}

impl<T: Keyed + ?Sized> Keyed for &T {
    type Id = T::Id;

    fn id(&self) -> &Self::Id {
        (**self).id()
    }
}

impl<T: Keyed + ?Sized> Keyed for Box<T> {
    type Id = T::Id;

    fn id(&self) -> &Self::Id {
        (**self).id()
    }
}

impl<T: Keyed + ?Sized> Keyed for Rc<T> {
    type Id = T::Id;

    fn id(&self) -> &Self::Id {
        (**self).id()
    }
}

impl<T: Keyed + ?Sized> Keyed for Arc<T> {
    type Id = T::Id;

    fn id(&self) -> &Self::Id {
        (**self).id()
    }
}
