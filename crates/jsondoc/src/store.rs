//! Shared storage and view anchors.
//!
//! A document and the views taken from it share one [`Store`]. Each handle
//! holds an [`Anchor`]: the steps from the shared root to the handle's own
//! root value. After every structural edit the store relocates the live
//! anchors, so a view keeps following the container it was taken from when
//! siblings shift, and is detached when that container is removed or
//! replaced. A detached view never rebinds.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use jsondoc_path::{Step, Steps};

use crate::value::Value;

#[derive(Debug)]
pub struct Store {
    value: RefCell<Value>,
    anchors: RefCell<Vec<Weak<Anchor>>>,
}

/// Where a handle's root sits inside the shared value. `None` once detached.
#[derive(Debug)]
pub struct Anchor {
    steps: RefCell<Option<Steps>>,
}

impl Anchor {
    pub fn steps(&self) -> Option<Steps> {
        self.steps.borrow().clone()
    }

    pub fn is_detached(&self) -> bool {
        self.steps.borrow().is_none()
    }
}

/// Structural effect of one write, as seen from the anchors.
#[derive(Debug, Clone, PartialEq)]
pub enum Relocation {
    /// The value at the location was replaced.
    Replaced,
    /// The member or element at the location was removed. For an element,
    /// later siblings shift down by one.
    Removed,
    /// These members of the object at the location were overwritten.
    Overwritten(Vec<String>),
    /// The array at the location kept the elements marked `true`.
    Retained(Vec<bool>),
    /// The last element of the array at the location, at this index, was
    /// removed.
    Popped(usize),
}

enum Moved {
    Keep,
    Detach,
    To(Steps),
}

impl Store {
    pub fn new(value: Value) -> Rc<Self> {
        Rc::new(Self {
            value: RefCell::new(value),
            anchors: RefCell::new(Vec::new()),
        })
    }

    pub fn value(&self) -> &RefCell<Value> {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value.into_inner()
    }

    /// A new anchor at `steps`.
    ///
    /// The shared root is never moved or replaced as a location, so anchors
    /// at the root are not tracked.
    pub fn anchor(&self, steps: Steps) -> Rc<Anchor> {
        let tracked = !steps.is_empty();
        let anchor = Rc::new(Anchor {
            steps: RefCell::new(Some(steps)),
        });
        if tracked {
            let mut anchors = self.anchors.borrow_mut();
            anchors.retain(|a| a.strong_count() > 0);
            anchors.push(Rc::downgrade(&anchor));
        }
        anchor
    }

    /// Move or detach every live anchor affected by a write at `at`.
    ///
    /// `writer` is the handle that made the write; replacing its own root
    /// leaves it bound to the new value.
    pub fn relocate(&self, writer: &Anchor, at: &[Step], relocation: &Relocation) {
        let mut anchors = self.anchors.borrow_mut();
        anchors.retain(|weak| {
            let Some(anchor) = weak.upgrade() else {
                return false;
            };
            let mut steps = anchor.steps.borrow_mut();
            let Some(current) = steps.as_ref() else {
                return false;
            };
            let is_writer = std::ptr::eq(Rc::as_ptr(&anchor), writer);
            match moved(current, at, relocation) {
                Moved::Keep => true,
                Moved::Detach if is_writer && current.as_slice() == at => true,
                Moved::Detach => {
                    tracing::debug!(at = %jsondoc_path::format_steps(at), "document view detached");
                    *steps = None;
                    false
                }
                Moved::To(to) => {
                    *steps = Some(to);
                    true
                }
            }
        });
    }
}

fn moved(steps: &[Step], at: &[Step], relocation: &Relocation) -> Moved {
    if !steps.starts_with(at) {
        return match relocation {
            Relocation::Removed => shifted(steps, at),
            _ => Moved::Keep,
        };
    }
    let child = steps.get(at.len());
    match relocation {
        Relocation::Replaced | Relocation::Removed => Moved::Detach,
        Relocation::Overwritten(keys) => match child {
            Some(Step::Key(k)) if keys.contains(k) => Moved::Detach,
            _ => Moved::Keep,
        },
        Relocation::Retained(mask) => match child {
            Some(Step::Index(i)) if mask.get(*i) == Some(&true) => {
                let index = mask[..*i].iter().filter(|keep| **keep).count();
                let mut to = steps.to_vec();
                to[at.len()] = Step::Index(index);
                Moved::To(to)
            }
            Some(Step::Index(_)) => Moved::Detach,
            _ => Moved::Keep,
        },
        Relocation::Popped(last) => match child {
            Some(Step::Index(i)) if i == last => Moved::Detach,
            _ => Moved::Keep,
        },
    }
}

/// Shift anchors below later siblings of a removed array element.
fn shifted(steps: &[Step], at: &[Step]) -> Moved {
    let Some((Step::Index(removed), parent)) = at.split_last() else {
        return Moved::Keep;
    };
    if steps.len() < at.len() || !steps.starts_with(parent) {
        return Moved::Keep;
    }
    match &steps[parent.len()] {
        Step::Index(i) if i > removed => {
            let mut to = steps.to_vec();
            to[parent.len()] = Step::Index(i - 1);
            Moved::To(to)
        }
        _ => Moved::Keep,
    }
}
