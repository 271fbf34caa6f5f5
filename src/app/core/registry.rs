// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashSet;

use uuid::Uuid;

use super::totp::Secret;

/// Stable identifier of a registry slot, independent of how it is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(Uuid);

impl SlotId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone)]
pub struct Slot {
    pub id: SlotId,
    pub label: String,
    pub secret: Secret,
}

/// Labelled secrets shown by the automatic display, fixed once built
///
/// Iteration follows the order the entries were given in.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    slots: Vec<Slot>,
}

impl Registry {
    pub fn from_entries<I, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (L, Secret)>,
        L: Into<String>,
    {
        let mut seen = HashSet::new();
        let slots = entries
            .into_iter()
            .map(|(label, secret)| {
                let label = label.into();
                if !seen.insert(label.clone()) {
                    log::warn!("label {label:?} is used by more than one secret");
                }
                Slot {
                    id: SlotId::new(),
                    label,
                    secret,
                }
            })
            .collect();

        Self { slots }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::from_entries([
            ("Key three", Secret::new("ABCDEFGHIJKLMNOR")),
            ("Key one", Secret::new("ABCDEFGHIJKLMNOP")),
            ("Key two", Secret::new("ABCDEFGHIJKLMNOQ")),
        ])
    }

    #[test]
    fn keeps_insertion_order() {
        let labels: Vec<_> = registry().iter().map(|slot| slot.label.clone()).collect();
        assert_eq!(labels, ["Key three", "Key one", "Key two"]);
    }

    #[test]
    fn ids_are_unique() {
        let registry = registry();
        let ids: HashSet<_> = registry.iter().map(|slot| slot.id).collect();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn duplicate_labels_are_kept() {
        let registry = Registry::from_entries([
            ("Same", Secret::new("ABCDEFGHIJKLMNOP")),
            ("Same", Secret::new("ABCDEFGHIJKLMNOQ")),
        ]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn empty_registry() {
        let registry = Registry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }
}
