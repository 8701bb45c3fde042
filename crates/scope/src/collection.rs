use thiserror::Error;

use crate::aircraft::AircraftId;

pub trait TrackedEntity {
    fn owner(&self) -> AircraftId;

    fn is_active(&self) -> bool;

    fn activate(&mut self);

    fn deactivate(&mut self);

    // Runs exactly once, immediately before the entry leaves its collection.
    fn dispose(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("aircraft {0} already has an entry in this collection")]
    DuplicateOwner(AircraftId),
    #[error("aircraft {0} has no entry in this collection")]
    NotFound(AircraftId),
}

#[derive(Debug)]
pub struct EntityCollection<T> {
    items: Vec<T>,
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: TrackedEntity> EntityCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    pub fn add_item(&mut self, entity: T) -> Result<(), CollectionError> {
        let owner = entity.owner();
        if self.find_by_owner(owner).is_some() {
            return Err(CollectionError::DuplicateOwner(owner));
        }
        self.items.push(entity);
        Ok(())
    }

    // Caller runs dispose() before removal by contract.
    pub fn remove_item(&mut self, owner: AircraftId) -> Result<T, CollectionError> {
        let index = self
            .items
            .iter()
            .position(|item| item.owner() == owner)
            .ok_or(CollectionError::NotFound(owner))?;
        Ok(self.items.remove(index))
    }

    pub fn find_by_owner(&self, owner: AircraftId) -> Option<&T> {
        self.items.iter().find(|item| item.owner() == owner)
    }

    pub fn find_by_owner_mut(&mut self, owner: AircraftId) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.owner() == owner)
    }

    pub fn find_active(&self) -> Option<&T> {
        self.items.iter().find(|item| item.is_active())
    }

    pub fn find_active_mut(&mut self) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.is_active())
    }

    pub fn set_active(&mut self, owner: AircraftId) -> Result<(), CollectionError> {
        // The target is validated before the current selection is touched.
        if self.find_by_owner(owner).is_none() {
            return Err(CollectionError::NotFound(owner));
        }
        if let Some(active) = self.find_active_mut() {
            if active.owner() == owner {
                return Ok(());
            }
            active.deactivate();
        }
        if let Some(target) = self.find_by_owner_mut(owner) {
            target.activate();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Probe {
        owner: AircraftId,
        active: bool,
        disposed: bool,
    }

    impl Probe {
        fn new(owner: u32) -> Self {
            Self {
                owner: AircraftId(owner),
                active: false,
                disposed: false,
            }
        }
    }

    impl TrackedEntity for Probe {
        fn owner(&self) -> AircraftId {
            self.owner
        }

        fn is_active(&self) -> bool {
            self.active
        }

        fn activate(&mut self) {
            self.active = true;
        }

        fn deactivate(&mut self) {
            self.active = false;
        }

        fn dispose(&mut self) {
            assert!(!self.disposed, "probe disposed twice");
            self.disposed = true;
        }
    }

    fn collection_of(owners: &[u32]) -> EntityCollection<Probe> {
        let mut collection = EntityCollection::new();
        for owner in owners {
            collection
                .add_item(Probe::new(*owner))
                .expect("unique owner");
        }
        collection
    }

    #[test]
    fn add_item_rejects_second_entry_for_same_aircraft() {
        let mut collection = collection_of(&[1, 2]);
        let err = collection.add_item(Probe::new(1)).unwrap_err();
        assert_eq!(err, CollectionError::DuplicateOwner(AircraftId(1)));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn find_by_owner_returns_entry_or_none() {
        let collection = collection_of(&[4, 9]);
        assert_eq!(
            collection.find_by_owner(AircraftId(9)).map(Probe::owner),
            Some(AircraftId(9))
        );
        assert!(collection.find_by_owner(AircraftId(5)).is_none());
    }

    #[test]
    fn set_active_moves_activation_between_entries() {
        let mut collection = collection_of(&[1, 2, 3]);
        collection.set_active(AircraftId(1)).expect("known owner");
        collection.set_active(AircraftId(3)).expect("known owner");

        let active: Vec<AircraftId> = collection
            .iter()
            .filter(|probe| probe.is_active())
            .map(Probe::owner)
            .collect();
        assert_eq!(active, vec![AircraftId(3)]);
    }

    #[test]
    fn set_active_unknown_owner_keeps_current_activation() {
        let mut collection = collection_of(&[1, 2]);
        collection.set_active(AircraftId(2)).expect("known owner");

        let err = collection.set_active(AircraftId(7)).unwrap_err();
        assert_eq!(err, CollectionError::NotFound(AircraftId(7)));
        assert_eq!(
            collection.find_active().map(Probe::owner),
            Some(AircraftId(2))
        );
    }

    #[test]
    fn set_active_is_idempotent_for_the_current_entry() {
        let mut collection = collection_of(&[6]);
        collection.set_active(AircraftId(6)).expect("known owner");
        collection.set_active(AircraftId(6)).expect("known owner");
        assert!(collection
            .find_by_owner(AircraftId(6))
            .is_some_and(Probe::is_active));
    }

    #[test]
    fn remove_item_returns_entry_and_preserves_order_of_rest() {
        let mut collection = collection_of(&[1, 2, 3]);
        let removed = collection.remove_item(AircraftId(2)).expect("present");
        assert_eq!(removed.owner, AircraftId(2));

        let remaining: Vec<AircraftId> = collection.iter().map(Probe::owner).collect();
        assert_eq!(remaining, vec![AircraftId(1), AircraftId(3)]);
    }

    #[test]
    fn remove_item_unknown_owner_reports_not_found() {
        let mut collection = collection_of(&[1]);
        let err = collection.remove_item(AircraftId(8)).unwrap_err();
        assert_eq!(err, CollectionError::NotFound(AircraftId(8)));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn dispose_runs_once_before_removal() {
        let mut collection = collection_of(&[1]);
        collection
            .find_by_owner_mut(AircraftId(1))
            .expect("present")
            .dispose();

        let removed = collection.remove_item(AircraftId(1)).expect("present");
        assert!(removed.disposed);
        assert!(collection.is_empty());
    }

    #[test]
    fn find_active_is_none_until_something_activates() {
        let mut collection = collection_of(&[1, 2]);
        assert!(collection.find_active().is_none());
        collection.set_active(AircraftId(1)).expect("known owner");
        assert!(collection.find_active().is_some());
    }
}
