//! Address book store and checkout address selection.

use super::Observable;
use crate::models::Address;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressState {
    pub addresses: Vec<Address>,
    pub selected: Option<Address>,
}

#[derive(Debug, Clone, Default)]
pub struct AddressStore {
    state: Observable<AddressState>,
}

impl AddressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &Observable<AddressState> {
        &self.state
    }

    #[must_use]
    pub fn addresses(&self) -> Vec<Address> {
        self.state.with(|s| s.addresses.clone())
    }

    #[must_use]
    pub fn selected(&self) -> Option<Address> {
        self.state.with(|s| s.selected.clone())
    }

    /// Replace the list. The default address is auto-selected only when
    /// nothing is selected yet.
    pub fn set_addresses(&self, addresses: Vec<Address>) {
        self.state.update(|s| {
            if s.selected.is_none() {
                s.selected = addresses.iter().find(|a| a.is_default).cloned();
            }
            s.addresses = addresses;
        });
    }

    /// Select an address for checkout; `None` clears the selection.
    pub fn select(&self, address: Option<Address>) {
        self.state.update(|s| s.selected = address);
    }
}

#[cfg(test)]
mod tests {
    use kronos_core::{AddressId, AddressKind};

    use super::*;

    fn address(id: i32, is_default: bool) -> Address {
        Address {
            id: AddressId::new(id),
            kind: AddressKind::Shipping,
            recipient: Some("Ana Quispe".to_owned()),
            line1: format!("Av. Arequipa {id}"),
            line2: None,
            city: "Lima".to_owned(),
            region: "Lima".to_owned(),
            postal_code: None,
            country: "Perú".to_owned(),
            contact_phone: None,
            reference: None,
            is_default,
            active: true,
            created_at: "2025-01-10T09:00:00Z".to_owned(),
        }
    }

    #[test]
    fn test_default_address_is_auto_selected() {
        let store = AddressStore::new();
        store.set_addresses(vec![address(1, false), address(2, true)]);
        assert_eq!(store.selected().map(|a| a.id), Some(AddressId::new(2)));
        assert_eq!(store.addresses().len(), 2);
    }

    #[test]
    fn test_existing_selection_survives_refresh() {
        let store = AddressStore::new();
        store.set_addresses(vec![address(1, true), address(2, false)]);
        store.select(Some(address(2, false)));

        store.set_addresses(vec![address(1, true), address(2, false), address(3, false)]);

        assert_eq!(store.selected().map(|a| a.id), Some(AddressId::new(2)));
    }

    #[test]
    fn test_clearing_selection_reenables_auto_select() {
        let store = AddressStore::new();
        store.set_addresses(vec![address(1, true)]);
        store.select(None);
        assert_eq!(store.selected(), None);

        store.set_addresses(vec![address(4, true)]);
        assert_eq!(store.selected().map(|a| a.id), Some(AddressId::new(4)));
    }

    #[test]
    fn test_no_default_means_no_selection() {
        let store = AddressStore::new();
        store.set_addresses(vec![address(1, false)]);
        assert_eq!(store.selected(), None);
    }
}
