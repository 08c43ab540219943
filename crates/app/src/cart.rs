//! Persisted cart
//!
//! [`CartStore`] keeps the [`Cart`] in storage under `jam3a_cart` and publishes the item
//! count on a watch channel after every change, so the header badge never drifts from the
//! stored cart.

use std::sync::Arc;

use jam3a::cart::{Cart, CartError, CartLine};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::storage::{Storage, StorageError, StorageExt, StorageKey};

/// Cart store errors.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The cart could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The cart rejected the change.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Cart persisted to storage, with a live item count.
#[derive(Debug)]
pub struct CartStore {
    storage: Arc<dyn Storage>,
    cart: Cart,
    badge: watch::Sender<u32>,
}

impl CartStore {
    /// Load the stored cart.
    ///
    /// A missing cart is empty. An unreadable one is logged and replaced by an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] when storage itself cannot be read.
    pub fn load(storage: Arc<dyn Storage>) -> Result<Self, CartStoreError> {
        let cart = Self::read(storage.as_ref())?;
        let (badge, _) = watch::channel(cart.item_count());

        Ok(Self {
            storage,
            cart,
            badge,
        })
    }

    fn read(storage: &dyn Storage) -> Result<Cart, StorageError> {
        match storage.load::<Cart>(StorageKey::Cart) {
            Ok(cart) => Ok(cart.unwrap_or_default()),
            Err(error @ StorageError::Json { .. }) => {
                warn!(%error, "discarding unreadable cart");
                Ok(Cart::new())
            }
            Err(error) => Err(error),
        }
    }

    /// Current cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Units across every line.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Receiver of the item count, updated after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.badge.subscribe()
    }

    /// Add `line`, merging with an existing line for the same product and deal.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] when the cart cannot be saved.
    pub fn add(&mut self, line: CartLine) -> Result<(), CartStoreError> {
        debug!(product = %line.product_id, quantity = line.quantity, "adding to cart");

        self.change(|cart| {
            cart.add(line);
            Ok(())
        })
    }

    /// Set a product's quantity; zero removes it.
    ///
    /// # Errors
    ///
    /// - [`CartStoreError::Cart`]: the product is not in the cart.
    /// - [`CartStoreError::Storage`]: the cart cannot be saved.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), CartStoreError> {
        self.change(|cart| cart.set_quantity(product_id, quantity))
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// - [`CartStoreError::Cart`]: the product is not in the cart.
    /// - [`CartStoreError::Storage`]: the cart cannot be saved.
    pub fn remove(&mut self, product_id: &str) -> Result<CartLine, CartStoreError> {
        self.change(|cart| cart.remove(product_id))
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] when the cart cannot be saved.
    pub fn clear(&mut self) -> Result<(), CartStoreError> {
        self.change(|cart| {
            cart.clear();
            Ok(())
        })
    }

    /// Re-read the cart from storage, picking up changes made elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] when storage cannot be read.
    pub fn reload(&mut self) -> Result<(), CartStoreError> {
        self.cart = Self::read(self.storage.as_ref())?;
        self.publish();

        Ok(())
    }

    /// Apply `edit` to a copy of the cart and keep it only once it is saved.
    fn change<T>(
        &mut self,
        edit: impl FnOnce(&mut Cart) -> Result<T, CartError>,
    ) -> Result<T, CartStoreError> {
        let mut next = self.cart.clone();
        let outcome = edit(&mut next)?;

        self.storage.save(StorageKey::Cart, &next)?;
        self.cart = next;
        self.publish();

        Ok(outcome)
    }

    fn publish(&self) {
        let count = self.cart.item_count();

        self.badge.send_modify(|badge| *badge = count);
    }
}

#[cfg(test)]
mod tests {
    use jam3a::{locale::Localized, money::default_currency};
    use rusty_money::Money;
    use testresult::TestResult;

    use crate::storage::{FileStorage, MemoryStorage};

    use super::*;

    fn line(product: &str, quantity: u32) -> CartLine {
        CartLine::new(
            product,
            Localized::english(product),
            &Money::from_minor(4_500, default_currency()),
        )
        .with_quantity(quantity)
    }

    #[test]
    fn starts_empty_without_a_stored_cart() -> TestResult {
        let store = CartStore::load(Arc::new(MemoryStorage::new()))?;

        assert!(store.cart().is_empty());
        assert_eq!(*store.subscribe().borrow(), 0);

        Ok(())
    }

    #[test]
    fn badge_follows_every_change() -> TestResult {
        let mut store = CartStore::load(Arc::new(MemoryStorage::new()))?;
        let badge = store.subscribe();

        store.add(line("prod-kettle", 2))?;
        assert_eq!(*badge.borrow(), 2);

        store.add(line("prod-dates", 1))?;
        assert_eq!(*badge.borrow(), 3);

        store.set_quantity("prod-kettle", 5)?;
        assert_eq!(*badge.borrow(), 6);

        store.remove("prod-dates")?;
        assert_eq!(*badge.borrow(), 5);

        store.clear()?;
        assert_eq!(*badge.borrow(), 0);

        Ok(())
    }

    #[test]
    fn rejected_change_leaves_badge_alone() -> TestResult {
        let mut store = CartStore::load(Arc::new(MemoryStorage::new()))?;
        store.add(line("prod-kettle", 1))?;

        let badge = store.subscribe();

        assert!(matches!(
            store.remove("prod-missing"),
            Err(CartStoreError::Cart(CartError::NotInCart(_)))
        ));
        assert_eq!(*badge.borrow(), 1);

        Ok(())
    }

    /// Reads like memory storage, refuses every write.
    #[derive(Debug, Default)]
    struct ReadOnlyStorage(MemoryStorage);

    impl Storage for ReadOnlyStorage {
        fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
            self.0.read(key)
        }

        fn write(&self, _key: StorageKey, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }

        fn remove(&self, _key: StorageKey) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn failed_save_keeps_the_stored_cart() -> TestResult {
        let storage = ReadOnlyStorage::default();
        let mut stored = Cart::new();
        stored.add(line("prod-kettle", 2));
        storage.0.save(StorageKey::Cart, &stored)?;

        let mut store = CartStore::load(Arc::new(storage))?;
        let badge = store.subscribe();

        assert!(matches!(
            store.add(line("prod-dates", 1)),
            Err(CartStoreError::Storage(StorageError::Poisoned))
        ));
        assert!(store.clear().is_err(), "clear must fail to save");
        assert!(store.set_quantity("prod-kettle", 7).is_err(), "set must fail to save");

        assert_eq!(store.cart(), &stored);
        assert_eq!(*badge.borrow(), 2);

        Ok(())
    }

    #[test]
    fn cart_survives_a_restart() -> TestResult {
        let dir = tempfile::tempdir()?;

        let mut store = CartStore::load(Arc::new(FileStorage::new(dir.path())))?;
        store.add(line("prod-power-bank", 3))?;

        let reopened = CartStore::load(Arc::new(FileStorage::new(dir.path())))?;

        assert_eq!(reopened.cart(), store.cart());
        assert_eq!(reopened.item_count(), 3);

        Ok(())
    }

    #[test]
    fn unreadable_cart_is_replaced() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(StorageKey::Cart, "not json")?;

        let store = CartStore::load(storage)?;

        assert!(store.cart().is_empty());

        Ok(())
    }

    #[test]
    fn reload_picks_up_external_changes() -> TestResult {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = CartStore::load(Arc::clone(&storage))?;
        let badge = store.subscribe();

        let mut elsewhere = Cart::new();
        elsewhere.add(line("prod-prayer-mat", 4));
        storage.save(StorageKey::Cart, &elsewhere)?;

        store.reload()?;

        assert_eq!(store.cart(), &elsewhere);
        assert_eq!(*badge.borrow(), 4);

        Ok(())
    }
}
