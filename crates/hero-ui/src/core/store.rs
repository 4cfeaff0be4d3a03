//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Controllers see a single slice through [`SliceHandle`], so the same code
//!   runs against the store in the browser and against a plain cell in tests.

use crate::features::heroes::state::{HeroFormState, HeroListState};
use crate::models::{Toast, ToastKind};
use std::cell::RefCell;
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use yewdux::dispatch::Dispatch;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Hero list, filter and pagination.
    pub heroes: HeroListState,
    /// Add/edit modal state.
    pub editor: HeroFormState,
    /// Visible notifications.
    pub toasts: ToastSlice,
    /// Session-expired modal visibility.
    pub reauth: ReauthSlice,
}

/// Queue of visible toasts.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ToastSlice {
    /// Toasts in display order.
    pub items: Vec<Toast>,
    /// Identifier assigned to the next toast.
    pub next_id: u64,
}

impl ToastSlice {
    /// Append a toast and return its identifier.
    pub fn push(&mut self, kind: ToastKind, message: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, message, kind });
        id
    }

    /// Remove a toast by identifier.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }
}

/// Session-expired modal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ReauthSlice {
    /// Whether the modal is visible.
    pub open: bool,
}

/// Read/write access to one slice of state.
pub trait SliceHandle<T> {
    /// Clone of the current slice value.
    fn snapshot(&self) -> T;
    /// Mutate the slice in place and return the closure's result.
    fn update<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R;
}

/// Slice backed by a shared cell, used outside the store.
#[derive(Debug, Default)]
pub struct LocalSlice<T> {
    cell: Rc<RefCell<T>>,
}

impl<T> LocalSlice<T> {
    /// Wrap an initial value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(value)),
        }
    }
}

impl<T> Clone for LocalSlice<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: Clone> SliceHandle<T> for LocalSlice<T> {
    fn snapshot(&self) -> T {
        self.cell.borrow().clone()
    }

    fn update<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        f(&mut self.cell.borrow_mut())
    }
}

/// Slice projected out of the global [`AppStore`].
#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
pub(crate) struct StoreSlice<T> {
    dispatch: Dispatch<AppStore>,
    read: fn(&AppStore) -> &T,
    write: fn(&mut AppStore) -> &mut T,
}

#[cfg(target_arch = "wasm32")]
impl<T> StoreSlice<T> {
    pub(crate) fn new(read: fn(&AppStore) -> &T, write: fn(&mut AppStore) -> &mut T) -> Self {
        Self {
            dispatch: Dispatch::<AppStore>::new(),
            read,
            write,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl<T: Clone> SliceHandle<T> for StoreSlice<T> {
    fn snapshot(&self) -> T {
        (self.read)(&self.dispatch.get()).clone()
    }

    fn update<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        let mut next = (*self.dispatch.get()).clone();
        let result = f((self.write)(&mut next));
        self.dispatch.set(next);
        result
    }
}

/// Hero list slice of the global store.
#[cfg(target_arch = "wasm32")]
pub(crate) fn heroes_slice() -> StoreSlice<HeroListState> {
    StoreSlice::new(|store| &store.heroes, |store| &mut store.heroes)
}

/// Editor slice of the global store.
#[cfg(target_arch = "wasm32")]
pub(crate) fn editor_slice() -> StoreSlice<HeroFormState> {
    StoreSlice::new(|store| &store.editor, |store| &mut store.editor)
}

/// Toast slice of the global store.
#[cfg(target_arch = "wasm32")]
pub(crate) fn toasts_slice() -> StoreSlice<ToastSlice> {
    StoreSlice::new(|store| &store.toasts, |store| &mut store.toasts)
}

/// Session-expired modal slice of the global store.
#[cfg(target_arch = "wasm32")]
pub(crate) fn reauth_slice() -> StoreSlice<ReauthSlice> {
    StoreSlice::new(|store| &store.reauth, |store| &mut store.reauth)
}
