/*++

Licensed under the Apache-2.0 license.

File Name:

    session.rs

Abstract:

    File contains the exclusive section guarding a shared secure element.

--*/

use std::sync::Mutex;

use crate::{CryptoAuthError, CryptoAuthResult, SecureElement};

/// Shared handle to a secure element.
///
/// The element accepts a single outstanding command, so every logical operation (which may
/// issue several commands) runs inside one [`DeviceSession::exclusive`] call.
pub struct DeviceSession<E: SecureElement> {
    element: Mutex<E>,
}

impl<E: SecureElement> DeviceSession<E> {
    pub fn new(element: E) -> Self {
        Self {
            element: Mutex::new(element),
        }
    }

    /// Run `op` with exclusive access to the element
    ///
    /// # Error
    ///
    /// * `SESSION_POISONED` - A previous operation panicked while holding the element
    pub fn exclusive<T, Error>(
        &self,
        op: impl FnOnce(&mut E) -> Result<T, Error>,
    ) -> Result<T, Error>
    where
        Error: From<CryptoAuthError>,
    {
        let mut element = self.element.lock().map_err(|_| {
            log::error!("secure element session poisoned");
            CryptoAuthError::SESSION_POISONED
        })?;
        op(&mut element)
    }

    /// Release the element
    pub fn into_inner(self) -> CryptoAuthResult<E> {
        self.element
            .into_inner()
            .map_err(|_| CryptoAuthError::SESSION_POISONED)
    }
}
