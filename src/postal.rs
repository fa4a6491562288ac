//! Postal-code address lookup contract.
//!
//! The crate does not talk to any address service itself. A caller plugs
//! one in through [`AddressLookup`] and uses [`lookup_address`] to run it:
//! the postal code is checked, the target fields are marked busy for the
//! duration of the lookup, and the completion callback receives either the
//! address or the error. The busy marks are released when the lookup
//! finishes, whichever way it finishes.
//!
//! # Example
//!
//! ```
//! use fieldmask::error::LookupError;
//! use fieldmask::postal::{lookup_address, Address, AddressLookup, BusyFields, LookupCallback};
//!
//! struct Fixed;
//!
//! impl AddressLookup for Fixed {
//!     fn lookup(&self, postal_code: &str, done: LookupCallback) {
//!         done(Ok(Address {
//!             postal_code: postal_code.to_string(),
//!             street: "Avenida Paulista".into(),
//!             city: "São Paulo".into(),
//!             state: "SP".into(),
//!             ..Address::default()
//!         }));
//!     }
//! }
//!
//! let busy = BusyFields::new();
//! lookup_address(&Fixed, &busy, "01310-100", &["street", "city"], |result| {
//!     assert_eq!(result.unwrap().street, "Avenida Paulista");
//! })
//! .unwrap();
//! assert!(!busy.is_busy("street"));
//!
//! let err = lookup_address(&Fixed, &busy, "0131", &["street"], |_| {}).unwrap_err();
//! assert_eq!(err, LookupError::InvalidPostalCode("0131".into()));
//! ```

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::digits::extract_digits;
use crate::error::LookupError;

/// Digits in a Brazilian postal code (CEP).
pub const POSTAL_CODE_DIGITS: usize = 8;

/// Address returned by a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// Postal code digits the address was looked up with.
    pub postal_code: String,
    /// Street name.
    pub street: String,
    /// Neighbourhood / district.
    pub neighborhood: String,
    /// City name.
    pub city: String,
    /// State abbreviation.
    pub state: String,
}

/// Completion callback handed to an [`AddressLookup`].
pub type LookupCallback = Box<dyn FnOnce(Result<Address, LookupError>) + Send>;

/// An address service.
///
/// Implementations call `done` exactly once, from any thread, when the
/// lookup finishes.
pub trait AddressLookup {
    /// Starts looking up `postal_code` (8 digits, no separator).
    fn lookup(&self, postal_code: &str, done: LookupCallback);
}

/// Set of fields currently being filled by a lookup.
///
/// Cloning shares the same set.
#[derive(Debug, Clone, Default)]
pub struct BusyFields {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl BusyFields {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks every field busy, or none if any of them already is.
    pub fn acquire(&self, fields: &[&str]) -> Option<BusyGuard> {
        let mut busy = self.lock();
        if fields.iter().any(|f| busy.contains(*f)) {
            return None;
        }

        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        busy.extend(fields.iter().cloned());
        Some(BusyGuard {
            owner: self.clone(),
            fields,
        })
    }

    /// Check if `field` is currently busy.
    pub fn is_busy(&self, field: &str) -> bool {
        self.lock().contains(field)
    }
}

/// Releases its fields when dropped.
#[derive(Debug)]
pub struct BusyGuard {
    owner: BusyFields,
    fields: Vec<String>,
}

impl BusyGuard {
    /// Fields held by this guard.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut busy = self.owner.lock();
        for field in &self.fields {
            busy.remove(field);
        }
    }
}

/// Normalises a postal code to its 8 digits.
pub fn normalize_postal_code(value: &str) -> Result<String, LookupError> {
    let digits = extract_digits(value);
    if digits.len() == POSTAL_CODE_DIGITS {
        Ok(digits)
    } else {
        Err(LookupError::InvalidPostalCode(value.to_string()))
    }
}

/// Runs `lookup` for `postal_code`, holding `fields` busy until `on_done`
/// has been called.
///
/// Fails immediately, without calling `on_done`, when the postal code is
/// malformed or one of the fields is already busy.
pub fn lookup_address<L, F>(
    lookup: &L,
    busy: &BusyFields,
    postal_code: &str,
    fields: &[&str],
    on_done: F,
) -> Result<(), LookupError>
where
    L: AddressLookup + ?Sized,
    F: FnOnce(Result<Address, LookupError>) + Send + 'static,
{
    let postal_code = normalize_postal_code(postal_code)?;
    let guard = busy.acquire(fields).ok_or(LookupError::Busy)?;

    tracing::debug!(postal_code = postal_code.as_str(), "address lookup started");
    lookup.lookup(
        &postal_code,
        Box::new(move |result| {
            if let Err(err) = &result {
                tracing::debug!(%err, "address lookup failed");
            }
            on_done(result);
            drop(guard);
        }),
    );
    Ok(())
}
