/// Record types kept in the store: accounts with their transaction history,
/// and the bare integer values of legacy entities.
pub mod account;

/// Conversion of records to and from the bytes held by the store.
pub mod codec;

/// Operation names and the typed commands parsed from their arguments.
pub mod command;

/// Key-value store interface, plus "in memory" implementation.
pub mod store;

/// Account creation and lookup, and the bootstrap of legacy entities.
pub mod registry;

/// Balance movements between two parties.
pub mod transfer;

/// Read-only lookups and key removal.
pub mod query;

/// Error taxonomy and the table routing operation names to handlers.
pub mod processor;

/// Runs a CSV script of invocations against an in-memory store. Used by the
/// binary and by the integration test.
pub mod bin_utils;
