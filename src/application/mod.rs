//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `TransactionOrchestrator`, the single entry point
//! for accepting and settling monetary movements. It owns the transaction
//! lifecycle and talks to storage, the payment provider, and notifiers
//! exclusively through the domain ports.

pub mod orchestrator;
