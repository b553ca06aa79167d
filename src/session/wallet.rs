//! Wallet-supplied identity.
//!
//! The wallet provider is an external collaborator; the engine only ever
//! sees the two strings it supplies. The address keys stats, history, and
//! the leaderboard; the balance is display-only. An empty address means
//! disconnected and gates round start.

use serde::{Deserialize, Serialize};

/// Identity and balance snapshot from the wallet provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletIdentity {
    address: String,
    balance_display: String,
}

impl WalletIdentity {
    /// Disconnected identity (empty address).
    #[must_use]
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Identity from a provider-supplied address and balance.
    #[must_use]
    pub fn new(address: impl Into<String>, balance_display: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            balance_display: balance_display.into(),
        }
    }

    /// Is a wallet connected?
    #[must_use]
    pub fn is_connected(&self) -> bool {
        !self.address.is_empty()
    }

    /// The address, empty when disconnected. Opaque to the engine.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The balance display string. Opaque to the engine.
    #[must_use]
    pub fn balance_display(&self) -> &str {
        &self.balance_display
    }

    /// Update the balance snapshot.
    pub fn set_balance(&mut self, balance_display: impl Into<String>) {
        self.balance_display = balance_display.into();
    }

    /// Abbreviated address for display: `0x742d...9cd2`.
    ///
    /// Addresses too short to abbreviate are returned whole.
    #[must_use]
    pub fn short_address(&self) -> String {
        if self.address.len() <= 10 {
            return self.address.clone();
        }
        format!(
            "{}...{}",
            &self.address[..6],
            &self.address[self.address.len() - 4..]
        )
    }
}
