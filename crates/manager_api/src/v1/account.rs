//! `/account`: wallet address, balances and key import.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::{
    client::{ApiClient, RequestOptions},
    error::ApiError,
    transport::HttpTransport,
    v1::CommonResponse,
};

const ACCOUNT_PATH: &str = "/account";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Node wallet summary. Balances are in the smallest unit and kept exact.
pub struct AccountInfo {
    /// Checksummed address, empty until a key is configured.
    pub address: String,
    /// Native token balance.
    pub eth_balance: Number,
    /// Network token balance.
    pub cnx_balance: Number,
}

impl AccountInfo {
    /// Whether the node has a key configured.
    pub fn has_address(&self) -> bool {
        !self.address.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Key material the node should switch to.
pub enum AccountKeyInput {
    /// Hex-encoded private key.
    PrivateKey {
        /// `0x`-prefixed 64-digit hex key.
        private_key: String,
    },
    /// Encrypted keystore document.
    Keystore {
        /// Keystore JSON, as text.
        keystore: String,
        /// Passphrase unlocking the keystore.
        passphrase: String,
    },
}

/// Typed calls against `/account`.
#[derive(Debug, Clone, Copy)]
pub struct AccountApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> AccountApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Reads the address and balances.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`].
    pub async fn get_account_info(&self) -> Result<AccountInfo, ApiError> {
        self.client
            .get_as(ACCOUNT_PATH, &RequestOptions::default())
            .await
    }

    /// Imports a raw private key.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`]; a malformed key is `Validation`.
    pub async fn update_private_key(
        &self,
        private_key: impl Into<String>,
    ) -> Result<CommonResponse, ApiError> {
        self.update_key(&AccountKeyInput::PrivateKey {
            private_key: private_key.into(),
        })
        .await
    }

    /// Imports an encrypted keystore.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`]; a wrong passphrase is `Validation`.
    pub async fn update_keystore(
        &self,
        keystore: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Result<CommonResponse, ApiError> {
        self.update_key(&AccountKeyInput::Keystore {
            keystore: keystore.into(),
            passphrase: passphrase.into(),
        })
        .await
    }

    /// Sends arbitrary key material.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`].
    pub async fn update_key(&self, input: &AccountKeyInput) -> Result<CommonResponse, ApiError> {
        self.client
            .put_as(ACCOUNT_PATH, input, &RequestOptions::default())
            .await
    }

    /// Asks the node to generate a fresh account.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`].
    pub async fn create_account(&self) -> Result<Value, ApiError> {
        self.client
            .post(ACCOUNT_PATH, &Value::Object(Default::default()), &RequestOptions::default())
            .await
    }
}
