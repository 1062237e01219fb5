//! Interledger Requests
//!
//! Sub-account creation, wallet address issuance and payouts to Interledger
//! payment pointers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request to create an Interledger-enabled sub-account
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubaccountRequest {
    /// Full name
    pub name: String,

    /// Email, unique per sub-account
    pub email: String,

    pub first_name: String,
    pub last_name: String,

    /// Phone number in international format
    pub phone_number: String,

    #[serde(default)]
    pub meta: Map<String, Value>,
}

/// Request to issue a wallet address for a sub-account user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAddressRequest {
    #[serde(rename = "userID")]
    pub user_id: String,

    #[serde(rename = "ilpUsername")]
    pub ilp_username: String,
}

/// One recipient of an Interledger payout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterledgerWallet {
    /// Payment pointer of the receiving wallet
    #[serde(rename = "interledgerWalletAddress")]
    pub address: String,

    #[serde(rename = "valueInUSD")]
    pub value_in_usd: Decimal,

    #[serde(default)]
    pub narration: String,

    /// Issue ID of the collection payment this payout settles
    #[serde(
        rename = "collectionPaymentIssueID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub collection_payment_issue_id: Option<String>,
}

/// Request to pay out to one or more Interledger wallets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRequest {
    /// Sub-account funding the payout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_account: Option<String>,

    #[serde(default)]
    pub turn_off_notification: bool,

    pub interledger_wallets: Vec<InterledgerWallet>,
}

impl PayoutRequest {
    /// Sum of all recipient amounts
    pub fn total_usd(&self) -> Decimal {
        self.interledger_wallets.iter().map(|w| w.value_in_usd).sum()
    }
}
