//! Strict boundary decoder for the Helius enhanced-transactions payload.
//! Every optional upstream field maps to a zero/empty default so one
//! malformed record can never abort a pagination batch.

use serde::Deserialize;
use serde::Deserializer;
use solana_pubkey::Pubkey;

use super::serde_pubkey_opt;

/// Amounts arrive as JSON numbers in some source versions and as
/// decimal strings in others. Unparseable values decode to zero.
fn flexible_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(d)? {
        Some(Raw::Num(n)) => Ok(n),
        Some(Raw::Text(s)) => Ok(s.parse().unwrap_or(0.0)),
        None => Ok(0.0),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTransaction {
    pub signature: String,
    /// Unix seconds
    pub timestamp: i64,
    /// Lamports, paid by `fee_payer` regardless of swap direction
    pub fee: u64,
    #[serde(with = "serde_pubkey_opt")]
    pub fee_payer: Option<Pubkey>,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub source: String,
    pub token_transfers: Vec<TokenMovement>,
    pub native_transfers: Vec<NativeMovement>,
    pub account_data: Vec<AccountData>,
    pub events: TxEvents,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenMovement {
    #[serde(with = "serde_pubkey_opt")]
    pub from_user_account: Option<Pubkey>,
    #[serde(with = "serde_pubkey_opt")]
    pub to_user_account: Option<Pubkey>,
    #[serde(with = "serde_pubkey_opt")]
    pub mint: Option<Pubkey>,
    /// UI units, already decimal-adjusted upstream
    #[serde(deserialize_with = "flexible_f64")]
    pub token_amount: f64,
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NativeMovement {
    #[serde(with = "serde_pubkey_opt")]
    pub from_user_account: Option<Pubkey>,
    #[serde(with = "serde_pubkey_opt")]
    pub to_user_account: Option<Pubkey>,
    /// Lamports
    pub amount: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountData {
    #[serde(with = "serde_pubkey_opt")]
    pub account: Option<Pubkey>,
    /// Signed lamports delta for this account over the transaction
    pub native_balance_change: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TxEvents {
    pub swap: Option<SwapEvent>,
}

/// The source's own reconciled view of a swap. Preferred over transfer
/// matching whenever it identifies a usable base-currency leg.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwapEvent {
    pub native_input: Option<NativeLeg>,
    pub native_output: Option<NativeLeg>,
    pub token_inputs: Vec<TokenLeg>,
    pub token_outputs: Vec<TokenLeg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NativeLeg {
    #[serde(with = "serde_pubkey_opt")]
    pub account: Option<Pubkey>,
    /// Lamports
    #[serde(deserialize_with = "flexible_f64")]
    pub amount: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenLeg {
    #[serde(with = "serde_pubkey_opt")]
    pub user_account: Option<Pubkey>,
    #[serde(with = "serde_pubkey_opt")]
    pub mint: Option<Pubkey>,
    #[serde(deserialize_with = "flexible_f64")]
    pub token_amount: f64,
    pub raw_token_amount: Option<RawTokenAmount>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTokenAmount {
    #[serde(deserialize_with = "flexible_f64")]
    pub token_amount: f64,
    pub decimals: u32,
}

impl TokenLeg {
    /// Decimal-adjusted amount; raw form wins when present since the
    /// flat `token_amount` is absent in newer payload versions.
    pub fn ui_amount(&self) -> f64 {
        match &self.raw_token_amount {
            Some(raw) if raw.token_amount != 0.0 => raw.token_amount / 10f64.powi(raw.decimals as i32),
            _ => self.token_amount,
        }
    }
}

impl RawTransaction {
    /// Signed lamports delta the observed wallet saw, from account data.
    /// Zero when the wallet does not appear there.
    pub fn native_balance_change(&self, wallet: &Pubkey) -> i64 {
        self.account_data
            .iter()
            .find(|acc| acc.account.as_ref() == Some(wallet))
            .map(|acc| acc.native_balance_change)
            .unwrap_or(0)
    }
}
