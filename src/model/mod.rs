pub mod event;
pub mod ledger;
pub mod market;
pub mod summary;
pub mod transaction;

pub use event::Direction;
pub use event::TradeEvent;
pub use ledger::TokenLedger;
pub use market::MarketSnapshot;
pub use summary::TokenReport;
pub use summary::TokenStatus;
pub use summary::UsdView;
pub use summary::WalletSummary;
pub use transaction::RawTransaction;

/// Serde helpers for base58 pubkeys in JSON. Upstream payloads are
/// string-typed and occasionally carry empty or garbage addresses; a
/// bad address becomes None instead of aborting the whole batch.
pub(crate) mod serde_pubkey {
    use std::str::FromStr;

    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;
    use solana_pubkey::Pubkey;

    pub fn serialize<S: Serializer>(key: &Pubkey, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&key.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Pubkey, D::Error> {
        let raw = String::deserialize(d)?;
        Pubkey::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

pub(crate) mod serde_pubkey_opt {
    use std::str::FromStr;

    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;
    use solana_pubkey::Pubkey;

    pub fn serialize<S: Serializer>(key: &Option<Pubkey>, s: S) -> Result<S::Ok, S::Error> {
        match key {
            Some(key) => s.serialize_some(&key.to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Pubkey>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(|s| Pubkey::from_str(s).ok()))
    }
}
