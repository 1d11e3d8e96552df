use solana_pubkey::Pubkey;
use solana_pubkey::pubkey;

/// ======================= Native tokens =======================
pub const WSOL_MINT_KEY: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

pub const SOL_MINT_KEY: Pubkey = pubkey!("So11111111111111111111111111111111111111111");

pub const USDC_MINT_KEY: Pubkey = pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");

pub const USDT_MINT_KEY: Pubkey = pubkey!("Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB");

/// The base currency and its wrapped token-standard twin. Both are the
/// unit of account, never a tradeable token.
pub fn is_base_mint(mint: &Pubkey) -> bool {
    *mint == SOL_MINT_KEY || *mint == WSOL_MINT_KEY
}

/// Stable quote assets. Excluded from the tradeable-token set so a
/// USDC leg is never mistaken for a memecoin position.
pub fn is_stable_mint(mint: &Pubkey) -> bool {
    *mint == USDC_MINT_KEY || *mint == USDT_MINT_KEY
}

/// ======================= Upstream endpoints =======================
/// Helius enhanced-transactions API - public endpoint, key comes from config/env
pub const HELIUS_API_URL: &str = "https://api.helius.xyz";

/// DexScreener token API - public, unauthenticated
pub const DEXSCREENER_API_URL: &str = "https://api.dexscreener.com";

/// Used when the price oracle is unreachable; analysis still completes
/// with an approximate USD view rather than failing.
pub const FALLBACK_SOL_PRICE_USD: f64 = 150.0;

pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;
