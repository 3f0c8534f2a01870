use crate::errors::ProxyError;

pub mod network;
pub mod nfts;
pub mod tokens;
pub mod wallets;

/// Rejects blank wallet/token addresses before anything is sent upstream.
pub(crate) fn require_address(address: &str) -> Result<&str, ProxyError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ProxyError::invalid_request("Please enter a wallet address"));
    }
    Ok(address)
}
