pub mod methods;

/// Page size of the NFT gallery when the caller gives no `limit`
pub const DEFAULT_NFT_PAGE_SIZE: u32 = 12;
