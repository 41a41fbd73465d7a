#![no_std]

//! NFT marketplace contract.
//!
//! Holds per-(nft contract, token id) listings, settles purchases against a
//! payment token and an external NFT contract, and tracks per-seller sale
//! counts. A singleton configuration record carries the marketplace owner
//! and the platform fee (basis points, capped at 10%).

use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, contracttype, symbol_short, token,
    Address, Env,
};

use shared_utils::events::Events;
use shared_utils::math::basis_points;

// ============================================================================
// Error Types
// ============================================================================

/// Marketplace errors.
///
/// The numeric values 100-108 are stable: external tooling matches on them,
/// so they must not be renumbered.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MarketplaceError {
    /// Caller is not the marketplace owner
    OwnerOnly = 100,
    /// No listing exists for this (nft contract, token id) key
    ListingNotFound = 101,
    /// A listing already exists for this key
    AlreadyListed = 102,
    /// Caller is not allowed to perform this operation on the listing
    Unauthorized = 105,
    /// Price must be a positive amount
    InvalidPrice = 106,
    /// Platform fee above the 1000 basis-point cap
    FeeTooHigh = 107,
    /// Caller does not own the token it is trying to list
    NftNotOwned = 108,
    /// Marketplace has not been initialized
    NotInitialized = 110,
    /// Marketplace was already initialized
    AlreadyInitialized = 111,
    /// Fee arithmetic overflowed
    MathOverflow = 112,
}

// ============================================================================
// External Interfaces
// ============================================================================

/// Surface the marketplace consumes from an NFT contract.
///
/// Any contract exporting these two functions can have its tokens listed;
/// `transfer` is expected to fail unless `from` currently owns the token.
#[contractclient(name = "AssetRegistryClient")]
pub trait AssetRegistry {
    fn get_owner(env: Env, token_id: u64) -> Option<Address>;
    fn transfer(env: Env, from: Address, to: Address, token_id: u64);
}

// ============================================================================
// Data Types
// ============================================================================

/// An active sale offer for one token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Listing {
    pub seller: Address,
    pub price: i128,
}

/// Marketplace-wide configuration. Singleton, mutable only by `owner`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub owner: Address,
    pub payment_token: Address,
    pub platform_fee_bps: u32,
}

/// Storage keys
#[contracttype]
pub enum DataKey {
    /// Singleton configuration (instance)
    Config,
    /// Listing keyed by (nft contract, token id) (persistent)
    Listing(Address, u64),
    /// Completed-sale count per seller (persistent)
    Sales(Address),
}

/// Upper bound for the platform fee: 1000 basis points = 10%.
pub const MAX_PLATFORM_FEE_BPS: u32 = 1000;


// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct NftMarketplaceContract;

#[contractimpl]
impl NftMarketplaceContract {
    // ========================================================================
    // Initialization
    // ========================================================================

    /// Initialize the marketplace.
    ///
    /// # Arguments
    /// * `owner` - Address with admin privileges (fee and ownership changes);
    ///   also receives the platform fee on every sale
    /// * `payment_token` - Token contract all sales settle in
    /// * `platform_fee_bps` - Initial platform fee in basis points (max 1000)
    pub fn initialize(
        e: Env,
        owner: Address,
        payment_token: Address,
        platform_fee_bps: u32,
    ) -> Result<(), MarketplaceError> {
        if e.storage().instance().has(&DataKey::Config) {
            return Err(MarketplaceError::AlreadyInitialized);
        }

        owner.require_auth();

        if platform_fee_bps > MAX_PLATFORM_FEE_BPS {
            return Err(MarketplaceError::FeeTooHigh);
        }

        let config = Config {
            owner,
            payment_token,
            platform_fee_bps,
        };
        e.storage().instance().set(&DataKey::Config, &config);

        Ok(())
    }

    // ========================================================================
    // Listing Lifecycle
    // ========================================================================

    /// List a token for sale.
    ///
    /// The seller must currently own the token in the NFT contract, the key
    /// must not already be listed, and the price must be positive.
    pub fn list_nft(
        e: Env,
        seller: Address,
        nft_contract: Address,
        token_id: u64,
        price: i128,
    ) -> Result<(), MarketplaceError> {
        seller.require_auth();
        Self::config(&e)?;

        if price <= 0 {
            return Err(MarketplaceError::InvalidPrice);
        }

        let registry = AssetRegistryClient::new(&e, &nft_contract);
        if registry.get_owner(&token_id) != Some(seller.clone()) {
            return Err(MarketplaceError::NftNotOwned);
        }

        let key = DataKey::Listing(nft_contract.clone(), token_id);
        if e.storage().persistent().has(&key) {
            return Err(MarketplaceError::AlreadyListed);
        }

        let listing = Listing {
            seller: seller.clone(),
            price,
        };
        e.storage().persistent().set(&key, &listing);

        Events::emit(
            &e,
            symbol_short!("list"),
            (seller, nft_contract, token_id, price),
        );

        Ok(())
    }

    /// Change the price of an existing listing. Seller only.
    ///
    /// The price check runs before the seller check so that a zero price is
    /// always rejected as invalid regardless of caller.
    pub fn update_listing(
        e: Env,
        seller: Address,
        nft_contract: Address,
        token_id: u64,
        new_price: i128,
    ) -> Result<(), MarketplaceError> {
        seller.require_auth();

        let key = DataKey::Listing(nft_contract.clone(), token_id);
        let mut listing: Listing = e
            .storage()
            .persistent()
            .get(&key)
            .ok_or(MarketplaceError::ListingNotFound)?;

        if new_price <= 0 {
            return Err(MarketplaceError::InvalidPrice);
        }
        if listing.seller != seller {
            return Err(MarketplaceError::Unauthorized);
        }

        listing.price = new_price;
        e.storage().persistent().set(&key, &listing);

        Events::emit(
            &e,
            symbol_short!("update"),
            (seller, nft_contract, token_id, new_price),
        );

        Ok(())
    }

    /// Remove an existing listing without a sale. Seller only.
    pub fn cancel_listing(
        e: Env,
        seller: Address,
        nft_contract: Address,
        token_id: u64,
    ) -> Result<(), MarketplaceError> {
        seller.require_auth();

        let key = DataKey::Listing(nft_contract.clone(), token_id);
        let listing: Listing = e
            .storage()
            .persistent()
            .get(&key)
            .ok_or(MarketplaceError::ListingNotFound)?;

        if listing.seller != seller {
            return Err(MarketplaceError::Unauthorized);
        }

        e.storage().persistent().remove(&key);

        Events::emit(&e, symbol_short!("cancel"), (seller, nft_contract, token_id));

        Ok(())
    }

    // ========================================================================
    // Settlement
    // ========================================================================

    /// Buy a listed token.
    ///
    /// Settlement moves the payment (price minus the platform fee) from the
    /// buyer to the seller, the fee to the marketplace owner, and the token
    /// from the seller to the buyer, then deletes the listing and bumps the
    /// seller's sale count. A failure in either transfer traps the whole
    /// invocation, so no partial settlement can be observed.
    pub fn buy_nft(
        e: Env,
        buyer: Address,
        nft_contract: Address,
        token_id: u64,
    ) -> Result<(), MarketplaceError> {
        buyer.require_auth();
        let config = Self::config(&e)?;

        let key = DataKey::Listing(nft_contract.clone(), token_id);
        let listing: Listing = e
            .storage()
            .persistent()
            .get(&key)
            .ok_or(MarketplaceError::ListingNotFound)?;

        if listing.seller == buyer {
            return Err(MarketplaceError::Unauthorized);
        }

        // Floor split: the fee rounds down, the remainder goes to the seller.
        let fee = basis_points(listing.price, config.platform_fee_bps)
            .ok_or(MarketplaceError::MathOverflow)?;
        let seller_proceeds = listing.price - fee;

        let payment = token::Client::new(&e, &config.payment_token);
        payment.transfer(&buyer, &listing.seller, &seller_proceeds);
        if fee > 0 {
            payment.transfer(&buyer, &config.owner, &fee);
        }

        // Asset moves under the seller's listing authorization.
        let registry = AssetRegistryClient::new(&e, &nft_contract);
        registry.transfer(&listing.seller, &buyer, &token_id);

        e.storage().persistent().remove(&key);

        let sales_key = DataKey::Sales(listing.seller.clone());
        let sales: u64 = e.storage().persistent().get(&sales_key).unwrap_or(0);
        e.storage().persistent().set(&sales_key, &(sales + 1));

        Events::emit(
            &e,
            symbol_short!("buy"),
            (listing.seller, buyer, nft_contract, token_id, listing.price),
        );

        Ok(())
    }

    // ========================================================================
    // Administration
    // ========================================================================

    /// Set the platform fee. Owner only, capped at 1000 basis points.
    pub fn set_platform_fee(e: Env, caller: Address, new_fee: u32) -> Result<(), MarketplaceError> {
        caller.require_auth();
        let mut config = Self::config(&e)?;

        if caller != config.owner {
            return Err(MarketplaceError::OwnerOnly);
        }
        if new_fee > MAX_PLATFORM_FEE_BPS {
            return Err(MarketplaceError::FeeTooHigh);
        }

        config.platform_fee_bps = new_fee;
        e.storage().instance().set(&DataKey::Config, &config);

        Events::emit(&e, symbol_short!("set_fee"), (caller, new_fee));

        Ok(())
    }

    /// Hand the marketplace over to a new owner. Owner only, single step.
    pub fn update_owner(e: Env, caller: Address, new_owner: Address) -> Result<(), MarketplaceError> {
        caller.require_auth();
        let mut config = Self::config(&e)?;

        if caller != config.owner {
            return Err(MarketplaceError::OwnerOnly);
        }

        config.owner = new_owner.clone();
        e.storage().instance().set(&DataKey::Config, &config);

        Events::emit(&e, symbol_short!("set_owner"), (caller, new_owner));

        Ok(())
    }

    // ========================================================================
    // Read-Only Queries
    // ========================================================================

    /// Listing for a key, if one exists.
    pub fn get_listing(e: Env, nft_contract: Address, token_id: u64) -> Option<Listing> {
        e.storage()
            .persistent()
            .get(&DataKey::Listing(nft_contract, token_id))
    }

    /// Number of completed sales where `seller` was the listing's seller.
    pub fn get_user_sales(e: Env, seller: Address) -> u64 {
        e.storage()
            .persistent()
            .get(&DataKey::Sales(seller))
            .unwrap_or(0)
    }

    /// Current marketplace configuration.
    pub fn get_config(e: Env) -> Result<Config, MarketplaceError> {
        Self::config(&e)
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn config(e: &Env) -> Result<Config, MarketplaceError> {
        e.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(MarketplaceError::NotInitialized)
    }
}
