#![no_std]

//! Minimal sequential-ID NFT contract.
//!
//! Stands in for a production asset registry: the marketplace only needs
//! mint, ownership lookup, and owner-authorized transfer. Token ids start
//! at 1 and are assigned in mint order.

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env,
};

use shared_utils::events::Events;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockNftError {
    /// Token id has never been minted
    TokenNotFound = 1,
    /// `from` is not the current owner of the token
    NotOwner = 2,
}

/// Storage keys
#[contracttype]
pub enum DataKey {
    /// Last assigned token id (instance)
    NextId,
    /// Current owner of a token (persistent)
    Owner(u64),
}


#[contract]
pub struct MockNftContract;

#[contractimpl]
impl MockNftContract {
    /// Mint a new token to `to` and return its id.
    ///
    /// Unrestricted; this contract exists to give the marketplace an asset
    /// registry to talk to, not to enforce issuance policy.
    pub fn mint(e: Env, to: Address) -> u64 {
        let last: u64 = e.storage().instance().get(&DataKey::NextId).unwrap_or(0);
        let token_id = last + 1;

        e.storage().instance().set(&DataKey::NextId, &token_id);
        e.storage().persistent().set(&DataKey::Owner(token_id), &to);

        Events::emit(&e, symbol_short!("mint"), (to, token_id));

        token_id
    }

    /// Current owner of a token, `None` if the id has never been minted.
    pub fn get_owner(e: Env, token_id: u64) -> Option<Address> {
        e.storage().persistent().get(&DataKey::Owner(token_id))
    }

    /// Transfer a token from its current owner to `to`.
    ///
    /// Requires `from`'s authorization and fails unless `from` is the
    /// current owner.
    pub fn transfer(e: Env, from: Address, to: Address, token_id: u64) -> Result<(), MockNftError> {
        from.require_auth();

        let owner: Address = e
            .storage()
            .persistent()
            .get(&DataKey::Owner(token_id))
            .ok_or(MockNftError::TokenNotFound)?;

        if owner != from {
            return Err(MockNftError::NotOwner);
        }

        e.storage().persistent().set(&DataKey::Owner(token_id), &to);

        Events::emit(&e, symbol_short!("transfer"), (from, to, token_id));

        Ok(())
    }

    /// Total number of tokens minted so far.
    pub fn total_minted(e: Env) -> u64 {
        e.storage().instance().get(&DataKey::NextId).unwrap_or(0)
    }
}
