//! Listing and settlement flows across marketplace, NFT contract, and
//! payment token.

#![cfg(test)]

use crate::harness::{TestHarness, STARTING_BALANCE};
use nft_marketplace::{Listing, MarketplaceError};

/// The canonical end-to-end scenario: mint, list, reprice, sell, then
/// exercise the admin controls.
#[test]
fn test_list_update_buy_flow_with_admin_controls() {
    let h = TestHarness::new();
    let seller = &h.accounts.seller;
    let buyer = &h.accounts.buyer;

    // Mint token 1 to the seller and list it at 1000.
    let token_id = h.mint_to_seller();
    assert_eq!(token_id, 1);
    h.marketplace
        .list_nft(seller, &h.nft.address, &token_id, &1000);

    let listing = h.marketplace.get_listing(&h.nft.address, &token_id);
    assert_eq!(
        listing,
        Some(Listing {
            seller: seller.clone(),
            price: 1000,
        })
    );

    // Reprice to 1500; seller is unchanged.
    h.marketplace
        .update_listing(seller, &h.nft.address, &token_id, &1500);
    let listing = h.marketplace.get_listing(&h.nft.address, &token_id).unwrap();
    assert_eq!(listing.price, 1500);
    assert_eq!(listing.seller, seller.clone());

    // Buyer purchases at the updated price.
    let buyer_balance_before = h.balance(buyer);
    h.marketplace.buy_nft(buyer, &h.nft.address, &token_id);

    assert_eq!(h.marketplace.get_listing(&h.nft.address, &token_id), None);
    assert_eq!(h.nft.get_owner(&token_id), Some(buyer.clone()));
    assert!(h.balance(buyer) < buyer_balance_before);
    assert_eq!(h.marketplace.get_user_sales(seller), 1);

    // Owner can set the fee; a non-owner cannot.
    h.marketplace.set_platform_fee(&h.accounts.owner, &500);
    let result = h.marketplace.try_set_platform_fee(seller, &300);
    assert_eq!(result, Err(Ok(MarketplaceError::OwnerOnly)));

    // After handover the new owner can.
    h.marketplace.update_owner(&h.accounts.owner, seller);
    h.marketplace.set_platform_fee(seller, &300);
    assert_eq!(h.marketplace.get_config().platform_fee_bps, 300);
}

#[test]
fn test_cannot_list_token_owned_by_someone_else() {
    let h = TestHarness::new();
    let token_id = h.mint_to_seller();

    let result =
        h.marketplace
            .try_list_nft(&h.accounts.buyer, &h.nft.address, &token_id, &1000);
    assert_eq!(result, Err(Ok(MarketplaceError::NftNotOwned)));
}

#[test]
fn test_cannot_list_same_token_twice() {
    let h = TestHarness::new();
    let token_id = h.list_for_sale(1000);

    let result =
        h.marketplace
            .try_list_nft(&h.accounts.seller, &h.nft.address, &token_id, &2000);
    assert_eq!(result, Err(Ok(MarketplaceError::AlreadyListed)));

    // Original listing is untouched.
    let listing = h.marketplace.get_listing(&h.nft.address, &token_id).unwrap();
    assert_eq!(listing.price, 1000);
}

#[test]
fn test_update_rejects_zero_price_and_non_seller() {
    let h = TestHarness::new();
    let token_id = h.list_for_sale(1000);

    let result =
        h.marketplace
            .try_update_listing(&h.accounts.seller, &h.nft.address, &token_id, &0);
    assert_eq!(result, Err(Ok(MarketplaceError::InvalidPrice)));

    let result =
        h.marketplace
            .try_update_listing(&h.accounts.buyer, &h.nft.address, &token_id, &2000);
    assert_eq!(result, Err(Ok(MarketplaceError::Unauthorized)));
}

#[test]
fn test_seller_cannot_buy_own_listing() {
    let h = TestHarness::new();
    let token_id = h.list_for_sale(1000);

    let result = h
        .marketplace
        .try_buy_nft(&h.accounts.seller, &h.nft.address, &token_id);
    assert_eq!(result, Err(Ok(MarketplaceError::Unauthorized)));

    // Listing survives the rejected purchase.
    assert!(h.marketplace.get_listing(&h.nft.address, &token_id).is_some());
}

#[test]
fn test_sales_count_increments_across_sales() {
    let h = TestHarness::new();
    let seller = &h.accounts.seller;
    let buyer = &h.accounts.buyer;

    assert_eq!(h.marketplace.get_user_sales(seller), 0);

    let first = h.list_for_sale(1000);
    h.marketplace.buy_nft(buyer, &h.nft.address, &first);
    assert_eq!(h.marketplace.get_user_sales(seller), 1);

    let second = h.list_for_sale(1500);
    h.marketplace.buy_nft(buyer, &h.nft.address, &second);
    assert_eq!(h.marketplace.get_user_sales(seller), 2);
}

#[test]
fn test_exact_fee_split_floors_remainder_to_seller() {
    // 2.5% of 1003 is 25.075: owner gets 25, seller gets 978.
    let h = TestHarness::new();
    let token_id = h.list_for_sale(1003);

    h.marketplace
        .buy_nft(&h.accounts.buyer, &h.nft.address, &token_id);

    assert_eq!(h.balance(&h.accounts.owner), STARTING_BALANCE + 25);
    assert_eq!(h.balance(&h.accounts.seller), STARTING_BALANCE + 978);
    assert_eq!(h.balance(&h.accounts.buyer), STARTING_BALANCE - 1003);
}

#[test]
fn test_failed_payment_rolls_back_entire_settlement() {
    let h = TestHarness::new();
    let price = STARTING_BALANCE * 2; // more than the buyer holds
    let token_id = h.list_for_sale(price);

    let result = h
        .marketplace
        .try_buy_nft(&h.accounts.buyer, &h.nft.address, &token_id);
    assert!(result.is_err());

    // No partial settlement: listing, ownership, counter, balances all intact.
    assert!(h.marketplace.get_listing(&h.nft.address, &token_id).is_some());
    assert_eq!(h.nft.get_owner(&token_id), Some(h.accounts.seller.clone()));
    assert_eq!(h.marketplace.get_user_sales(&h.accounts.seller), 0);
    assert_eq!(h.balance(&h.accounts.buyer), STARTING_BALANCE);
    assert_eq!(h.balance(&h.accounts.seller), STARTING_BALANCE);
}

#[test]
fn test_cancel_then_relist_and_sell() {
    let h = TestHarness::new();
    let seller = &h.accounts.seller;
    let token_id = h.list_for_sale(1000);

    // Non-seller cannot cancel.
    let result = h
        .marketplace
        .try_cancel_listing(&h.accounts.buyer, &h.nft.address, &token_id);
    assert_eq!(result, Err(Ok(MarketplaceError::Unauthorized)));

    h.marketplace.cancel_listing(seller, &h.nft.address, &token_id);
    assert_eq!(h.marketplace.get_listing(&h.nft.address, &token_id), None);

    // Cancelled listings leave the automaton in Unlisted: listing again works.
    h.marketplace
        .list_nft(seller, &h.nft.address, &token_id, &800);
    h.marketplace
        .buy_nft(&h.accounts.buyer, &h.nft.address, &token_id);
    assert_eq!(h.nft.get_owner(&token_id), Some(h.accounts.buyer.clone()));
    assert_eq!(h.marketplace.get_user_sales(seller), 1);
}

#[test]
fn test_listings_are_independent_per_token() {
    let h = TestHarness::new();
    let first = h.list_for_sale(1000);
    let second = h.list_for_sale(2000);

    h.marketplace
        .buy_nft(&h.accounts.buyer, &h.nft.address, &first);

    // Selling the first token does not disturb the second listing.
    assert_eq!(h.marketplace.get_listing(&h.nft.address, &first), None);
    let remaining = h.marketplace.get_listing(&h.nft.address, &second).unwrap();
    assert_eq!(remaining.price, 2000);
}
