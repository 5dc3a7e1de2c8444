#![no_std]

use soroban_sdk::{contract, contractclient, contractmeta, contracttype, Address, Env, String, Vec};

contractmeta!(key = "Description", val = "NFT Gallery");

mod contract;

#[cfg(test)]
mod test;
mod errors;
mod events;

/// Immutable description of one artwork, set at creation.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Artwork {
    pub name: String,
    pub description: String,
    pub media_uri: String,
}

/// Lifecycle of a fixed-price auction. `Sold` and `Cancelled` are terminal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum AuctionStatus {
    Open = 0,
    Sold = 1,
    Cancelled = 2,
}

/// A fixed-price sale offer over one artwork. The price never changes after
/// creation.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Auction {
    pub art_id: u64,
    pub price: i128,
    pub status: AuctionStatus,
}

impl Auction {
    pub fn is_finished(&self) -> bool {
        self.status != AuctionStatus::Open
    }
}

/// Read-only view of the pass registry the gallery checks credentials
/// against. The gallery holds the registry address fixed from construction
/// and never writes through this interface.
#[contractclient(name = "PassRegistryClient")]
pub trait PassRegistry {
    fn owner_of(env: Env, token_id: u64) -> Address;
    fn is_approved_or_owner(env: Env, spender: Address, token_id: u64) -> bool;
}

#[contract]
pub struct NftGallery;

pub trait NftGalleryContract {
    fn __constructor(e: &Env, admin: Address, pass_registry: Address, payment_token: Address);

    /// Mint a new artwork token to `creator`.
    ///
    /// `pass_token_id` names the membership pass offered as evidence of
    /// eligibility: `creator` must be its current owner and hold
    /// owner-or-approved rights on it. The pass itself is only read, never
    /// moved or consumed.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `creator` - Account minting the artwork. Must authorize the call.
    /// * `name` - Title of the work. Must be non-empty.
    /// * `description` - Description of the work. Must be non-empty.
    /// * `media_uri` - Opaque locator of the media. Must be non-empty.
    /// * `pass_token_id` - Pass cited as the minting credential.
    ///
    /// # Returns
    ///
    /// The id of the freshly minted artwork.
    fn create_art(
        e: &Env,
        creator: Address,
        name: String,
        description: String,
        media_uri: String,
        pass_token_id: u64,
    ) -> u64;

    /// Open a fixed-price auction over `art_id`.
    ///
    /// Only the current owner may list, and an artwork carries at most one
    /// open auction at a time. Auction ids count every auction ever
    /// created and are never reused.
    fn create_auction(e: &Env, seller: Address, art_id: u64, price: i128) -> u64;

    /// Close an open auction without a sale.
    ///
    /// Only the artwork's current owner may cancel. The artwork becomes
    /// transferable again; the auction itself is finished for good.
    fn cancel_auction(e: &Env, caller: Address, auction_id: u64);

    /// Buy the artwork behind an open auction.
    ///
    /// `payment` must match the auction price exactly. Ownership moves to
    /// `buyer`, the pre-transfer owner receives the full price, and the
    /// auction finishes - all inside one invocation, with every state write
    /// committed before the payment leaves `buyer`.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `buyer` - Purchasing account. Must authorize the call.
    /// * `auction_id` - Auction to fulfill.
    /// * `payment` - Amount offered. Must equal the auction price.
    fn buy_art(e: &Env, buyer: Address, auction_id: u64, payment: i128);

    /// Transfers `art_id` from `from` to `to`.
    ///
    /// Fails while the artwork has an open auction.
    fn transfer(e: &Env, from: Address, to: Address, art_id: u64);

    /// Transfers `art_id` on behalf of `spender`, who must be the owner,
    /// the approved delegate, or a live operator. Same auction lock as
    /// [`NftGalleryContract::transfer`].
    fn transfer_from(e: &Env, spender: Address, from: Address, to: Address, art_id: u64);

    /// Grant `approved` the right to move `art_id`. A `live_until_ledger`
    /// of 0 clears the delegate; a past ledger is rejected.
    fn approve(e: &Env, approver: Address, approved: Address, art_id: u64, live_until_ledger: u32);

    /// Grant `operator` control over every artwork `owner` holds, with the
    /// same expiry rule as [`NftGalleryContract::approve`].
    fn approve_for_all(e: &Env, owner: Address, operator: Address, live_until_ledger: u32);

    /// Returns the delegate approved for `art_id`, if the grant is live.
    fn get_approved(e: &Env, art_id: u64) -> Option<Address>;

    /// Returns whether `operator` holds a live collection-wide grant.
    fn is_approved_for_all(e: &Env, owner: Address, operator: Address) -> bool;

    /// Returns whether `spender` may act on `art_id`.
    fn is_approved_or_owner(e: &Env, spender: Address, art_id: u64) -> bool;

    /// Returns the stored description of `art_id`.
    fn get_art(e: &Env, art_id: u64) -> Artwork;

    /// Returns the address of the owner of the given `art_id`.
    ///
    /// # Notes
    ///
    /// If the artwork does not exist, this function is expected to panic.
    fn owner_of(e: &Env, art_id: u64) -> Address;

    /// Returns the number of artworks in `owner`'s account.
    fn balance(e: &Env, owner: Address) -> u32;

    /// Returns every artwork id `owner` currently holds, in holding order.
    fn tokens_of_owner(e: &Env, owner: Address) -> Vec<u64>;

    /// Returns the artwork id at `index` within `owner`'s holdings.
    fn token_of_owner_by_index(e: &Env, owner: Address, index: u32) -> u64;

    /// Returns the auction record behind `auction_id`.
    ///
    /// Finished auctions stay readable forever.
    fn get_auction(e: &Env, auction_id: u64) -> Auction;

    /// Count of auctions ever created, finished ones included.
    fn auction_count(e: &Env) -> u64;

    /// Count of artworks ever minted.
    fn art_count(e: &Env) -> u64;

    /// Whether `art_id` currently has an open auction.
    fn is_on_auction(e: &Env, art_id: u64) -> bool;

    /// Halt or resume minting, listing, and transfers. Admin only.
    fn set_paused(e: &Env, caller: Address, paused: bool);

    /// Whether the gallery is administratively halted.
    fn paused(e: &Env) -> bool;

    /// Gallery admin.
    fn admin(e: &Env) -> Address;

    /// Address of the pass registry consulted by
    /// [`NftGalleryContract::create_art`].
    fn pass_registry(e: &Env) -> Address;

    /// Token all sales settle in.
    fn payment_token(e: &Env) -> Address;
}
