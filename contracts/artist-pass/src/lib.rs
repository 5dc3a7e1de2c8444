#![no_std]

use soroban_sdk::{contract, contractmeta, Address, Env, String, Vec};

contractmeta!(key = "Description", val = "Artist Pass");

mod contract;

mod errors;
mod events;

#[contract]
pub struct ArtistPass;

pub trait ArtistPassContract {
    fn __constructor(
        e: &Env,
        admin: Address,
        name: String,
        symbol: String,
        base_uri: String,
        max_supply: u32,
        mint_price: i128,
        payment_token: Address,
    );

    /// Mint a new pass to `to` against a payment.
    ///
    /// Token ids are assigned by a monotonic counter starting at 0 and are
    /// never reused, including after a revocation. The full `payment` is
    /// pulled from `to` into the contract balance and stays there until the
    /// admin withdraws it.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `to` - Account receiving the pass. Must authorize the call.
    /// * `payment` - Amount offered, at least the current mint price.
    ///
    /// # Returns
    ///
    /// The id of the freshly minted pass.
    fn mint(e: &Env, to: Address, payment: i128) -> u64;

    /// Revoke (burn) `token_id`.
    ///
    /// Callable by the owner, the approved delegate, or a live operator.
    /// The id disappears from enumeration and balances; every later query
    /// on it fails.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Account performing the revocation.
    /// * `token_id` - Pass to revoke.
    fn revoke(e: &Env, caller: Address, token_id: u64);

    /// Transfers `token_id` from `from` to `to`.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `from` - Account of the current owner. Must authorize the call.
    /// * `to` - Account of the recipient.
    /// * `token_id` - Pass to move.
    ///
    /// # Events
    ///
    /// * topics - `["transfer", from: Address, to: Address]`
    /// * data - `[token_id: u64]`
    fn transfer(e: &Env, from: Address, to: Address, token_id: u64);

    /// Transfers `token_id` from `from` to `to` on behalf of `spender`.
    ///
    /// `spender` must be the owner, the approved delegate, or a live
    /// operator for `from`.
    fn transfer_from(e: &Env, spender: Address, from: Address, to: Address, token_id: u64);

    /// Grant `approved` the right to move or revoke `token_id`.
    ///
    /// The grant expires after `live_until_ledger`; passing 0 clears the
    /// current delegate. Only the owner or a live operator may grant.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `approver` - Account granting the approval.
    /// * `approved` - Account receiving the approval.
    /// * `token_id` - Pass the approval covers.
    /// * `live_until_ledger` - Last ledger sequence the grant is valid for.
    fn approve(e: &Env, approver: Address, approved: Address, token_id: u64, live_until_ledger: u32);

    /// Grant `operator` control over every pass `owner` holds.
    ///
    /// Same expiry rule as [`ArtistPassContract::approve`]: 0 clears the
    /// grant, a past ledger is rejected.
    fn approve_for_all(e: &Env, owner: Address, operator: Address, live_until_ledger: u32);

    /// Returns the delegate approved for `token_id`, if the grant is live.
    fn get_approved(e: &Env, token_id: u64) -> Option<Address>;

    /// Returns whether `operator` holds a live collection-wide grant.
    fn is_approved_for_all(e: &Env, owner: Address, operator: Address) -> bool;

    /// Returns whether `spender` may act on `token_id`: owner, approved
    /// delegate, or live operator.
    ///
    /// This is the read-only capability other contracts use to verify pass
    /// possession.
    ///
    /// # Notes
    ///
    /// If the token does not exist, this function is expected to panic.
    fn is_approved_or_owner(e: &Env, spender: Address, token_id: u64) -> bool;

    /// Returns the number of passes in `owner`'s account.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `owner` - Account of the pass owner.
    fn balance(e: &Env, owner: Address) -> u32;

    /// Returns the address of the owner of the given `token_id`.
    ///
    /// # Notes
    ///
    /// If the token does not exist, this function is expected to panic.
    fn owner_of(e: &Env, token_id: u64) -> Address;

    /// Returns every live pass id `owner` currently holds, in holding order.
    ///
    /// A fresh snapshot on every call.
    fn tokens_of_owner(e: &Env, owner: Address) -> Vec<u64>;

    /// Returns the pass id at `index` within `owner`'s holdings.
    ///
    /// # Notes
    ///
    /// Panics when `index` is past the end of the holdings.
    fn token_of_owner_by_index(e: &Env, owner: Address, index: u32) -> u64;

    /// Count of live (non-revoked) passes.
    fn total_supply(e: &Env) -> u32;

    /// Change the mint price. Admin only.
    fn change_price(e: &Env, caller: Address, new_price: i128);

    /// Halt or resume minting, revocation, and transfers. Admin only.
    fn set_paused(e: &Env, caller: Address, paused: bool);

    /// Send the whole accumulated payment balance to the admin. Admin only.
    fn withdraw(e: &Env, caller: Address);

    /// Returns the token collection name.
    fn name(e: &Env) -> String;

    /// Returns the token collection symbol.
    fn symbol(e: &Env) -> String;

    /// Returns the metadata locator for `token_id`.
    ///
    /// # Notes
    ///
    /// If the token does not exist, this function is expected to panic.
    fn token_uri(e: &Env, token_id: u64) -> String;

    /// Cap on live passes, fixed at construction.
    fn max_supply(e: &Env) -> u32;

    /// Current mint price.
    fn mint_price(e: &Env) -> i128;

    /// Whether the registry is administratively halted.
    fn paused(e: &Env) -> bool;

    /// Registry admin.
    fn admin(e: &Env) -> Address;
}
