//! NFTGallery - artwork registry and fixed-price auction state machine

use soroban_sdk::{contractimpl, contracttype, panic_with_error, token, Address, Env, String, Vec};
use crate::{
    errors::GalleryError, events, Artwork, Auction, AuctionStatus, NftGallery, NftGalleryArgs,
    NftGalleryClient, NftGalleryContract, PassRegistryClient,
};

#[contracttype]
pub enum DataKey {
    Admin,
    PassRegistry,
    PaymentToken,
    Paused,
    NextArtId,
    NextAuctionId,
}

#[contracttype]
pub enum GalleryStorageKey {
    Art(u64),
    ArtOwner(u64),
    Owned(Address),
    Approval(u64),
    ApprovalForAll(Address /* owner */, Address /* operator */),
    Auction(u64),
    ActiveAuction(u64 /* art_id */),
}

/// Delegate grant for a single artwork, valid until `live_until_ledger`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalValue {
    pub approved: Address,
    pub live_until_ledger: u32,
}


#[contractimpl]
impl NftGalleryContract for NftGallery {

    fn __constructor(e: &Env, admin: Address, pass_registry: Address, payment_token: Address) {
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::PassRegistry, &pass_registry);
        e.storage().instance().set(&DataKey::PaymentToken, &payment_token);
        e.storage().instance().set(&DataKey::Paused, &false);
        e.storage().instance().set(&DataKey::NextArtId, &0u64);
        e.storage().instance().set(&DataKey::NextAuctionId, &0u64);
    }

    fn create_art(
        e: &Env,
        creator: Address,
        name: String,
        description: String,
        media_uri: String,
        pass_token_id: u64,
    ) -> u64 {
        creator.require_auth();
        require_not_paused(e);

        if name.len() == 0 || description.len() == 0 || media_uri.len() == 0 {
            panic_with_error!(e, GalleryError::InvalidInput);
        }

        let registry: Address = read_instance(e, &DataKey::PassRegistry);
        let pass = PassRegistryClient::new(e, &registry);
        // A revoked or never-minted pass resolves to nothing.
        let pass_owner: Address = match pass.try_owner_of(&pass_token_id) {
            Ok(Ok(owner)) => owner,
            _ => panic_with_error!(e, GalleryError::NotFound),
        };
        if pass_owner != creator {
            panic_with_error!(e, GalleryError::Unauthorized);
        }
        if !pass.is_approved_or_owner(&creator, &pass_token_id) {
            panic_with_error!(e, GalleryError::Unauthorized);
        }

        let art_id: u64 = read_instance(e, &DataKey::NextArtId);
        let next = art_id
            .checked_add(1)
            .unwrap_or_else(|| panic_with_error!(e, GalleryError::MathOverflow));
        e.storage().instance().set(&DataKey::NextArtId, &next);

        let art = Artwork { name, description, media_uri };
        e.storage().persistent().set(&GalleryStorageKey::Art(art_id), &art);
        e.storage().persistent().set(&GalleryStorageKey::ArtOwner(art_id), &creator);
        let mut owned = read_owned(e, &creator);
        owned.push_back(art_id);
        write_owned(e, &creator, &owned);

        events::ArtMinted { to: creator, art_id, pass_token_id }.publish(e);

        art_id
    }

    fn create_auction(e: &Env, seller: Address, art_id: u64, price: i128) -> u64 {
        seller.require_auth();
        require_not_paused(e);

        if price < 0 {
            panic_with_error!(e, GalleryError::InvalidInput);
        }
        let owner = read_art_owner(e, art_id);
        if owner != seller {
            panic_with_error!(e, GalleryError::Unauthorized);
        }
        if e.storage().persistent().has(&GalleryStorageKey::ActiveAuction(art_id)) {
            panic_with_error!(e, GalleryError::Conflict);
        }

        let auction_id: u64 = read_instance(e, &DataKey::NextAuctionId);
        let next = auction_id
            .checked_add(1)
            .unwrap_or_else(|| panic_with_error!(e, GalleryError::MathOverflow));
        e.storage().instance().set(&DataKey::NextAuctionId, &next);

        let auction = Auction { art_id, price, status: AuctionStatus::Open };
        e.storage().persistent().set(&GalleryStorageKey::Auction(auction_id), &auction);
        e.storage().persistent().set(&GalleryStorageKey::ActiveAuction(art_id), &auction_id);

        events::AuctionCreated { seller, auction_id, art_id, price }.publish(e);

        auction_id
    }

    fn cancel_auction(e: &Env, caller: Address, auction_id: u64) {
        caller.require_auth();
        require_not_paused(e);

        let mut auction = read_auction(e, auction_id);
        if auction.is_finished() {
            panic_with_error!(e, GalleryError::Conflict);
        }
        let owner = read_art_owner(e, auction.art_id);
        if owner != caller {
            panic_with_error!(e, GalleryError::Unauthorized);
        }

        auction.status = AuctionStatus::Cancelled;
        e.storage().persistent().set(&GalleryStorageKey::Auction(auction_id), &auction);
        e.storage().persistent().remove(&GalleryStorageKey::ActiveAuction(auction.art_id));

        events::AuctionCancelled { owner, auction_id, art_id: auction.art_id }.publish(e);
    }

    fn buy_art(e: &Env, buyer: Address, auction_id: u64, payment: i128) {
        buyer.require_auth();
        require_not_paused(e);

        let mut auction = read_auction(e, auction_id);
        if auction.is_finished() {
            panic_with_error!(e, GalleryError::Conflict);
        }
        if payment != auction.price {
            panic_with_error!(e, GalleryError::InsufficientPayment);
        }

        let seller = read_art_owner(e, auction.art_id);

        // Every state write lands before the payment leaves the buyer, so a
        // re-entrant call finds the auction finished and is rejected above.
        auction.status = AuctionStatus::Sold;
        e.storage().persistent().set(&GalleryStorageKey::Auction(auction_id), &auction);
        e.storage().persistent().remove(&GalleryStorageKey::ActiveAuction(auction.art_id));
        do_transfer(e, &seller, &buyer, auction.art_id);

        let payment_token: Address = read_instance(e, &DataKey::PaymentToken);
        token::Client::new(e, &payment_token).transfer(&buyer, &seller, &payment);

        events::ArtSold { buyer, seller, auction_id, art_id: auction.art_id, price: auction.price }
            .publish(e);
    }

    fn transfer(e: &Env, from: Address, to: Address, art_id: u64) {
        from.require_auth();
        require_not_paused(e);
        require_not_on_auction(e, art_id);

        do_transfer(e, &from, &to, art_id);
    }

    fn transfer_from(e: &Env, spender: Address, from: Address, to: Address, art_id: u64) {
        spender.require_auth();
        require_not_paused(e);
        require_not_on_auction(e, art_id);

        if !check_approved_or_owner(e, &spender, art_id) {
            panic_with_error!(e, GalleryError::Unauthorized);
        }
        do_transfer(e, &from, &to, art_id);
    }

    fn approve(e: &Env, approver: Address, approved: Address, art_id: u64, live_until_ledger: u32) {
        approver.require_auth();

        let owner = read_art_owner(e, art_id);
        if approver != owner && !operator_live(e, &owner, &approver) {
            panic_with_error!(e, GalleryError::Unauthorized);
        }

        if live_until_ledger == 0 {
            e.storage().persistent().remove(&GalleryStorageKey::Approval(art_id));
        } else {
            if live_until_ledger < e.ledger().sequence() {
                panic_with_error!(e, GalleryError::InvalidInput);
            }
            let value = ApprovalValue { approved: approved.clone(), live_until_ledger };
            e.storage().persistent().set(&GalleryStorageKey::Approval(art_id), &value);
        }

        events::Approve { approver, art_id, approved, live_until_ledger }.publish(e);
    }

    fn approve_for_all(e: &Env, owner: Address, operator: Address, live_until_ledger: u32) {
        owner.require_auth();

        let key = GalleryStorageKey::ApprovalForAll(owner.clone(), operator.clone());
        if live_until_ledger == 0 {
            e.storage().persistent().remove(&key);
        } else {
            if live_until_ledger < e.ledger().sequence() {
                panic_with_error!(e, GalleryError::InvalidInput);
            }
            e.storage().persistent().set(&key, &live_until_ledger);
        }

        events::ApproveForAll { owner, operator, live_until_ledger }.publish(e);
    }

    fn get_approved(e: &Env, art_id: u64) -> Option<Address> {
        read_art_owner(e, art_id);
        approved_for(e, art_id)
    }

    fn is_approved_for_all(e: &Env, owner: Address, operator: Address) -> bool {
        operator_live(e, &owner, &operator)
    }

    fn is_approved_or_owner(e: &Env, spender: Address, art_id: u64) -> bool {
        check_approved_or_owner(e, &spender, art_id)
    }

    fn get_art(e: &Env, art_id: u64) -> Artwork {
        e.storage()
            .persistent()
            .get(&GalleryStorageKey::Art(art_id))
            .unwrap_or_else(|| panic_with_error!(e, GalleryError::NotFound))
    }

    fn owner_of(e: &Env, art_id: u64) -> Address {
        read_art_owner(e, art_id)
    }

    fn balance(e: &Env, owner: Address) -> u32 {
        read_owned(e, &owner).len()
    }

    fn tokens_of_owner(e: &Env, owner: Address) -> Vec<u64> {
        read_owned(e, &owner)
    }

    fn token_of_owner_by_index(e: &Env, owner: Address, index: u32) -> u64 {
        read_owned(e, &owner)
            .get(index)
            .unwrap_or_else(|| panic_with_error!(e, GalleryError::NotFound))
    }

    fn get_auction(e: &Env, auction_id: u64) -> Auction {
        read_auction(e, auction_id)
    }

    fn auction_count(e: &Env) -> u64 {
        read_instance(e, &DataKey::NextAuctionId)
    }

    fn art_count(e: &Env) -> u64 {
        read_instance(e, &DataKey::NextArtId)
    }

    fn is_on_auction(e: &Env, art_id: u64) -> bool {
        e.storage().persistent().has(&GalleryStorageKey::ActiveAuction(art_id))
    }

    fn set_paused(e: &Env, caller: Address, paused: bool) {
        require_admin(e, &caller);
        e.storage().instance().set(&DataKey::Paused, &paused);

        events::PauseSet { paused }.publish(e);
    }

    fn paused(e: &Env) -> bool {
        read_instance(e, &DataKey::Paused)
    }

    fn admin(e: &Env) -> Address {
        read_instance(e, &DataKey::Admin)
    }

    fn pass_registry(e: &Env) -> Address {
        read_instance(e, &DataKey::PassRegistry)
    }

    fn payment_token(e: &Env) -> Address {
        read_instance(e, &DataKey::PaymentToken)
    }
}

fn read_instance<T: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(e: &Env, key: &DataKey) -> T {
    e.storage()
        .instance()
        .get(key)
        .unwrap_or_else(|| panic_with_error!(e, GalleryError::NotFound))
}

fn require_admin(e: &Env, caller: &Address) {
    let admin: Address = read_instance(e, &DataKey::Admin);
    if *caller != admin {
        panic_with_error!(e, GalleryError::Unauthorized);
    }
}

fn require_not_paused(e: &Env) {
    let paused: bool = read_instance(e, &DataKey::Paused);
    if paused {
        panic_with_error!(e, GalleryError::Paused);
    }
}

fn require_not_on_auction(e: &Env, art_id: u64) {
    if e.storage().persistent().has(&GalleryStorageKey::ActiveAuction(art_id)) {
        panic_with_error!(e, GalleryError::Conflict);
    }
}

fn read_art_owner(e: &Env, art_id: u64) -> Address {
    e.storage()
        .persistent()
        .get(&GalleryStorageKey::ArtOwner(art_id))
        .unwrap_or_else(|| panic_with_error!(e, GalleryError::NotFound))
}

fn read_auction(e: &Env, auction_id: u64) -> Auction {
    e.storage()
        .persistent()
        .get(&GalleryStorageKey::Auction(auction_id))
        .unwrap_or_else(|| panic_with_error!(e, GalleryError::NotFound))
}

fn read_owned(e: &Env, owner: &Address) -> Vec<u64> {
    e.storage()
        .persistent()
        .get(&GalleryStorageKey::Owned(owner.clone()))
        .unwrap_or_else(|| Vec::new(e))
}

fn write_owned(e: &Env, owner: &Address, owned: &Vec<u64>) {
    let key = GalleryStorageKey::Owned(owner.clone());
    if owned.is_empty() {
        e.storage().persistent().remove(&key);
    } else {
        e.storage().persistent().set(&key, owned);
    }
}

fn approved_for(e: &Env, art_id: u64) -> Option<Address> {
    let approval: Option<ApprovalValue> =
        e.storage().persistent().get(&GalleryStorageKey::Approval(art_id));
    match approval {
        Some(a) if a.live_until_ledger >= e.ledger().sequence() => Some(a.approved),
        _ => None,
    }
}

fn operator_live(e: &Env, owner: &Address, operator: &Address) -> bool {
    let live_until: Option<u32> = e
        .storage()
        .persistent()
        .get(&GalleryStorageKey::ApprovalForAll(owner.clone(), operator.clone()));
    match live_until {
        Some(l) => l >= e.ledger().sequence(),
        None => false,
    }
}

fn check_approved_or_owner(e: &Env, spender: &Address, art_id: u64) -> bool {
    let owner = read_art_owner(e, art_id);
    *spender == owner
        || approved_for(e, art_id).as_ref() == Some(spender)
        || operator_live(e, &owner, spender)
}

fn do_transfer(e: &Env, from: &Address, to: &Address, art_id: u64) {
    let owner = read_art_owner(e, art_id);
    if owner != *from {
        panic_with_error!(e, GalleryError::Unauthorized);
    }

    e.storage().persistent().remove(&GalleryStorageKey::Approval(art_id));

    let mut from_owned = read_owned(e, from);
    if let Some(i) = from_owned.first_index_of(art_id) {
        from_owned.remove(i);
    }
    write_owned(e, from, &from_owned);

    let mut to_owned = read_owned(e, to);
    to_owned.push_back(art_id);
    write_owned(e, to, &to_owned);

    e.storage().persistent().set(&GalleryStorageKey::ArtOwner(art_id), to);

    events::Transfer { from: from.clone(), to: to.clone(), art_id }.publish(e);
}
