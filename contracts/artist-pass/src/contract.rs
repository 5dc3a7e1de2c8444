//! ArtistPass - capped membership pass registry

use soroban_sdk::{contractimpl, contracttype, panic_with_error, token, Address, Env, String, Vec};
use crate::{errors::ArtistPassError, events, ArtistPass, ArtistPassArgs, ArtistPassClient, ArtistPassContract};

#[contracttype]
pub enum DataKey {
    Admin,
    PaymentToken,
    MaxSupply,
    MintPrice,
    Paused,
    Name,
    Symbol,
    BaseUri,
    NextTokenId,
    LiveSupply,
}

#[contracttype]
pub enum PassStorageKey {
    Owner(u64),
    Owned(Address),
    Approval(u64),
    ApprovalForAll(Address /* owner */, Address /* operator */),
}

/// Delegate grant for a single pass, valid until `live_until_ledger`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalValue {
    pub approved: Address,
    pub live_until_ledger: u32,
}


#[contractimpl]
impl ArtistPassContract for ArtistPass {

    fn __constructor(
        e: &Env,
        admin: Address,
        name: String,
        symbol: String,
        base_uri: String,
        max_supply: u32,
        mint_price: i128,
        payment_token: Address,
    ) {
        if max_supply == 0 || mint_price < 0 {
            panic_with_error!(e, ArtistPassError::InvalidInput);
        }

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::PaymentToken, &payment_token);
        e.storage().instance().set(&DataKey::MaxSupply, &max_supply);
        e.storage().instance().set(&DataKey::MintPrice, &mint_price);
        e.storage().instance().set(&DataKey::Paused, &false);
        e.storage().instance().set(&DataKey::Name, &name);
        e.storage().instance().set(&DataKey::Symbol, &symbol);
        e.storage().instance().set(&DataKey::BaseUri, &base_uri);
        e.storage().instance().set(&DataKey::NextTokenId, &0u64);
        e.storage().instance().set(&DataKey::LiveSupply, &0u32);
    }

    fn mint(e: &Env, to: Address, payment: i128) -> u64 {
        to.require_auth();
        require_not_paused(e);

        let max_supply: u32 = read_instance(e, &DataKey::MaxSupply);
        let live: u32 = read_instance(e, &DataKey::LiveSupply);
        if live >= max_supply {
            panic_with_error!(e, ArtistPassError::SupplyExhausted);
        }

        let price: i128 = read_instance(e, &DataKey::MintPrice);
        if payment < price {
            panic_with_error!(e, ArtistPassError::InsufficientPayment);
        }

        let token_id: u64 = read_instance(e, &DataKey::NextTokenId);
        let next = token_id
            .checked_add(1)
            .unwrap_or_else(|| panic_with_error!(e, ArtistPassError::MathOverflow));
        e.storage().instance().set(&DataKey::NextTokenId, &next);
        e.storage().instance().set(&DataKey::LiveSupply, &(live + 1));

        e.storage().persistent().set(&PassStorageKey::Owner(token_id), &to);
        let mut owned = read_owned(e, &to);
        owned.push_back(token_id);
        write_owned(e, &to, &owned);

        // State is committed before any value moves.
        let payment_token: Address = read_instance(e, &DataKey::PaymentToken);
        token::Client::new(e, &payment_token).transfer(&to, &e.current_contract_address(), &payment);

        events::Mint { to, token_id, payment }.publish(e);

        token_id
    }

    fn revoke(e: &Env, caller: Address, token_id: u64) {
        caller.require_auth();
        require_not_paused(e);

        if !check_approved_or_owner(e, &caller, token_id) {
            panic_with_error!(e, ArtistPassError::Unauthorized);
        }

        let owner = read_owner(e, token_id);
        e.storage().persistent().remove(&PassStorageKey::Approval(token_id));
        e.storage().persistent().remove(&PassStorageKey::Owner(token_id));
        let mut owned = read_owned(e, &owner);
        if let Some(i) = owned.first_index_of(token_id) {
            owned.remove(i);
        }
        write_owned(e, &owner, &owned);

        let live: u32 = read_instance(e, &DataKey::LiveSupply);
        e.storage().instance().set(&DataKey::LiveSupply, &(live - 1));

        events::Revoke { owner, token_id }.publish(e);
    }

    fn transfer(e: &Env, from: Address, to: Address, token_id: u64) {
        from.require_auth();
        require_not_paused(e);

        do_transfer(e, &from, &to, token_id);
    }

    fn transfer_from(e: &Env, spender: Address, from: Address, to: Address, token_id: u64) {
        spender.require_auth();
        require_not_paused(e);

        if !check_approved_or_owner(e, &spender, token_id) {
            panic_with_error!(e, ArtistPassError::Unauthorized);
        }
        do_transfer(e, &from, &to, token_id);
    }

    fn approve(e: &Env, approver: Address, approved: Address, token_id: u64, live_until_ledger: u32) {
        approver.require_auth();

        let owner = read_owner(e, token_id);
        if approver != owner && !operator_live(e, &owner, &approver) {
            panic_with_error!(e, ArtistPassError::Unauthorized);
        }

        if live_until_ledger == 0 {
            e.storage().persistent().remove(&PassStorageKey::Approval(token_id));
        } else {
            if live_until_ledger < e.ledger().sequence() {
                panic_with_error!(e, ArtistPassError::InvalidInput);
            }
            let value = ApprovalValue { approved: approved.clone(), live_until_ledger };
            e.storage().persistent().set(&PassStorageKey::Approval(token_id), &value);
        }

        events::Approve { approver, token_id, approved, live_until_ledger }.publish(e);
    }

    fn approve_for_all(e: &Env, owner: Address, operator: Address, live_until_ledger: u32) {
        owner.require_auth();

        let key = PassStorageKey::ApprovalForAll(owner.clone(), operator.clone());
        if live_until_ledger == 0 {
            e.storage().persistent().remove(&key);
        } else {
            if live_until_ledger < e.ledger().sequence() {
                panic_with_error!(e, ArtistPassError::InvalidInput);
            }
            e.storage().persistent().set(&key, &live_until_ledger);
        }

        events::ApproveForAll { owner, operator, live_until_ledger }.publish(e);
    }

    fn get_approved(e: &Env, token_id: u64) -> Option<Address> {
        read_owner(e, token_id);
        approved_for(e, token_id)
    }

    fn is_approved_for_all(e: &Env, owner: Address, operator: Address) -> bool {
        operator_live(e, &owner, &operator)
    }

    fn is_approved_or_owner(e: &Env, spender: Address, token_id: u64) -> bool {
        check_approved_or_owner(e, &spender, token_id)
    }

    fn balance(e: &Env, owner: Address) -> u32 {
        read_owned(e, &owner).len()
    }

    fn owner_of(e: &Env, token_id: u64) -> Address {
        read_owner(e, token_id)
    }

    fn tokens_of_owner(e: &Env, owner: Address) -> Vec<u64> {
        read_owned(e, &owner)
    }

    fn token_of_owner_by_index(e: &Env, owner: Address, index: u32) -> u64 {
        read_owned(e, &owner)
            .get(index)
            .unwrap_or_else(|| panic_with_error!(e, ArtistPassError::NotFound))
    }

    fn total_supply(e: &Env) -> u32 {
        read_instance(e, &DataKey::LiveSupply)
    }

    fn change_price(e: &Env, caller: Address, new_price: i128) {
        require_admin(e, &caller);
        if new_price < 0 {
            panic_with_error!(e, ArtistPassError::InvalidInput);
        }
        e.storage().instance().set(&DataKey::MintPrice, &new_price);

        events::PriceChange { new_price }.publish(e);
    }

    fn set_paused(e: &Env, caller: Address, paused: bool) {
        require_admin(e, &caller);
        e.storage().instance().set(&DataKey::Paused, &paused);

        events::PauseSet { paused }.publish(e);
    }

    fn withdraw(e: &Env, caller: Address) {
        require_admin(e, &caller);

        let admin: Address = read_instance(e, &DataKey::Admin);
        let payment_token: Address = read_instance(e, &DataKey::PaymentToken);
        let client = token::Client::new(e, &payment_token);
        let amount = client.balance(&e.current_contract_address());
        client.transfer(&e.current_contract_address(), &admin, &amount);

        events::Withdraw { to: admin, amount }.publish(e);
    }

    fn name(e: &Env) -> String {
        read_instance(e, &DataKey::Name)
    }

    fn symbol(e: &Env) -> String {
        read_instance(e, &DataKey::Symbol)
    }

    fn token_uri(e: &Env, token_id: u64) -> String {
        read_owner(e, token_id);
        read_instance(e, &DataKey::BaseUri)
    }

    fn max_supply(e: &Env) -> u32 {
        read_instance(e, &DataKey::MaxSupply)
    }

    fn mint_price(e: &Env) -> i128 {
        read_instance(e, &DataKey::MintPrice)
    }

    fn paused(e: &Env) -> bool {
        read_instance(e, &DataKey::Paused)
    }

    fn admin(e: &Env) -> Address {
        read_instance(e, &DataKey::Admin)
    }
}

fn read_instance<T: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(e: &Env, key: &DataKey) -> T {
    e.storage()
        .instance()
        .get(key)
        .unwrap_or_else(|| panic_with_error!(e, ArtistPassError::NotFound))
}

fn require_admin(e: &Env, caller: &Address) {
    let admin: Address = read_instance(e, &DataKey::Admin);
    if *caller != admin {
        panic_with_error!(e, ArtistPassError::Unauthorized);
    }
}

fn require_not_paused(e: &Env) {
    let paused: bool = read_instance(e, &DataKey::Paused);
    if paused {
        panic_with_error!(e, ArtistPassError::Paused);
    }
}

fn read_owner(e: &Env, token_id: u64) -> Address {
    e.storage()
        .persistent()
        .get(&PassStorageKey::Owner(token_id))
        .unwrap_or_else(|| panic_with_error!(e, ArtistPassError::NotFound))
}

fn read_owned(e: &Env, owner: &Address) -> Vec<u64> {
    e.storage()
        .persistent()
        .get(&PassStorageKey::Owned(owner.clone()))
        .unwrap_or_else(|| Vec::new(e))
}

fn write_owned(e: &Env, owner: &Address, owned: &Vec<u64>) {
    let key = PassStorageKey::Owned(owner.clone());
    if owned.is_empty() {
        e.storage().persistent().remove(&key);
    } else {
        e.storage().persistent().set(&key, owned);
    }
}

fn approved_for(e: &Env, token_id: u64) -> Option<Address> {
    let approval: Option<ApprovalValue> =
        e.storage().persistent().get(&PassStorageKey::Approval(token_id));
    match approval {
        Some(a) if a.live_until_ledger >= e.ledger().sequence() => Some(a.approved),
        _ => None,
    }
}

fn operator_live(e: &Env, owner: &Address, operator: &Address) -> bool {
    let live_until: Option<u32> = e
        .storage()
        .persistent()
        .get(&PassStorageKey::ApprovalForAll(owner.clone(), operator.clone()));
    match live_until {
        Some(l) => l >= e.ledger().sequence(),
        None => false,
    }
}

fn check_approved_or_owner(e: &Env, spender: &Address, token_id: u64) -> bool {
    let owner = read_owner(e, token_id);
    *spender == owner
        || approved_for(e, token_id).as_ref() == Some(spender)
        || operator_live(e, &owner, spender)
}

fn do_transfer(e: &Env, from: &Address, to: &Address, token_id: u64) {
    let owner = read_owner(e, token_id);
    if owner != *from {
        panic_with_error!(e, ArtistPassError::Unauthorized);
    }

    e.storage().persistent().remove(&PassStorageKey::Approval(token_id));

    let mut from_owned = read_owned(e, from);
    if let Some(i) = from_owned.first_index_of(token_id) {
        from_owned.remove(i);
    }
    write_owned(e, from, &from_owned);

    let mut to_owned = read_owned(e, to);
    to_owned.push_back(token_id);
    write_owned(e, to, &to_owned);

    e.storage().persistent().set(&PassStorageKey::Owner(token_id), to);

    events::Transfer { from: from.clone(), to: to.clone(), token_id }.publish(e);
}
