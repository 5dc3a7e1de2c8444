use soroban_sdk::{Address, contractevent};


#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArtMinted {
    #[topic]
    pub to: Address,
    pub art_id: u64,
    pub pass_token_id: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transfer {
    #[topic]
    pub from: Address,
    #[topic]
    pub to: Address,
    pub art_id: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Approve {
    #[topic]
    pub approver: Address,
    #[topic]
    pub art_id: u64,
    pub approved: Address,
    pub live_until_ledger: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApproveForAll {
    #[topic]
    pub owner: Address,
    pub operator: Address,
    pub live_until_ledger: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionCreated {
    #[topic]
    pub seller: Address,
    pub auction_id: u64,
    pub art_id: u64,
    pub price: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionCancelled {
    #[topic]
    pub owner: Address,
    pub auction_id: u64,
    pub art_id: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArtSold {
    #[topic]
    pub buyer: Address,
    #[topic]
    pub seller: Address,
    pub auction_id: u64,
    pub art_id: u64,
    pub price: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseSet {
    pub paused: bool,
}
