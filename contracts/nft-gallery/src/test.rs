extern crate std;

use soroban_sdk::{
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, Env, String,
};
use artist_pass::{ArtistPass, ArtistPassClient};
use crate::{Auction, AuctionStatus, NftGallery, NftGalleryClient};

const MAX_SUPPLY: u32 = 5;
const MINT_PRICE: i128 = 500_000; // 0.05 units at 7 decimals
const ART_PRICE: i128 = 10_000_000; // 1 unit

struct GalleryTest<'a> {
    admin: Address,
    artist: Address,
    collector: Address,
    token: TokenClient<'a>,
    asset: StellarAssetClient<'a>,
    pass: ArtistPassClient<'a>,
    gallery: NftGalleryClient<'a>,
}

fn setup<'a>(e: &Env) -> GalleryTest<'a> {
    let admin = Address::generate(e);
    let artist = Address::generate(e);
    let collector = Address::generate(e);

    let sac = e.register_stellar_asset_contract_v2(Address::generate(e));
    let token = TokenClient::new(e, &sac.address());
    let asset = StellarAssetClient::new(e, &sac.address());

    let pass_address = e.register(
        ArtistPass,
        (
            &admin,
            &String::from_str(e, "ArtistPass"),
            &String::from_str(e, "PASS"),
            &String::from_str(e, "https://ipfs.io/ipfs/QmeCfYm847UDEJtBgb7TtuKpCuY2qCkrtEDHX4hBH8ofMt/"),
            &MAX_SUPPLY,
            &MINT_PRICE,
            &sac.address(),
        ),
    );
    let gallery_address = e.register(NftGallery, (&admin, &pass_address, &sac.address()));

    GalleryTest {
        admin,
        artist,
        collector,
        token,
        asset,
        pass: ArtistPassClient::new(e, &pass_address),
        gallery: NftGalleryClient::new(e, &gallery_address),
    }
}

/// Mint a pass to `t.artist` and return its id.
fn mint_pass(t: &GalleryTest) -> u64 {
    t.asset.mint(&t.artist, &MINT_PRICE);
    t.pass.mint(&t.artist, &MINT_PRICE)
}

fn create_art(e: &Env, t: &GalleryTest, pass_id: u64) -> u64 {
    t.gallery.create_art(
        &t.artist,
        &String::from_str(e, "Art1"),
        &String::from_str(e, "Description"),
        &String::from_str(e, "https://via.placeholder.com/150"),
        &pass_id,
    )
}

#[test]
fn test_constructor_getters() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);

    assert_eq!(t.gallery.admin(), t.admin);
    assert_eq!(t.gallery.pass_registry(), t.pass.address);
    assert_eq!(t.gallery.payment_token(), t.token.address);
    assert!(!t.gallery.paused());
    assert_eq!(t.gallery.art_count(), 0);
    assert_eq!(t.gallery.auction_count(), 0);
}

#[test]
fn test_create_art() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);

    assert_eq!(art_id, 0);
    assert_eq!(t.gallery.owner_of(&0), t.artist);
    assert_eq!(t.gallery.balance(&t.artist), 1);
    assert_eq!(t.gallery.art_count(), 1);
    assert_eq!(t.gallery.tokens_of_owner(&t.artist), vec![&e, 0]);

    let art = t.gallery.get_art(&0);
    assert_eq!(art.name, String::from_str(&e, "Art1"));
    assert_eq!(art.description, String::from_str(&e, "Description"));
    assert_eq!(art.media_uri, String::from_str(&e, "https://via.placeholder.com/150"));

    // The cited pass is evidence only - it stays with the artist.
    assert_eq!(t.pass.owner_of(&pass_id), t.artist);
    assert_eq!(t.pass.balance(&t.artist), 1);
}

#[test]
#[should_panic(expected = "Error(Contract, #201)")]
fn test_create_art_pass_not_owned_by_sender() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);

    t.gallery.create_art(
        &t.collector,
        &String::from_str(&e, "Art1"),
        &String::from_str(&e, "Description"),
        &String::from_str(&e, "https://via.placeholder.com/150"),
        &pass_id,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #201)")]
fn test_create_art_delegate_is_not_the_owner() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    // Even a pass delegate cannot mint: the pass must be owned by the caller.
    t.pass.approve(&t.artist, &t.collector, &pass_id, &100);

    t.gallery.create_art(
        &t.collector,
        &String::from_str(&e, "Art1"),
        &String::from_str(&e, "Description"),
        &String::from_str(&e, "https://via.placeholder.com/150"),
        &pass_id,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #200)")]
fn test_create_art_unknown_pass() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);

    create_art(&e, &t, 7);
}

#[test]
#[should_panic(expected = "Error(Contract, #200)")]
fn test_create_art_revoked_pass() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    t.pass.revoke(&t.artist, &pass_id);

    create_art(&e, &t, pass_id);
}

#[test]
fn test_create_art_empty_strings() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);

    let name = String::from_str(&e, "Art1");
    let description = String::from_str(&e, "Description");
    let media_uri = String::from_str(&e, "https://via.placeholder.com/150");
    let empty = String::from_str(&e, "");

    assert!(t
        .gallery
        .try_create_art(&t.artist, &empty, &description, &media_uri, &pass_id)
        .is_err());
    assert!(t
        .gallery
        .try_create_art(&t.artist, &name, &empty, &media_uri, &pass_id)
        .is_err());
    assert!(t
        .gallery
        .try_create_art(&t.artist, &name, &description, &empty, &pass_id)
        .is_err());
    assert_eq!(t.gallery.art_count(), 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #203)")]
fn test_create_art_empty_name_error() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);

    t.gallery.create_art(
        &t.artist,
        &String::from_str(&e, ""),
        &String::from_str(&e, "Description"),
        &String::from_str(&e, "https://via.placeholder.com/150"),
        &pass_id,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #202)")]
fn test_create_art_rejected_on_pause() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    t.gallery.set_paused(&t.admin, &true);

    create_art(&e, &t, pass_id);
}

#[test]
fn test_create_auction() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);

    let auction_id = t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);

    assert_eq!(auction_id, 0);
    assert_eq!(t.gallery.auction_count(), 1);
    assert_eq!(
        t.gallery.get_auction(&0),
        Auction { art_id: 0, price: ART_PRICE, status: AuctionStatus::Open },
    );
    assert!(t.gallery.is_on_auction(&art_id));
}

#[test]
#[should_panic(expected = "Error(Contract, #201)")]
fn test_create_auction_requires_ownership() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);

    t.gallery.create_auction(&t.collector, &art_id, &ART_PRICE);
}

#[test]
fn test_create_auction_twice() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);
    t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);

    assert!(t.gallery.try_create_auction(&t.artist, &art_id, &ART_PRICE).is_err());
    assert_eq!(t.gallery.auction_count(), 1);
}

#[test]
#[should_panic(expected = "Error(Contract, #205)")]
fn test_transfer_locked_while_on_auction() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);
    t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);

    t.gallery.transfer(&t.artist, &t.collector, &art_id);
}

#[test]
#[should_panic(expected = "Error(Contract, #203)")]
fn test_create_auction_negative_price() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);

    t.gallery.create_auction(&t.artist, &art_id, &-1);
}

#[test]
#[should_panic(expected = "Error(Contract, #200)")]
fn test_create_auction_unknown_art() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);

    t.gallery.create_auction(&t.artist, &3, &ART_PRICE);
}

#[test]
fn test_cancel_auction() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);
    let auction_id = t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);

    t.gallery.cancel_auction(&t.artist, &auction_id);

    assert_eq!(
        t.gallery.get_auction(&auction_id),
        Auction { art_id: 0, price: ART_PRICE, status: AuctionStatus::Cancelled },
    );
    assert!(!t.gallery.is_on_auction(&art_id));

    // Finished is terminal.
    assert!(t.gallery.try_cancel_auction(&t.artist, &auction_id).is_err());

    // The artwork moves freely again.
    t.gallery.transfer(&t.artist, &t.collector, &art_id);
    assert_eq!(t.gallery.owner_of(&art_id), t.collector);
}

#[test]
fn test_relist_after_cancel() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);

    let first = t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);
    t.gallery.cancel_auction(&t.artist, &first);

    // Auction ids keep counting; they are never reused.
    let second = t.gallery.create_auction(&t.artist, &art_id, &(ART_PRICE * 2));
    assert_eq!(second, 1);
    assert_eq!(t.gallery.auction_count(), 2);
    assert_eq!(
        t.gallery.get_auction(&second),
        Auction { art_id: 0, price: ART_PRICE * 2, status: AuctionStatus::Open },
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #201)")]
fn test_cancel_auction_requires_ownership() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);
    let auction_id = t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);

    t.gallery.cancel_auction(&t.collector, &auction_id);
}

#[test]
#[should_panic(expected = "Error(Contract, #200)")]
fn test_cancel_auction_unknown() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);

    t.gallery.cancel_auction(&t.artist, &9);
}

#[test]
fn test_buy_art() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);
    let auction_id = t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);

    t.asset.mint(&t.collector, &ART_PRICE);
    let seller_before = t.token.balance(&t.artist);

    t.gallery.buy_art(&t.collector, &auction_id, &ART_PRICE);

    assert_eq!(t.gallery.owner_of(&art_id), t.collector);
    assert_eq!(t.token.balance(&t.artist), seller_before + ART_PRICE);
    assert_eq!(t.token.balance(&t.collector), 0);
    assert_eq!(
        t.gallery.get_auction(&auction_id),
        Auction { art_id: 0, price: ART_PRICE, status: AuctionStatus::Sold },
    );
    assert!(!t.gallery.is_on_auction(&art_id));
    assert_eq!(t.gallery.tokens_of_owner(&t.collector), vec![&e, 0]);
    assert_eq!(t.gallery.tokens_of_owner(&t.artist), vec![&e]);
}

#[test]
fn test_buy_art_twice() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);
    let auction_id = t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);

    t.asset.mint(&t.collector, &(ART_PRICE * 2));
    t.gallery.buy_art(&t.collector, &auction_id, &ART_PRICE);

    let seller_after_sale = t.token.balance(&t.artist);
    let buyer_after_sale = t.token.balance(&t.collector);

    assert!(t.gallery.try_buy_art(&t.collector, &auction_id, &ART_PRICE).is_err());

    // The failed second purchase moved nothing.
    assert_eq!(t.token.balance(&t.artist), seller_after_sale);
    assert_eq!(t.token.balance(&t.collector), buyer_after_sale);
    assert_eq!(t.gallery.owner_of(&art_id), t.collector);
}

#[test]
fn test_buy_art_exact_price_required() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);
    let auction_id = t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);

    t.asset.mint(&t.collector, &(ART_PRICE * 2));

    assert!(t.gallery.try_buy_art(&t.collector, &auction_id, &(ART_PRICE - 1)).is_err());
    assert!(t.gallery.try_buy_art(&t.collector, &auction_id, &(ART_PRICE + 1)).is_err());

    assert_eq!(t.gallery.owner_of(&art_id), t.artist);
    assert_eq!(t.token.balance(&t.artist), 0);
    assert!(t.gallery.is_on_auction(&art_id));

    t.gallery.buy_art(&t.collector, &auction_id, &ART_PRICE);
    assert_eq!(t.gallery.owner_of(&art_id), t.collector);
}

#[test]
#[should_panic(expected = "Error(Contract, #204)")]
fn test_buy_art_underpayment_error() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);
    let auction_id = t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);

    t.asset.mint(&t.collector, &ART_PRICE);
    t.gallery.buy_art(&t.collector, &auction_id, &(ART_PRICE - 1));
}

#[test]
#[should_panic(expected = "Error(Contract, #205)")]
fn test_buy_art_after_cancel() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);
    let auction_id = t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);
    t.gallery.cancel_auction(&t.artist, &auction_id);

    t.asset.mint(&t.collector, &ART_PRICE);
    t.gallery.buy_art(&t.collector, &auction_id, &ART_PRICE);
}

#[test]
#[should_panic(expected = "Error(Contract, #200)")]
fn test_buy_art_unknown_auction() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);

    t.gallery.buy_art(&t.collector, &4, &ART_PRICE);
}

#[test]
fn test_resale_after_purchase() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);
    let auction_id = t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);

    t.asset.mint(&t.collector, &ART_PRICE);
    t.gallery.buy_art(&t.collector, &auction_id, &ART_PRICE);

    // The buyer owns the artwork outright and can list it again.
    let resale = t.gallery.create_auction(&t.collector, &art_id, &(ART_PRICE * 3));
    assert_eq!(resale, 1);
    assert!(t.gallery.is_on_auction(&art_id));

    t.asset.mint(&t.artist, &(ART_PRICE * 3));
    t.gallery.buy_art(&t.artist, &resale, &(ART_PRICE * 3));
    assert_eq!(t.gallery.owner_of(&art_id), t.artist);
}

#[test]
fn test_pause_gates_mutations() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);
    let auction_id = t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);

    t.gallery.set_paused(&t.admin, &true);

    t.asset.mint(&t.collector, &ART_PRICE);
    assert!(t
        .gallery
        .try_create_art(
            &t.artist,
            &String::from_str(&e, "Art2"),
            &String::from_str(&e, "Description"),
            &String::from_str(&e, "https://via.placeholder.com/150"),
            &pass_id,
        )
        .is_err());
    assert!(t.gallery.try_create_auction(&t.artist, &art_id, &ART_PRICE).is_err());
    assert!(t.gallery.try_buy_art(&t.collector, &auction_id, &ART_PRICE).is_err());
    assert!(t.gallery.try_cancel_auction(&t.artist, &auction_id).is_err());
    assert!(t.gallery.try_transfer(&t.artist, &t.collector, &art_id).is_err());

    // Reads stay open while paused.
    assert_eq!(t.gallery.owner_of(&art_id), t.artist);
    assert!(t.gallery.is_on_auction(&art_id));

    t.gallery.set_paused(&t.admin, &false);
    t.gallery.buy_art(&t.collector, &auction_id, &ART_PRICE);
    assert_eq!(t.gallery.owner_of(&art_id), t.collector);
}

#[test]
#[should_panic(expected = "Error(Contract, #201)")]
fn test_set_paused_requires_admin() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);

    t.gallery.set_paused(&t.collector, &true);
}

#[test]
fn test_transfer_from_with_approval() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);

    t.gallery.approve(&t.artist, &t.collector, &art_id, &100);
    assert_eq!(t.gallery.get_approved(&art_id), Some(t.collector.clone()));

    t.gallery.transfer_from(&t.collector, &t.artist, &t.collector, &art_id);

    assert_eq!(t.gallery.owner_of(&art_id), t.collector);
    assert_eq!(t.gallery.get_approved(&art_id), None);
    assert_eq!(t.gallery.balance(&t.artist), 0);
    assert_eq!(t.gallery.balance(&t.collector), 1);
}

#[test]
#[should_panic(expected = "Error(Contract, #201)")]
fn test_transfer_from_unauthorized() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);

    t.gallery.transfer_from(&t.collector, &t.artist, &t.collector, &art_id);
}

#[test]
fn test_create_auction_operator_rejected() {
    let e = Env::default();
    e.mock_all_auths();

    let t = setup(&e);
    let pass_id = mint_pass(&t);
    let art_id = create_art(&e, &t, pass_id);

    // Listing stays an owner-only operation even for operators.
    t.gallery.approve_for_all(&t.artist, &t.collector, &100);
    assert!(t.gallery.try_create_auction(&t.collector, &art_id, &ART_PRICE).is_err());

    let auction_id = t.gallery.create_auction(&t.artist, &art_id, &ART_PRICE);
    assert_eq!(auction_id, 0);
}
