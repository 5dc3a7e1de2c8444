use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ArtistPassError {
    /// Indicates a non-existent or revoked `token_id`.
    NotFound = 100,
    /// Indicates the caller lacks the required ownership, approval, or
    /// admin role.
    Unauthorized = 101,
    /// Indicates the registry is administratively halted.
    Paused = 102,
    /// Indicates an empty or malformed argument.
    InvalidInput = 103,
    /// Indicates the payment does not cover the mint price.
    InsufficientPayment = 104,
    /// Indicates the cap on live passes has been reached.
    SupplyExhausted = 105,
    /// Indicates overflow when adding two values.
    MathOverflow = 106,
}
