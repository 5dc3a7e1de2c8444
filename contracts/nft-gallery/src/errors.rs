use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum GalleryError {
    /// Indicates a non-existent artwork, auction, or cited pass id.
    NotFound = 200,
    /// Indicates the caller lacks the required ownership, approval, or
    /// admin role.
    Unauthorized = 201,
    /// Indicates the gallery is administratively halted.
    Paused = 202,
    /// Indicates an empty or malformed argument.
    InvalidInput = 203,
    /// Indicates the payment does not match the auction price.
    InsufficientPayment = 204,
    /// Indicates a state conflict: artwork already on auction, auction
    /// already finished, or a locked transfer.
    Conflict = 205,
    /// Indicates overflow when adding two values.
    MathOverflow = 206,
}
