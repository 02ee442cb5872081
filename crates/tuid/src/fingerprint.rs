use std::sync::LazyLock;

use sha1::{Digest, Sha1};

use crate::{RandSource, ThreadRandom};

/// Bytes substituted for the hardware address when none is available.
const FALLBACK_LEN: usize = 20;
/// Extra random bytes mixed in so processes on one host diverge.
const SALT_LEN: usize = 2;

static FINGERPRINT: LazyLock<i64> =
    LazyLock::new(|| derive_fingerprint(&MacAddressIdentity, &ThreadRandom));

/// Something that can report the host's hardware identity.
pub trait HostIdentity {
    /// The primary network hardware address, or `None` if it cannot be read.
    fn hardware_address(&self) -> Option<Vec<u8>>;
}

/// Reads the primary network interface's MAC address.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacAddressIdentity;

impl HostIdentity for MacAddressIdentity {
    fn hardware_address(&self) -> Option<Vec<u8>> {
        match mac_address::get_mac_address() {
            Ok(Some(mac)) => Some(mac.bytes().to_vec()),
            _ => None,
        }
    }
}

/// The process fingerprint, derived from [`MacAddressIdentity`] and
/// [`ThreadRandom`] on first call and fixed for the life of the process.
///
/// ```
/// assert_eq!(tuid::fingerprint(), tuid::fingerprint());
/// ```
pub fn fingerprint() -> i64 {
    *FINGERPRINT
}

/// Hashes the host identity (or 20 random bytes if it is unavailable) plus
/// two random bytes with SHA-1 and reads the last eight digest bytes as a
/// big-endian `i64`.
pub fn derive_fingerprint<H, R>(identity: &H, rng: &R) -> i64
where
    H: HostIdentity + ?Sized,
    R: RandSource<[u8; FALLBACK_LEN]> + RandSource<[u8; SALT_LEN]> + ?Sized,
{
    let address = identity.hardware_address().unwrap_or_else(|| {
        #[cfg(feature = "tracing")]
        tracing::debug!("no hardware address available, fingerprinting random bytes");
        RandSource::<[u8; FALLBACK_LEN]>::rand(rng).to_vec()
    });
    let salt = RandSource::<[u8; SALT_LEN]>::rand(rng);

    let mut hasher = Sha1::new();
    hasher.update(&address);
    hasher.update(salt);
    let digest = hasher.finalize();

    let mut tail = [0_u8; 8];
    tail.copy_from_slice(&digest[digest.len() - 8..]);
    i64::from_be_bytes(tail)
}
