use crate::foundation::error::{SketchError, SketchResult};
use crate::host::rand::Sfc32;

/// Base58 alphabet used by fxhash run hashes (lowercase before uppercase).
pub(crate) const BASE58_ALPHABET: &str =
    "123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

const CANONICAL_PREFIX: &str = "oo";
const CANONICAL_BODY_LEN: usize = 49;

/// A host-supplied run identifier (e.g. `ooABC...`).
///
/// The hash names exported files and seeds the run's random source.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FxHash(String);

impl FxHash {
    /// Wrap a hash string. It must be non-empty ASCII alphanumeric so it is safe in filenames.
    pub fn new(hash: impl Into<String>) -> SketchResult<Self> {
        let hash = hash.into();
        if hash.is_empty() {
            return Err(SketchError::validation("hash must not be empty"));
        }
        if !hash.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SketchError::validation(format!(
                "hash \"{hash}\" must be ASCII alphanumeric"
            )));
        }
        Ok(Self(hash))
    }

    /// Produce a canonical-looking hash (`oo` + 49 base58 chars) from a seed.
    pub fn generate(seed: u64) -> Self {
        let lo = seed as u32;
        let hi = (seed >> 32) as u32;
        let mut rng = Sfc32::new([lo, hi, lo ^ 0x9e37_79b9, hi ^ 0x85eb_ca6b]);
        for _ in 0..12 {
            rng.next_u32();
        }

        let alphabet = BASE58_ALPHABET.as_bytes();
        let mut out = String::with_capacity(CANONICAL_PREFIX.len() + CANONICAL_BODY_LEN);
        out.push_str(CANONICAL_PREFIX);
        for _ in 0..CANONICAL_BODY_LEN {
            let i = (rng.next_f64() * alphabet.len() as f64) as usize;
            out.push(char::from(alphabet[i.min(alphabet.len() - 1)]));
        }
        Self(out)
    }

    /// Borrow the hash text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the hash has the fxhash shape: `oo` followed by 49 base58 characters.
    pub fn is_canonical(&self) -> bool {
        self.0
            .strip_prefix(CANONICAL_PREFIX)
            .is_some_and(|body| {
                body.len() == CANONICAL_BODY_LEN
                    && body.chars().all(|c| BASE58_ALPHABET.contains(c))
            })
    }

    /// The four `sfc32` seed words derived from the hash.
    ///
    /// The first two characters are dropped, the rest is cut into chunks of `len / 4`
    /// characters (the full hash length), and each complete chunk is base58-decoded with
    /// 32-bit wrapping. Missing words are zero.
    pub fn seeds(&self) -> [u32; 4] {
        let mut seeds = [0u32; 4];
        let chunk_len = self.0.len() / 4;
        if chunk_len == 0 {
            return seeds;
        }

        let body = self.0.get(2..).unwrap_or("");
        let chunks = body.as_bytes().chunks_exact(chunk_len);
        for (slot, chunk) in seeds.iter_mut().zip(chunks) {
            *slot = base58_decode_wrapping(chunk);
        }
        seeds
    }

    /// A fresh random source for this hash.
    pub fn rng(&self) -> Sfc32 {
        Sfc32::new(self.seeds())
    }
}

impl TryFrom<String> for FxHash {
    type Error = SketchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FxHash> for String {
    fn from(value: FxHash) -> Self {
        value.0
    }
}

impl std::fmt::Display for FxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// Unknown characters decode as -1; the accumulator wraps like a JS `| 0`.
fn base58_decode_wrapping(chunk: &[u8]) -> u32 {
    let alphabet = BASE58_ALPHABET.as_bytes();
    let acc = chunk.iter().fold(0i32, |acc, &c| {
        let digit = alphabet
            .iter()
            .position(|&a| a == c)
            .map_or(-1i64, |i| i as i64);
        (i64::from(acc) * 58 + digit) as i32
    });
    acc as u32
}

#[cfg(test)]
#[path = "../../tests/unit/host/hash.rs"]
mod tests;
