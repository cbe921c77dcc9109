use crate::models::GeneratorConfig;
use rand::Rng;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "~!@#$%^&*(){}[]?><;:";

/// Characters eligible for sampling under a given Configuration.
///
/// Always starts with the upper- and lowercase letters, so it is never empty.
/// Digits and symbols follow in that order when enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<u8>,
}

impl Alphabet {
    pub fn for_config(config: &GeneratorConfig) -> Self {
        let mut chars = String::with_capacity(
            UPPERCASE.len() + LOWERCASE.len() + DIGITS.len() + SYMBOLS.len(),
        );
        chars.push_str(UPPERCASE);
        chars.push_str(LOWERCASE);

        if config.include_digits {
            chars.push_str(DIGITS);
        }
        if config.include_symbols {
            chars.push_str(SYMBOLS);
        }

        Self {
            chars: chars.into_bytes(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.chars.contains(&(c as u8))
    }

    pub fn as_str(&self) -> &str {
        // Built only from the ASCII class constants above
        std::str::from_utf8(&self.chars).unwrap_or_default()
    }

    fn pick<R: Rng>(&self, rng: &mut R) -> char {
        self.chars[rng.random_range(0..self.chars.len())] as char
    }
}

/// Generate a password for `config` using the thread-local CSPRNG.
pub fn generate(config: &GeneratorConfig) -> String {
    generate_with(&mut rand::rng(), config)
}

/// Generate a password for `config` from the given RNG.
///
/// Each of the `config.length` positions is sampled independently and
/// uniformly from the [`Alphabet`], with replacement.
pub fn generate_with<R: Rng>(rng: &mut R, config: &GeneratorConfig) -> String {
    let alphabet = Alphabet::for_config(config);
    let length = config.length.get();

    let password: String = (0..length).map(|_| alphabet.pick(rng)).collect();

    tracing::trace!(
        "Generated password: length={}, alphabet_size={}",
        length,
        alphabet.len()
    );

    password
}
