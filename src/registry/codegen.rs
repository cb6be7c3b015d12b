use nanoid::nanoid;

/// Alphanumeric alphabet, 62 symbols. Six characters give ~5.6e10
/// combinations, so duplicate candidates are rare and the retry loop in the
/// registry almost never runs more than once.
pub const CODE_ALPHABET: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

pub const CODE_LENGTH: usize = 6;

/// Source of candidate short codes. Implementations are pure generators and
/// never talk to storage; uniqueness is the store's job.
pub trait CodeGenerator {
    fn generate(&self) -> String;
}

/// Random generator backed by nanoid over a configurable alphabet.
pub struct RandomCodeGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(alphabet: Vec<char>, length: usize) -> Self {
        Self { alphabet, length }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(CODE_ALPHABET.to_vec(), CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        // The macro's size argument must be a single token tree
        nanoid!((self.length), &self.alphabet)
    }
}
