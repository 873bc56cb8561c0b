//! Agent ID generation and validation: `age-<22-char-unique-token>`.
//!
//! The original (`examples/original_source/pkg/ids/id.go`) mints ids with
//! `xid.New()`, a sortable 20-char token. `nanoid` is this crate's analogue:
//! it has no external sortability requirement in `spec.md`, only syntactic
//! validity, so a fixed-length random token serves the same role.

const PREFIX: &str = "age";
const TOKEN_LEN: usize = 22;

/// Alphanumeric only: nanoid's default alphabet includes `-` and `_`, which
/// would make a generated token itself split on `-` and fail `valid`.
const TOKEN_ALPHABET: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

/// Mint a fresh, syntactically valid agent id.
pub fn unique_agent() -> String {
    format!("{}-{}", PREFIX, nanoid::nanoid!(TOKEN_LEN, &TOKEN_ALPHABET))
}

/// Validity is purely syntactic: exactly two dash-separated segments, the
/// first equal to `"age"`, the second non-empty.
pub fn valid(id: &str) -> bool {
    let mut parts = id.split('-');
    let (Some(prefix), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    prefix == PREFIX && !token.is_empty()
}
