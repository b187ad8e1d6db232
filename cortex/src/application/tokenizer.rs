// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Word tokenizer shared by the keyword matcher.

/// Characters that end the current token.
pub const DELIMITERS: [char; 5] = [' ', '-', '_', '/', '.'];

fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Split `text` into lowercase tokens, in order of appearance.
///
/// Only the characters in [`DELIMITERS`] separate tokens; everything else,
/// tabs and punctuation included, is kept inside the current token. Runs of
/// delimiters never produce empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(is_delimiter)
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}
