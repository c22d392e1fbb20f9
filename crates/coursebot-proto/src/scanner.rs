//! Run tokenizer for course tokens.
//!
//! Splits a string into maximal alternating runs of digit and non-digit
//! characters. This one rule disambiguates "department+number", "topic
//! code", and "semester+year" segments without a stateful lexer: the run
//! count and run kinds tell the caller what it is looking at.

/// Split `input` into maximal runs of digit / non-digit characters.
///
/// `"AE8803"` → `["AE", "8803"]`, `"sp24"` → `["sp", "24"]`,
/// `"NON"` → `["NON"]`, `""` → `[]`.
pub(crate) fn runs(input: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_digit: Option<bool> = None;

    for (i, c) in input.char_indices() {
        let digit = c.is_ascii_digit();
        if let Some(prev) = prev_digit {
            if prev != digit {
                out.push(&input[start..i]);
                start = i;
            }
        }
        prev_digit = Some(digit);
    }

    if prev_digit.is_some() {
        out.push(&input[start..]);
    }

    out
}

/// True if the run starts with an ASCII digit (i.e. it is a digit run;
/// runs never mix kinds).
pub(crate) fn is_digit_run(run: &str) -> bool {
    run.as_bytes().first().is_some_and(|b| b.is_ascii_digit())
}
